//! Core library for Blueprint, a service that ingests project-description
//! documents and talks to LLM providers.
//!
//! Two independently usable components:
//! - [`scoring`] grades a submitted document bundle for completeness and
//!   produces a follow-up clarification prompt.
//! - [`llm`] offers a uniform generation surface over multiple provider
//!   adapters (hosted chat, hosted generative, local model server).
//!
//! A typical composition feeds the scorer's prompt into the gateway to
//! elicit clarification from the submitter. The remaining modules are the
//! glue the surrounding application needs: [`config`], [`logging`] and
//! [`db`].

pub mod config;
pub mod db;
pub mod llm;
pub mod logging;
pub mod scoring;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, Config, ConfigError, DatabaseConfig, LlmConfig, LlmProvider,
};
pub use db::DbError;
pub use llm::{
    create_gateway, GatewayError, GeminiClient, LlmGateway, OllamaClient, OpenAiClient,
};
pub use logging::{
    init_logging, mcp_target, LoggingConfig, LoggingError, LoggingGuards, MCP_TARGET,
};
pub use scoring::{CompletenessScorer, DocumentValue, ScoringResult, EXPECTED_CATEGORIES};
