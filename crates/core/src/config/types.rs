use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ConfigError;
use crate::logging::LoggingConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// LLM gateway configuration (optional; omit to run without a gateway).
    #[serde(default)]
    pub llm: Option<LlmConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(llm) = &self.llm {
            llm.validate().map_err(ConfigError::ValidationError)?;
        }
        Ok(())
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("blueprint.db")
}

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Hosted chat-completions API.
    OpenAi,
    /// Hosted generative-language API.
    Gemini,
    /// Local Ollama instance.
    Ollama,
}

/// LLM gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider.
    pub provider: LlmProvider,
    /// Model name/identifier.
    pub model: String,
    /// API key (not required for local Ollama).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted servers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl LlmConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("LLM model name cannot be empty".to_string());
        }

        // API key is optional for the local provider; hosted providers
        // need a key unless a proxy base URL is supplied.
        if self.provider != LlmProvider::Ollama
            && self.api_key.is_none()
            && self.api_base.is_none()
        {
            return Err(format!(
                "LLM provider {:?} requires api_key or api_base",
                self.provider
            ));
        }

        Ok(())
    }
}
