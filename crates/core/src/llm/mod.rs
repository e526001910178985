//! LLM gateway abstraction.
//!
//! A uniform four-operation contract over LLM provider back-ends:
//! one-shot generation, streaming generation, a connectivity probe, and
//! model enumeration. Adapters are peers behind the [`LlmGateway`] trait,
//! each speaking its provider's native wire format:
//!
//! - [`OpenAiClient`] - hosted chat-completions API
//! - [`GeminiClient`] - hosted generative-language API
//! - [`OllamaClient`] - local model server
//!
//! Streaming delivers text fragments to a caller-owned bounded
//! [`tokio::sync::mpsc`] sender in arrival order; see [`LlmGateway`] for
//! the cancellation and backpressure contract. No adapter retries, caches
//! or accounts for tokens.

mod error;
mod gemini;
mod lines;
mod ollama;
mod openai;
mod traits;

pub use error::GatewayError;
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use traits::LlmGateway;

use crate::config::{LlmConfig, LlmProvider};

/// Create a gateway adapter for the configured provider.
pub fn create_gateway(config: &LlmConfig) -> Result<Box<dyn LlmGateway>, GatewayError> {
    let api_key = config.api_key.clone().unwrap_or_default();

    match config.provider {
        LlmProvider::OpenAi => {
            let mut client = OpenAiClient::new(api_key, config.model.clone());
            if let Some(base) = &config.api_base {
                client = client.with_api_base(base.clone());
            }
            Ok(Box::new(client))
        }
        LlmProvider::Gemini => {
            let mut client = GeminiClient::new(api_key, config.model.clone())?;
            if let Some(base) = &config.api_base {
                client = client.with_api_base(base.clone());
            }
            Ok(Box::new(client))
        }
        LlmProvider::Ollama => {
            let base = config.api_base.clone().unwrap_or_default();
            Ok(Box::new(OllamaClient::new(base, config.model.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: LlmProvider) -> LlmConfig {
        LlmConfig {
            provider,
            model: "test-model".to_string(),
            api_key: Some("key".to_string()),
            api_base: None,
        }
    }

    #[test]
    fn test_create_openai_gateway() {
        let gateway = create_gateway(&config(LlmProvider::OpenAi)).unwrap();
        assert_eq!(gateway.provider(), "openai");
        assert_eq!(gateway.model(), "test-model");
    }

    #[test]
    fn test_create_gemini_gateway() {
        let gateway = create_gateway(&config(LlmProvider::Gemini)).unwrap();
        assert_eq!(gateway.provider(), "gemini");
    }

    #[test]
    fn test_create_ollama_gateway_without_base() {
        let mut cfg = config(LlmProvider::Ollama);
        cfg.api_key = None;
        let gateway = create_gateway(&cfg).unwrap();
        assert_eq!(gateway.provider(), "ollama");
    }
}
