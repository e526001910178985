//! Local model server adapter (Ollama API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use super::error::GatewayError;
use super::lines::LineReader;
use super::traits::LlmGateway;

const PROVIDER: &str = "ollama";
const DEFAULT_API_BASE: &str = "http://localhost:11434";

/// Ollama API client for local LLM inference.
///
/// Connects to a local Ollama server. No API key required.
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    api_base: String,
}

impl OllamaClient {
    /// Create a new client bound to the given model.
    ///
    /// An empty `base_url` substitutes the default local server address,
    /// `http://localhost:11434`.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let api_base = if base_url.is_empty() {
            DEFAULT_API_BASE.to_string()
        } else {
            base_url
        };

        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            api_base,
        }
    }

    /// The base URL requests are sent to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn post_generate(
        &self,
        prompt: &str,
        stream: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.api_base))
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Api {
                provider: PROVIDER,
                status: response.status().to_string(),
            });
        }

        Ok(response)
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

#[async_trait]
impl LlmGateway for OllamaClient {
    fn provider(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self.post_generate(prompt, false).await?;

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;

        Ok(body.response)
    }

    /// The streaming body is newline-delimited JSON. Lines that fail to
    /// decode are skipped rather than surfaced; a `done` chunk terminates
    /// the stream normally.
    async fn stream_generate(
        &self,
        prompt: &str,
        sink: mpsc::Sender<String>,
    ) -> Result<(), GatewayError> {
        let response = self.post_generate(prompt, true).await?;
        let mut lines = LineReader::new(response);

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let chunk: OllamaResponse = match serde_json::from_str(&line) {
                Ok(chunk) => chunk,
                Err(e) => {
                    debug!(error = %e, "Skipping malformed stream line");
                    continue;
                }
            };

            if chunk.done {
                break;
            }
            if !chunk.response.is_empty() && sink.send(chunk.response).await.is_err() {
                return Err(GatewayError::Cancelled);
            }
        }

        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.api_base))
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Api {
                provider: PROVIDER,
                status: response.status().to_string(),
            });
        }

        let tags: OllamaTags = response
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
