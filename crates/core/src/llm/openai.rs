//! Hosted chat-completions adapter (OpenAI API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::error::GatewayError;
use super::lines::LineReader;
use super::traits::LlmGateway;

const PROVIDER: &str = "openai";
const DEFAULT_API_BASE: &str = "https://api.openai.com";
const DONE_SENTINEL: &str = "[DONE]";

/// Chat-completions API client.
///
/// Speaks the standard chat-completions surface: a single user-role
/// message per request, `choices[0].message.content` on the non-streaming
/// path and `choices[0].delta.content` SSE events terminated by the
/// `[DONE]` sentinel on the streaming path.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiClient {
    /// Create a new client bound to the given model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Set a custom API base URL (for proxies or compatible servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn post_chat(
        &self,
        prompt: &str,
        stream: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
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
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatStreamEvent {
    #[serde(default)]
    choices: Vec<ChatStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatStreamChoice {
    delta: ChatDelta,
}

#[derive(Debug, Deserialize)]
struct ChatDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelListing {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

#[async_trait]
impl LlmGateway for OpenAiClient {
    fn provider(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self.post_chat(prompt, false).await?;

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;

        let choice = chat
            .choices
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)?;

        Ok(choice.message.content.unwrap_or_default())
    }

    async fn stream_generate(
        &self,
        prompt: &str,
        sink: mpsc::Sender<String>,
    ) -> Result<(), GatewayError> {
        let response = self.post_chat(prompt, true).await?;
        let mut lines = LineReader::new(response);

        while let Some(line) = lines.next_line().await? {
            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data.is_empty() {
                continue;
            }
            if data == DONE_SENTINEL {
                break;
            }

            let event: ChatStreamEvent =
                serde_json::from_str(data).map_err(|e| GatewayError::Json(e.to_string()))?;

            let Some(choice) = event.choices.into_iter().next() else {
                continue;
            };
            if let Some(content) = choice.delta.content {
                if !content.is_empty() && sink.send(content).await.is_err() {
                    return Err(GatewayError::Cancelled);
                }
            }
        }

        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.api_base))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Api {
                provider: PROVIDER,
                status: response.status().to_string(),
            });
        }

        let listing: ModelListing = response
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;

        Ok(listing.data.into_iter().map(|m| m.id).collect())
    }
}
