//! Hosted generative-language adapter (Gemini API).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::error::GatewayError;
use super::lines::LineReader;
use super::traits::LlmGateway;

const PROVIDER: &str = "gemini";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Generative-language API client.
///
/// The HTTP client handle is built once at construction and retained for
/// the adapter's lifetime; dropping the adapter releases it. Responses are
/// structured as `candidates[i].content.parts[j]`, where a part is either
/// a textual payload or some other modality.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    /// Create a new client bound to the given model.
    ///
    /// Fails with [`GatewayError::Construction`] when the underlying HTTP
    /// client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Construction(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Set a custom API base URL (for proxies or compatible servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn post_generate(
        &self,
        prompt: &str,
        stream: bool,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = if stream {
            format!(
                "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
                self.api_base, self.model
            )
        } else {
            format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_base, self.model
            )
        };

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

/// A response part: textual payloads carry `text`, other modalities
/// (inline data, function calls) do not.
#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelCatalogue {
    #[serde(default)]
    models: Vec<CatalogueEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    name: String,
}

/// Extract the first candidate's first part as text.
fn first_text(body: GenerateResponse) -> Result<String, GatewayError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or(GatewayError::EmptyResponse)?;

    let part = candidate
        .content
        .parts
        .into_iter()
        .next()
        .ok_or(GatewayError::EmptyResponse)?;

    part.text.ok_or(GatewayError::UnexpectedResponseType)
}

#[async_trait]
impl LlmGateway for GeminiClient {
    fn provider(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self.post_generate(prompt, false).await?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;

        first_text(body)
    }

    async fn stream_generate(
        &self,
        prompt: &str,
        sink: mpsc::Sender<String>,
    ) -> Result<(), GatewayError> {
        let response = self.post_generate(prompt, true).await?;
        let mut lines = LineReader::new(response);

        while let Some(line) = lines.next_line().await? {
            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim();
            if data.is_empty() {
                continue;
            }

            let event: GenerateResponse =
                serde_json::from_str(data).map_err(|e| GatewayError::Json(e.to_string()))?;

            let Some(candidate) = event.candidates.into_iter().next() else {
                continue;
            };
            let text = candidate.content.parts.into_iter().next().and_then(|p| p.text);
            if let Some(text) = text {
                if !text.is_empty() && sink.send(text).await.is_err() {
                    return Err(GatewayError::Cancelled);
                }
            }
        }

        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .client
            .get(format!("{}/v1beta/models", self.api_base))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Api {
                provider: PROVIDER,
                status: response.status().to_string(),
            });
        }

        let catalogue: ModelCatalogue = response
            .json()
            .await
            .map_err(|e| GatewayError::Json(e.to_string()))?;

        Ok(catalogue.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new("key", "gemini-2.0-flash").unwrap();
        assert_eq!(client.provider(), "gemini");
        assert_eq!(client.model(), "gemini-2.0-flash");
        assert_eq!(client.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_custom_api_base() {
        let client = GeminiClient::new("key", "gemini-2.0-flash")
            .unwrap()
            .with_api_base("http://localhost:9999");
        assert_eq!(client.api_base, "http://localhost:9999");
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: "Hello".to_string(),
                }],
            }],
        };

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"contents":[{"parts":[{"text":"Hello"}]}]}"#);
    }

    #[test]
    fn test_first_text_empty_candidates() {
        let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(first_text(body), Err(GatewayError::EmptyResponse)));
    }

    #[test]
    fn test_first_text_empty_parts() {
        let body: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(matches!(first_text(body), Err(GatewayError::EmptyResponse)));
    }

    #[test]
    fn test_first_text_non_textual_part() {
        // An inline-data part carries no `text` field.
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"aGk="}}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            first_text(body),
            Err(GatewayError::UnexpectedResponseType)
        ));
    }

    #[test]
    fn test_first_text_textual_part() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"hi there"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(first_text(body).unwrap(), "hi there");
    }
}
