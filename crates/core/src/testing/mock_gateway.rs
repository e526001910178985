//! Mock gateway for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::llm::{GatewayError, LlmGateway};

/// Mock implementation of the [`LlmGateway`] trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable response text
/// - Stream that same text as fixed-size fragments
/// - Track prompts for assertions
/// - Simulate failures and slow providers
///
/// # Example
///
/// ```rust,ignore
/// use blueprint_core::testing::MockGateway;
///
/// let gateway = MockGateway::new();
/// gateway.set_response("Hello world").await;
///
/// let text = gateway.generate("greet me").await?;
/// assert_eq!(text, "Hello world");
///
/// let prompts = gateway.recorded_prompts().await;
/// assert_eq!(prompts, vec!["greet me"]);
/// ```
pub struct MockGateway {
    /// Response text returned by `generate` and chunked by
    /// `stream_generate`.
    response: Arc<RwLock<String>>,
    /// Fragment size (in characters) used when streaming.
    fragment_len: Arc<RwLock<usize>>,
    /// Model names returned by `list_models`.
    models: Arc<RwLock<Vec<String>>>,
    /// If set, the next operation fails with this error.
    next_error: Arc<RwLock<Option<GatewayError>>>,
    /// Recorded prompts.
    prompts: Arc<RwLock<Vec<String>>>,
    /// If set, sleep this long before each fragment (and before the
    /// one-shot response).
    stall: Arc<RwLock<Option<Duration>>>,
}

impl std::fmt::Debug for MockGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGateway").finish_non_exhaustive()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Create a new mock with an empty response.
    pub fn new() -> Self {
        Self {
            response: Arc::new(RwLock::new(String::new())),
            fragment_len: Arc::new(RwLock::new(4)),
            models: Arc::new(RwLock::new(vec!["mock-model".to_string()])),
            next_error: Arc::new(RwLock::new(None)),
            prompts: Arc::new(RwLock::new(Vec::new())),
            stall: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the response text returned by subsequent generations.
    pub async fn set_response(&self, response: impl Into<String>) {
        *self.response.write().await = response.into();
    }

    /// Set the streaming fragment size in characters (minimum 1).
    pub async fn set_fragment_len(&self, len: usize) {
        *self.fragment_len.write().await = len.max(1);
    }

    /// Set the model names returned by `list_models`.
    pub async fn set_models(&self, models: Vec<String>) {
        *self.models.write().await = models;
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: GatewayError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay each fragment by the given duration (simulates a slow
    /// provider; useful for cancellation tests).
    pub async fn set_stall(&self, stall: Duration) {
        *self.stall.write().await = Some(stall);
    }

    /// Get recorded prompts.
    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.read().await.clone()
    }

    /// Number of generation calls observed.
    pub async fn generation_count(&self) -> usize {
        self.prompts.read().await.len()
    }

    async fn take_error(&self) -> Option<GatewayError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, prompt: &str) {
        self.prompts.write().await.push(prompt.to_string());
    }

    async fn maybe_stall(&self) {
        if let Some(stall) = *self.stall.read().await {
            tokio::time::sleep(stall).await;
        }
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(prompt).await;
        self.maybe_stall().await;
        Ok(self.response.read().await.clone())
    }

    async fn stream_generate(
        &self,
        prompt: &str,
        sink: mpsc::Sender<String>,
    ) -> Result<(), GatewayError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.record(prompt).await;

        let response = self.response.read().await.clone();
        let fragment_len = *self.fragment_len.read().await;

        let chars: Vec<char> = response.chars().collect();
        for fragment in chars.chunks(fragment_len) {
            self.maybe_stall().await;
            let fragment: String = fragment.iter().collect();
            if sink.send(fragment).await.is_err() {
                return Err(GatewayError::Cancelled);
            }
        }

        Ok(())
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(self.models.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_returns_configured_response() {
        let gateway = MockGateway::new();
        gateway.set_response("Hello world").await;

        let text = gateway.generate("greet me").await.unwrap();
        assert_eq!(text, "Hello world");
        assert_eq!(gateway.recorded_prompts().await, vec!["greet me"]);
    }

    #[tokio::test]
    async fn test_stream_chunks_response() {
        let gateway = MockGateway::new();
        gateway.set_response("abcdefgh").await;
        gateway.set_fragment_len(3).await;

        let (tx, mut rx) = mpsc::channel(8);
        gateway.stream_generate("p", tx).await.unwrap();

        let mut fragments = Vec::new();
        while let Some(fragment) = rx.recv().await {
            fragments.push(fragment);
        }
        assert_eq!(fragments, vec!["abc", "def", "gh"]);
    }

    #[tokio::test]
    async fn test_error_injection_consumed() {
        let gateway = MockGateway::new();
        gateway.set_response("ok").await;
        gateway.set_next_error(GatewayError::EmptyResponse).await;

        let result = gateway.generate("p").await;
        assert!(matches!(result, Err(GatewayError::EmptyResponse)));

        // Error should be consumed
        let result = gateway.generate("p").await;
        assert_eq!(result.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_dropped_receiver_cancels_stream() {
        let gateway = MockGateway::new();
        gateway.set_response("abcdefgh").await;

        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = gateway.stream_generate("p", tx).await;
        assert!(matches!(result, Err(GatewayError::Cancelled)));
    }

    #[tokio::test]
    async fn test_test_connection_uses_generate() {
        let gateway = MockGateway::new();
        gateway.set_response("pong").await;

        gateway.test_connection().await.unwrap();
        assert_eq!(gateway.recorded_prompts().await, vec!["ping"]);
    }

    #[tokio::test]
    async fn test_list_models() {
        let gateway = MockGateway::new();
        gateway
            .set_models(vec!["a".to_string(), "b".to_string()])
            .await;

        assert_eq!(gateway.list_models().await.unwrap(), vec!["a", "b"]);
    }
}
