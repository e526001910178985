//! The gateway contract shared by all provider adapters.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::GatewayError;

/// Uniform contract over LLM provider back-ends.
///
/// Adapters are peers: each binds one model on one provider and exposes
/// the same four operations. Adapters hold no mutable state and are safe
/// for concurrent use across independent calls.
///
/// # Cancellation and deadlines
///
/// Operations follow the usual async convention: dropping a returned
/// future (for example under [`tokio::time::timeout`] or `select!`) aborts
/// the in-flight request, and no further fragments are delivered to the
/// sink afterwards. Adapters install no timeout of their own; without a
/// caller-imposed deadline an operation waits indefinitely for the
/// provider.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Provider name (e.g., "openai", "gemini", "ollama").
    fn provider(&self) -> &str;

    /// Model identifier this adapter is bound to.
    fn model(&self) -> &str;

    /// One-shot completion: the full text of the first candidate.
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Incremental completion: forwards text fragments to `sink` in
    /// arrival order, returning when the provider signals completion.
    ///
    /// The sink is caller-owned and the adapter never closes it; a bounded
    /// sink exerts backpressure on the adapter, one fragment in flight. If
    /// the receiving side is dropped mid-stream the adapter stops and
    /// returns [`GatewayError::Cancelled`].
    async fn stream_generate(
        &self,
        prompt: &str,
        sink: mpsc::Sender<String>,
    ) -> Result<(), GatewayError>;

    /// Liveness probe: issues a minimal "ping" generation and discards the
    /// response content.
    async fn test_connection(&self) -> Result<(), GatewayError> {
        self.generate("ping").await.map(|_| ())
    }

    /// Enumerates the model identifiers the provider advertises, in the
    /// provider's natural order. Duplicates are not de-duplicated.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;
}
