use thiserror::Error;

/// Error type for gateway operations.
///
/// Every provider-specific failure surfaces through this one channel; no
/// adapter has its own error hierarchy. Messages carry the provider's
/// status line or decoder text, never credentials or prompt content.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The network call itself failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-success status.
    #[error("{provider} api error: {status}")]
    Api {
        /// Provider name the failing adapter is bound to.
        provider: &'static str,
        /// Status line as reported by the provider.
        status: String,
    },

    /// The response could not be decoded at the envelope level.
    #[error("JSON error: {0}")]
    Json(String),

    /// The provider returned no candidates or no content parts.
    #[error("empty response")]
    EmptyResponse,

    /// A content part exists but is not textual.
    #[error("unexpected response type")]
    UnexpectedResponseType,

    /// The underlying HTTP client could not be constructed.
    #[error("client construction failed: {0}")]
    Construction(String),

    /// The caller went away before the stream completed.
    #[error("stream cancelled by caller")]
    Cancelled,
}
