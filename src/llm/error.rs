//! Error types for the completion provider boundary.

use thiserror::Error;

/// Errors produced while talking to the hosted completion provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure or client construction failure.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider answered with a non-success status.
    #[error("provider http status not ok: {status}: {body}")]
    HttpStatusNotOk {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the provider.
        body: String,
    },
    /// The response carried no usable completion choice.
    #[error("provider response malformed: no completion content")]
    MalformedResponse,
    /// No API key was configured for the provider.
    #[error("provider api key is missing")]
    MissingCredential,
}

/// Convenience result alias for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;
