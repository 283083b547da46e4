//! Error taxonomy for a single analysis action.

use thiserror::Error;

use crate::llm::ProviderError;

/// Why an "Analyze" action produced no memo.
///
/// None of these are fatal; every path hands control back to the user.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No provider credential is configured; nothing was sent.
    #[error("cannot proceed: API key is missing")]
    MissingCredential,
    /// The fact pattern is empty; nothing was sent.
    #[error("please enter a fact pattern")]
    EmptyInput,
    /// Temperature outside `[0, 1]`; nothing was sent.
    #[error("temperature must be between 0 and 1, got {0}")]
    InvalidTemperature(f32),
    /// The provider call failed. Not retried.
    #[error("{0}")]
    Provider(#[from] ProviderError),
    /// The blocking worker running the provider call did not complete.
    #[error("analysis worker failed: {0}")]
    Worker(String),
}

impl AnalysisError {
    /// Stable machine-readable label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::EmptyInput => "empty_input",
            Self::InvalidTemperature(_) => "invalid_temperature",
            Self::Provider(_) => "provider_error",
            Self::Worker(_) => "worker_error",
        }
    }

    /// Whether the action was refused before any provider call.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::EmptyInput | Self::InvalidTemperature(_)
        )
    }
}

/// Convenience result alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
