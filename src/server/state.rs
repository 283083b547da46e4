//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::analysis::LegalAnalyst;
use crate::config::AppConfig;
use crate::llm::{CompletionProvider, GroqChat, ProviderError};

/// Shared application state. Immutable once built.
pub struct AppState {
    /// Runs analyses against the configured provider.
    pub analyst: LegalAnalyst,
}

impl AppState {
    /// Create the application state backed by the Groq API.
    ///
    /// Must be called outside of an async context: the blocking HTTP client
    /// owns its own runtime.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Arc<Self>, ProviderError> {
        let chat = GroqChat::new(config.api_key.clone(), &config.api_base_url)?;
        tracing::info!("Completion endpoint: {}", chat.endpoint());

        Ok(Self::with_provider(Arc::new(chat), config))
    }

    /// Create the application state around an arbitrary provider.
    #[must_use]
    pub fn with_provider(provider: Arc<dyn CompletionProvider>, config: &AppConfig) -> Arc<Self> {
        let analyst =
            LegalAnalyst::new(provider, config.model.clone()).with_max_tokens(config.max_tokens);
        Arc::new(Self { analyst })
    }
}
