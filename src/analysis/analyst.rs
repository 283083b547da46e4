//! The analysis action: gates, prompt, one provider call, split.

use std::sync::Arc;

use crate::llm::{CompletionProvider, CompletionRequest};

use super::error::{AnalysisError, AnalysisResult};
use super::prompt::build_prompts;
use super::request::AnalysisRequest;
use super::splitter::{ParsedAnalysis, split_response};

/// Default output token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 4_096;

/// Runs legal analyses against a completion provider.
///
/// Holds no per-request state; every call to [`LegalAnalyst::analyze`] is independent.
#[derive(Clone)]
pub struct LegalAnalyst {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    max_tokens: u32,
}

impl LegalAnalyst {
    /// Create an analyst for `model`.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the output token budget.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Model identifier sent to the provider.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether the provider has a credential; analyses are blocked otherwise.
    #[must_use]
    pub fn credential_loaded(&self) -> bool {
        self.provider.credential_loaded()
    }

    /// Build the provider request for `request` without sending it.
    #[must_use]
    pub fn completion_request(&self, request: &AnalysisRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: build_prompts(request).into_messages(),
            temperature: request.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Run one analysis. Blocks for the duration of the provider call.
    ///
    /// # Errors
    /// Returns [`AnalysisError::MissingCredential`], [`AnalysisError::EmptyInput`]
    /// or [`AnalysisError::InvalidTemperature`] without contacting the provider,
    /// and [`AnalysisError::Provider`] when the single provider call fails.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult<ParsedAnalysis> {
        if !self.credential_loaded() {
            return Err(AnalysisError::MissingCredential);
        }
        request.validate()?;

        let completion = self.completion_request(request);
        let raw = self.provider.complete(&completion)?;
        tracing::debug!(raw_len = raw.len(), "provider returned completion");

        Ok(split_response(&raw))
    }
}
