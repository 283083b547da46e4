//! Chat completion boundary: message types, the provider trait, and the Groq adapter.

pub mod error;
pub mod groq;

pub use error::{ProviderError, ProviderResult};
pub use groq::GroqChat;

use serde::Serialize;

/// Role of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instruction that frames the model's behaviour.
    System,
    /// End-user content.
    User,
}

/// A single `{role, content}` chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Everything needed for one chat completion exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    /// Provider model identifier.
    pub model: String,
    /// Ordered conversation, system instruction first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of output tokens.
    pub max_tokens: u32,
}

/// A hosted text-completion provider.
///
/// Implementations perform exactly one blocking request per call and never retry.
pub trait CompletionProvider: Send + Sync {
    /// Whether a credential is available. Callers must not invoke
    /// [`CompletionProvider::complete`] when this is `false`.
    fn credential_loaded(&self) -> bool;

    /// Run one completion and return the text of the first choice.
    ///
    /// # Errors
    /// Returns an error on any transport, status, or payload failure.
    fn complete(&self, request: &CompletionRequest) -> ProviderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_serialize_with_lowercase_roles() {
        let messages = vec![ChatMessage::system("frame"), ChatMessage::user("facts")];
        let encoded = serde_json::to_value(&messages).unwrap_or_default();
        assert_eq!(
            encoded,
            serde_json::json!([
                {"role": "system", "content": "frame"},
                {"role": "user", "content": "facts"},
            ])
        );
    }
}
