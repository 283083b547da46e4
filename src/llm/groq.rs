//! Blocking client for Groq's OpenAI-compatible chat completions API.
//!
//! Behaviour:
//! - One `POST {base_url}/chat/completions` per call, bearer authenticated.
//! - No retry and no timeout override: the HTTP client defaults apply.
//! - Only the first choice is read; anything else in the payload is ignored.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::error::{ProviderError, ProviderResult};
use super::{ChatMessage, CompletionProvider, CompletionRequest};

/// Default Groq API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default hosted model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Maximum number of body bytes kept when reporting a failed status.
const ERROR_BODY_LIMIT: usize = 512;

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Blocking Groq chat client.
pub struct GroqChat {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GroqChat {
    /// Create a client for `base_url`. A `None` key yields a client that
    /// reports [`CompletionProvider::credential_loaded`] as `false`.
    ///
    /// The underlying blocking client owns a runtime thread; build and drop
    /// it outside of async contexts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, base_url: &str) -> ProviderResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    /// Endpoint the client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionProvider for GroqChat {
    fn credential_loaded(&self) -> bool {
        self.api_key.is_some()
    }

    fn complete(&self, request: &CompletionRequest) -> ProviderResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)?;

        let body = ChatCompletionBody {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response.text().unwrap_or_default();
            truncate_on_char_boundary(&mut text, ERROR_BODY_LIMIT);
            return Err(ProviderError::HttpStatusNotOk {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload = response.json::<ChatCompletionResponse>()?;
        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::MalformedResponse)
    }
}

fn truncate_on_char_boundary(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut cut = limit;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                ChatMessage::system("You are counsel."),
                ChatMessage::user("FACT PATTERN: a late delivery"),
            ],
            temperature: 0.5,
            max_tokens: 4096,
        }
    }

    /// The blocking client must live entirely on a blocking thread.
    async fn complete_blocking(
        api_key: Option<&str>,
        base_url: String,
    ) -> Option<ProviderResult<String>> {
        let api_key = api_key.map(str::to_string);
        tokio::task::spawn_blocking(move || {
            let chat = GroqChat::new(api_key, &base_url)?;
            chat.complete(&sample_request())
        })
        .await
        .ok()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let chat = GroqChat::new(None, "https://api.groq.com/openai/v1/");
        assert_eq!(
            chat.ok().map(|c| c.endpoint().to_string()),
            Some("https://api.groq.com/openai/v1/chat/completions".to_string())
        );
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let mut text = "ééé".to_string();
        truncate_on_char_boundary(&mut text, 3);
        assert_eq!(text, "é");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_returns_first_choice_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [
                    {"role": "system", "content": "You are counsel."},
                    {"role": "user", "content": "FACT PATTERN: a late delivery"}
                ],
                "temperature": 0.5,
                "max_tokens": 4096
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "<reasoning>r</reasoning>memo"}},
                    {"index": 1, "message": {"role": "assistant", "content": "second"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = complete_blocking(Some("test-key"), server.uri()).await;
        assert_eq!(
            result.and_then(Result::ok),
            Some("<reasoning>r</reasoning>memo".to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API Key"))
            .expect(1)
            .mount(&server)
            .await;

        let result = complete_blocking(Some("bad-key"), server.uri()).await;
        assert!(matches!(
            result,
            Some(Err(ProviderError::HttpStatusNotOk { status: 401, ref body })) if body == "Invalid API Key"
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_choices_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let result = complete_blocking(Some("test-key"), server.uri()).await;
        assert!(matches!(result, Some(Err(ProviderError::MalformedResponse))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = complete_blocking(None, server.uri()).await;
        assert!(matches!(result, Some(Err(ProviderError::MissingCredential))));
    }

    #[test]
    fn test_credential_loaded_follows_key() {
        let with_key = GroqChat::new(Some("k".to_string()), DEFAULT_BASE_URL);
        let without_key = GroqChat::new(None, DEFAULT_BASE_URL);
        assert_eq!(with_key.map(|c| c.credential_loaded()).ok(), Some(true));
        assert_eq!(without_key.map(|c| c.credential_loaded()).ok(), Some(false));
    }
}
