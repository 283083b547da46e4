//! Runtime configuration read from the environment.

use thiserror::Error;
use url::Url;

use crate::analysis::analyst::DEFAULT_MAX_TOKENS;
use crate::llm::groq::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Provider API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Model override.
pub const MODEL_ENV: &str = "LEXIMIND_MODEL";
/// Provider base URL override.
pub const BASE_URL_ENV: &str = "LEXIMIND_API_BASE_URL";
/// Output token budget override.
pub const MAX_TOKENS_ENV: &str = "LEXIMIND_MAX_TOKENS";
/// HTTP listen port.
pub const PORT_ENV: &str = "LEXIMIND_PORT";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The provider base URL does not parse.
    #[error("invalid LEXIMIND_API_BASE_URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    InvalidValue(String),
}

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Provider API key; `None` blocks every analysis.
    pub api_key: Option<String>,
    /// Provider base URL.
    pub api_base_url: String,
    /// Provider model identifier.
    pub model: String,
    /// Output token budget per completion.
    pub max_tokens: u32,
    /// HTTP listen port.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            port: DEFAULT_PORT,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset;
    /// unparsable numbers fall back to their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_key: get(API_KEY_ENV),
            api_base_url: get(BASE_URL_ENV).unwrap_or(defaults.api_base_url),
            model: get(MODEL_ENV).unwrap_or(defaults.model),
            max_tokens: parse_or(MAX_TOKENS_ENV, get(MAX_TOKENS_ENV), defaults.max_tokens),
            port: parse_or(PORT_ENV, get(PORT_ENV), defaults.port),
        }
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.api_base_url)?;

        if self.model.is_empty() {
            return Err(ConfigError::InvalidValue(format!("{MODEL_ENV} must not be empty")));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue(format!("{MAX_TOKENS_ENV} must be > 0")));
        }

        Ok(())
    }

    /// Whether a provider credential is configured.
    #[must_use]
    pub const fn credential_loaded(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    raw.map_or(default, |value| {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!("ignoring invalid {name}={value:?}, using {default}");
            default
        })
    })
}
