use relay_core::error::{ConfigError, Error as CoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {provider} - {message}")]
    Api { provider: String, message: String },

    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    #[error("Authentication failed: {provider} - {message}")]
    AuthenticationFailed { provider: String, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LlmError>;

impl LlmError {
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    pub fn authentication_failed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Maps a non-success HTTP status and body to the matching variant.
    pub fn from_status(provider: &str, status: u16, body: &str) -> Self {
        match status {
            429 => Self::rate_limited(provider),
            401 | 403 => Self::authentication_failed(provider, format!("{}: {}", status, body)),
            _ => Self::api(provider, format!("{}: {}", status, body)),
        }
    }
}
