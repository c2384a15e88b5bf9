// src/error.rs
use thiserror::Error;

/// Any failure of the network call. Connection refused, timeouts, bad HTTP
/// and non-2xx statuses all end up here without further distinction.
#[derive(Debug, Error)]
#[error("request failed: {reason}")]
pub struct TransportError {
    reason: String,
}

impl TransportError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed reply: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidEndpoint { var: &'static str, value: String },

    #[error("{var} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}
