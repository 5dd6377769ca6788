//! # Error Types
//!
//! Errors surfaced by the analyst client. Task-level failures never reach the
//! caller as `Err`: they are converted into a `Failed` status on the listener and
//! logged under [`AnalystError::message_key`].

use std::time::Duration;
use thiserror::Error;

/// Crate-wide result alias
pub type AnalystResult<T> = Result<T, AnalystError>;

#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to encode request payload: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Failed to decode analysis response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("Invalid service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No async runtime available: {0}")]
    Runtime(String),
}

impl AnalystError {
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Stable key identifying the failure class in log output
    pub fn message_key(&self) -> &'static str {
        match self {
            AnalystError::Transport(TransportError::Timeout(_)) => "spatialanalyst.timeout",
            AnalystError::Transport(_) => "spatialanalyst.transport",
            AnalystError::Encoding(_) => "spatialanalyst.encoding",
            AnalystError::Decoding(_) => "spatialanalyst.decoding",
            AnalystError::InvalidUrl { .. } => "spatialanalyst.url",
            AnalystError::Configuration(_) => "spatialanalyst.config",
            AnalystError::Runtime(_) => "spatialanalyst.runtime",
        }
    }
}

/// Errors raised by a [`Transport`](crate::transport::Transport) implementation
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection failed: {0}")]
    Connection(String),
}

impl TransportError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}
