//! Error types for eventdash.

use thiserror::Error;

/// Fallback shown when a list fetch fails without a usable message.
pub const LIST_FALLBACK_MESSAGE: &str = "Could not load events";

/// Fallback shown when a detail fetch fails without a usable message.
pub const DETAIL_FALLBACK_MESSAGE: &str = "Could not load event details";

/// Errors that can occur while talking to the events API.
///
/// A 404 is not an error: it surfaces as [`crate::client::Fetched::NotAvailable`].
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Token is invalid or has expired")]
    InvalidCredential,

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for EventError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            EventError::Decode(e.to_string())
        } else {
            EventError::Network(e.to_string())
        }
    }
}

impl EventError {
    /// Message for an inline error line. Transport failures that carry no
    /// detail fall back to `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            EventError::Network(m) | EventError::Decode(m) if m.trim().is_empty() => {
                fallback.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for eventdash operations.
pub type EventResult<T> = Result<T, EventError>;
