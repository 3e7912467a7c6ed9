//! Error types for relay operations.
//!
//! Library code returns [`RelayError`]; the HTTP boundary maps every variant to
//! a status code and a caller-safe message (see [`RelayError::public_message`]).

use thiserror::Error;

/// Caller-visible body for validation failures on `POST /api/chat`.
pub const MESSAGE_REQUIRED: &str = "message is required";
/// Caller-visible body for every non-validation failure.
pub const INTERNAL_ERROR: &str = "internal error";

/// Errors for one chat exchange.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed input; nothing was recorded.
    #[error("{0}")]
    InvalidRequest(String),

    /// Completion API answered with a non-success status.
    #[error("completion API error {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the completion API.
        status: u16,
        /// Raw response body, for operator logs only.
        body: String,
    },

    /// Completion API could not be reached (connect failure, timeout, ...).
    #[error("completion API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Completion API answered 2xx with a body that is not JSON.
    #[error("completion API response is not JSON: {0}")]
    MalformedResponse(String),

    /// Session store failure.
    #[error("session store failure: {0}")]
    Session(String),
}

impl RelayError {
    /// Validation failure for a missing, non-string, or empty message.
    pub fn message_required() -> Self {
        Self::InvalidRequest(MESSAGE_REQUIRED.to_string())
    }

    /// True when the caller sent bad input (4xx); everything else is a 5xx.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    /// Text safe to show the caller. Internal details never leave the process.
    pub fn public_message(&self) -> &str {
        match self {
            Self::InvalidRequest(message) => message,
            _ => INTERNAL_ERROR,
        }
    }
}

/// Result alias for relay operations.
pub type Result<T, E = RelayError> = std::result::Result<T, E>;
