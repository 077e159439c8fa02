//! Error taxonomy for assistant operations.
//!
//! Every gateway call returns one of these four kinds. The translation
//! orchestrator recovers from all of them locally; every other caller turns
//! them into a user-visible message with [`AssistantError::user_message`].

use thiserror::Error;

/// Shown when a failure carries no backend-supplied message.
pub const GENERIC_RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssistantError {
    /// Caller-side precondition failed; no request was sent.
    #[error("Validation Error: {0}")]
    Validation(String),

    /// Transport-level failure (connect, reset, timeout).
    #[error("Network Error: {0}")]
    Network(String),

    /// Backend answered with a non-success status.
    #[error("Request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Request { status: u16, message: Option<String> },

    /// 2xx response whose body could not be parsed or lacked the expected field.
    #[error("Malformed Response: {0}")]
    MalformedResponse(String),
}

pub type AssistantResult<T> = Result<T, AssistantError>;

impl AssistantError {
    /// Text suitable for an inline error in the requesting widget.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::Validation(msg) => msg.clone(),
            AssistantError::Request {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_RETRY_MESSAGE.to_string(),
        }
    }

    /// Build a `Request` error from a non-success status and raw body.
    ///
    /// The backend reports failures as `{"message": ...}` or `{"error": ...}`;
    /// anything else leaves the message empty.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "error"].iter().find_map(|key| {
                    v.get(*key)
                        .and_then(|m| m.as_str())
                        .filter(|m| !m.trim().is_empty())
                        .map(|m| m.to_string())
                })
            });
        AssistantError::Request { status, message }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AssistantError::Validation(_))
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AssistantError::MalformedResponse(err.to_string())
        } else {
            AssistantError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::MalformedResponse(err.to_string())
    }
}
