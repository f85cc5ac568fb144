//! Error Types

use std::time::Duration;

use thiserror::Error;

/// Result type alias for widget operations
pub type Result<T> = std::result::Result<T, ReceptionError>;

/// Failures that can end a dispatch flow.
///
/// The `Display` text of each variant is the short description that gets
/// embedded in the bot message shown to the user.
#[derive(Error, Debug)]
pub enum ReceptionError {
    /// Network unreachable, connection reset, DNS failure...
    #[error("{0}")]
    Transport(String),

    /// Server answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Body was not valid JSON
    #[error("invalid response body: {0}")]
    Parse(String),

    /// No answer within the configured timeout
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    /// Request was abandoned through its cancellation token
    #[error("request was cancelled")]
    Cancelled,

    /// Invalid widget configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReceptionError {
    /// Fixed prefix of every user-facing failure message
    pub const USER_PREFIX: &'static str = "Sorry, I encountered an error: ";

    /// Convert to the bot message shown in the conversation
    pub fn user_message(&self) -> String {
        format!(
            "{}{}. Please check the console for details.",
            Self::USER_PREFIX,
            self
        )
    }
}

impl From<reqwest::Error> for ReceptionError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status(status.as_u16());
        }
        if err.is_decode() {
            return Self::Parse(err.to_string());
        }
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_wraps_description() {
        let err = ReceptionError::Status(503);
        assert_eq!(
            err.user_message(),
            "Sorry, I encountered an error: HTTP error! status: 503. Please check the console for details."
        );
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let short = ReceptionError::TimedOut(Duration::from_millis(250));
        assert_eq!(short.to_string(), "request timed out after 250ms");

        let long = ReceptionError::TimedOut(Duration::from_secs(120));
        assert!(long.user_message().contains("timed out after 120s"));
    }
}
