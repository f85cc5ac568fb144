//! Error Types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Error, Debug)]
pub enum ServerError {
    /// The responder failed while producing a reply
    #[error("Responder error: {0}")]
    Responder(String),

    /// A hospital table could not be read
    #[error("Data error: {0}")]
    Data(String),

    /// A lookup matched no record; the text is shown to the visitor as is
    #[error("{0}")]
    NotFound(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool validation failed: {0}")]
    ToolValidation(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ServerError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Responder(_) => "RESPONDER_ERROR",
            Self::Data(_) => "DATA_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ToolNotFound(_) => "TOOL_NOT_FOUND",
            Self::ToolValidation(_) => "TOOL_VALIDATION",
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ToolValidation(_) => StatusCode::BAD_REQUEST,
            Self::Responder(_) | Self::Data(_) | Self::ToolNotFound(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Responder(msg) => format!("The assistant encountered an error: {msg}"),
            Self::Data(_) => "Hospital records are unavailable right now.".into(),
            Self::NotFound(msg) => msg.clone(),
            Self::ToolNotFound(_) | Self::ToolValidation(_) => self.to_string(),
        }
    }
}

impl From<csv::Error> for ServerError {
    fn from(err: csv::Error) -> Self {
        Self::Data(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        let body = ErrorResponse {
            error: self.user_message(),
            code: self.code().into(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_keeps_its_text() {
        let err = ServerError::NotFound("Hospital 'Nowhere' not found".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Hospital 'Nowhere' not found");
    }

    #[test]
    fn test_data_errors_hide_details() {
        let err = ServerError::Data("CSV error: record 3 (line 4): found record with 2 fields".into());
        assert_eq!(err.code(), "DATA_ERROR");
        assert!(!err.user_message().contains("line 4"));
    }
}
