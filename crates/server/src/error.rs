//! Error handling for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shelf_core::AppError;
use thiserror::Error;

/// Body returned when the chat backend fails; details stay in the log.
pub const CHAT_FAILURE_MESSAGE: &str = "An error occurred processing your request";

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Malformed or incomplete request
    #[error("{0}")]
    BadRequest(String),

    /// Record rejected by validation rules
    #[error("{0}")]
    Validation(String),

    /// The request was abandoned before it finished
    #[error("Request cancelled")]
    Cancelled,

    /// The chat backend failed
    #[error("{}", CHAT_FAILURE_MESSAGE)]
    ChatFailed,

    /// Anything else
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) | ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::ChatFailed | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::NotFound(_) => "not_found",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Validation(_) => "validation_error",
            ServerError::Cancelled => "cancelled",
            ServerError::ChatFailed => "chat_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(msg) => ServerError::NotFound(msg),
            AppError::Validation(msg) => ServerError::Validation(msg),
            AppError::Cancelled => ServerError::Cancelled,
            other => {
                tracing::error!("Request failed: {}", other);
                ServerError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ServerError::ChatFailed = self {
            return (
                status,
                Json(serde_json::json!({ "error": CHAT_FAILURE_MESSAGE })),
            )
                .into_response();
        }

        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for handlers
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a not found error
pub fn not_found(resource: &str, id: i64) -> ServerError {
    ServerError::NotFound(format!("{} {} not found", resource, id))
}

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}
