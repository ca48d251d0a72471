//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use school_closures::{ClosureError, Notice};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the school closures library.
    Closures(ClosureError),
    /// Server-side failure outside the library, such as a panicked worker task.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<Notice>,
}

impl ApiError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            ApiError::Closures(e) => match e {
                ClosureError::Validation(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
                }
                ClosureError::EmptyExport => (StatusCode::UNPROCESSABLE_ENTITY, "empty_export"),
                ClosureError::InvalidFilter(_) => (StatusCode::BAD_REQUEST, "invalid_filter"),
                ClosureError::Persistence { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let (message, notice) = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => (msg, None),
            ApiError::Closures(e) => (e.to_string(), Some(Notice::from_error(&e))),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
                notice,
            }),
        )
            .into_response()
    }
}

impl From<ClosureError> for ApiError {
    fn from(err: ClosureError) -> Self {
        ApiError::Closures(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Closures(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {}
