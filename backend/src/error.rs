//! Error handling for the AgriPest Monitoring Platform
//!
//! Every API entry point returns machine-readable error kinds rather than
//! raw exceptions; upstream store failures surface as 500s with the cause
//! preserved for logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::DateRangeError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request input; the operation was not attempted
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target analysis (or other resource) does not exist; no side effect
    #[error("{0} not found")]
    NotFound(String),

    /// A metadata update with nothing to change; no side effect
    #[error("Nothing to update: {0}")]
    NoOp(String),

    /// Upstream store failure; not retried here, retries are the caller's call
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<DateRangeError> for AppError {
    fn from(err: DateRangeError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                },
            ),
            AppError::NoOp(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "NO_OP".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request error: {:?}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
