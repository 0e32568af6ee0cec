//! Error types for castmap-api
//!
//! Upstream fetch failures surface to HTTP clients as 503 and never bring the
//! process down.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::FetchError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream credit service unavailable (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        tracing::error!(error = %err, "Credit data unavailable");
        ApiError::ServiceUnavailable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
