//! HTTP API handlers for castmap-api

pub mod buildinfo;
pub mod health;
pub mod views;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use views::view_routes;

use axum::http::Uri;

use crate::ApiError;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
