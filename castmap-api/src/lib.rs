//! castmap-api library interface
//!
//! Aggregates per-movie cast credits into three views:
//! - which titles each tracked performer appeared in
//! - which performers played more than one distinct role
//! - which roles were played by more than one performer
//!
//! Exposed as a library so integration tests can drive the router and the
//! engine with a stub credit source.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::CastViewService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// View engine with the memoized credit dataset
    pub views: Arc<CastViewService>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(views: Arc<CastViewService>) -> Self {
        Self {
            views,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::view_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
