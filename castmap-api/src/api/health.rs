//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::FetchPhase;
use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    /// Module name ("castmap-api")
    pub module: String,
    /// Crate version from Cargo.toml
    pub version: String,
    /// Seconds since service started
    pub uptime_seconds: u64,
    /// Credit dataset phase: "empty", "fetching" or "cached"
    pub credits: &'static str,
    /// When the credit dataset was fetched, once cached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_fetched_at: Option<DateTime<Utc>>,
}

/// GET /health
///
/// Never triggers the upstream fetch.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);
    let uptime_seconds = uptime.num_seconds().max(0) as u64;

    let credits = match state.views.fetch_phase().await {
        FetchPhase::Empty => "empty",
        FetchPhase::Fetching => "fetching",
        FetchPhase::Cached => "cached",
    };
    let credits_fetched_at = state.views.cached_dataset().await.map(|d| d.fetched_at);

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "castmap-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        credits,
        credits_fetched_at,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/buildinfo", get(super::get_build_info))
}
