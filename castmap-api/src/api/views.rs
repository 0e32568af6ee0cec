//! View endpoints
//!
//! Each endpoint returns its view as a JSON object whose keys keep
//! first-occurrence order. The first request after startup triggers the
//! upstream fetch; concurrent requests share it.

use axum::{extract::State, routing::get, Json, Router};

use crate::models::{PerformerRoleGroups, PerformerTitles, RolePerformers};
use crate::{ApiResult, AppState};

/// GET /api/performers/titles
pub async fn get_performer_titles(State(state): State<AppState>) -> ApiResult<Json<PerformerTitles>> {
    Ok(Json(state.views.performer_titles().await?))
}

/// GET /api/performers/multiple-roles
pub async fn get_performer_role_groups(
    State(state): State<AppState>,
) -> ApiResult<Json<PerformerRoleGroups>> {
    Ok(Json(state.views.performer_role_groups().await?))
}

/// GET /api/roles/multiple-performers
pub async fn get_role_performers(State(state): State<AppState>) -> ApiResult<Json<RolePerformers>> {
    Ok(Json(state.views.role_performers().await?))
}

/// Build view routes
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/api/performers/titles", get(get_performer_titles))
        .route("/api/performers/multiple-roles", get(get_performer_role_groups))
        .route("/api/roles/multiple-performers", get(get_role_performers))
}
