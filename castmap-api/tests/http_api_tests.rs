//! Integration tests for castmap-api HTTP endpoints
//!
//! Tests cover:
//! - Health endpoint (does not trigger the upstream fetch)
//! - The three view endpoints and their JSON shape
//! - 503 on upstream failure, 404 on unknown routes

mod helpers;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use castmap_api::{build_router, AppState};
use helpers::{cast, movie, service, StubSource};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

fn setup_app(source: Arc<StubSource>) -> axum::Router {
    let views = service(source, &["Actor A", "Actor B", "Actor C"]);
    build_router(AppState::new(Arc::new(views)))
}

fn scenario_source() -> Arc<StubSource> {
    Arc::new(StubSource::new(vec![
        movie("Movie 1", vec![cast("Actor A", "Hero"), cast("Actor C", "Villain")]),
        movie("Movie 2", vec![cast("Actor B", "Hero"), cast("Actor A", "Sidekick")]),
    ]))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

async fn extract_json(body: Body) -> Value {
    serde_json::from_str(&body_string(body).await).expect("Should parse JSON")
}

#[tokio::test]
async fn test_health_does_not_fetch() {
    let source = scenario_source();
    let app = setup_app(source.clone());

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "castmap-api");
    assert_eq!(body["credits"], "empty");
    assert!(body["version"].is_string());
    assert!(body.get("credits_fetched_at").is_none());
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_health_reports_cached_after_view() {
    let app = setup_app(scenario_source());

    let response = app.clone().oneshot(test_request("/api/performers/titles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(test_request("/health")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["credits"], "cached");
    assert!(body["credits_fetched_at"].is_string());
}

#[tokio::test]
async fn test_performer_titles_endpoint() {
    let app = setup_app(scenario_source());

    let response = app.oneshot(test_request("/api/performers/titles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let raw = body_string(response.into_body()).await;
    // Keys keep first-occurrence order
    assert_eq!(
        raw,
        r#"{"Actor A":["Movie 1","Movie 2"],"Actor C":["Movie 1"],"Actor B":["Movie 2"]}"#
    );
}

#[tokio::test]
async fn test_performer_role_groups_endpoint() {
    let app = setup_app(scenario_source());

    let response = app
        .oneshot(test_request("/api/performers/multiple-roles"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);

    let groups = body["Actor A"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["roleLabel"], "Hero");
    assert_eq!(groups[0]["movieTitle"], "Movie 1");
    assert_eq!(groups[1]["roleLabel"], "Sidekick");
    assert_eq!(groups[1]["performerName"], "Actor A");
}

#[tokio::test]
async fn test_role_performers_endpoint() {
    let app = setup_app(scenario_source());

    let response = app
        .oneshot(test_request("/api/roles/multiple-performers"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body.as_object().unwrap().len(), 1);
    assert!(body.get("Villain").is_none());

    let hero = body["Hero"].as_array().unwrap();
    let performers: Vec<&str> = hero
        .iter()
        .map(|a| a["performerName"].as_str().unwrap())
        .collect();
    assert_eq!(performers, vec!["Actor A", "Actor B"]);
}

#[tokio::test]
async fn test_upstream_failure_is_service_unavailable() {
    let source = Arc::new(StubSource::new(vec![]).failing_first(1));
    let app = setup_app(source.clone());

    let response = app
        .clone()
        .oneshot(test_request("/api/roles/multiple-performers"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    assert!(body["error"]["message"].as_str().unwrap().contains("upstream unreachable"));

    // The failure was not cached; the next request retries
    let response = app.oneshot(test_request("/api/performers/titles")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = setup_app(scenario_source());

    let response = app.oneshot(test_request("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_build_info_endpoint() {
    let app = setup_app(scenario_source());

    let response = app.oneshot(test_request("/api/buildinfo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(body["build_profile"].is_string());
}
