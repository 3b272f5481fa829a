//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use billy_db::MemoryStore;
use common::{body_json, build_test_app, get, send};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let response = get(build_test_app(MemoryStore::new()), "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(
        build_test_app(MemoryStore::new()),
        "/this-route-does-not-exist",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_id_is_generated_and_propagated() {
    let response = get(build_test_app(MemoryStore::new()), "/health", None).await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header should be set");
    assert!(!request_id.is_empty());
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/plans")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = send(build_test_app(MemoryStore::new()), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}
