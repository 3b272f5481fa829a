#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use billy_api::config::ServerConfig;
use billy_api::router::build_app_router;
use billy_api::state::AppState;
use billy_db::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
    }
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same builder as `main.rs`, so the whole middleware stack is
/// exercised. Clones of a `MemoryStore` share data, so several apps built
/// from one store see each other's writes.
pub fn build_test_app(store: MemoryStore) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(store),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, api_key: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match api_key {
        Some(key) => builder.header(AUTHORIZATION, format!("Bearer {key}")),
        None => builder,
    }
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, api_key: Option<&str>) -> Response {
    let req = request(Method::GET, uri, api_key)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn delete(app: Router, uri: &str, api_key: Option<&str>) -> Response {
    let req = request(Method::DELETE, uri, api_key)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, api_key: Option<&str>, body: Value) -> Response {
    let req = request(Method::POST, uri, api_key)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, req).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A company created through the API, with its plaintext key.
pub struct TestCompany {
    pub guid: String,
    pub api_key: String,
}

pub async fn create_company(store: &MemoryStore, name: &str) -> TestCompany {
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/companies",
        None,
        json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    TestCompany {
        guid: json["guid"].as_str().unwrap().to_string(),
        api_key: json["api_key"].as_str().unwrap().to_string(),
    }
}

/// Create a monthly charge plan for `company` and return its JSON.
pub async fn create_plan(store: &MemoryStore, company: &TestCompany, amount: i64) -> Value {
    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/plans",
        Some(&company.api_key),
        json!({ "plan_type": "charge", "amount": amount, "frequency": "monthly" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
