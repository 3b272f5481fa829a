//! Integration tests for `POST /api/v1/companies`.

mod common;

use axum::http::StatusCode;
use billy_core::api_keys::{KEY_LENGTH, KEY_PREFIX_LENGTH};
use billy_db::MemoryStore;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;

#[tokio::test]
async fn create_company_returns_key_once() {
    let store = MemoryStore::new();

    let response = post_json(
        build_test_app(store.clone()),
        "/api/v1/companies",
        None,
        json!({ "name": "  Acme  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["guid"].as_str().unwrap().starts_with("CP"));
    assert_eq!(json["name"], "Acme");
    assert_eq!(json["deleted"], false);
    assert!(json.get("api_key_hash").is_none());

    let api_key = json["api_key"].as_str().unwrap();
    assert_eq!(api_key.len(), KEY_LENGTH);
    assert_eq!(json["api_key_prefix"], &api_key[..KEY_PREFIX_LENGTH]);

    // The issued key authenticates.
    let response = get(build_test_app(store.clone()), "/api/v1/plans", Some(api_key)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let response = post_json(
        build_test_app(MemoryStore::new()),
        "/api/v1/companies",
        None,
        json!({ "name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["name"].is_array());
}

#[tokio::test]
async fn missing_name_is_a_field_error() {
    let response = post_json(
        build_test_app(MemoryStore::new()),
        "/api/v1/companies",
        None,
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "name is required");
}
