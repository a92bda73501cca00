#![allow(dead_code)]

//! Test infrastructure for wit-server API tests

use wit_config::Config;
use wit_server::{AppState, build_router};

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

/// AppState over a fresh in-memory database with default config
pub async fn create_test_app_state() -> AppState {
    create_test_app_state_with(Config::default()).await
}

pub async fn create_test_app_state_with(config: Config) -> AppState {
    let pool = wit_db::connect_in_memory()
        .await
        .expect("Failed to create test database");
    AppState::new(pool, &config).expect("Failed to build app state")
}

pub fn app(state: &AppState) -> Router {
    build_router(state.clone(), Duration::from_secs(10))
}

/// Send one request through a fresh router
pub async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        json,
    }
}

pub async fn get(state: &AppState, uri: &str) -> TestResponse {
    send(state, "GET", uri, None).await
}

/// Create a space through the API and return its id
pub async fn create_space(state: &AppState, name: &str) -> String {
    let response = send(
        state,
        "POST",
        "/api/spaces",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json["data"]["id"].as_str().unwrap().to_string()
}

/// Create an iteration through the API and return its id
pub async fn create_iteration(state: &AppState, space_id: &str, parent: Option<&str>) -> String {
    let response = send(
        state,
        "POST",
        &format!("/api/spaces/{}/iterations", space_id),
        Some(serde_json::json!({ "name": "iteration", "parent_id": parent })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json["data"]["id"].as_str().unwrap().to_string()
}

/// Create a work item through the API and return the response data
pub async fn create_work_item(state: &AppState, space_id: &str, type_id: &str, fields: Value) -> Value {
    let response = send(
        state,
        "POST",
        &format!("/api/spaces/{}/workitems", space_id),
        Some(serde_json::json!({ "type_id": type_id, "fields": fields })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json["data"].clone()
}
