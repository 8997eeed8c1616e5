#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use udyam_api::config::ServerConfig;
use udyam_api::router::build_app_router;
use udyam_api::state::AppState;
use udyam_db::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        body_limit_bytes: 64 * 1024,
        database_url: None,
        db_max_connections: 1,
        rate_limit_window_ms: 60_000,
        rate_limit_max_requests: 10_000,
        disposable_email_domains: None,
        business_types: None,
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same `build_app_router` as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Like [`build_test_app`], with a caller-supplied configuration.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), config.clone());
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A form that passes every field rule.
pub fn valid_form() -> Value {
    json!({
        "aadhaar_number": "2974 1853 6029",
        "mobile_number": "98765 43210",
        "email_address": "owner@example.com",
        "otp_verified": true,
        "pan_number": "abcde1234f",
        "business_name": "Sharma Traders",
        "business_type": "Proprietorship",
        "address_line1": "12 MG Road, Fort",
        "city": "Mumbai",
        "state": "Maharashtra",
        "pincode": "400001"
    })
}
