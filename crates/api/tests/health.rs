//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, build_test_app_with, get, test_config};
use tower::ServiceExt;
use udyam_api::config::ServerConfig;

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let response = get(build_test_app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["environment"], "test");
    assert!(json["uptime_secs"].is_u64());
    assert_eq!(json["db_healthy"], true);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404 JSON
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404_json() {
    let response = get(build_test_app(), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Route /this-route-does-not-exist not found");
}

#[tokio::test]
async fn unknown_api_route_returns_404_json() {
    let response = get(build_test_app(), "/api/nothing/here").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Route /api/nothing/here not found");
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(build_test_app(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    let id_str = request_id.to_str().unwrap();
    assert_eq!(id_str.len(), 36, "x-request-id should be a UUID: {id_str}");
}

// ---------------------------------------------------------------------------
// Test: security headers are set on every response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn responses_carry_security_headers() {
    let response = get(build_test_app(), "/api/locations/states").await;

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "no-referrer");
}

// ---------------------------------------------------------------------------
// Test: CORS preflight for an allowed origin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/validate/field")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = build_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers()["access-control-allow-credentials"],
        "true"
    );
}

// ---------------------------------------------------------------------------
// Test: oversized bodies are rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn oversized_body_is_rejected() {
    let value = "a".repeat(128 * 1024);
    let response = common::post_json(
        build_test_app(),
        "/api/validate/field",
        serde_json::json!({ "field_name": "address", "value": value }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
}

// ---------------------------------------------------------------------------
// Test: requests beyond the per-client quota get 429
// ---------------------------------------------------------------------------

fn health_from(client: &str) -> Request<Body> {
    Request::builder()
        .uri("/health")
        .header("x-forwarded-for", client)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn requests_over_quota_are_rate_limited() {
    let app = build_test_app_with(ServerConfig {
        rate_limit_max_requests: 3,
        ..test_config()
    });

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(health_from("203.0.113.7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(health_from("203.0.113.7"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");
    assert_eq!(
        json["error"],
        "Too many requests from this IP, please try again later."
    );

    // Another client still has its own quota.
    let response = app.oneshot(health_from("198.51.100.2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
