//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, get};
use portfolio_db::store::MemStore;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Test: GET /health reports ok while the store answers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let store = Arc::new(MemStore::new());
    let app = build_test_app(store.clone(), None);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["fallback_version"], portfolio_db::fallback::FALLBACK_VERSION);
    assert_eq!(store.ping_count(), 1);
}

// ---------------------------------------------------------------------------
// Test: GET /health degrades instead of failing when the store is down
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_is_degraded_when_store_is_down() {
    let store = Arc::new(MemStore::new());
    store.set_online(false);
    let app = build_test_app(store, None);

    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

#[tokio::test]
async fn health_check_is_degraded_when_store_does_not_answer() {
    let store = Arc::new(MemStore::new());
    store.set_read_delay(Duration::from_secs(30));
    let app = build_test_app(store, None);

    let response = tokio::time::timeout(Duration::from_secs(5), get(app, "/health"))
        .await
        .expect("health check must answer within the read budget");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "degraded");
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(Arc::new(MemStore::new()), None);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(Arc::new(MemStore::new()), None);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = build_test_app(Arc::new(MemStore::new()), None);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}

// ---------------------------------------------------------------------------
// Test: CORS does not echo unknown origins
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let app = build_test_app(Arc::new(MemStore::new()), None);

    let request = Request::builder()
        .uri("/health")
        .header("Origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
