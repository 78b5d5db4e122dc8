//! Integration tests for serving the client bundle.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use portfolio_db::store::MemStore;

use common::{body_json, build_test_app_with_config, get, test_config};

fn app_with_bundle() -> axum::Router {
    let mut config = test_config();
    config.static_dir = Some(PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/public"
    )));
    build_test_app_with_config(Arc::new(MemStore::new()), None, config)
}

async fn body_text(response: axum::http::Response<axum::body::Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn client_routes_fall_back_to_index_html() {
    let response = get(app_with_bundle(), "/projects/3/case-study").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<div id=\"root\">"));
}

#[tokio::test]
async fn api_routes_are_not_shadowed_by_the_bundle() {
    let response = get(app_with_bundle(), "/api/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.is_array());

    let response = get(app_with_bundle(), "/api/unknown").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Route not found");
}
