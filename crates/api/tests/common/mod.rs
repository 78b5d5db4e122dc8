#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use portfolio_db::fallback::FallbackData;
use portfolio_db::models::case_study::{CaseStudy, CreateCaseStudy, KeyLearning, Outcome};
use portfolio_db::models::contact_message::ContactMessage;
use portfolio_db::models::project::{CreateProject, Project};
use portfolio_db::resilient::ResilientStore;
use portfolio_db::store::MemStore;
use portfolio_db::PoolSettings;
use portfolio_events::{EmailError, Mailer};
use tower::ServiceExt;

use portfolio_api::config::ServerConfig;
use portfolio_api::router::build_app_router;
use portfolio_api::state::AppState;

pub const DEFAULT_RECIPIENT: &str = "owner@portfolio.local";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        database_url: "postgres://unused".to_string(),
        pool: PoolSettings::default(),
        db_connect_max_attempts: 1,
        db_connect_initial_backoff: Duration::from_millis(1),
        db_read_timeout: Duration::from_millis(200),
        contact_recipient: DEFAULT_RECIPIENT.to_string(),
        static_dir: None,
    }
}

/// Build the full application router over an in-memory store.
pub fn build_test_app(store: Arc<MemStore>, mailer: Option<Arc<dyn Mailer>>) -> Router {
    build_test_app_with_config(store, mailer, test_config())
}

pub fn build_test_app_with_config(
    store: Arc<MemStore>,
    mailer: Option<Arc<dyn Mailer>>,
    config: ServerConfig,
) -> Router {
    let resilient = ResilientStore::new(
        store,
        Arc::new(FallbackData::builtin()),
        config.contact_recipient.clone(),
    )
    .with_read_timeout(config.db_read_timeout);
    let state = AppState {
        store: Arc::new(resilient),
        mailer,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn live_project(id: i32, title: &str, category: &str, tags: &[&str]) -> Project {
    CreateProject {
        title: title.to_string(),
        description: "Live description".to_string(),
        category: category.to_string(),
        image_src: "https://example.com/live.png".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
    .into_project(id)
}

pub fn live_case_study(id: i32, project_id: i32, client: &str) -> CaseStudy {
    CreateCaseStudy {
        project_id,
        client: client.to_string(),
        timeline: "2 months".to_string(),
        role: "Designer".to_string(),
        tools: vec!["Figma".to_string()],
        overview: "Live overview".to_string(),
        challenges: vec![],
        process: vec![],
        results: vec![Outcome {
            metric: "+10%".to_string(),
            description: "Engagement".to_string(),
        }],
        key_learnings: vec![KeyLearning {
            title: "Learning".to_string(),
            description: "Description".to_string(),
        }],
    }
    .into_case_study(id)
}

// ---------------------------------------------------------------------------
// Mailers
// ---------------------------------------------------------------------------

/// Records every message it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<ContactMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<ContactMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn transport(&self) -> &'static str {
        "recording"
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Fails every delivery as if the provider rejected it.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    fn transport(&self) -> &'static str {
        "failing"
    }

    async fn send_contact(&self, _message: &ContactMessage) -> Result<(), EmailError> {
        Err(EmailError::HttpStatus {
            status: 401,
            body: "unauthorized".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn data_source(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("x-data-source")
        .expect("x-data-source header")
        .to_str()
        .unwrap()
}
