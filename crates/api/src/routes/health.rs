use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when reads are being served from fallback data.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the live store answers a liveness query.
    pub db_healthy: bool,
    /// Version of the fallback snapshot in use.
    pub fallback_version: String,
}

/// GET /health -- returns service and store health. Never fails.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.store.ping_live().await {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, "Liveness probe failed");
            false
        }
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        fallback_version: state.store.fallback().version().to_string(),
    })
}

/// Mount health check routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
