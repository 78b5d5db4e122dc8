//! Persistence for portfolio content.
//!
//! The pool is created lazily so that an unreachable database does not stop
//! the process from starting. [`connect_with_retry`] then probes the store
//! with bounded backoff, and [`ensure_schema`] applies the guarded
//! migrations. Both report failure as `false` instead of erroring, leaving
//! the caller to continue in degraded mode.

pub mod error;
pub mod fallback;
pub mod models;
pub mod repositories;
pub mod resilient;
pub mod seed;
pub mod store;

use std::time::Duration;

use portfolio_core::retry::{retry_with_backoff, RetryPolicy};
use sqlx::postgres::PgPoolOptions;

use crate::store::ContentStore;

pub type DbPool = sqlx::PgPool;

/// Embedded schema migrations. Every statement is `IF NOT EXISTS`-guarded.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../db/migrations");

/// Connection pool limits.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on concurrently open connections.
    pub max_connections: u32,
    /// Idle connections are closed after this long.
    pub idle_timeout: Duration,
    /// How long an operation waits for a connection before failing. While
    /// the database refuses connections the pool keeps retrying for this
    /// long, so it also bounds each startup probe.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            idle_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// Create a connection pool from a database URL without connecting.
///
/// Fails only if the URL cannot be parsed.
pub fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy(database_url)
}

/// Run the liveness query and return the server's current time as text.
pub async fn liveness(pool: &DbPool) -> Result<String, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT NOW()::text")
        .fetch_one(pool)
        .await
}

/// Verify the database answers queries.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    liveness(pool).await.map(|_| ())
}

/// Probe `store` until it answers or `max_attempts` probes have failed.
///
/// The delay starts at `initial_backoff` and doubles after each failure,
/// plus a small random jitter. Returns `true` on the first successful probe
/// and `false` once attempts are exhausted; never errors.
pub async fn connect_with_retry(
    store: &dyn ContentStore,
    max_attempts: u32,
    initial_backoff: Duration,
) -> bool {
    let policy = RetryPolicy::new(max_attempts, initial_backoff);
    match retry_with_backoff(&policy, "Database connection", |_| store.ping()).await {
        Some(now) => {
            tracing::info!(now = %now, "Database connection successful");
            true
        }
        None => {
            tracing::warn!(max_attempts, "Database unreachable, continuing with fallback data");
            false
        }
    }
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create missing tables. Safe to call on every startup.
///
/// Logs and returns `false` on failure instead of propagating, so startup
/// proceeds regardless.
pub async fn ensure_schema(pool: &DbPool) -> bool {
    match run_migrations(pool).await {
        Ok(()) => {
            tracing::info!("Database schema ensured");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to ensure database schema, continuing");
            false
        }
    }
}
