use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use portfolio_db::fallback::FallbackData;
use portfolio_db::resilient::ResilientStore;
use portfolio_db::seed::SeedOutcome;
use portfolio_db::store::PgStore;
use portfolio_events::{EmailConfig, Mailer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_api::config::ServerConfig;
use portfolio_api::router::build_app_router;
use portfolio_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "portfolio_api=debug,portfolio_db=debug,portfolio_events=debug,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let pool = portfolio_db::create_pool(&config.database_url, &config.pool)
        .context("Invalid DATABASE_URL")?;
    let live = Arc::new(PgStore::new(pool.clone()));

    let connected = portfolio_db::connect_with_retry(
        live.as_ref(),
        config.db_connect_max_attempts,
        config.db_connect_initial_backoff,
    )
    .await;

    let store = ResilientStore::new(
        live,
        Arc::new(FallbackData::builtin()),
        config.contact_recipient.clone(),
    )
    .with_read_timeout(config.db_read_timeout);

    if connected && portfolio_db::ensure_schema(&pool).await {
        match store.initialize_if_empty().await {
            Ok(SeedOutcome::Seeded {
                projects,
                case_studies,
            }) => tracing::info!(projects, case_studies, "Database seeded"),
            Ok(SeedOutcome::AlreadyPopulated) => {}
            Err(e) => tracing::error!(error = %e, "Seeding failed, serving fallback data"),
        }
    } else if !connected {
        tracing::warn!("Starting in degraded mode; reads will use fallback data");
    }

    // --- Email ---
    let mailer = build_mailer();

    // --- App state ---
    let state = AppState {
        store: Arc::new(store),
        mailer,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing database pool");
    let cleanup = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(cleanup, pool.close()).await.is_err() {
        tracing::warn!(timeout_secs = config.shutdown_timeout_secs, "Pool close timed out");
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Select the contact notification transport, or none.
fn build_mailer() -> Option<Arc<dyn Mailer>> {
    let config = match EmailConfig::from_env() {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::info!("No email transport configured; contact notifications disabled");
            return None;
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid email configuration; notifications disabled");
            return None;
        }
    };

    let transport = config.transport.name();
    match portfolio_events::build_mailer(config) {
        Ok(mailer) => {
            tracing::info!(transport, "Contact notifications enabled");
            Some(mailer)
        }
        Err(e) => {
            tracing::error!(transport, error = %e, "Invalid email configuration; notifications disabled");
            None
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
