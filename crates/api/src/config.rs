use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use portfolio_db::resilient::DEFAULT_READ_TIMEOUT;
use portfolio_db::PoolSettings;

/// Configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Postgres connection string.
    pub database_url: String,
    pub pool: PoolSettings,
    /// Startup liveness probes before continuing in degraded mode.
    pub db_connect_max_attempts: u32,
    /// Delay before the second probe; doubles afterwards.
    pub db_connect_initial_backoff: Duration,
    /// How long a read waits for the database before serving fallback data.
    pub db_read_timeout: Duration,
    /// Recipient of contact messages that do not name one.
    pub contact_recipient: String,
    /// Directory of the built client bundle, if it should be served.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                         | Default                    |
    /// |---------------------------------|----------------------------|
    /// | `HOST`                          | `0.0.0.0`                  |
    /// | `PORT`                          | `5000`                     |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                       |
    /// | `DATABASE_URL`                  | required                   |
    /// | `DB_MAX_CONNECTIONS`            | `5`                        |
    /// | `DB_IDLE_TIMEOUT_SECS`          | `30`                       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`       | `3`                        |
    /// | `DB_CONNECT_MAX_ATTEMPTS`       | `5`                        |
    /// | `DB_CONNECT_INITIAL_BACKOFF_MS` | `1000`                     |
    /// | `DB_READ_TIMEOUT_MS`            | `1500`                     |
    /// | `CONTACT_DEFAULT_RECIPIENT`     | `owner@portfolio.local`    |
    /// | `STATIC_DIR`                    | unset                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse(&get, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            idle_timeout: Duration::from_secs(parse(
                &get,
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout.as_secs(),
            )?),
            acquire_timeout: Duration::from_secs(parse(
                &get,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )?),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse(&get, "PORT", 5000)?,
            cors_origins,
            request_timeout_secs: parse(&get, "REQUEST_TIMEOUT_SECS", 30)?,
            shutdown_timeout_secs: parse(&get, "SHUTDOWN_TIMEOUT_SECS", 30)?,
            database_url,
            pool,
            db_connect_max_attempts: parse(&get, "DB_CONNECT_MAX_ATTEMPTS", 5)?,
            db_connect_initial_backoff: Duration::from_millis(parse(
                &get,
                "DB_CONNECT_INITIAL_BACKOFF_MS",
                1000,
            )?),
            db_read_timeout: Duration::from_millis(parse(
                &get,
                "DB_READ_TIMEOUT_MS",
                DEFAULT_READ_TIMEOUT.as_millis() as u64,
            )?),
            contact_recipient: get("CONTACT_DEFAULT_RECIPIENT")
                .unwrap_or_else(|| "owner@portfolio.local".into()),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected: "a non-negative integer",
            value: raw,
        }),
    }
}
