use std::sync::Arc;

use portfolio_db::resilient::ResilientStore;
use portfolio_events::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    /// Fallback-aware content store.
    pub store: Arc<ResilientStore>,
    /// Contact notification transport; `None` when email is not configured.
    pub mailer: Option<Arc<dyn Mailer>>,
}
