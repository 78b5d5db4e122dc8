pub mod health;

use axum::extract::OriginalUri;
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppError;
use crate::handlers::{case_studies, contact, projects};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET    /projects                     -> projects::list
/// GET    /projects/{id}                -> projects::get_by_id
/// GET    /case-studies                 -> case_studies::list
/// GET    /case-studies/{project_id}    -> case_studies::get_by_project
/// POST   /contact                      -> contact::create
/// ```
///
/// Unmatched paths under `/api` are a JSON 404, never the client bundle.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list))
        .route("/projects/{id}", get(projects::get_by_id))
        .route("/case-studies", get(case_studies::list))
        .route("/case-studies/{project_id}", get(case_studies::get_by_project))
        .route("/contact", post(contact::create))
        .fallback(api_not_found)
}

async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found("Route", uri.path())
}
