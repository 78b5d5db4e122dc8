//! Handlers for the `/projects` resource.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use portfolio_core::filter::{ProjectFilter, ProjectQuery};
use portfolio_core::types::parse_id;
use portfolio_db::models::project::Project;

use crate::error::{AppError, AppResult};
use crate::response::SourcedJson;
use crate::state::AppState;

/// GET /api/projects?category=&tag=
///
/// Never fails: an unreachable or empty store is answered from the fallback
/// snapshot, and a query string that cannot be parsed (e.g. a repeated
/// `category`) lists projects unfiltered.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> SourcedJson<Vec<Project>> {
    let query = query.map(|Query(q)| q).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Ignoring unparseable project query");
        ProjectQuery::default()
    });
    let filter = ProjectFilter::from(&query);
    SourcedJson(state.store.list_projects(&filter).await)
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<SourcedJson<Project>> {
    let id = parse_id(&raw_id).ok_or_else(|| AppError::not_found("Project", &raw_id))?;
    state
        .store
        .get_project(id)
        .await
        .map(SourcedJson)
        .ok_or_else(|| AppError::not_found("Project", id))
}
