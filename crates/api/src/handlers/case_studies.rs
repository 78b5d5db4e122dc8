//! Handlers for the `/case-studies` resource.

use axum::extract::{Path, State};
use portfolio_core::types::parse_id;
use portfolio_db::models::case_study::CaseStudy;

use crate::error::{AppError, AppResult};
use crate::response::SourcedJson;
use crate::state::AppState;

/// GET /api/case-studies
pub async fn list(State(state): State<AppState>) -> SourcedJson<Vec<CaseStudy>> {
    SourcedJson(state.store.list_case_studies().await)
}

/// GET /api/case-studies/{project_id}
pub async fn get_by_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<SourcedJson<CaseStudy>> {
    let project_id =
        parse_id(&raw_id).ok_or_else(|| AppError::not_found("Case study", &raw_id))?;
    state
        .store
        .get_case_study_by_project_id(project_id)
        .await
        .map(SourcedJson)
        .ok_or_else(|| AppError::not_found("Case study", project_id))
}
