use std::sync::Arc;

use portfolio_db::fallback::FallbackData;
use portfolio_db::models::case_study::CaseStudy;
use portfolio_db::models::project::{CreateProject, Project};
use portfolio_db::resilient::ResilientStore;
use portfolio_db::store::MemStore;

pub const DEFAULT_RECIPIENT: &str = "owner@portfolio.local";

pub fn new_project(title: &str, category: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: "Live description".to_string(),
        category: category.to_string(),
        image_src: "https://example.com/live.png".to_string(),
        tags: vec!["Live".to_string()],
    }
}

pub fn live_project(id: i32, title: &str, category: &str) -> Project {
    new_project(title, category).into_project(id)
}

/// A case study copied from the built-in snapshot, re-pointed at `project_id`.
pub fn live_case_study(id: i32, project_id: i32, client: &str) -> CaseStudy {
    let mut cs = FallbackData::builtin()
        .case_study_for_project(1)
        .expect("builtin snapshot has a case study for project 1");
    cs.id = id;
    cs.project_id = project_id;
    cs.client = client.to_string();
    cs
}

/// Build a resilient store over `live` with the built-in fallback snapshot.
pub fn resilient(live: Arc<MemStore>) -> ResilientStore {
    ResilientStore::new(live, Arc::new(FallbackData::builtin()), DEFAULT_RECIPIENT)
}
