//! Project entity model and DTOs.

use portfolio_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Open set of tags used for filtering, e.g. `ui`, `ux`, `product`.
    pub category: String,
    pub image_src: String,
    pub tags: Vec<String>,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image_src: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateProject {
    /// Materialize the DTO as a stored entity with the assigned id.
    pub fn into_project(self, id: DbId) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            image_src: self.image_src,
            tags: self.tags,
        }
    }
}
