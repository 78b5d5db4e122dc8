//! Repository for the `projects` table.

use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::project::{CreateProject, Project};

/// Column list shared across queries. `tags` is nullable in the schema.
const COLUMNS: &str =
    "id, title, description, category, image_src, COALESCE(tags, '{}') AS tags";

/// Provides read and insert operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Accepts the pool or an open transaction.
    pub async fn create<'e, E>(executor: E, input: &CreateProject) -> Result<Project, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO projects (title, description, category, image_src, tags)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.image_src)
            .bind(&input.tags)
            .fetch_one(executor)
            .await
    }

    /// Find a project by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects matching `filter`, oldest first.
    ///
    /// Unfiltered dimensions bind `NULL` and are skipped by the predicate.
    pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::text IS NULL OR category = $1)
               AND ($2::text IS NULL OR $2 = ANY(tags))
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.category.value())
            .bind(filter.tag.value())
            .fetch_all(pool)
            .await
    }

    /// Count all projects.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
