//! Repository for the `case_studies` table.

use portfolio_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::case_study::{CaseStudy, CreateCaseStudy};

/// Column list shared across queries. `tools` is nullable in the schema.
const COLUMNS: &str = "id, project_id, client, timeline, role, COALESCE(tools, '{}') AS tools, \
     overview, challenges, process, results, key_learnings";

/// Provides read and insert operations for case studies.
pub struct CaseStudyRepo;

impl CaseStudyRepo {
    /// Insert a new case study, returning the created row.
    ///
    /// The narrative sections are encoded as JSON; the explicit casts match
    /// the `JSON` column type.
    pub async fn create<'e, E>(
        executor: E,
        input: &CreateCaseStudy,
    ) -> Result<CaseStudy, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO case_studies
                (project_id, client, timeline, role, tools, overview,
                 challenges, process, results, key_learnings)
             VALUES ($1, $2, $3, $4, $5, $6, $7::json, $8::json, $9::json, $10::json)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CaseStudy>(&query)
            .bind(input.project_id)
            .bind(&input.client)
            .bind(&input.timeline)
            .bind(&input.role)
            .bind(&input.tools)
            .bind(&input.overview)
            .bind(Json(&input.challenges))
            .bind(Json(&input.process))
            .bind(Json(&input.results))
            .bind(Json(&input.key_learnings))
            .fetch_one(executor)
            .await
    }

    /// Find the case study attached to a project.
    ///
    /// The schema does not enforce one case study per project; if several
    /// exist the oldest wins.
    pub async fn find_by_project_id(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<CaseStudy>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM case_studies WHERE project_id = $1 ORDER BY id ASC LIMIT 1"
        );
        sqlx::query_as::<_, CaseStudy>(&query)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all case studies, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<CaseStudy>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM case_studies ORDER BY id ASC");
        sqlx::query_as::<_, CaseStudy>(&query).fetch_all(pool).await
    }
}
