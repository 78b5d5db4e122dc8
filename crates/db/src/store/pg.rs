use async_trait::async_trait;
use portfolio_core::contact::NewContactMessage;
use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;

use crate::error::StoreError;
use crate::models::case_study::{CaseStudy, CreateCaseStudy};
use crate::models::contact_message::ContactMessage;
use crate::models::project::{CreateProject, Project};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CaseStudyRepo, ContactMessageRepo, ProjectRepo, UserRepo};
use crate::seed::{SeedOutcome, SeedSet};
use crate::store::ContentStore;
use crate::DbPool;

/// [`ContentStore`] backed by the shared Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn ping(&self) -> Result<String, StoreError> {
        Ok(crate::liveness(&self.pool).await?)
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list(&self.pool, filter).await?)
    }

    async fn get_project(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        Ok(ProjectRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.pool, input).await?)
    }

    async fn list_case_studies(&self) -> Result<Vec<CaseStudy>, StoreError> {
        Ok(CaseStudyRepo::list(&self.pool).await?)
    }

    async fn get_case_study_by_project_id(
        &self,
        project_id: DbId,
    ) -> Result<Option<CaseStudy>, StoreError> {
        Ok(CaseStudyRepo::find_by_project_id(&self.pool, project_id).await?)
    }

    async fn create_case_study(&self, input: &CreateCaseStudy) -> Result<CaseStudy, StoreError> {
        Ok(CaseStudyRepo::create(&self.pool, input).await?)
    }

    async fn insert_seed(&self, seed: &SeedSet) -> Result<SeedOutcome, StoreError> {
        // Dropping the transaction without committing rolls it back.
        let mut tx = self.pool.begin().await?;

        let mut project_ids = Vec::with_capacity(seed.projects.len());
        for input in &seed.projects {
            project_ids.push(ProjectRepo::create(&mut *tx, input).await?.id);
        }

        let case_studies = seed.case_studies_for(&project_ids);
        for input in &case_studies {
            CaseStudyRepo::create(&mut *tx, input).await?;
        }

        tx.commit().await?;
        Ok(SeedOutcome::Seeded {
            projects: project_ids.len(),
            case_studies: case_studies.len(),
        })
    }

    async fn create_contact_message(
        &self,
        input: &NewContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        Ok(ContactMessageRepo::create(&self.pool, input).await?)
    }

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }
}
