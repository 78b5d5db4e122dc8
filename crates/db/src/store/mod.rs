//! The store capability set and its two variants.
//!
//! [`ContentStore`] is implemented by [`PgStore`] (backed by the Postgres
//! pool) and by [`MemStore`] (in-memory, used for tests and demos). The
//! variant is chosen once at startup; falling back to static content when a
//! live read fails is a separate layer, see [`crate::resilient`].

mod mem;
mod pg;

use async_trait::async_trait;
use portfolio_core::contact::NewContactMessage;
use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;

use crate::error::StoreError;
use crate::models::case_study::{CaseStudy, CreateCaseStudy};
use crate::models::contact_message::ContactMessage;
use crate::models::project::{CreateProject, Project};
use crate::models::user::{CreateUser, User};
use crate::seed::{SeedOutcome, SeedSet};

pub use mem::MemStore;
pub use pg::PgStore;

/// Reads and writes against one persistent source of portfolio content.
///
/// Implementations never retry and never substitute data: errors are
/// returned to the caller as-is.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Run a trivial liveness query and return its result as text.
    async fn ping(&self) -> Result<String, StoreError>;

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError>;

    async fn get_project(&self, id: DbId) -> Result<Option<Project>, StoreError>;

    async fn create_project(&self, input: &CreateProject) -> Result<Project, StoreError>;

    async fn list_case_studies(&self) -> Result<Vec<CaseStudy>, StoreError>;

    /// At most one case study is returned per project.
    async fn get_case_study_by_project_id(
        &self,
        project_id: DbId,
    ) -> Result<Option<CaseStudy>, StoreError>;

    async fn create_case_study(&self, input: &CreateCaseStudy) -> Result<CaseStudy, StoreError>;

    /// Insert every project and case study of `seed`, or none of them.
    ///
    /// Case studies are built from the ids assigned to the inserted
    /// projects. Does not check whether the store is empty.
    async fn insert_seed(&self, seed: &SeedSet) -> Result<SeedOutcome, StoreError>;

    async fn create_contact_message(
        &self,
        input: &NewContactMessage,
    ) -> Result<ContactMessage, StoreError>;

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;
}
