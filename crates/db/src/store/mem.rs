use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use portfolio_core::contact::NewContactMessage;
use portfolio_core::error::CoreError;
use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::case_study::{CaseStudy, CreateCaseStudy};
use crate::models::contact_message::ContactMessage;
use crate::models::project::{CreateProject, Project};
use crate::models::user::{CreateUser, User};
use crate::seed::{SeedOutcome, SeedSet};
use crate::store::ContentStore;

#[derive(Default, Clone)]
struct Tables {
    projects: BTreeMap<DbId, Project>,
    case_studies: BTreeMap<DbId, CaseStudy>,
    contact_messages: BTreeMap<DbId, ContactMessage>,
    users: BTreeMap<DbId, User>,
    next_project_id: DbId,
    next_case_study_id: DbId,
    next_contact_message_id: DbId,
    next_user_id: DbId,
}

impl Tables {
    fn next(counter: &mut DbId) -> DbId {
        *counter += 1;
        *counter
    }
}

/// Number of writes allowed before every further write fails.
struct WriteLimit(AtomicUsize);

impl Default for WriteLimit {
    fn default() -> Self {
        Self(AtomicUsize::new(usize::MAX))
    }
}

/// In-memory [`ContentStore`].
///
/// Ids are assigned sequentially from 1 and never reused. The store can be
/// switched offline, after which every operation fails with
/// [`StoreError::Unavailable`]; liveness probes and write attempts are
/// counted whether or not they succeed. Reads can be slowed down to stand in
/// for a database that accepts connections but does not answer.
#[derive(Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
    pings: AtomicUsize,
    write_attempts: AtomicUsize,
    write_limit: WriteLimit,
    read_delay_ms: AtomicU64,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with existing rows.
    ///
    /// Id counters continue after the largest id present.
    pub fn with_content(projects: Vec<Project>, case_studies: Vec<CaseStudy>) -> Self {
        let mut tables = Tables::default();
        for project in projects {
            tables.next_project_id = tables.next_project_id.max(project.id);
            tables.projects.insert(project.id, project);
        }
        for case_study in case_studies {
            tables.next_case_study_id = tables.next_case_study_id.max(case_study.id);
            tables.case_studies.insert(case_study.id, case_study);
        }
        Self {
            tables: RwLock::new(tables),
            ..Default::default()
        }
    }

    /// Simulate the store becoming unreachable (`false`) or recovering.
    pub fn set_online(&self, online: bool) {
        self.offline.store(!online, Ordering::SeqCst);
    }

    /// Delay every read by `delay` before it is answered.
    pub fn set_read_delay(&self, delay: Duration) {
        self.read_delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Let the next `writes` write attempts succeed and fail every one after
    /// them with [`StoreError::Unavailable`], as if the connection dropped.
    pub fn fail_writes_after(&self, writes: usize) {
        let limit = self.write_attempts().saturating_add(writes);
        self.write_limit.0.store(limit, Ordering::SeqCst);
    }

    /// Lift the limit set by [`MemStore::fail_writes_after`].
    pub fn clear_write_limit(&self) {
        self.write_limit.0.store(usize::MAX, Ordering::SeqCst);
    }

    /// Number of liveness probes received.
    pub fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    /// Number of create calls received, including failed ones.
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// All stored contact messages, oldest first.
    pub async fn contact_messages(&self) -> Vec<ContactMessage> {
        self.tables
            .read()
            .await
            .contact_messages
            .values()
            .cloned()
            .collect()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".into()));
        }
        Ok(())
    }

    async fn begin_read(&self) -> Result<(), StoreError> {
        self.ensure_online()?;
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(())
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        let previous = self.write_attempts.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        if previous >= self.write_limit.0.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory write limit reached".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemStore {
    async fn ping(&self) -> Result<String, StoreError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        self.begin_read().await?;
        Ok(chrono::Utc::now().to_rfc3339())
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, StoreError> {
        self.begin_read().await?;
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .values()
            .filter(|p| filter.matches(&p.category, &p.tags))
            .cloned()
            .collect())
    }

    async fn get_project(&self, id: DbId) -> Result<Option<Project>, StoreError> {
        self.begin_read().await?;
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let id = Tables::next(&mut tables.next_project_id);
        let project = input.clone().into_project(id);
        tables.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn list_case_studies(&self) -> Result<Vec<CaseStudy>, StoreError> {
        self.begin_read().await?;
        Ok(self.tables.read().await.case_studies.values().cloned().collect())
    }

    async fn get_case_study_by_project_id(
        &self,
        project_id: DbId,
    ) -> Result<Option<CaseStudy>, StoreError> {
        self.begin_read().await?;
        let tables = self.tables.read().await;
        Ok(tables
            .case_studies
            .values()
            .find(|cs| cs.project_id == project_id)
            .cloned())
    }

    async fn create_case_study(&self, input: &CreateCaseStudy) -> Result<CaseStudy, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let id = Tables::next(&mut tables.next_case_study_id);
        let case_study = input.clone().into_case_study(id);
        tables.case_studies.insert(id, case_study.clone());
        Ok(case_study)
    }

    async fn insert_seed(&self, seed: &SeedSet) -> Result<SeedOutcome, StoreError> {
        // Rows are staged on a copy and only published once all succeed.
        let mut tables = self.tables.write().await;
        let mut staged = tables.clone();

        let mut project_ids = Vec::with_capacity(seed.projects.len());
        for input in &seed.projects {
            self.begin_write()?;
            let id = Tables::next(&mut staged.next_project_id);
            staged.projects.insert(id, input.clone().into_project(id));
            project_ids.push(id);
        }

        let case_studies = seed.case_studies_for(&project_ids);
        for input in &case_studies {
            self.begin_write()?;
            let id = Tables::next(&mut staged.next_case_study_id);
            staged.case_studies.insert(id, input.clone().into_case_study(id));
        }

        *tables = staged;
        Ok(SeedOutcome::Seeded {
            projects: project_ids.len(),
            case_studies: case_studies.len(),
        })
    }

    async fn create_contact_message(
        &self,
        input: &NewContactMessage,
    ) -> Result<ContactMessage, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        let id = Tables::next(&mut tables.next_contact_message_id);
        let message = ContactMessage {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            subject: input.subject.clone(),
            message: input.message.clone(),
            recipient: Some(input.recipient.clone()),
            created_at: chrono::Utc::now(),
        };
        tables.contact_messages.insert(id, message.clone());
        Ok(message)
    }

    async fn get_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        self.begin_read().await?;
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.begin_read().await?;
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        self.begin_write()?;
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == input.username) {
            return Err(CoreError::Conflict(format!(
                "username '{}' is already taken",
                input.username
            ))
            .into());
        }
        let id = Tables::next(&mut tables.next_user_id);
        let user = User {
            id,
            username: input.username.clone(),
            password: input.password.clone(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }
}
