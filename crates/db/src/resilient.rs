//! Fallback-aware access to portfolio content.
//!
//! [`ResilientStore`] wraps the live [`ContentStore`] chosen at startup.
//! Reads prefer live data and substitute the [`FallbackData`] snapshot when
//! the live query fails, returns nothing, or does not answer within the read
//! budget. A single response is always served entirely from one source.
//! Writes only ever go to the live store and propagate its errors.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use portfolio_core::contact::ContactInput;
use portfolio_core::filter::ProjectFilter;
use portfolio_core::types::DbId;

use crate::error::StoreError;
use crate::fallback::FallbackData;
use crate::models::case_study::{CaseStudy, CreateCaseStudy};
use crate::models::contact_message::ContactMessage;
use crate::models::project::{CreateProject, Project};
use crate::seed::{self, SeedOutcome};
use crate::store::ContentStore;

/// How long a read waits for the live store before serving fallback data.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1500);

/// Why a read was answered from the fallback snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The live query returned an error or ran out of time.
    StoreError,
    /// The live query succeeded but found nothing.
    EmptyResult,
}

/// Which source answered a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    Fallback(FallbackReason),
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Fallback(_) => "fallback",
        }
    }
}

/// A read result tagged with the source that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    fn live(data: T) -> Self {
        Self {
            data,
            source: DataSource::Live,
        }
    }

    fn fallback(data: T, reason: FallbackReason) -> Self {
        Self {
            data,
            source: DataSource::Fallback(reason),
        }
    }
}

/// Live store plus read-only fallback snapshot.
#[derive(Clone)]
pub struct ResilientStore {
    live: Arc<dyn ContentStore>,
    fallback: Arc<FallbackData>,
    default_recipient: String,
    read_timeout: Duration,
}

impl ResilientStore {
    /// `default_recipient` is assigned to contact messages that do not name
    /// one.
    pub fn new(
        live: Arc<dyn ContentStore>,
        fallback: Arc<FallbackData>,
        default_recipient: impl Into<String>,
    ) -> Self {
        Self {
            live,
            fallback,
            default_recipient: default_recipient.into(),
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Override how long reads wait for the live store.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Run the live store's liveness query within the read budget.
    pub async fn ping_live(&self) -> Result<String, StoreError> {
        self.bounded(self.live.ping()).await
    }

    pub fn fallback(&self) -> &FallbackData {
        &self.fallback
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List projects matching `filter`; never fails.
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Sourced<Vec<Project>> {
        let live = self.bounded(self.live.list_projects(filter)).await;
        resolve_list("projects", live, || self.fallback.projects(filter))
    }

    /// Look up a project; `None` when neither source has it.
    pub async fn get_project(&self, id: DbId) -> Option<Sourced<Project>> {
        let live = self.bounded(self.live.get_project(id)).await;
        resolve_one("project", id, live, || self.fallback.project(id))
    }

    /// List case studies; never fails.
    pub async fn list_case_studies(&self) -> Sourced<Vec<CaseStudy>> {
        let live = self.bounded(self.live.list_case_studies()).await;
        resolve_list("case studies", live, || self.fallback.case_studies())
    }

    /// Look up the case study of a project; `None` when neither source has it.
    pub async fn get_case_study_by_project_id(
        &self,
        project_id: DbId,
    ) -> Option<Sourced<CaseStudy>> {
        let live = self
            .bounded(self.live.get_case_study_by_project_id(project_id))
            .await;
        resolve_one("case study", project_id, live, || {
            self.fallback.case_study_for_project(project_id)
        })
    }

    /// Run a live read, failing with [`StoreError::Unavailable`] once the
    /// read budget is spent. The pool may otherwise keep retrying a refused
    /// connection until its own acquire timeout.
    async fn bounded<T>(
        &self,
        read: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.read_timeout, read).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Unavailable(format!(
                "no answer within {}ms",
                self.read_timeout.as_millis()
            ))),
        }
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Validate and persist a contact form submission.
    ///
    /// Validation happens before the store is touched. A missing recipient
    /// is replaced by the configured default.
    pub async fn create_contact_message(
        &self,
        input: ContactInput,
    ) -> Result<ContactMessage, StoreError> {
        let message = input.into_new_message(&self.default_recipient)?;
        let stored = self.live.create_contact_message(&message).await?;
        tracing::info!(contact_message_id = stored.id, "Contact message stored");
        Ok(stored)
    }

    pub async fn create_project(&self, input: &CreateProject) -> Result<Project, StoreError> {
        self.live.create_project(input).await
    }

    pub async fn create_case_study(
        &self,
        input: &CreateCaseStudy,
    ) -> Result<CaseStudy, StoreError> {
        self.live.create_case_study(input).await
    }

    /// Seed the live store if it holds no projects. See [`seed::initialize_if_empty`].
    pub async fn initialize_if_empty(&self) -> Result<SeedOutcome, StoreError> {
        seed::initialize_if_empty(self.live.as_ref()).await
    }
}

fn resolve_list<T>(
    entity: &'static str,
    live: Result<Vec<T>, StoreError>,
    fallback: impl FnOnce() -> Vec<T>,
) -> Sourced<Vec<T>> {
    match live {
        Ok(rows) if !rows.is_empty() => Sourced::live(rows),
        Ok(_) => {
            tracing::info!(entity, "Store returned no {entity}; serving fallback data");
            Sourced::fallback(fallback(), FallbackReason::EmptyResult)
        }
        Err(e) => {
            tracing::warn!(
                entity,
                error = %e,
                connectivity = e.is_connectivity(),
                "Store query for {entity} failed; serving fallback data",
            );
            Sourced::fallback(fallback(), FallbackReason::StoreError)
        }
    }
}

fn resolve_one<T>(
    entity: &'static str,
    id: DbId,
    live: Result<Option<T>, StoreError>,
    fallback: impl FnOnce() -> Option<T>,
) -> Option<Sourced<T>> {
    match live {
        Ok(Some(row)) => Some(Sourced::live(row)),
        Ok(None) => {
            let found = fallback();
            if found.is_some() {
                tracing::info!(entity, id, "Store has no {entity} {id}; serving fallback data");
            }
            found.map(|row| Sourced::fallback(row, FallbackReason::EmptyResult))
        }
        Err(e) => {
            tracing::warn!(
                entity,
                id,
                error = %e,
                connectivity = e.is_connectivity(),
                "Store lookup for {entity} {id} failed; serving fallback data",
            );
            fallback().map(|row| Sourced::fallback(row, FallbackReason::StoreError))
        }
    }
}
