//! Seeding of an empty store.

mod common;

use std::sync::Arc;

use portfolio_core::filter::ProjectFilter;
use portfolio_db::seed::SeedOutcome;
use portfolio_db::store::{ContentStore, MemStore};

use common::{live_project, resilient};

#[tokio::test]
async fn seeding_twice_inserts_one_set() {
    let live = Arc::new(MemStore::new());
    let store = resilient(Arc::clone(&live));

    let first = store.initialize_if_empty().await.unwrap();
    let second = store.initialize_if_empty().await.unwrap();

    assert_eq!(
        first,
        SeedOutcome::Seeded {
            projects: 6,
            case_studies: 1
        }
    );
    assert_eq!(second, SeedOutcome::AlreadyPopulated);
    assert_eq!(live.list_projects(&ProjectFilter::all()).await.unwrap().len(), 6);
    assert_eq!(live.list_case_studies().await.unwrap().len(), 1);
}

#[tokio::test]
async fn case_studies_reference_the_assigned_project_ids() {
    let live = Arc::new(MemStore::with_content(vec![], vec![]));
    let store = resilient(Arc::clone(&live));
    store.initialize_if_empty().await.unwrap();

    let projects = live.list_projects(&ProjectFilter::all()).await.unwrap();
    for cs in live.list_case_studies().await.unwrap() {
        let project = projects
            .iter()
            .find(|p| p.id == cs.project_id)
            .expect("case study must point at a seeded project");
        assert_eq!(project.title, "Financial App Redesign");
    }
}

#[tokio::test]
async fn populated_store_is_left_alone() {
    let live = Arc::new(MemStore::with_content(
        vec![live_project(1, "Existing", "ui")],
        vec![],
    ));
    let store = resilient(Arc::clone(&live));

    let outcome = store.initialize_if_empty().await.unwrap();

    assert_eq!(outcome, SeedOutcome::AlreadyPopulated);
    assert_eq!(live.write_attempts(), 0);
}

#[tokio::test]
async fn seeding_an_unreachable_store_reports_failure() {
    let live = Arc::new(MemStore::new());
    live.set_online(false);
    let store = resilient(Arc::clone(&live));

    assert!(store.initialize_if_empty().await.is_err());
    assert_eq!(live.write_attempts(), 0);

    // Reads keep working from the snapshot.
    let projects = store.list_projects(&ProjectFilter::all()).await;
    assert_eq!(projects.data.len(), 3);
}

#[tokio::test]
async fn failure_partway_through_leaves_the_store_empty_and_retryable() {
    let live = Arc::new(MemStore::new());
    live.fail_writes_after(1);
    let store = resilient(Arc::clone(&live));

    assert!(store.initialize_if_empty().await.is_err());
    assert!(live.list_projects(&ProjectFilter::all()).await.unwrap().is_empty());
    assert!(live.list_case_studies().await.unwrap().is_empty());

    live.clear_write_limit();
    let retried = store.initialize_if_empty().await.unwrap();

    assert_eq!(
        retried,
        SeedOutcome::Seeded {
            projects: 6,
            case_studies: 1
        }
    );
    let projects = live.list_projects(&ProjectFilter::all()).await.unwrap();
    assert_eq!(projects.len(), 6);
    let case_study = &live.list_case_studies().await.unwrap()[0];
    assert_eq!(case_study.project_id, projects[0].id);
}
