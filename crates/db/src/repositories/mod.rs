//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every method uses the pool for a
//! single statement, so the connection goes back to the pool on every exit
//! path, including errors.

pub mod case_study_repo;
pub mod contact_message_repo;
pub mod project_repo;
pub mod user_repo;

pub use case_study_repo::CaseStudyRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
