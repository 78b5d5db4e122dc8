//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//!
//! Entities are immutable once stored, so there are no update DTOs.

pub mod case_study;
pub mod contact_message;
pub mod project;
pub mod user;
