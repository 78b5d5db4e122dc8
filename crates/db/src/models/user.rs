//! User entity model and DTOs.
//!
//! Users exist in the schema but no HTTP route reads or writes them.

use portfolio_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    /// Opaque credential; never serialized.
    #[serde(skip_serializing)]
    pub password: String,
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}
