//! Contact message entity model.
//!
//! Contact messages are append-only: created once per form submission and
//! never updated or deleted. The create DTO is
//! [`portfolio_core::contact::NewContactMessage`], which only exists after
//! validation.

use portfolio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub recipient: Option<String>,
    pub created_at: Timestamp,
}
