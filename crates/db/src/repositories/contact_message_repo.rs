//! Repository for the `contact_messages` table (append-only).

use portfolio_core::contact::NewContactMessage;
use sqlx::PgPool;

use crate::models::contact_message::ContactMessage;

const COLUMNS: &str = "id, name, email, subject, message, recipient, created_at";

/// Provides the insert operation for contact messages.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Insert a validated contact message, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &NewContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, subject, message, recipient)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(&input.recipient)
            .fetch_one(pool)
            .await
    }
}
