//! Handler for contact form submissions.
//!
//! The message is persisted first; the email notification is attempted only
//! afterwards and its outcome never changes the status code.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use portfolio_core::contact::ContactInput;
use portfolio_db::models::contact_message::ContactMessage;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of a successful submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub message: &'static str,
    pub email_delivered: bool,
}

/// POST /api/contact
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ContactInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let stored = state.store.create_contact_message(input).await?;
    let email_delivered = notify(&state, &stored).await;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Message sent successfully",
            email_delivered,
        }),
    ))
}

async fn notify(state: &AppState, message: &ContactMessage) -> bool {
    let Some(mailer) = &state.mailer else {
        tracing::info!(
            contact_message_id = message.id,
            "Email delivery not configured, notification skipped",
        );
        return false;
    };

    match mailer.send_contact(message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                contact_message_id = message.id,
                transport = mailer.transport(),
                error = %e,
                "Contact notification failed; message is stored",
            );
            false
        }
    }
}
