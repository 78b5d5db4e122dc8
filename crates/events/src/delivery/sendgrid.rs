//! Contact notification delivery via the SendGrid v3 HTTP API.
//!
//! One POST per message, no retry: a failed notification is reported to the
//! caller, which already holds the persisted message.

use std::time::Duration;

use async_trait::async_trait;
use portfolio_db::models::contact_message::ContactMessage;

use super::email::{recipient_of, EmailError, Mailer};
use crate::content::ContactEmail;

/// SendGrid mail send endpoint.
pub const SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on how much of an error response body is kept.
const MAX_ERROR_BODY: usize = 512;

pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
    from_address: String,
    endpoint: String,
}

impl SendGridMailer {
    pub fn new(api_key: String, from_address: String) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            from_address,
            endpoint: SENDGRID_ENDPOINT.to_string(),
        })
    }

    /// Send to a different URL, e.g. a local sandbox.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn payload(&self, message: &ContactMessage) -> Result<serde_json::Value, EmailError> {
        let to = recipient_of(message)?;
        let content = ContactEmail::render(message);
        Ok(serde_json::json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from_address },
            "reply_to": { "email": message.email, "name": message.name },
            "subject": content.subject,
            "content": [
                { "type": "text/plain", "value": content.text },
                { "type": "text/html", "value": content.html },
            ],
        }))
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    fn transport(&self) -> &'static str {
        "sendgrid"
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), EmailError> {
        let payload = self.payload(message)?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(EmailError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            contact_message_id = message.id,
            to = ?message.recipient,
            status = status.as_u16(),
            "Contact notification sent via SendGrid",
        );
        Ok(())
    }
}
