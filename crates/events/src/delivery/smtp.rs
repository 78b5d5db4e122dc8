//! Contact notification delivery via SMTP.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use portfolio_db::models::contact_message::ContactMessage;

use super::email::{recipient_of, EmailError, Mailer};
use crate::content::ContactEmail;

/// Sends contact notifications through a STARTTLS SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        from_address: &str,
    ) -> Result<Self, EmailError> {
        let from: Mailbox = from_address.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(port);
        if let Some((user, pass)) = credentials {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, message: &ContactMessage) -> Result<Message, EmailError> {
        let to: Mailbox = recipient_of(message)?.parse()?;
        let reply_to: Mailbox = message.email.parse()?;
        let content = ContactEmail::render(message);

        Message::builder()
            .from(self.from.clone())
            .reply_to(reply_to)
            .to(to)
            .subject(content.subject)
            .multipart(MultiPart::alternative_plain_html(content.text, content.html))
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn transport(&self) -> &'static str {
        "smtp"
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), EmailError> {
        let email = self.build_message(message)?;
        self.transport.send(email).await?;

        tracing::info!(
            contact_message_id = message.id,
            to = ?message.recipient,
            "Contact notification sent via SMTP",
        );
        Ok(())
    }
}
