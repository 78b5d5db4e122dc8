//! Outbound notifications for contact form submissions.
//!
//! A stored [`ContactMessage`](portfolio_db::models::contact_message::ContactMessage)
//! is forwarded to its recipient through a [`Mailer`]. The transport is
//! chosen once at startup from [`EmailConfig`]: SendGrid when an API key is
//! configured, otherwise SMTP, otherwise no mailer at all.

pub mod content;
pub mod delivery;

pub use delivery::email::{build_mailer, EmailConfig, EmailError, Mailer, Transport};
