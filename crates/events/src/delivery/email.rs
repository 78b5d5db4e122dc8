//! Transport selection and the [`Mailer`] seam.
//!
//! Configuration is loaded from environment variables. If neither
//! `SENDGRID_API_KEY` nor `SMTP_HOST` is set, [`EmailConfig::from_env`]
//! returns `Ok(None)` and no mailer should be constructed. Malformed values
//! are reported as [`EmailError::InvalidConfig`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use portfolio_core::types::DbId;
use portfolio_db::models::contact_message::ContactMessage;

use super::sendgrid::SendGridMailer;
use super::smtp::SmtpMailer;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The recipient, sender or reply-to address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The HTTP request to the mail API failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The mail API returned a non-2xx status code.
    #[error("Mail API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// An email setting is present but malformed.
    #[error("{key} is invalid: '{value}'")]
    InvalidConfig { key: &'static str, value: String },

    /// The message has no recipient to deliver to.
    #[error("Contact message {0} has no recipient")]
    MissingRecipient(DbId),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `MAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@portfolio.local";

/// Which outbound transport to use.
#[derive(Clone)]
pub enum Transport {
    SendGrid {
        api_key: String,
    },
    Smtp {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
    },
}

impl Transport {
    pub fn name(&self) -> &'static str {
        match self {
            Transport::SendGrid { .. } => "sendgrid",
            Transport::Smtp { .. } => "smtp",
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::SendGrid { .. } => f
                .debug_struct("SendGrid")
                .field("api_key", &"<redacted>")
                .finish(),
            Transport::Smtp {
                host, port, user, ..
            } => f
                .debug_struct("Smtp")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Configuration for outbound contact notifications.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub transport: Transport,
    /// RFC 5322 "From" address.
    pub from_address: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable           | Required | Default                    |
    /// |--------------------|----------|----------------------------|
    /// | `SENDGRID_API_KEY` | no       | -                          |
    /// | `SMTP_HOST`        | no       | -                          |
    /// | `SMTP_PORT`        | no       | `587`                      |
    /// | `SMTP_USER`        | no       | -                          |
    /// | `SMTP_PASSWORD`    | no       | -                          |
    /// | `MAIL_FROM`        | no       | `noreply@portfolio.local`  |
    pub fn from_env() -> Result<Option<Self>, EmailError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads from `lookup`.
    ///
    /// SendGrid takes precedence when both transports are configured. Blank
    /// values count as unset.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, EmailError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let transport = if let Some(api_key) = get("SENDGRID_API_KEY") {
            Transport::SendGrid { api_key }
        } else if let Some(host) = get("SMTP_HOST") {
            let port = match get("SMTP_PORT") {
                None => DEFAULT_SMTP_PORT,
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| EmailError::InvalidConfig {
                        key: "SMTP_PORT",
                        value: raw,
                    })?,
            };
            Transport::Smtp {
                host,
                port,
                user: get("SMTP_USER"),
                password: get("SMTP_PASSWORD"),
            }
        } else {
            return Ok(None);
        };

        Ok(Some(Self {
            transport,
            from_address: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
        }))
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends a notification for a stored contact message.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Short transport name for logs.
    fn transport(&self) -> &'static str;

    async fn send_contact(&self, message: &ContactMessage) -> Result<(), EmailError>;
}

/// Construct the mailer selected by `config`.
pub fn build_mailer(config: EmailConfig) -> Result<Arc<dyn Mailer>, EmailError> {
    let mailer: Arc<dyn Mailer> = match config.transport {
        Transport::SendGrid { api_key } => {
            Arc::new(SendGridMailer::new(api_key, config.from_address)?)
        }
        Transport::Smtp {
            host,
            port,
            user,
            password,
        } => Arc::new(SmtpMailer::new(
            &host,
            port,
            user.zip(password),
            &config.from_address,
        )?),
    };
    Ok(mailer)
}

/// The address a stored message should be delivered to.
pub(crate) fn recipient_of(message: &ContactMessage) -> Result<&str, EmailError> {
    message
        .recipient
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or(EmailError::MissingRecipient(message.id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn none_without_any_transport() {
        assert!(EmailConfig::from_lookup(lookup(&[])).unwrap().is_none());
        assert!(EmailConfig::from_lookup(lookup(&[("SMTP_HOST", "  ")]))
            .unwrap()
            .is_none());
    }

    #[test]
    fn sendgrid_wins_over_smtp() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SENDGRID_API_KEY", "SG.key"),
            ("SMTP_HOST", "smtp.example.com"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.transport.name(), "sendgrid");
        assert_eq!(config.from_address, DEFAULT_FROM_ADDRESS);
    }

    #[test]
    fn smtp_defaults_port_and_reads_credentials() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "mailer"),
            ("MAIL_FROM", "site@example.com"),
        ]))
        .unwrap()
        .unwrap();
        match config.transport {
            Transport::Smtp {
                host,
                port,
                user,
                password,
            } => {
                assert_eq!(host, "smtp.example.com");
                assert_eq!(port, DEFAULT_SMTP_PORT);
                assert_eq!(user.as_deref(), Some("mailer"));
                assert!(password.is_none());
            }
            other => panic!("unexpected transport {other:?}"),
        }
        assert_eq!(config.from_address, "site@example.com");
    }

    #[test]
    fn malformed_smtp_port_is_rejected() {
        let err = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        match err {
            EmailError::InvalidConfig { key, value } => {
                assert_eq!(key, "SMTP_PORT");
                assert_eq!(value, "not-a-port");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn explicit_smtp_port_is_used() {
        let config = EmailConfig::from_lookup(lookup(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", " 2525 "),
        ]))
        .unwrap()
        .unwrap();
        assert_smtp_port(&config.transport, 2525);
    }

    fn assert_smtp_port(transport: &Transport, expected: u16) {
        match transport {
            Transport::Smtp { port, .. } => assert_eq!(*port, expected),
            other => panic!("unexpected transport {other:?}"),
        }
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let transport = Transport::SendGrid {
            api_key: "SG.secret".into(),
        };
        let rendered = format!("{transport:?}");
        assert!(!rendered.contains("SG.secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn build_mailer_selects_transport() {
        let smtp = build_mailer(EmailConfig {
            transport: Transport::Smtp {
                host: "localhost".into(),
                port: 2525,
                user: None,
                password: None,
            },
            from_address: DEFAULT_FROM_ADDRESS.into(),
        })
        .unwrap();
        assert_eq!(smtp.transport(), "smtp");

        let sendgrid = build_mailer(EmailConfig {
            transport: Transport::SendGrid {
                api_key: "SG.key".into(),
            },
            from_address: DEFAULT_FROM_ADDRESS.into(),
        })
        .unwrap();
        assert_eq!(sendgrid.transport(), "sendgrid");
    }

    #[test]
    fn invalid_sender_address_is_rejected_for_smtp() {
        let result = build_mailer(EmailConfig {
            transport: Transport::Smtp {
                host: "localhost".into(),
                port: 2525,
                user: None,
                password: None,
            },
            from_address: "not an address".into(),
        });
        assert!(matches!(result, Err(EmailError::Address(_))));
    }
}
