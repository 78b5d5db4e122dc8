//! Contact form input and its validation rules.
//!
//! A submission is checked in full before anything is persisted: every
//! required field must contain non-whitespace text and the sender address must
//! be a syntactically valid email. Failures are reported as one
//! human-readable message naming each offending field.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Maximum accepted length of the sender name.
pub const MAX_NAME_LEN: u64 = 200;

/// Maximum accepted length of the subject line.
pub const MAX_SUBJECT_LEN: u64 = 300;

/// Maximum accepted length of the message body.
pub const MAX_MESSAGE_LEN: u64 = 10_000;

/// Field order used when reporting validation failures.
const FIELD_ORDER: &[&str] = &["name", "email", "subject", "message", "recipient"];

/// Raw contact form body as submitted by the client.
///
/// Missing string fields deserialize to empty strings so that they are
/// reported by validation with a field-level message rather than by the
/// JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactInput {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = MAX_NAME_LEN, message = "Name is too long")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Subject is required"),
        length(max = MAX_SUBJECT_LEN, message = "Subject is too long")
    )]
    pub subject: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Message is required"),
        length(max = MAX_MESSAGE_LEN, message = "Message is too long")
    )]
    pub message: String,

    #[serde(default)]
    #[validate(email(message = "Invalid recipient email"))]
    pub recipient: Option<String>,
}

/// A validated contact message ready to be persisted.
///
/// `recipient` is always resolved: either the address the client asked for
/// or the configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub recipient: String,
}

impl ContactInput {
    /// Validate the submission and resolve its recipient.
    ///
    /// Surrounding whitespace is stripped from every field first. A blank
    /// `recipient` counts as absent and is replaced by `default_recipient`.
    pub fn into_new_message(self, default_recipient: &str) -> Result<NewContactMessage, CoreError> {
        let normalized = ContactInput {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            recipient: self
                .recipient
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        };

        normalized
            .validate()
            .map_err(|errors| CoreError::Validation(describe_errors(&errors)))?;

        Ok(NewContactMessage {
            name: normalized.name,
            email: normalized.email,
            subject: normalized.subject,
            message: normalized.message,
            recipient: normalized
                .recipient
                .unwrap_or_else(|| default_recipient.to_string()),
        })
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Render validation errors as `Validation error: <msg> at "<field>"; ...`.
fn describe_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<(usize, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field: &str = field.as_ref();
            let rank = FIELD_ORDER
                .iter()
                .position(|f| *f == field)
                .unwrap_or(FIELD_ORDER.len());
            let field = field.to_string();
            field_errors.iter().map(move |err| {
                let text = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                (rank, format!("{text} at \"{field}\""))
            })
        })
        .collect();
    parts.sort();

    let joined = parts
        .into_iter()
        .map(|(_, part)| part)
        .collect::<Vec<_>>()
        .join("; ");
    format!("Validation error: {joined}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "owner@portfolio.local";

    fn valid_input() -> ContactInput {
        ContactInput {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Project inquiry".into(),
            message: "Hello there".into(),
            recipient: None,
        }
    }

    fn validation_message(result: Result<NewContactMessage, CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_input_uses_default_recipient() {
        let msg = valid_input().into_new_message(DEFAULT).unwrap();
        assert_eq!(msg.recipient, DEFAULT);
        assert_eq!(msg.name, "Ada Lovelace");
    }

    #[test]
    fn explicit_recipient_is_kept() {
        let input = ContactInput {
            recipient: Some("someone@example.org".into()),
            ..valid_input()
        };
        let msg = input.into_new_message(DEFAULT).unwrap();
        assert_eq!(msg.recipient, "someone@example.org");
    }

    #[test]
    fn blank_recipient_counts_as_absent() {
        let input = ContactInput {
            recipient: Some("   ".into()),
            ..valid_input()
        };
        let msg = input.into_new_message(DEFAULT).unwrap();
        assert_eq!(msg.recipient, DEFAULT);
    }

    #[test]
    fn fields_are_trimmed() {
        let input = ContactInput {
            name: "  Ada  ".into(),
            email: " ada@example.com ".into(),
            ..valid_input()
        };
        let msg = input.into_new_message(DEFAULT).unwrap();
        assert_eq!(msg.name, "Ada");
        assert_eq!(msg.email, "ada@example.com");
    }

    #[test]
    fn invalid_email_is_rejected() {
        let input = ContactInput {
            email: "not-an-email".into(),
            ..valid_input()
        };
        let msg = validation_message(input.into_new_message(DEFAULT));
        assert_eq!(msg, "Validation error: Invalid email at \"email\"");
    }

    #[test]
    fn whitespace_only_fields_are_rejected_in_field_order() {
        let input = ContactInput {
            name: "   ".into(),
            message: "\n\t".into(),
            ..valid_input()
        };
        let msg = validation_message(input.into_new_message(DEFAULT));
        assert_eq!(
            msg,
            "Validation error: Name is required at \"name\"; Message is required at \"message\""
        );
    }

    #[test]
    fn empty_submission_reports_every_field() {
        let msg = validation_message(ContactInput::default().into_new_message(DEFAULT));
        for field in ["name", "email", "subject", "message"] {
            assert!(msg.contains(&format!("at \"{field}\"")), "missing {field} in {msg}");
        }
        assert!(!msg.contains("recipient"));
    }

    #[test]
    fn invalid_recipient_is_rejected() {
        let input = ContactInput {
            recipient: Some("nope".into()),
            ..valid_input()
        };
        let msg = validation_message(input.into_new_message(DEFAULT));
        assert!(msg.contains("at \"recipient\""));
    }

    #[test]
    fn overlong_message_is_rejected() {
        let input = ContactInput {
            message: "x".repeat(MAX_MESSAGE_LEN as usize + 1),
            ..valid_input()
        };
        let msg = validation_message(input.into_new_message(DEFAULT));
        assert!(msg.contains("Message is too long"));
    }
}
