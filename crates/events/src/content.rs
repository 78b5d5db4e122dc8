//! Rendering of contact notification emails.

use portfolio_db::models::contact_message::ContactMessage;

/// Subject, plain-text body and HTML body of one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ContactEmail {
    pub fn render(message: &ContactMessage) -> Self {
        let subject = format!("Portfolio Contact: {}", message.subject);

        let text = format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}\n",
            message.name, message.email, message.subject, message.message
        );

        let html = format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Subject:</strong> {}</p>\n\
             <h3>Message:</h3>\n\
             <p>{}</p>\n",
            escape_html(&message.name),
            escape_html(&message.email),
            escape_html(&message.subject),
            escape_html(&message.message).replace('\n', "<br>"),
        );

        Self {
            subject,
            text,
            html,
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
