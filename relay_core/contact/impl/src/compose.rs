use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use relay_email_contracts::Email;
use relay_models::{contact::SanitizedContactSubmission, email_address::EmailAddress};

use crate::ContactServiceConfig;

/// Builds the email relaying `submission` to the site owner.
///
/// Replies go straight to the submitter.
pub fn compose(
    config: &ContactServiceConfig,
    submission: &SanitizedContactSubmission,
    received_at: DateTime<Utc>,
) -> anyhow::Result<Email> {
    let SanitizedContactSubmission {
        name,
        email,
        phone,
        message,
    } = submission;
    let site_name = &*config.site_name;
    let received_at = received_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    let reply_to = email
        .parse::<EmailAddress>()
        .with_context(|| format!("Failed to parse submitter address {:?}", **email))?
        .with_name(name.to_string());

    let body = format!(
        "You have a new message from the contact form.\n\nName: {name}\nEmail: {email}\nPhone: \
         {phone}\n\nMessage:\n{message}\n\n---\nReceived at: {received_at}"
    );

    let html_body = format!(
        "<div style=\"font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;\
         line-height:1.6\"><h2>New contact form submission — {site_name}</h2><p><strong>Name:\
         </strong> {name}</p><p><strong>Email:</strong> {email}</p><p><strong>Phone:</strong> \
         {phone}</p><p><strong>Message:</strong><br>{message_html}</p><hr><small>Received at: \
         {received_at}</small></div>",
        message_html = message.replace('\n', "<br>"),
    );

    Ok(Email {
        sender_name: Some(format!("{site_name} Contact")),
        recipient: config
            .recipient
            .as_deref()
            .cloned()
            .map(EmailAddress::without_name),
        reply_to: Some(reply_to),
        subject: format!("New contact form submission — {site_name}"),
        body,
        html_body: Some(html_body),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use relay_models::contact::ContactSubmission;

    use super::*;

    fn config(recipient: Option<&str>) -> ContactServiceConfig {
        ContactServiceConfig {
            site_name: "Example Site".into(),
            recipient: recipient.map(|recipient| Arc::new(recipient.parse().unwrap())),
        }
    }

    fn submission(message: &str) -> SanitizedContactSubmission {
        ContactSubmission {
            name: Some("Max Mustermann".into()),
            email: Some("max@example.de".into()),
            phone: Some("+49 123 4567890".into()),
            message: Some(message.into()),
            company: None,
        }
        .sanitize()
    }

    fn received_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    #[test]
    fn text_body() {
        let email = compose(&config(None), &submission("Hello\nWorld"), received_at()).unwrap();

        assert_eq!(
            email.body,
            "You have a new message from the contact form.\n\nName: Max Mustermann\nEmail: \
             max@example.de\nPhone: +49 123 4567890\n\nMessage:\nHello\nWorld\n\n---\nReceived \
             at: 2024-05-17T09:30:00.000Z"
        );
    }

    #[test]
    fn html_body() {
        let email = compose(&config(None), &submission("Hello\nWorld"), received_at()).unwrap();

        let html = email.html_body.unwrap();
        assert!(html.contains("<h2>New contact form submission — Example Site</h2>"));
        assert!(html.contains("<p><strong>Name:</strong> Max Mustermann</p>"));
        assert!(html.contains("<p><strong>Email:</strong> max@example.de</p>"));
        assert!(html.contains("<p><strong>Phone:</strong> +49 123 4567890</p>"));
        assert!(html.contains("<br>Hello<br>World</p>"));
        assert!(html.contains("<small>Received at: 2024-05-17T09:30:00.000Z</small>"));
    }

    #[test]
    fn headers() {
        let email = compose(&config(None), &submission("Hi"), received_at()).unwrap();

        assert_eq!(email.sender_name.as_deref(), Some("Example Site Contact"));
        assert_eq!(email.subject, "New contact form submission — Example Site");
        assert_eq!(email.recipient, None);

        let reply_to = email.reply_to.unwrap();
        assert_eq!(reply_to.name(), Some("Max Mustermann"));
        assert_eq!(reply_to.email(), "max@example.de");
    }

    #[test]
    fn configured_recipient() {
        let email = compose(
            &config(Some("owner@example.com")),
            &submission("Hi"),
            received_at(),
        )
        .unwrap();

        let recipient = email.recipient.unwrap();
        assert_eq!(recipient.email(), "owner@example.com");
        assert_eq!(recipient.name(), None);
    }

    #[test]
    fn unparsable_reply_to() {
        // passes the permissive pattern, but is no valid mailbox
        let submission = ContactSubmission {
            email: Some("a;b@example.com".into()),
            ..ContactSubmission::default()
        }
        .sanitize();

        let result = compose(&config(None), &submission, received_at());

        assert!(result.is_err());
    }
}
