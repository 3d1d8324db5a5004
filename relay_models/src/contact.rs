use crate::macros::sanitized_text;

/// A contact form submission as received from the client.
///
/// Fields that were missing or not strings are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
    /// Honeypot field, hidden from humans and left empty by legitimate clients.
    pub company: Option<String>,
}

impl ContactSubmission {
    /// Returns whether the honeypot field has been filled in.
    pub fn honeypot_filled(&self) -> bool {
        self.company
            .as_deref()
            .is_some_and(|company| !company.trim().is_empty())
    }

    pub fn sanitize(self) -> SanitizedContactSubmission {
        SanitizedContactSubmission {
            name: self.name.unwrap_or_default().into(),
            email: self.email.unwrap_or_default().into(),
            phone: self.phone.unwrap_or_default().into(),
            message: self.message.unwrap_or_default().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
    pub message: ContactMessage,
}

impl SanitizedContactSubmission {
    /// Returns whether any of the fields is empty.
    pub fn has_empty_field(&self) -> bool {
        self.name.is_empty()
            || self.email.is_empty()
            || self.phone.is_empty()
            || self.message.is_empty()
    }
}

sanitized_text!(ContactName, 200);
sanitized_text!(ContactEmail, 200);
sanitized_text!(ContactPhone, 50);
sanitized_text!(
    /// Message body. Line breaks are preserved.
    ContactMessage,
    5000
);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn honeypot() {
        for (company, expected) in [
            (None, false),
            (Some(""), false),
            (Some("   \n"), false),
            (Some("ACME Corp"), true),
            (Some("  x  "), true),
        ] {
            let submission = ContactSubmission {
                company: company.map(Into::into),
                ..Default::default()
            };
            assert_eq!(submission.honeypot_filled(), expected, "{company:?}");
        }
    }

    #[test]
    fn sanitize() {
        let submission = ContactSubmission {
            name: Some("  <b>Max</b> Mustermann ".into()),
            email: Some(" max@example.de".into()),
            phone: Some("+49 123 4567890".into()),
            message: Some("Hello<script>alert(1)</script>\nWorld".into()),
            company: None,
        };

        let sanitized = submission.sanitize();

        assert_eq!(*sanitized.name, "Max Mustermann");
        assert_eq!(*sanitized.email, "max@example.de");
        assert_eq!(*sanitized.phone, "+49 123 4567890");
        assert_eq!(*sanitized.message, "Hello\nWorld");
        assert!(!sanitized.has_empty_field());
    }

    #[test]
    fn sanitize_missing_fields() {
        let sanitized = ContactSubmission {
            name: Some("Max".into()),
            ..Default::default()
        }
        .sanitize();

        assert_eq!(*sanitized.email, "");
        assert!(sanitized.has_empty_field());
    }

    #[test]
    fn field_caps() {
        let long = "1".repeat(6000);
        assert_eq!(ContactName::from(long.clone()).chars().count(), ContactName::MAX_LEN);
        assert_eq!(ContactEmail::from(long.clone()).chars().count(), ContactEmail::MAX_LEN);
        assert_eq!(ContactPhone::from(long.clone()).chars().count(), ContactPhone::MAX_LEN);
        assert_eq!(ContactMessage::from(long).chars().count(), 5000);
    }

    #[test]
    fn markup_only_is_empty() {
        let name = ContactName::from("<script>alert(1)</script>".to_owned());
        assert!(name.is_empty());
    }
}
