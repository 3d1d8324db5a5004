use std::sync::Arc;

use relay_core_contact_contracts::{ContactReceipt, ContactService, ContactSubmitError};
use relay_email_contracts::EmailService;
use relay_models::{contact::ContactSubmission, email_address::EmailAddress};
use relay_shared_contracts::time::TimeService;
use tracing::{debug, info};

pub mod compose;
pub mod validate;

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Shown in the subject and the sender name.
    pub site_name: Arc<str>,
    /// Receives the submissions, defaults to the sender address.
    pub recipient: Option<Arc<EmailAddress>>,
}

impl<Time, Email> ContactServiceImpl<Time, Email> {
    pub fn new(time: Time, email: Email, config: ContactServiceConfig) -> Self {
        Self {
            time,
            email,
            config,
        }
    }
}

impl<Time, EmailS> ContactService for ContactServiceImpl<Time, EmailS>
where
    Time: TimeService,
    EmailS: EmailService,
{
    #[tracing::instrument(skip_all)]
    async fn submit(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactReceipt, ContactSubmitError> {
        if submission.honeypot_filled() {
            debug!("rejecting submission with filled honeypot");
            return Err(ContactSubmitError::BotDetected);
        }

        let submission = validate::validate(submission.sanitize()).inspect_err(|err| {
            debug!("rejecting invalid submission: {err}");
        })?;

        let email = compose::compose(&self.config, &submission, self.time.now())?;

        let receipt = self.email.send(email).await?;
        if !receipt.accepted {
            return Err(ContactSubmitError::Send);
        }

        info!(
            preview = receipt.preview.as_ref().map(|url| url.as_str()),
            "relayed contact message"
        );

        Ok(ContactReceipt {
            preview: receipt.preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use anyhow::anyhow;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use relay_email_contracts::{EmailReceipt, MockEmailService};
    use relay_shared_contracts::time::MockTimeService;
    use relay_utils::assert_matches;

    use super::*;

    fn config() -> ContactServiceConfig {
        ContactServiceConfig {
            site_name: "Website".into(),
            recipient: Some(Arc::new("owner@example.com".parse().unwrap())),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: Some("  Max <b>Mustermann</b>".into()),
            email: Some("max.mustermann@example.de ".into()),
            phone: Some("+1 (555) 123-4567".into()),
            message: Some("Hello World!".into()),
            company: Some("   ".into()),
        }
    }

    fn receipt(accepted: bool) -> EmailReceipt {
        EmailReceipt {
            accepted,
            preview: None,
        }
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let email = MockEmailService::new().with_send_matching(
            |email| {
                let reply_to = email.reply_to.as_ref().unwrap();
                reply_to.email() == "max.mustermann@example.de"
                    && reply_to.name() == Some("Max Mustermann")
                    && email.recipient.as_ref().map(|r| r.email()) == Some("owner@example.com")
                    && email.sender_name.as_deref() == Some("Website Contact")
                    && email.body.contains("Received at: 2024-05-17T09:30:00.000Z")
            },
            Ok(receipt(true)),
        );

        let sut = ContactServiceImpl::new(time, email, config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_eq!(result.unwrap(), ContactReceipt { preview: None });
    }

    #[tokio::test]
    async fn ok_preview() {
        // Arrange
        let preview = "https://ethereal.email/message/abc".parse().unwrap();

        let time = MockTimeService::new().with_now(now());
        let email = MockEmailService::new().with_send_matching(
            |_| true,
            Ok(EmailReceipt {
                accepted: true,
                preview: Some(preview),
            }),
        );

        let sut = ContactServiceImpl::new(time, email, config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_eq!(
            result.unwrap().preview.unwrap().as_str(),
            "https://ethereal.email/message/abc"
        );
    }

    #[tokio::test]
    async fn bot_detected() {
        // Arrange
        let sut = ContactServiceImpl::new(MockTimeService::new(), MockEmailService::new(), config());

        // Act
        let result = sut
            .submit(ContactSubmission {
                company: Some("ACME Corp".into()),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::BotDetected));
    }

    #[tokio::test]
    async fn bot_detected_before_missing_fields() {
        // Arrange
        let sut = ContactServiceImpl::new(MockTimeService::new(), MockEmailService::new(), config());

        // Act
        let result = sut
            .submit(ContactSubmission {
                company: Some("x".into()),
                ..Default::default()
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::BotDetected));
    }

    #[tokio::test]
    async fn missing_fields() {
        // Arrange
        let sut = ContactServiceImpl::new(MockTimeService::new(), MockEmailService::new(), config());

        // Act
        let result = sut
            .submit(ContactSubmission {
                message: Some("<script>alert(1)</script>".into()),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::MissingFields));
    }

    #[tokio::test]
    async fn invalid_email() {
        // Arrange
        let sut = ContactServiceImpl::new(MockTimeService::new(), MockEmailService::new(), config());

        // Act
        let result = sut
            .submit(ContactSubmission {
                email: Some("not-an-email".into()),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::InvalidEmail));
    }

    #[tokio::test]
    async fn invalid_phone() {
        // Arrange
        let sut = ContactServiceImpl::new(MockTimeService::new(), MockEmailService::new(), config());

        // Act
        let result = sut
            .submit(ContactSubmission {
                phone: Some("abc-defg".into()),
                ..submission()
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::InvalidPhone));
    }

    #[tokio::test]
    async fn not_accepted() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let email = MockEmailService::new().with_send_matching(|_| true, Ok(receipt(false)));

        let sut = ContactServiceImpl::new(time, email, config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Send));
    }

    #[tokio::test]
    async fn delivery_error() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let mut email = MockEmailService::new();
        email
            .expect_send()
            .once()
            .return_once(|_| Box::pin(ready(Err(anyhow!("connection refused")))));

        let sut = ContactServiceImpl::new(time, email, config());

        // Act
        let result = sut.submit(submission()).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Other(err)) if err.to_string() == "connection refused");
    }
}
