use std::future::Future;

use relay_models::email_address::EmailAddressWithName;
use url::Url;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Sends an email from the configured sender address.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<EmailReceipt>> + Send;

    /// Checks whether the mail server is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    /// Display name for the sender address.
    pub sender_name: Option<String>,
    /// Defaults to the sender address.
    pub recipient: Option<EmailAddressWithName>,
    pub reply_to: Option<EmailAddressWithName>,
    pub subject: String,
    /// Plain text body
    pub body: String,
    /// Alternative html body
    pub html_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    /// Whether the mail server accepted the message.
    pub accepted: bool,
    /// Link to view the delivered message, only available for test
    /// deliveries.
    pub preview: Option<Url>,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: EmailReceipt) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_matching(
        mut self,
        matches: impl Fn(&Email) -> bool + Send + 'static,
        result: anyhow::Result<EmailReceipt>,
    ) -> Self {
        self.expect_send()
            .once()
            .withf(matches)
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
