use std::future::Future;

use relay_models::contact::ContactSubmission;
use thiserror::Error;
use url::Url;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Checks, sanitizes and validates a contact form submission and relays
    /// it to the site owner by email.
    ///
    /// Checks run in a fixed order and the first failing one is returned:
    /// honeypot, required fields, email address, phone number.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactReceipt, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReceipt {
    /// Link to view the relayed message if it was delivered to a test account.
    pub preview: Option<Url>,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("The honeypot field has been filled in.")]
    BotDetected,
    #[error("At least one required field is empty.")]
    MissingFields,
    #[error("The email address is invalid.")]
    InvalidEmail,
    #[error("The phone number is invalid.")]
    InvalidPhone,
    #[error("The mail server did not accept the message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactReceipt, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
