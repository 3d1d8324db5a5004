use std::future::Future;

use relay_models::Sensitive;
use url::Url;

/// Provisions disposable mail accounts for testing delivery without a real
/// SMTP server.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TestAccountApiService: Send + Sync + 'static {
    /// Creates a new test account.
    fn create_account(&self) -> impl Future<Output = anyhow::Result<TestAccount>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAccount {
    pub user: String,
    pub password: Sensitive<String>,
    pub smtp: TestAccountSmtp,
    /// Base url of the web interface showing the delivered messages.
    pub web: Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAccountSmtp {
    pub host: String,
    pub port: u16,
    pub secure: bool,
}

#[cfg(feature = "mock")]
impl MockTestAccountApiService {
    pub fn with_create_account(mut self, result: anyhow::Result<TestAccount>) -> Self {
        self.expect_create_account()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
