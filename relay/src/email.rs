use anyhow::Context;
use relay_email_impl::EmailServiceImpl;
use relay_extern_impl::test_account::TestAccountApiServiceImpl;

use crate::environment::{types::Email, ConfigProvider};

/// Set up mail delivery, either through SMTP or to a test account.
pub fn connect(config: &ConfigProvider) -> anyhow::Result<Email> {
    let test_account_api =
        TestAccountApiServiceImpl::new(config.test_account_api_service_config.clone())
            .context("Failed to create test account api client")?;

    EmailServiceImpl::new(config.delivery_config.clone(), test_account_api)
        .context("Failed to set up mail delivery")
}
