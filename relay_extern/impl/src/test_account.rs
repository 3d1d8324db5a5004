use std::sync::Arc;

use anyhow::anyhow;
use relay_extern_contracts::test_account::{TestAccount, TestAccountApiService, TestAccountSmtp};
use relay_utils::relay_version;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

const ACCOUNT_ENDPOINT: &str = "https://api.nodemailer.com/user";
const DEFAULT_WEB: &str = "https://ethereal.email";
const REQUESTOR: &str = "contact-relay";

#[derive(Debug, Clone)]
pub struct TestAccountApiServiceImpl {
    config: TestAccountApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct TestAccountApiServiceConfig {
    account_endpoint: Arc<Url>,
}

impl TestAccountApiServiceConfig {
    pub fn new(account_endpoint_override: Option<Url>) -> anyhow::Result<Self> {
        let account_endpoint = match account_endpoint_override {
            Some(endpoint) => endpoint,
            None => ACCOUNT_ENDPOINT.parse()?,
        };

        Ok(Self {
            account_endpoint: account_endpoint.into(),
        })
    }

    pub fn account_endpoint(&self) -> &Url {
        &self.account_endpoint
    }
}

impl TestAccountApiServiceImpl {
    pub fn new(config: TestAccountApiServiceConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            client: HttpClient::new()?,
        })
    }
}

impl TestAccountApiService for TestAccountApiServiceImpl {
    #[tracing::instrument(skip(self), fields(endpoint = %self.config.account_endpoint))]
    async fn create_account(&self) -> anyhow::Result<TestAccount> {
        self.client
            .post((*self.config.account_endpoint).clone())
            .json(&CreateAccountRequest {
                requestor: REQUESTOR,
                version: relay_version(),
            })
            .send()
            .await?
            .error_for_status()?
            .json::<CreateAccountResponse>()
            .await?
            .try_into()
    }
}

#[derive(Serialize)]
struct CreateAccountRequest<'a> {
    requestor: &'a str,
    version: &'a str,
}

#[derive(Deserialize)]
struct CreateAccountResponse {
    status: String,
    error: Option<String>,
    user: Option<String>,
    pass: Option<String>,
    smtp: Option<SmtpSettings>,
    web: Option<Url>,
}

#[derive(Deserialize)]
struct SmtpSettings {
    host: String,
    port: u16,
    secure: bool,
}

impl TryFrom<CreateAccountResponse> for TestAccount {
    type Error = anyhow::Error;

    fn try_from(value: CreateAccountResponse) -> Result<Self, Self::Error> {
        if value.status != "success" {
            return Err(anyhow!(
                "Failed to create test account: {}",
                value.error.as_deref().unwrap_or("request failed")
            ));
        }

        let (Some(user), Some(pass), Some(smtp)) = (value.user, value.pass, value.smtp) else {
            return Err(anyhow!("Incomplete test account response"));
        };

        let web = match value.web {
            Some(web) => web,
            None => DEFAULT_WEB.parse()?,
        };

        Ok(Self {
            user,
            password: pass.into(),
            smtp: TestAccountSmtp {
                host: smtp.host,
                port: smtp.port,
                secure: smtp.secure,
            },
            web,
        })
    }
}
