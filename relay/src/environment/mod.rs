use std::sync::Arc;

use relay_config::Config;
use relay_core_contact_impl::ContactServiceConfig;
use relay_email_impl::DeliveryConfig;
use relay_extern_impl::test_account::TestAccountApiServiceConfig;
use types::{Contact, Email, RestServer, Time};

pub mod types;

/// Everything the services need from the configuration, validated up front.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub delivery_config: DeliveryConfig,
    pub test_account_api_service_config: TestAccountApiServiceConfig,
    pub contact_service_config: ContactServiceConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Email
        let delivery_config = DeliveryConfig::new(
            config.smtp.host.clone(),
            config.smtp.port,
            config.smtp.is_secure(),
            config.smtp.user.clone(),
            config.smtp.pass.clone().map(|pass| pass.0),
        );

        // Extern
        let test_account_api_service_config =
            TestAccountApiServiceConfig::new(config.test_account.endpoint_override.clone())?;

        // Core
        let contact_service_config = ContactServiceConfig {
            site_name: config.site.name.as_str().into(),
            recipient: config.to.email.clone().map(Arc::new),
        };

        Ok(Self {
            delivery_config,
            test_account_api_service_config,
            contact_service_config,
        })
    }
}

/// Wires the concrete service types together.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { config, email }
    }

    pub fn contact(&self) -> Contact {
        Contact::new(
            Time::default(),
            self.email.clone(),
            self.config.contact_service_config.clone(),
        )
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(self.contact())
    }
}
