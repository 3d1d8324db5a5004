use relay_config::Config;
use relay_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;

    let email = email::connect(&config_provider)?;
    if email.is_test_mode() {
        warn!("SMTP is not configured, messages will be delivered to a disposable test account");
    } else {
        info!("Connecting to smtp server");
        email.ping().await?;
    }

    let server = Provider::new(config_provider, email).rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
