use anyhow::ensure;
use clap::Subcommand;
use relay_config::Config;
use relay_email_contracts::{Email, EmailService};
use relay_models::email_address::EmailAddressWithName;

use crate::{email, environment::ConfigProvider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&ConfigProvider::new(&config)?)?;

    let receipt = email_service
        .send(Email {
            sender_name: Some(format!("{} Contact", config.site.name)),
            recipient: Some(recipient),
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            html_body: None,
        })
        .await?;

    ensure!(receipt.accepted, "Failed to send email");

    if let Some(preview) = receipt.preview {
        println!("Preview: {preview}");
    }

    Ok(())
}
