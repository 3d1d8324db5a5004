use std::sync::Arc;

use anyhow::{anyhow, Context};
use lettre::{
    message::{header, Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use relay_email_contracts::{Email, EmailReceipt, EmailService};
use relay_extern_contracts::test_account::{TestAccount, TestAccountApiService};
use relay_models::{email_address::EmailAddress, Sensitive};
use relay_utils::Apply;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::Url;

pub mod preview;

/// Selects how mail leaves the relay. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryConfig {
    /// Deliver through a real SMTP server.
    Smtp(SmtpDeliveryConfig),
    /// Deliver to a disposable test account. Not meant for production.
    TestAccount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpDeliveryConfig {
    pub host: String,
    pub port: u16,
    /// Use implicit TLS instead of opportunistic STARTTLS.
    pub secure: bool,
    /// Also used as the sender address.
    pub user: String,
    pub password: Sensitive<String>,
}

impl DeliveryConfig {
    /// Uses SMTP if host, user and password are all set and not empty,
    /// otherwise falls back to a test account.
    pub fn new(
        host: Option<String>,
        port: u16,
        secure: bool,
        user: Option<String>,
        password: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| value.filter(|value| !value.is_empty());
        match (non_empty(host), non_empty(user), non_empty(password)) {
            (Some(host), Some(user), Some(password)) => Self::Smtp(SmtpDeliveryConfig {
                host,
                port,
                secure,
                user,
                password: password.into(),
            }),
            _ => Self::TestAccount,
        }
    }
}

#[derive(Debug)]
pub struct EmailServiceImpl<TestAccountApi> {
    delivery: Arc<Delivery<TestAccountApi>>,
}

impl<TestAccountApi> Clone for EmailServiceImpl<TestAccountApi> {
    fn clone(&self) -> Self {
        Self {
            delivery: Arc::clone(&self.delivery),
        }
    }
}

#[derive(Debug)]
enum Delivery<TestAccountApi> {
    Smtp(Mailer),
    TestAccount {
        api: TestAccountApi,
        /// Provisioned on first use, a failed attempt is retried on the next one.
        mailer: OnceCell<Mailer>,
    },
}

#[derive(Debug)]
struct Mailer {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
    preview_web: Option<Url>,
}

impl<TestAccountApi> EmailServiceImpl<TestAccountApi>
where
    TestAccountApi: TestAccountApiService,
{
    pub fn new(config: DeliveryConfig, test_account_api: TestAccountApi) -> anyhow::Result<Self> {
        let delivery = match config {
            DeliveryConfig::Smtp(smtp) => Delivery::Smtp(Mailer::for_smtp(smtp)?),
            DeliveryConfig::TestAccount => Delivery::TestAccount {
                api: test_account_api,
                mailer: OnceCell::new(),
            },
        };

        Ok(Self {
            delivery: delivery.into(),
        })
    }

    /// Returns whether mails are delivered to a disposable test account.
    pub fn is_test_mode(&self) -> bool {
        matches!(*self.delivery, Delivery::TestAccount { .. })
    }

    async fn mailer(&self) -> anyhow::Result<&Mailer> {
        match &*self.delivery {
            Delivery::Smtp(mailer) => Ok(mailer),
            Delivery::TestAccount { api, mailer } => {
                mailer
                    .get_or_try_init(|| async {
                        let account = api
                            .create_account()
                            .await
                            .context("Failed to create test account")?;
                        info!(user = %account.user, web = %account.web, "created test account");
                        Mailer::for_test_account(account)
                    })
                    .await
            }
        }
    }
}

impl Mailer {
    fn for_smtp(config: SmtpDeliveryConfig) -> anyhow::Result<Self> {
        let from = config.user.parse().with_context(|| {
            format!("SMTP user {:?} is not a valid sender address", config.user)
        })?;
        let transport = smtp_transport(
            &config.host,
            config.port,
            config.secure,
            Credentials::new(config.user, config.password.0),
        )?;

        Ok(Self {
            from,
            transport,
            preview_web: None,
        })
    }

    fn for_test_account(account: TestAccount) -> anyhow::Result<Self> {
        let from = account.user.parse().with_context(|| {
            format!("Test account user {:?} is not a valid address", account.user)
        })?;
        let transport = smtp_transport(
            &account.smtp.host,
            account.smtp.port,
            account.smtp.secure,
            Credentials::new(account.user, account.password.0),
        )?;

        Ok(Self {
            from,
            transport,
            preview_web: Some(account.web),
        })
    }
}

fn smtp_transport(
    host: &str,
    port: u16,
    secure: bool,
    credentials: Credentials,
) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    let tls_parameters = TlsParameters::new(host.into())?;
    let tls = if secure {
        Tls::Wrapper(tls_parameters)
    } else {
        Tls::Opportunistic(tls_parameters)
    };

    Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        .port(port)
        .tls(tls)
        .credentials(credentials)
        .build())
}

fn build_message(from: &EmailAddress, email: Email) -> anyhow::Result<Message> {
    let recipient = email
        .recipient
        .map(|recipient| recipient.0)
        .unwrap_or_else(|| Mailbox::new(None, from.0.clone()));

    let builder = Message::builder()
        .from(Mailbox::new(email.sender_name, from.0.clone()))
        .to(recipient)
        .apply_map(email.reply_to, |builder, reply_to| {
            builder.reply_to(reply_to.0)
        })
        .subject(email.subject);

    let message = match email.html_body {
        Some(html_body) => {
            builder.multipart(MultiPart::alternative_plain_html(email.body, html_body))?
        }
        None => builder
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body)?,
    };

    Ok(message)
}

impl<TestAccountApi> EmailService for EmailServiceImpl<TestAccountApi>
where
    TestAccountApi: TestAccountApiService,
{
    #[tracing::instrument(skip_all, fields(subject = %email.subject))]
    async fn send(&self, email: Email) -> anyhow::Result<EmailReceipt> {
        let mailer = self.mailer().await?;
        let message = build_message(&mailer.from, email)?;

        let response = mailer.transport.send(message).await?;
        let text = response.message().collect::<Vec<_>>().join(" ");
        debug!(code = %response.code(), response = %text, "mail server responded");

        Ok(EmailReceipt {
            accepted: response.is_positive(),
            preview: mailer
                .preview_web
                .as_ref()
                .and_then(|web| preview::preview_url(web, &text)),
        })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.mailer()
            .await?
            .transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
