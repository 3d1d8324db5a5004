use std::{collections::HashMap, net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use relay_models::{email_address::EmailAddress, Sensitive};
use serde::Deserialize;
use url::Url;

/// Embedded default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional TOML config files
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG_PATH";

/// Environment variables overriding the config files. `SMTP_HOST` sets
/// `smtp.host`, `TO_EMAIL` sets `to.email` and so on.
pub const ENV_VARS: &[&str] = &[
    "HTTP_HOST",
    "HTTP_PORT",
    "SMTP_HOST",
    "SMTP_PORT",
    "SMTP_SECURE",
    "SMTP_USER",
    "SMTP_PASS",
    "SITE_NAME",
    "TO_EMAIL",
];

/// Loads the config from the defaults, the files in [`CONFIG_PATH_ENV`] and
/// the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV)
        .map(|paths| {
            paths
                .split(':')
                .filter(|path| !path.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    load_with(&paths, std::env::vars())
}

/// Loads the config from the defaults, the given files and environment
/// variables. Later sources take precedence, empty variables are ignored.
pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl IntoIterator<Item = (String, String)>,
) -> anyhow::Result<Config> {
    let env = env
        .into_iter()
        .filter(|(key, value)| ENV_VARS.contains(&key.as_str()) && !value.is_empty())
        .collect::<HashMap<_, _>>();

    let defaults = config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    paths
        .iter()
        .try_fold(defaults, |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(Environment::default().separator("_").source(Some(env)))
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub smtp: SmtpConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub to: RecipientConfig,
    #[serde(default)]
    pub test_account: TestAccountConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Without host, user and pass, mails go to a disposable test account.
#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub secure: Option<String>,
    pub user: Option<String>,
    pub pass: Option<Sensitive<String>>,
}

impl SmtpConfig {
    /// Only `true` (in any case) enables implicit TLS.
    pub fn is_secure(&self) -> bool {
        self.secure
            .as_deref()
            .is_some_and(|secure| secure.eq_ignore_ascii_case("true"))
    }
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipientConfig {
    pub email: Option<EmailAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TestAccountConfig {
    pub endpoint_override: Option<Url>,
}
