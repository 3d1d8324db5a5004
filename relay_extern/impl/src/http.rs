use std::{ops::Deref, sync::LazyLock};

use relay_utils::relay_version;

pub static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("Contact Relay (Version {})", relay_version()));

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new() -> reqwest::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .map(Self)
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
