//! Preview links for messages delivered to a test account

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Matches the trailing `[KEY=value ...]` block of an SMTP response.
static RESPONSE_PROPERTIES_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]$").unwrap());
static PROPERTY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z0-9]+)=(\S+)").unwrap());

/// Derives the web link of a delivered test message from the server's
/// response, e.g. `Accepted [STATUS=new MSGID=Yx2k...]`.
pub fn preview_url(web: &Url, response: &str) -> Option<Url> {
    let properties = RESPONSE_PROPERTIES_REGEX
        .captures(response.trim_end())?
        .get(1)?
        .as_str();

    let mut status = None;
    let mut message_id = None;
    for property in PROPERTY_REGEX.captures_iter(properties) {
        match &property[1] {
            "STATUS" => status = property.get(2),
            "MSGID" => message_id = property.get(2),
            _ => {}
        }
    }
    status?;
    let message_id = message_id?.as_str();

    format!(
        "{}/message/{message_id}",
        web.as_str().trim_end_matches('/')
    )
    .parse()
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web() -> Url {
        "https://ethereal.email".parse().unwrap()
    }

    #[test]
    fn accepted() {
        let url = preview_url(&web(), "Accepted [STATUS=new MSGID=Y3sZxA-abc.123]").unwrap();
        assert_eq!(
            url.as_str(),
            "https://ethereal.email/message/Y3sZxA-abc.123"
        );
    }

    #[test]
    fn web_with_path() {
        let web = "http://localhost:5000/mailbox/".parse().unwrap();
        let url = preview_url(&web, "OK [MSGID=abc STATUS=new]").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/mailbox/message/abc");
    }

    #[test]
    fn missing_status() {
        assert_eq!(preview_url(&web(), "Accepted [MSGID=abc]"), None);
    }

    #[test]
    fn missing_message_id() {
        assert_eq!(preview_url(&web(), "Accepted [STATUS=new]"), None);
    }

    #[test]
    fn no_properties() {
        assert_eq!(preview_url(&web(), "2.0.0 Ok: queued as 4F1B2"), None);
        assert_eq!(preview_url(&web(), ""), None);
    }

    #[test]
    fn properties_not_at_end() {
        assert_eq!(preview_url(&web(), "[STATUS=new MSGID=abc] queued"), None);
    }
}
