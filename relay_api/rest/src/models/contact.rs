use relay_models::contact::ContactSubmission;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

/// Raw fields of a contact form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiContactSubmission {
    fields: Map<String, Value>,
}

impl ApiContactSubmission {
    /// Parses a JSON document. An empty body and any valid JSON that is not an
    /// object count as an empty object.
    pub fn from_body(body: &[u8]) -> serde_json::Result<Self> {
        if body.is_empty() {
            return Ok(Self::default());
        }

        Ok(match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        })
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Any truthy value fills the honeypot, not only strings.
    fn honeypot(&self) -> Option<String> {
        match self.fields.get("company")? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(number) if number.as_f64() == Some(0.0) => None,
            Value::Array(items) if items.is_empty() => None,
            Value::String(value) => Some(value.clone()),
            value => Some(value.to_string()),
        }
    }
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.text("name"),
            email: value.text("email"),
            phone: value.text("phone"),
            message: value.text("message"),
            company: value.honeypot(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub ok: bool,
    pub message: &'static str,
    /// Only present on success, `null` unless delivered to a test account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Option<Url>>,
}

impl ApiContactResponse {
    pub fn sent(preview: Option<Url>) -> Self {
        Self {
            ok: true,
            message: "Thanks! Your message has been sent.",
            preview: Some(preview),
        }
    }

    pub fn rejected(message: &'static str) -> Self {
        Self {
            ok: false,
            message,
            preview: None,
        }
    }
}
