use std::collections::BTreeMap;

use super::MailMessage;

/// Template variable holding the message body.
pub const BODY_KEY: &str = "Body";

/// Flat header name → value map handed to the template as its context.
///
/// Multi-valued headers are joined with `", "`. The `Body` entry is always
/// present.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct HeaderMap {
    fields: BTreeMap<String, String>,
}

impl HeaderMap {
    pub fn new(body: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(BODY_KEY.to_string(), body.to_string());
        Self { fields }
    }

    pub fn from_message(message: &MailMessage) -> Self {
        let mut map = Self::new(message.body());
        for (name, values) in message.headers() {
            if name != BODY_KEY {
                map.fields.insert(name.to_string(), values.join(", "));
            }
        }
        map
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get("Subject")
    }

    pub fn to(&self) -> Option<&str> {
        self.get("To")
    }

    pub fn from(&self) -> Option<&str> {
        self.get("From")
    }

    pub fn body(&self) -> &str {
        self.get(BODY_KEY).unwrap_or_default()
    }
}
