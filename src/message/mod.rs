mod address;
mod headers;

pub use address::MailAddress;
pub use headers::{HeaderMap, BODY_KEY};

use std::collections::BTreeMap;
use std::str::FromStr;

use mail_parser::HeaderValue;

use crate::SendmailError;

/// A mail message as read from the sendmail interface: header name to every
/// value it appeared with, plus the decoded text body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MailMessage {
    headers: BTreeMap<String, Vec<String>>,
    body: String,
}

impl MailMessage {
    pub fn new(body: &str) -> Self {
        Self {
            headers: BTreeMap::new(),
            body: body.to_string(),
        }
    }

    /// Append a value to `name`, keeping any existing values.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .entry(canonical_header_name(name))
            .or_default()
            .push(value.to_string());
        self
    }

    /// Parse an RFC 5322 message.
    ///
    /// Unstructured headers (Subject, custom `X-` headers) are RFC 2047
    /// decoded; structured ones keep their unfolded raw value.
    pub fn parse(raw: &[u8]) -> crate::Result<Self> {
        let parsed = mail_parser::MessageParser::default()
            .parse(raw)
            .ok_or(SendmailError::MessageParse)?;

        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for header in parsed.headers() {
            let value = match header.value() {
                HeaderValue::Text(text) => text.trim().to_string(),
                HeaderValue::TextList(list) => list
                    .iter()
                    .map(|s| s.trim())
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => unfold(
                    raw.get(header.offset_start as usize..header.offset_end as usize)
                        .unwrap_or_default(),
                ),
            };
            headers
                .entry(canonical_header_name(header.name()))
                .or_default()
                .push(value);
        }

        let body = parsed
            .body_text(0)
            .map(|b| b.into_owned())
            .unwrap_or_default();

        Ok(Self { headers, body })
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.headers
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&canonical_header_name(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace every value of `name` with `value`.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(canonical_header_name(name), vec![value.to_string()]);
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the values of an address header (`To`, `Cc`, `Bcc`, ...).
    ///
    /// An absent or blank header yields an empty list.
    pub fn address_list(&self, name: &str) -> crate::Result<Vec<MailAddress>> {
        let joined = self.header_values(name).join(", ");
        if joined.trim().is_empty() {
            return Ok(Vec::new());
        }
        let mailboxes = lettre::message::Mailboxes::from_str(&joined).map_err(|e| {
            SendmailError::AddressParse {
                input: joined.clone(),
                reason: e.to_string(),
            }
        })?;
        Ok(mailboxes.into_iter().map(MailAddress::from).collect())
    }
}

fn unfold(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical MIME form: first letter and every letter after a hyphen upper
/// case, the rest lower case (`content-type` → `Content-Type`).
pub(crate) fn canonical_header_name(name: &str) -> String {
    if name.chars().any(|c| c.is_whitespace() || c == ':') {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}
