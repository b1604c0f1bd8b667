use std::fmt;
use std::str::FromStr;

use lettre::message::Mailbox;

use crate::SendmailError;

/// A recipient as given on the command line or in an address header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    pub name: Option<String>,
    /// Bare `local@domain`; this is what the address mapping is keyed on.
    pub address: String,
}

impl MailAddress {
    pub fn new(address: &str) -> Self {
        Self {
            name: None,
            address: address.to_string(),
        }
    }
}

impl From<Mailbox> for MailAddress {
    fn from(mailbox: Mailbox) -> Self {
        Self {
            name: mailbox.name,
            address: mailbox.email.to_string(),
        }
    }
}

impl FromStr for MailAddress {
    type Err = SendmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Mailbox>()
            .map(Self::from)
            .map_err(|e| SendmailError::AddressParse {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => f.write_str(&self.address),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_address() {
        let a: MailAddress = "ops@example.com".parse().unwrap();
        assert_eq!(a.address, "ops@example.com");
        assert!(a.name.is_none());
    }

    #[test]
    fn test_parse_display_name() {
        let a: MailAddress = "Ops Team <ops@example.com>".parse().unwrap();
        assert_eq!(a.address, "ops@example.com");
        assert_eq!(a.name.as_deref(), Some("Ops Team"));
        assert_eq!(a.to_string(), "Ops Team <ops@example.com>");
    }

    #[test]
    fn test_parse_invalid() {
        let result = "definitely not@@valid".parse::<MailAddress>();
        assert!(
            matches!(result, Err(SendmailError::AddressParse { ref input, .. }) if input == "definitely not@@valid")
        );
    }
}
