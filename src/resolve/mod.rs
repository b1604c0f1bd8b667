use crate::config::{Config, Destination};
use crate::message::MailAddress;

/// Map a recipient to its chat. Unmapped addresses go to the catch-all,
/// so every address resolves to some destination.
///
/// Only the bare address is looked up; the display name is ignored and the
/// comparison is case-sensitive.
pub fn resolve<'c>(address: &MailAddress, config: &'c Config) -> &'c Destination {
    config
        .addr_mapping
        .get(&address.address)
        .unwrap_or(&config.catch_all)
}
