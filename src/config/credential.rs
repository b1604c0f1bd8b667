use crate::config::types::Config;
use crate::SendmailError;

/// Environment variable consulted when the config file carries no token.
pub const TOKEN_ENV: &str = "SENDMAIL_TELEGRAM_TOKEN";

const KEYRING_SERVICE: &str = "sendmail-telegram";
const KEYRING_USER: &str = "bot-token";

/// Resolve the bot token: config file, then `SENDMAIL_TELEGRAM_TOKEN`,
/// then the OS keychain.
pub fn resolve_token(config: &Config) -> crate::Result<String> {
    pick_token(
        config.token.as_deref(),
        std::env::var(TOKEN_ENV).ok(),
        retrieve_token,
    )
}

fn pick_token(
    configured: Option<&str>,
    from_env: Option<String>,
    from_keyring: impl FnOnce() -> crate::Result<String>,
) -> crate::Result<String> {
    if let Some(token) = configured.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }
    if let Some(token) = from_env.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        tracing::debug!("using bot token from {TOKEN_ENV}");
        return Ok(token);
    }
    match from_keyring() {
        Ok(token) => {
            tracing::debug!("using bot token from OS keychain");
            Ok(token)
        }
        Err(e) => {
            tracing::debug!(error = %e, "no bot token in OS keychain");
            Err(SendmailError::MissingToken)
        }
    }
}

fn keyring_entry() -> crate::Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(|e| SendmailError::Keyring {
        reason: e.to_string(),
    })
}

/// Store the bot token in the OS keychain.
pub fn store_token(token: &str) -> crate::Result<()> {
    keyring_entry()?
        .set_password(token.trim())
        .map_err(|e| SendmailError::Keyring {
            reason: e.to_string(),
        })
}

fn retrieve_token() -> crate::Result<String> {
    keyring_entry()?
        .get_password()
        .map_err(|e| SendmailError::Keyring {
            reason: e.to_string(),
        })
}

/// Remove the bot token from the OS keychain.
pub fn delete_token() -> crate::Result<()> {
    keyring_entry()?
        .delete_credential()
        .map_err(|e| SendmailError::Keyring {
            reason: e.to_string(),
        })
}
