#[derive(Debug, thiserror::Error)]
pub enum SendmailError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported config format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("YAML parse error in {path}: {source}")]
    ConfigYaml {
        path: std::path::PathBuf,
        source: serde_yaml::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    ConfigToml {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },

    #[error("JSON parse error in {path}: {source}")]
    ConfigJson {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("no config file found, searched: {searched:?}")]
    ConfigNotFound { searched: Vec<std::path::PathBuf> },

    #[error(
        "bot token not found: set `token` in the config file, SENDMAIL_TELEGRAM_TOKEN, or run `sendmail-telegram token set`"
    )]
    MissingToken,

    #[error("keyring error: {reason}")]
    Keyring { reason: String },

    #[error("bot credential verification failed: {reason}")]
    Verify { reason: String },

    #[error("template parse error: {reason}")]
    TemplateParse { reason: String },

    #[error("template render error: {reason}")]
    TemplateRender { reason: String },

    #[error("refusing to send empty message")]
    EmptyMessage,

    #[error("recipient list is empty")]
    NoRecipients,

    #[error("error parsing address '{input}': {reason}")]
    AddressParse { input: String, reason: String },

    #[error("could not parse mail message")]
    MessageParse,

    #[error("failed to fetch updates: {reason}")]
    Updates { reason: String },

    #[error("failed to send to {destination}: {reason}")]
    Send { destination: String, reason: String },
}
