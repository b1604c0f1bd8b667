use std::collections::HashMap;
use std::fmt;

/// Telegram formatting mode applied to every outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Telegram's legacy Markdown, which the default template is written for.
    #[default]
    Markdown,
    MarkdownV2,
    Html,
    Plain,
}

/// A chat on the messaging platform: a numeric chat id or a public
/// channel username such as `@announcements`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "RawDestination")]
pub enum Destination {
    Id(i64),
    Username(String),
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawDestination {
    Id(i64),
    Name(String),
}

impl From<RawDestination> for Destination {
    fn from(raw: RawDestination) -> Self {
        match raw {
            RawDestination::Id(id) => Destination::Id(id),
            RawDestination::Name(name) => match name.trim().parse::<i64>() {
                Ok(id) => Destination::Id(id),
                Err(_) => Destination::Username(name),
            },
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Id(id) => write!(f, "{id}"),
            Destination::Username(name) => f.write_str(name),
        }
    }
}

/// Process-wide settings, read once and never mutated.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Bot token. May be omitted when supplied by env or the OS keychain.
    #[serde(default, alias = "Token")]
    pub token: Option<String>,
    /// Handlebars template; blank means the built-in default.
    #[serde(default, alias = "Format")]
    pub format: String,
    #[serde(
        default,
        alias = "addrmapping",
        alias = "addrMapping",
        alias = "AddrMapping"
    )]
    pub addr_mapping: HashMap<String, Destination>,
    #[serde(alias = "catchall", alias = "catchAll", alias = "CatchAll")]
    pub catch_all: Destination,
    #[serde(default)]
    pub parse_mode: ParseMode,
}

impl Config {
    pub fn new(catch_all: Destination) -> Self {
        Self {
            token: None,
            format: String::new(),
            addr_mapping: HashMap::new(),
            catch_all,
            parse_mode: ParseMode::default(),
        }
    }

    pub fn with_mapping(mut self, address: &str, destination: Destination) -> Self {
        self.addr_mapping.insert(address.to_string(), destination);
        self
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }
}
