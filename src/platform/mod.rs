mod telegram;

pub use telegram::TelegramSession;

use std::fmt;

use async_trait::async_trait;

use crate::config::Destination;
use crate::render::RenderedMessage;

/// The bot account a session is authenticated as.
#[derive(Debug, Clone, PartialEq)]
pub struct BotIdentity {
    pub id: u64,
    pub username: Option<String>,
}

/// A chat that has sent the bot at least one message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    pub id: i64,
    /// Group or channel title; `None` for private chats.
    pub title: Option<String>,
    /// First name of the user in a private chat.
    pub first_name: Option<String>,
    pub username: Option<String>,
}

impl fmt::Display for ChatSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.title.as_deref().unwrap_or_default(),
            self.id
        )
    }
}

/// One entry of the platform's pending update backlog.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A user message arriving in a chat.
    Message { chat: ChatSummary },
    /// Edits, callbacks, membership changes and anything else.
    Other,
}

/// Messaging platform operations used by delivery and discovery.
///
/// Production code uses [`TelegramSession`]; tests provide an in-memory
/// implementation.
#[async_trait]
pub trait PlatformSession: Send + Sync {
    /// Check the credential and return the bot's identity.
    async fn verify(&self) -> crate::Result<BotIdentity>;

    /// Fetch inbound events not yet acknowledged.
    async fn recent_events(&self) -> crate::Result<Vec<InboundEvent>>;

    /// Send `message` to `destination` using the message's parse mode.
    async fn send(&self, destination: &Destination, message: &RenderedMessage)
        -> crate::Result<()>;
}
