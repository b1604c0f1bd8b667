use async_trait::async_trait;
use teloxide::types::{ChatId, Recipient, UpdateKind};

use super::{BotIdentity, ChatSummary, InboundEvent, PlatformSession};
use crate::config::{Destination, ParseMode};
use crate::render::RenderedMessage;
use crate::SendmailError;

/// Wraps a `teloxide::Bot` authenticated with the configured token.
pub struct TelegramSession {
    bot: teloxide::Bot,
}

impl TelegramSession {
    pub fn new(token: &str) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }
}

fn recipient(destination: &Destination) -> Recipient {
    match destination {
        Destination::Id(id) => Recipient::Id(ChatId(*id)),
        Destination::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

// Legacy Markdown is deprecated upstream but is what `*bold*` in the
// default template is written for.
#[allow(deprecated)]
fn telegram_parse_mode(mode: ParseMode) -> Option<teloxide::types::ParseMode> {
    match mode {
        ParseMode::Markdown => Some(teloxide::types::ParseMode::Markdown),
        ParseMode::MarkdownV2 => Some(teloxide::types::ParseMode::MarkdownV2),
        ParseMode::Html => Some(teloxide::types::ParseMode::Html),
        ParseMode::Plain => None,
    }
}

fn chat_summary(chat: &teloxide::types::Chat) -> ChatSummary {
    ChatSummary {
        id: chat.id.0,
        title: chat.title().map(String::from),
        first_name: chat.first_name().map(String::from),
        username: chat.username().map(String::from),
    }
}

#[async_trait]
impl PlatformSession for TelegramSession {
    async fn verify(&self) -> crate::Result<BotIdentity> {
        use teloxide::prelude::*;

        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| SendmailError::Verify {
                reason: e.to_string(),
            })?;

        Ok(BotIdentity {
            id: me.user.id.0,
            username: me.user.username.clone(),
        })
    }

    async fn recent_events(&self) -> crate::Result<Vec<InboundEvent>> {
        use teloxide::prelude::*;

        let updates = self
            .bot
            .get_updates()
            .await
            .map_err(|e| SendmailError::Updates {
                reason: e.to_string(),
            })?;

        Ok(updates
            .into_iter()
            .map(|update| match update.kind {
                UpdateKind::Message(ref msg) => InboundEvent::Message {
                    chat: chat_summary(&msg.chat),
                },
                _ => InboundEvent::Other,
            })
            .collect())
    }

    async fn send(
        &self,
        destination: &Destination,
        message: &RenderedMessage,
    ) -> crate::Result<()> {
        use teloxide::payloads::SendMessageSetters;
        use teloxide::prelude::*;

        let mut request = self
            .bot
            .send_message(recipient(destination), message.text.clone());
        if let Some(mode) = telegram_parse_mode(message.parse_mode) {
            request = request.parse_mode(mode);
        }

        request.await.map_err(|e| SendmailError::Send {
            destination: destination.to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
