use std::collections::HashSet;

use crate::platform::{ChatSummary, InboundEvent, PlatformSession};

/// Upper bound on chats returned by [`list_recent_chats`].
pub const MAX_RECENT_CHATS: usize = 5;

/// List chats that have messaged the bot, to help fill in `addr_mapping`.
///
/// Only user messages count. Each chat appears once, in the order it was
/// first seen, and at most [`MAX_RECENT_CHATS`] are returned. No backlog is
/// an empty list, not an error.
pub async fn list_recent_chats<S>(session: &S) -> crate::Result<Vec<ChatSummary>>
where
    S: PlatformSession + ?Sized,
{
    let events = session.recent_events().await?;
    let chats = collect_chats(events);
    if chats.is_empty() {
        tracing::info!("no inbound messages in update backlog");
    }
    Ok(chats)
}

fn collect_chats(events: Vec<InboundEvent>) -> Vec<ChatSummary> {
    let mut seen = HashSet::new();
    let mut chats = Vec::new();
    for event in events {
        let InboundEvent::Message { chat } = event else {
            continue;
        };
        if !seen.insert(chat.id) {
            continue;
        }
        chats.push(chat);
        if chats.len() == MAX_RECENT_CHATS {
            break;
        }
    }
    chats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64) -> InboundEvent {
        InboundEvent::Message {
            chat: ChatSummary {
                id,
                title: None,
                first_name: Some(format!("user{id}")),
                username: None,
            },
        }
    }

    fn ids(chats: &[ChatSummary]) -> Vec<i64> {
        chats.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_empty_backlog() {
        assert!(collect_chats(Vec::new()).is_empty());
    }

    #[test]
    fn test_non_message_events_ignored() {
        let chats = collect_chats(vec![InboundEvent::Other, message(1), InboundEvent::Other]);
        assert_eq!(ids(&chats), vec![1]);
    }

    #[test]
    fn test_each_chat_once_first_seen_order() {
        let chats = collect_chats(vec![message(3), message(1), message(3), message(2), message(1)]);
        assert_eq!(ids(&chats), vec![3, 1, 2]);
    }

    #[test]
    fn test_capped_at_five() {
        let events = (1..=10).map(message).collect();
        let chats = collect_chats(events);
        assert_eq!(ids(&chats), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_duplicates_do_not_count_toward_cap() {
        let events = vec![
            message(1),
            message(1),
            message(1),
            message(2),
            message(3),
            message(4),
            message(5),
            message(6),
        ];
        assert_eq!(ids(&collect_chats(events)), vec![1, 2, 3, 4, 5]);
    }
}
