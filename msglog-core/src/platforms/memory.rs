// File: src/platforms/memory.rs
//
// A host-side message cache kept entirely in memory. Mirrors what a chat
// client's own message store does: messages are added when created, replaced
// when updated and dropped when deleted.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use msglog_common::models::{CurrentUser, Message, MessageEvent};
use msglog_common::traits::{CurrentUserProvider, MessageLookup};

#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<(String, String), Message>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, message: Message) {
        let key = (message.channel_id.clone(), message.id.clone());
        self.messages.write().insert(key, message);
    }

    pub fn remove(&self, channel_id: &str, message_id: &str) -> Option<Message> {
        self.messages
            .write()
            .remove(&(channel_id.to_string(), message_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Bring the store up to date with an event the logger has already seen.
    ///
    /// Must run *after* the logger handled the event, since the logger needs
    /// the pre-event version of the message.
    pub fn apply(&self, event: &MessageEvent) {
        match event {
            MessageEvent::Deleted { channel_id, id } => {
                self.remove(channel_id, id);
            }
            MessageEvent::BulkDeleted { channel_id, ids } => {
                let mut guard = self.messages.write();
                for id in ids {
                    guard.remove(&(channel_id.clone(), id.clone()));
                }
            }
            MessageEvent::Updated { message } => {
                self.insert(message.clone());
            }
        }
        trace!("InMemoryMessageStore: applied {} ({} cached)", event.event_type(), self.len());
    }
}

impl MessageLookup for InMemoryMessageStore {
    fn get_message(&self, channel_id: &str, message_id: &str) -> Option<Message> {
        self.messages
            .read()
            .get(&(channel_id.to_string(), message_id.to_string()))
            .cloned()
    }
}

/// Fixed current user, for hosts where the account never changes.
#[derive(Debug, Clone)]
pub struct StaticCurrentUser(pub CurrentUser);

impl StaticCurrentUser {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self(CurrentUser {
            id: id.into(),
            username: username.into(),
        })
    }
}

impl CurrentUserProvider for StaticCurrentUser {
    fn current_user(&self) -> CurrentUser {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use msglog_common::models::MessageAuthor;

    fn message(id: &str, content: &str) -> Message {
        Message {
            id: id.into(),
            channel_id: "C1".into(),
            guild_id: None,
            author: MessageAuthor { id: "u".into(), username: "u".into(), bot: false },
            content: content.into(),
            mentions: vec![],
            timestamp: Utc::now(),
            edited_timestamp: None,
        }
    }

    #[test]
    fn apply_follows_events() {
        let store = InMemoryMessageStore::new();
        store.insert(message("1", "a"));
        store.insert(message("2", "b"));
        store.insert(message("3", "c"));

        store.apply(&MessageEvent::Updated { message: message("1", "a2") });
        assert_eq!(store.get_message("C1", "1").unwrap().content, "a2");

        store.apply(&MessageEvent::Deleted { channel_id: "C1".into(), id: "1".into() });
        assert!(store.get_message("C1", "1").is_none());

        store.apply(&MessageEvent::BulkDeleted {
            channel_id: "C1".into(),
            ids: vec!["2".into(), "3".into(), "404".into()],
        });
        assert!(store.is_empty());
    }
}
