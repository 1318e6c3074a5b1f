// File: msglog-common/src/models/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author (or mentioned user) as captured from the host's message object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bot: bool,
}

/// Point-in-time copy of a host-owned chat message.
///
/// Field names follow the chat platform's wire format so that a snapshot
/// written by an older build still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub author: MessageAuthor,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mentions: Vec<MessageAuthor>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn mentions_user(&self, user_id: &str) -> bool {
        self.mentions.iter().any(|u| u.id == user_id)
    }
}

/// The account the host is logged in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

/// The three message-changed events a host delivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageEvent {
    #[serde(rename = "MESSAGE_DELETE", rename_all = "camelCase")]
    Deleted { channel_id: String, id: String },

    #[serde(rename = "MESSAGE_DELETE_BULK", rename_all = "camelCase")]
    BulkDeleted { channel_id: String, ids: Vec<String> },

    #[serde(rename = "MESSAGE_UPDATE")]
    Updated { message: Message },
}

impl MessageEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            MessageEvent::Deleted { .. } => "MESSAGE_DELETE",
            MessageEvent::BulkDeleted { .. } => "MESSAGE_DELETE_BULK",
            MessageEvent::Updated { .. } => "MESSAGE_UPDATE",
        }
    }

    pub fn channel_id(&self) -> &str {
        match self {
            MessageEvent::Deleted { channel_id, .. } => channel_id,
            MessageEvent::BulkDeleted { channel_id, .. } => channel_id,
            MessageEvent::Updated { message } => &message.channel_id,
        }
    }
}
