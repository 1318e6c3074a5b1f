// File: msglog-common/src/models/records.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message::Message;

/// Per message id, only this many prior-content snapshots are kept.
pub const MAX_EDITS_PER_MESSAGE: usize = 10;

/// Per channel, only this many ghost pings are kept.
pub const MAX_GHOST_PINGS_PER_CHANNEL: usize = 50;

/// A deleted message, captured when the delete event arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedMessageRecord {
    #[serde(flatten)]
    pub message: Message,
    #[serde(rename = "deletedAt", with = "chrono::serde::ts_milliseconds")]
    pub deleted_at: DateTime<Utc>,
}

/// The content a message had *before* an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditRecord {
    pub content: String,
    #[serde(rename = "editedAt", with = "chrono::serde::ts_milliseconds")]
    pub edited_at: DateTime<Utc>,
}

/// A deleted message that mentioned the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostPingRecord {
    #[serde(flatten)]
    pub message: Message,
    #[serde(rename = "ghostPingedAt", with = "chrono::serde::ts_milliseconds")]
    pub ghost_pinged_at: DateTime<Utc>,
}

/// Records that age out by capture time.
pub trait Timestamped {
    fn captured_at(&self) -> DateTime<Utc>;
}

impl Timestamped for DeletedMessageRecord {
    fn captured_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }
}

impl Timestamped for GhostPingRecord {
    fn captured_at(&self) -> DateTime<Utc> {
        self.ghost_pinged_at
    }
}
