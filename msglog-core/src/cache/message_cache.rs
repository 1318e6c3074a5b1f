// File: src/cache/message_cache.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use msglog_common::models::records::{MAX_EDITS_PER_MESSAGE, MAX_GHOST_PINGS_PER_CHANNEL};
use msglog_common::models::{DeletedMessageRecord, EditRecord, GhostPingRecord, Timestamped};

use crate::cache::bounded_store::BoundedStore;

/// Serializable copy of all three stores.
///
/// Each field is a list of `[key, [records...]]` pairs rather than a JSON
/// object so key order survives the round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheSnapshot {
    pub deleted: Vec<(String, Vec<DeletedMessageRecord>)>,
    pub edits: Vec<(String, Vec<EditRecord>)>,
    pub ghost_pings: Vec<(String, Vec<GhostPingRecord>)>,
}

/// What a retention sweep removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub deleted_removed: usize,
    pub ghost_pings_removed: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.deleted_removed + self.ghost_pings_removed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub deleted_channels: usize,
    pub deleted_messages: usize,
    pub edited_messages: usize,
    pub edit_records: usize,
    pub ghost_ping_channels: usize,
    pub ghost_pings: usize,
}

/// Deleted messages by channel, edit history by message id, ghost pings by
/// channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageCache {
    deleted: BoundedStore<DeletedMessageRecord>,
    edits: BoundedStore<EditRecord>,
    ghost_pings: BoundedStore<GhostPingRecord>,
}

impl MessageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_deleted(&mut self, record: DeletedMessageRecord, max_messages: usize) -> usize {
        let channel = record.message.channel_id.clone();
        self.deleted.append(&channel, record, max_messages)
    }

    pub fn record_edit(&mut self, message_id: &str, record: EditRecord) -> usize {
        self.edits.append(message_id, record, MAX_EDITS_PER_MESSAGE)
    }

    pub fn record_ghost_ping(&mut self, record: GhostPingRecord) -> usize {
        let channel = record.message.channel_id.clone();
        self.ghost_pings
            .append(&channel, record, MAX_GHOST_PINGS_PER_CHANNEL)
    }

    pub fn deleted_in(&self, channel_id: &str) -> &[DeletedMessageRecord] {
        self.deleted.get(channel_id).unwrap_or_default()
    }

    pub fn edits_of(&self, message_id: &str) -> &[EditRecord] {
        self.edits.get(message_id).unwrap_or_default()
    }

    pub fn ghost_pings_in(&self, channel_id: &str) -> &[GhostPingRecord] {
        self.ghost_pings.get(channel_id).unwrap_or_default()
    }

    pub fn deleted(&self) -> &BoundedStore<DeletedMessageRecord> {
        &self.deleted
    }

    pub fn edits(&self) -> &BoundedStore<EditRecord> {
        &self.edits
    }

    pub fn ghost_pings(&self) -> &BoundedStore<GhostPingRecord> {
        &self.ghost_pings
    }

    /// Drop deleted messages and ghost pings captured `max_age` or more
    /// before `now`. Edit history is bounded by count only.
    pub fn sweep(&mut self, now: DateTime<Utc>, max_age: Duration) -> SweepReport {
        let fresh = |captured: DateTime<Utc>| now.signed_duration_since(captured) < max_age;

        SweepReport {
            deleted_removed: self.deleted.retain_records(|r| fresh(r.captured_at())),
            ghost_pings_removed: self.ghost_pings.retain_records(|r| fresh(r.captured_at())),
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            deleted_channels: self.deleted.len(),
            deleted_messages: self.deleted.record_count(),
            edited_messages: self.edits.len(),
            edit_records: self.edits.record_count(),
            ghost_ping_channels: self.ghost_pings.len(),
            ghost_pings: self.ghost_pings.record_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.edits.is_empty() && self.ghost_pings.is_empty()
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            deleted: self.deleted.to_pairs(),
            edits: self.edits.to_pairs(),
            ghost_pings: self.ghost_pings.to_pairs(),
        }
    }

    pub fn from_snapshot(snapshot: CacheSnapshot) -> Self {
        Self {
            deleted: BoundedStore::from_pairs(snapshot.deleted),
            edits: BoundedStore::from_pairs(snapshot.edits),
            ghost_pings: BoundedStore::from_pairs(snapshot.ghost_pings),
        }
    }
}
