// File: src/services/message_logger.rs

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, trace};

use msglog_common::models::{
    DeletedMessageRecord, EditRecord, GhostPingRecord, Message, MessageEvent, Settings,
};
use msglog_common::traits::Severity;

use crate::cache::{CacheStats, MessageCache, SweepReport};
use crate::services::event_context::LoggerContext;
use crate::services::filter::should_ignore;
use crate::services::ghost_ping::{ghost_ping_notice, is_ghost_ping};
use crate::services::persistence::CachePersistence;

/// Why a handler left an event unrecorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The matching `log*` toggle is off.
    Disabled,
    /// The host never cached the message (e.g. it predates startup).
    NotCached,
    /// The filter settings exclude this author or channel.
    Filtered,
    /// An update that did not change the content.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recorded,
    Skipped(SkipReason),
}

/// The MessageLogger turns host message events into deleted-message,
/// edit-history and ghost-ping records.
///
/// Cheap to clone; clones share the same cache and settings.
#[derive(Clone)]
pub struct MessageLogger {
    cache: Arc<Mutex<MessageCache>>,
    settings: Arc<RwLock<Settings>>,
    ctx: LoggerContext,
    persistence: CachePersistence,
}

impl MessageLogger {
    pub fn new(ctx: LoggerContext, settings: Settings, persistence: CachePersistence) -> Self {
        debug!("MessageLogger::new() called");
        Self {
            cache: Arc::new(Mutex::new(MessageCache::new())),
            settings: Arc::new(RwLock::new(settings.normalized())),
            ctx,
            persistence,
        }
    }

    pub fn context(&self) -> &LoggerContext {
        &self.ctx
    }

    pub fn persistence(&self) -> &CachePersistence {
        &self.persistence
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub async fn set_settings(&self, settings: Settings) {
        *self.settings.write().await = settings.normalized();
    }

    /// Run `f` against the settings under the write lock. Storage limits are
    /// clamped back into range afterwards.
    pub async fn update_settings<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut Settings) -> T,
    {
        let mut guard = self.settings.write().await;
        let out = f(&mut guard);
        *guard = guard.clone().normalized();
        out
    }

    /// Replace the in-memory cache, e.g. with a freshly loaded snapshot.
    pub async fn replace_cache(&self, cache: MessageCache) {
        *self.cache.lock().await = cache;
    }

    pub async fn handle_event(&self, event: &MessageEvent) {
        trace!("MessageLogger: handling {}", event.event_type());
        match event {
            MessageEvent::Deleted { channel_id, id } => {
                self.handle_delete(channel_id, id).await;
            }
            MessageEvent::BulkDeleted { channel_id, ids } => {
                self.handle_bulk_delete(channel_id, ids).await;
            }
            MessageEvent::Updated { message } => {
                self.handle_update(message).await;
            }
        }
    }

    /// A single message was deleted.
    ///
    /// Looks up the host's cached copy, applies the filter, records a ghost
    /// ping when the message mentioned the current user, then records the
    /// deletion itself.
    pub async fn handle_delete(&self, channel_id: &str, message_id: &str) -> Outcome {
        let settings = self.settings().await;
        if !settings.general.log_deletes {
            return Outcome::Skipped(SkipReason::Disabled);
        }

        let Some(message) = self.ctx.lookup.get_message(channel_id, message_id) else {
            debug!("Deleted message {} in {} was never cached; skipping", message_id, channel_id);
            return Outcome::Skipped(SkipReason::NotCached);
        };

        let current_user = self.ctx.users.current_user();
        if should_ignore(&message, &settings.filters, &current_user.id) {
            return Outcome::Skipped(SkipReason::Filtered);
        }

        let now = self.ctx.clock.now();
        let ghost_ping = settings.general.log_ghost_pings && is_ghost_ping(&message, &current_user.id);
        {
            let mut cache = self.cache.lock().await;
            if ghost_ping {
                cache.record_ghost_ping(GhostPingRecord {
                    message: message.clone(),
                    ghost_pinged_at: now,
                });
            }
            cache.record_deleted(
                DeletedMessageRecord { message: message.clone(), deleted_at: now },
                settings.max_messages(),
            );
        }

        if ghost_ping {
            info!("Ghost ping from {} in {}", message.author.username, message.channel_id);
            self.ctx.notifier.notify(&ghost_ping_notice(&message), Severity::Warning);
        }
        info!("Logged deleted message: {}", message_id);

        self.persist_if_enabled(&settings).await;
        Outcome::Recorded
    }

    /// Several messages were deleted at once. Returns how many were recorded.
    ///
    /// Each id is handled on its own; ids the host never cached are skipped
    /// without affecting the rest. Ghost pings are not checked here.
    pub async fn handle_bulk_delete(&self, channel_id: &str, message_ids: &[String]) -> usize {
        let settings = self.settings().await;
        if !settings.general.log_deletes {
            return 0;
        }

        let current_user = self.ctx.users.current_user();
        let now = self.ctx.clock.now();
        let messages: Vec<Message> = message_ids
            .iter()
            .filter_map(|id| self.ctx.lookup.get_message(channel_id, id))
            .filter(|m| !should_ignore(m, &settings.filters, &current_user.id))
            .collect();

        let recorded = messages.len();
        if recorded > 0 {
            let mut cache = self.cache.lock().await;
            for message in messages {
                cache.record_deleted(
                    DeletedMessageRecord { message, deleted_at: now },
                    settings.max_messages(),
                );
            }
        }

        info!("Logged {} of {} bulk deleted messages", recorded, message_ids.len());
        if recorded > 0 {
            self.persist_if_enabled(&settings).await;
        }
        recorded
    }

    /// A message changed. Records the *previous* content when it differs
    /// from the new one.
    pub async fn handle_update(&self, updated: &Message) -> Outcome {
        let settings = self.settings().await;
        if !settings.general.log_edits {
            return Outcome::Skipped(SkipReason::Disabled);
        }

        let Some(previous) = self.ctx.lookup.get_message(&updated.channel_id, &updated.id) else {
            debug!("Edited message {} was never cached; skipping", updated.id);
            return Outcome::Skipped(SkipReason::NotCached);
        };

        let current_user = self.ctx.users.current_user();
        if should_ignore(updated, &settings.filters, &current_user.id) {
            return Outcome::Skipped(SkipReason::Filtered);
        }

        if previous.content == updated.content {
            trace!("Update to {} kept the same content", updated.id);
            return Outcome::Skipped(SkipReason::Unchanged);
        }

        let record = EditRecord {
            content: previous.content,
            edited_at: self.ctx.clock.now(),
        };
        self.cache.lock().await.record_edit(&updated.id, record);
        info!("Logged edited message: {}", updated.id);

        self.persist_if_enabled(&settings).await;
        Outcome::Recorded
    }

    /// Drop deleted messages and ghost pings older than `storageDays`.
    ///
    /// Saves afterwards when something was removed, so a restart cannot bring
    /// back records that already expired.
    pub async fn sweep(&self) -> SweepReport {
        let settings = self.settings().await;
        let now = self.ctx.clock.now();
        let report = self.cache.lock().await.sweep(now, settings.max_age());

        info!(
            "Cleaned old messages from cache: {} deleted, {} ghost pings",
            report.deleted_removed, report.ghost_pings_removed
        );
        if report.total() > 0 {
            self.persist_if_enabled(&settings).await;
        }
        report
    }

    /// Save the full snapshot now. Returns false if the write failed.
    ///
    /// The cache lock is held until the write completes, so saves land in
    /// the order their snapshots were taken.
    pub async fn persist(&self) -> bool {
        let cache = self.cache.lock().await;
        let snapshot = cache.snapshot();
        self.persistence.save_cache(&snapshot).await
    }

    async fn persist_if_enabled(&self, settings: &Settings) {
        if settings.general.persistent_storage {
            self.persist().await;
        }
    }

    pub async fn deleted_messages(&self, channel_id: &str) -> Vec<DeletedMessageRecord> {
        self.cache.lock().await.deleted_in(channel_id).to_vec()
    }

    pub async fn edit_history(&self, message_id: &str) -> Vec<EditRecord> {
        self.cache.lock().await.edits_of(message_id).to_vec()
    }

    pub async fn ghost_pings(&self, channel_id: &str) -> Vec<GhostPingRecord> {
        self.cache.lock().await.ghost_pings_in(channel_id).to_vec()
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    pub async fn snapshot(&self) -> crate::cache::CacheSnapshot {
        self.cache.lock().await.snapshot()
    }
}
