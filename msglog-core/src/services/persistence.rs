// File: src/services/persistence.rs
//
// Save/load of the cache snapshot and settings through the host's
// key-value store. Failures are logged here and never surface to callers.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use msglog_common::models::Settings;
use msglog_common::traits::KeyValueStore;
use msglog_common::Error;

use crate::cache::{CacheSnapshot, MessageCache};

pub const CACHE_KEY: &str = "messageCache";
pub const SETTINGS_KEY: &str = "settings";

#[derive(Clone)]
pub struct CachePersistence {
    store: Arc<dyn KeyValueStore>,
    namespace: String,
}

impl CachePersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Load the persisted cache. A missing, unreadable or malformed snapshot
    /// yields an empty cache.
    pub async fn load_cache(&self) -> MessageCache {
        match self.try_load_cache().await {
            Ok(Some(cache)) => {
                let stats = cache.stats();
                info!(
                    "Loaded stored message data: {} deleted, {} edit histories, {} ghost pings",
                    stats.deleted_messages, stats.edited_messages, stats.ghost_pings
                );
                cache
            }
            Ok(None) => {
                debug!("No stored message data under {}/{}", self.namespace, CACHE_KEY);
                MessageCache::new()
            }
            Err(e) => {
                error!("Failed to load stored data: {:?}", e);
                MessageCache::new()
            }
        }
    }

    async fn try_load_cache(&self) -> Result<Option<MessageCache>, Error> {
        let Some(value) = self.store.load(&self.namespace, CACHE_KEY).await? else {
            return Ok(None);
        };
        if value.is_null() {
            return Ok(None);
        }
        let snapshot: CacheSnapshot = serde_json::from_value(value)?;
        Ok(Some(MessageCache::from_snapshot(snapshot)))
    }

    /// Write the snapshot. Returns false (after logging) on failure.
    pub async fn save_cache(&self, snapshot: &CacheSnapshot) -> bool {
        match self.try_save_cache(snapshot).await {
            Ok(()) => {
                debug!("Saved message data");
                true
            }
            Err(e) => {
                error!("Failed to save data: {:?}", e);
                false
            }
        }
    }

    async fn try_save_cache(&self, snapshot: &CacheSnapshot) -> Result<(), Error> {
        let value = serde_json::to_value(snapshot)?;
        self.store.save(&self.namespace, CACHE_KEY, &value).await
    }

    /// Saved settings merged over defaults and clamped into range.
    pub async fn load_settings(&self) -> Settings {
        match self.store.load(&self.namespace, SETTINGS_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<Settings>(value) {
                Ok(settings) => settings.normalized(),
                Err(e) => {
                    warn!("Stored settings are malformed, using defaults: {}", e);
                    Settings::default()
                }
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                error!("Failed to load settings: {:?}", e);
                Settings::default()
            }
        }
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), Error> {
        let value = serde_json::to_value(settings)?;
        self.store.save(&self.namespace, SETTINGS_KEY, &value).await
    }
}
