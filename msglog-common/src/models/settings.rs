// File: msglog-common/src/models/settings.rs

use serde::{Deserialize, Serialize};

pub const MIN_MAX_MESSAGES: u32 = 10;
pub const MAX_MAX_MESSAGES: u32 = 1000;
pub const MIN_STORAGE_DAYS: u32 = 1;
pub const MAX_STORAGE_DAYS: u32 = 30;

/// Which events get recorded and whether the cache is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub log_deletes: bool,
    pub log_edits: bool,
    pub log_ghost_pings: bool,
    pub persistent_storage: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_deletes: true,
            log_edits: true,
            log_ghost_pings: true,
            persistent_storage: true,
        }
    }
}

/// Cosmetic only. Carried so a host UI can round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceSettings {
    pub show_deleted_badge: bool,
    pub show_edited_badge: bool,
    pub deleted_color: String,
    pub edited_color: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            show_deleted_badge: true,
            show_edited_badge: true,
            deleted_color: "#f04747".to_string(),
            edited_color: "#faa61a".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Deleted messages kept per channel.
    pub max_messages: u32,
    /// Deleted messages and ghost pings older than this are swept.
    pub storage_days: u32,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            max_messages: 100,
            storage_days: 7,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSettings {
    pub ignore_own_messages: bool,
    pub ignore_bots: bool,
    /// Comma-separated user ids.
    pub ignored_users: String,
    /// Comma-separated channel ids.
    pub ignored_channels: String,
}

/// Full plugin configuration. Missing groups or fields fall back to their
/// defaults, so a partially saved blob merges over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub appearance: AppearanceSettings,
    pub storage: StorageSettings,
    pub filters: FilterSettings,
}

impl Settings {
    /// Clamp storage limits into their allowed ranges.
    pub fn normalized(mut self) -> Self {
        self.storage.max_messages = self
            .storage
            .max_messages
            .clamp(MIN_MAX_MESSAGES, MAX_MAX_MESSAGES);
        self.storage.storage_days = self
            .storage
            .storage_days
            .clamp(MIN_STORAGE_DAYS, MAX_STORAGE_DAYS);
        self
    }

    pub fn max_messages(&self) -> usize {
        self.storage.max_messages as usize
    }

    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.storage.storage_days))
    }
}
