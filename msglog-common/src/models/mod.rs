// File: msglog-common/src/models/mod.rs
pub mod message;
pub mod records;
pub mod settings;
pub mod settings_schema;

pub use message::{CurrentUser, Message, MessageAuthor, MessageEvent};
pub use records::{DeletedMessageRecord, EditRecord, GhostPingRecord, Timestamped};
pub use settings::{AppearanceSettings, FilterSettings, GeneralSettings, Settings, StorageSettings};
pub use settings_schema::{SettingCategory, SettingDescriptor, SettingKind, SettingValue};
