// File: msglog-common/src/models/settings_schema.rs
//
// Typed description of every configurable field, for hosts that build a
// settings panel. Values are applied through `Settings::apply`.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::settings::{
    Settings, MAX_MAX_MESSAGES, MAX_STORAGE_DAYS, MIN_MAX_MESSAGES, MIN_STORAGE_DAYS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    Switch,
    #[serde(rename_all = "camelCase")]
    Slider {
        min: u32,
        max: u32,
        markers: Vec<u32>,
        stick_to_markers: bool,
    },
    Textbox,
    Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub note: &'static str,
    #[serde(flatten)]
    pub kind: SettingKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub collapsible: bool,
    pub shown: bool,
    pub settings: Vec<SettingDescriptor>,
}

/// A value coming back from a settings control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Number(u32),
    Text(String),
}

impl SettingValue {
    fn describe(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Number(_) => "number",
            SettingValue::Text(_) => "text",
        }
    }
}

fn switch(id: &'static str, name: &'static str, note: &'static str) -> SettingDescriptor {
    SettingDescriptor { id, name, note, kind: SettingKind::Switch }
}

/// The settings panel layout, group by group.
pub fn default_config() -> Vec<SettingCategory> {
    vec![
        SettingCategory {
            id: "general",
            name: "General Settings",
            collapsible: true,
            shown: true,
            settings: vec![
                switch("logDeletes", "Log Deleted Messages", "Track and display deleted messages"),
                switch("logEdits", "Log Message Edits", "Track message edit history"),
                switch("logGhostPings", "Log Ghost Pings", "Track deleted mentions"),
                switch("persistentStorage", "Persistent Storage", "Save logged messages across sessions"),
            ],
        },
        SettingCategory {
            id: "appearance",
            name: "Appearance",
            collapsible: true,
            shown: false,
            settings: vec![
                switch("showDeletedBadge", "Show Deleted Badge", "Display a badge on deleted messages"),
                switch("showEditedBadge", "Show Edited Badge", "Display a badge on edited messages"),
                SettingDescriptor {
                    id: "deletedColor",
                    name: "Deleted Message Color",
                    note: "Color for deleted message indicators",
                    kind: SettingKind::Color,
                },
                SettingDescriptor {
                    id: "editedColor",
                    name: "Edited Message Color",
                    note: "Color for edited message indicators",
                    kind: SettingKind::Color,
                },
            ],
        },
        SettingCategory {
            id: "storage",
            name: "Storage Settings",
            collapsible: true,
            shown: false,
            settings: vec![
                SettingDescriptor {
                    id: "maxMessages",
                    name: "Maximum Stored Messages",
                    note: "Maximum number of messages to store per channel",
                    kind: SettingKind::Slider {
                        min: MIN_MAX_MESSAGES,
                        max: MAX_MAX_MESSAGES,
                        markers: vec![10, 50, 100, 250, 500, 1000],
                        stick_to_markers: false,
                    },
                },
                SettingDescriptor {
                    id: "storageDays",
                    name: "Storage Duration (Days)",
                    note: "How long to keep logged messages",
                    kind: SettingKind::Slider {
                        min: MIN_STORAGE_DAYS,
                        max: MAX_STORAGE_DAYS,
                        markers: vec![1, 7, 14, 30],
                        stick_to_markers: true,
                    },
                },
            ],
        },
        SettingCategory {
            id: "filters",
            name: "Filters",
            collapsible: true,
            shown: false,
            settings: vec![
                switch("ignoreOwnMessages", "Ignore Own Messages", "Don't log your own deleted/edited messages"),
                switch("ignoreBots", "Ignore Bot Messages", "Don't log bot messages"),
                SettingDescriptor {
                    id: "ignoredUsers",
                    name: "Ignored User IDs",
                    note: "Comma-separated list of user IDs to ignore",
                    kind: SettingKind::Textbox,
                },
                SettingDescriptor {
                    id: "ignoredChannels",
                    name: "Ignored Channel IDs",
                    note: "Comma-separated list of channel IDs to ignore",
                    kind: SettingKind::Textbox,
                },
            ],
        },
    ]
}

/// Find the descriptor for `category.id`.
pub fn descriptor(category: &str, id: &str) -> Option<SettingDescriptor> {
    default_config()
        .into_iter()
        .find(|c| c.id == category)
        .and_then(|c| c.settings.into_iter().find(|s| s.id == id))
}

impl Settings {
    /// Set one field from a settings control.
    ///
    /// The value must match the control kind; slider values must lie inside
    /// the slider's range.
    pub fn apply(&mut self, category: &str, id: &str, value: SettingValue) -> Result<(), Error> {
        let desc = descriptor(category, id)
            .ok_or_else(|| Error::InvalidSetting(format!("unknown setting '{category}.{id}'")))?;

        let mismatch = |v: &SettingValue| {
            Error::InvalidSetting(format!(
                "'{category}.{id}' does not accept a {} value",
                v.describe()
            ))
        };

        match (desc.kind, value) {
            (SettingKind::Switch, SettingValue::Bool(b)) => {
                let slot = match (category, id) {
                    ("general", "logDeletes") => &mut self.general.log_deletes,
                    ("general", "logEdits") => &mut self.general.log_edits,
                    ("general", "logGhostPings") => &mut self.general.log_ghost_pings,
                    ("general", "persistentStorage") => &mut self.general.persistent_storage,
                    ("appearance", "showDeletedBadge") => &mut self.appearance.show_deleted_badge,
                    ("appearance", "showEditedBadge") => &mut self.appearance.show_edited_badge,
                    ("filters", "ignoreOwnMessages") => &mut self.filters.ignore_own_messages,
                    ("filters", "ignoreBots") => &mut self.filters.ignore_bots,
                    _ => return Err(Error::InvalidSetting(format!("no switch '{category}.{id}'"))),
                };
                *slot = b;
            }
            (SettingKind::Slider { min, max, .. }, SettingValue::Number(n)) => {
                if n < min || n > max {
                    return Err(Error::InvalidSetting(format!(
                        "'{category}.{id}' must be within {min}..={max}, got {n}"
                    )));
                }
                let slot = match (category, id) {
                    ("storage", "maxMessages") => &mut self.storage.max_messages,
                    ("storage", "storageDays") => &mut self.storage.storage_days,
                    _ => return Err(Error::InvalidSetting(format!("no slider '{category}.{id}'"))),
                };
                *slot = n;
            }
            (SettingKind::Textbox, SettingValue::Text(t)) | (SettingKind::Color, SettingValue::Text(t)) => {
                let slot = match (category, id) {
                    ("appearance", "deletedColor") => &mut self.appearance.deleted_color,
                    ("appearance", "editedColor") => &mut self.appearance.edited_color,
                    ("filters", "ignoredUsers") => &mut self.filters.ignored_users,
                    ("filters", "ignoredChannels") => &mut self.filters.ignored_channels,
                    _ => return Err(Error::InvalidSetting(format!("no text field '{category}.{id}'"))),
                };
                *slot = t;
            }
            (_, other) => return Err(mismatch(&other)),
        }
        Ok(())
    }
}
