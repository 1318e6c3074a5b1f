// File: msglog-core/src/plugin.rs
//
// Lifecycle wrapper: owns the background tasks and ties loading/saving to
// start/stop.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use msglog_common::models::{MessageEvent, Settings, SettingValue};
use msglog_common::Error;

use crate::services::{CachePersistence, LoggerContext, MessageLogger};
use crate::tasks::{spawn_event_pump_task, spawn_retention_sweep_task, DEFAULT_SWEEP_INTERVAL};

pub const PLUGIN_NAME: &str = "MessageLogger";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PLUGIN_DESCRIPTION: &str =
    "Track deleted messages, edits, and ghost pings with persistent storage";

pub struct MessageLoggerPlugin {
    logger: MessageLogger,
    sweep_interval: Duration,
    sweep_handle: Option<JoinHandle<()>>,
    pump_handle: Option<JoinHandle<()>>,
}

impl MessageLoggerPlugin {
    pub fn new(ctx: LoggerContext) -> Self {
        let persistence = CachePersistence::new(ctx.store.clone(), PLUGIN_NAME);
        Self {
            logger: MessageLogger::new(ctx, Settings::default(), persistence),
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            sweep_handle: None,
            pump_handle: None,
        }
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn logger(&self) -> &MessageLogger {
        &self.logger
    }

    pub fn is_running(&self) -> bool {
        self.sweep_handle.is_some()
    }

    /// Load saved settings (merged over defaults) into the logger.
    pub async fn load(&self) -> Settings {
        let settings = self.logger.persistence().load_settings().await;
        self.logger.set_settings(settings.clone()).await;
        settings
    }

    /// Restore the persisted cache and start the retention sweep.
    pub async fn start(&mut self) {
        if self.is_running() {
            warn!("{} is already running; start() ignored", PLUGIN_NAME);
            return;
        }
        info!("Starting {} v{}...", PLUGIN_NAME, PLUGIN_VERSION);

        let cache = self.logger.persistence().load_cache().await;
        self.logger.replace_cache(cache).await;

        self.sweep_handle = Some(spawn_retention_sweep_task(
            self.logger.clone(),
            self.sweep_interval,
        ));
    }

    /// Subscribe to a host event stream. Replaces any previously attached
    /// stream.
    pub fn attach(&mut self, rx: mpsc::Receiver<MessageEvent>) {
        if let Some(old) = self.pump_handle.take() {
            old.abort();
        }
        self.pump_handle = Some(spawn_event_pump_task(self.logger.clone(), rx));
    }

    /// Cancel the background tasks and, when persistence is on, save the
    /// cache one last time.
    ///
    /// A plugin that was never started never loaded the stored cache, so
    /// nothing is saved in that case.
    pub async fn stop(&mut self) {
        let was_running = self.is_running();
        info!("Stopping {}...", PLUGIN_NAME);
        for handle in [self.pump_handle.take(), self.sweep_handle.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
            // Wait for the cancellation so no sweep runs after the final save.
            let _ = handle.await;
        }

        if !was_running {
            warn!("{} was not started; skipping final save", PLUGIN_NAME);
            return;
        }
        if self.logger.settings().await.general.persistent_storage {
            self.logger.persist().await;
        }
    }

    /// Change one setting from a settings control.
    pub async fn apply_setting(
        &self,
        category: &str,
        id: &str,
        value: SettingValue,
    ) -> Result<(), Error> {
        self.logger
            .update_settings(|s| s.apply(category, id, value))
            .await
    }

    pub async fn save_settings(&self) -> Result<(), Error> {
        let settings = self.logger.settings().await;
        self.logger.persistence().save_settings(&settings).await
    }
}

impl Drop for MessageLoggerPlugin {
    fn drop(&mut self) {
        for handle in [self.pump_handle.take(), self.sweep_handle.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }
}
