// msglog-core/src/tasks/retention_sweep.rs

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::services::MessageLogger;

/// Sweep once an hour unless told otherwise.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Spawns a background task that periodically drops expired deleted messages
/// and ghost pings. The task runs until its handle is aborted.
pub fn spawn_retention_sweep_task(logger: MessageLogger, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Retention sweep task started (interval={:?})", interval);
        loop {
            sleep(interval).await;
            logger.sweep().await;
        }
    })
}
