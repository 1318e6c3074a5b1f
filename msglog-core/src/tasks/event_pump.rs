// msglog-core/src/tasks/event_pump.rs

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use msglog_common::models::MessageEvent;

use crate::services::MessageLogger;

/// Spawns a task that feeds every event from `rx` to the logger, in order.
/// Ends when the sender side is dropped or the handle is aborted.
pub fn spawn_event_pump_task(
    logger: MessageLogger,
    mut rx: mpsc::Receiver<MessageEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            logger.handle_event(&event).await;
        }
        info!("Message event channel closed => event pump exiting.");
    })
}
