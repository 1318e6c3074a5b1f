pub mod event_pump;
pub mod retention_sweep;

pub use event_pump::spawn_event_pump_task;
pub use retention_sweep::{spawn_retention_sweep_task, DEFAULT_SWEEP_INTERVAL};
