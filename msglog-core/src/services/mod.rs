pub mod event_context;
pub mod filter;
pub mod ghost_ping;
pub mod message_logger;
pub mod notifier;
pub mod persistence;

pub use event_context::LoggerContext;
pub use message_logger::{MessageLogger, Outcome, SkipReason};
pub use notifier::TracingNotifier;
pub use persistence::CachePersistence;
