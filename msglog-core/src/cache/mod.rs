pub mod bounded_store;
pub mod message_cache;

pub use bounded_store::BoundedStore;
pub use message_cache::{CacheSnapshot, CacheStats, MessageCache, SweepReport};
