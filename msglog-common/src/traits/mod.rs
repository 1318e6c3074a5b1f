pub mod host_traits;

pub use host_traits::{
    Clock, CurrentUserProvider, KeyValueStore, MessageLookup, Notifier, Severity, SystemClock,
};
