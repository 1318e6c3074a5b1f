use std::sync::Arc;

use msglog_common::traits::{
    Clock, CurrentUserProvider, KeyValueStore, MessageLookup, Notifier, SystemClock,
};

/// LoggerContext bundles every host collaborator the logger talks to, so
/// hosts (and tests) wire them once and hand over a single object.
#[derive(Clone)]
pub struct LoggerContext {
    pub lookup: Arc<dyn MessageLookup>,
    pub users: Arc<dyn CurrentUserProvider>,
    pub notifier: Arc<dyn Notifier>,
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
}

impl LoggerContext {
    pub fn new(
        lookup: Arc<dyn MessageLookup>,
        users: Arc<dyn CurrentUserProvider>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            lookup,
            users,
            notifier,
            store,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
