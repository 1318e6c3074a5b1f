// File: msglog-common/src/traits/host_traits.rs
//
// Everything the logger needs from the host application. Implementations
// are injected at construction time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Error;
use crate::models::message::{CurrentUser, Message};

/// Host-local message cache. Must be cheap; called on every event.
pub trait MessageLookup: Send + Sync {
    fn get_message(&self, channel_id: &str, message_id: &str) -> Option<Message>;
}

pub trait CurrentUserProvider: Send + Sync {
    fn current_user(&self) -> CurrentUser;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Fire-and-forget, user-visible notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Namespaced key-value storage for persisted blobs.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn save(&self, namespace: &str, key: &str, value: &Value) -> Result<(), Error>;
    async fn load(&self, namespace: &str, key: &str) -> Result<Option<Value>, Error>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
