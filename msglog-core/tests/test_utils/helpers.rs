// File: msglog-core/tests/test_utils/helpers.rs

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use msglog_common::models::{Message, MessageAuthor, Settings};
use msglog_common::traits::{Clock, Notifier, Severity};
use msglog_core::platforms::{InMemoryMessageStore, StaticCurrentUser};
use msglog_core::repositories::InMemoryKeyValueStore;
use msglog_core::services::{CachePersistence, LoggerContext, MessageLogger};
use msglog_core::PLUGIN_NAME;

pub const ME: &str = "100";

/// Clock the tests move by hand.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(at) }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Keeps every notification so tests can count them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, Severity)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.sent.lock().unwrap().push((message.to_string(), severity));
    }
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn user(id: &str, name: &str) -> MessageAuthor {
    MessageAuthor { id: id.to_string(), username: name.to_string(), bot: false }
}

pub fn message(id: &str, channel: &str, author: &str, content: &str) -> Message {
    Message {
        id: id.to_string(),
        channel_id: channel.to_string(),
        guild_id: Some("G1".to_string()),
        author: user(author, &format!("user{author}")),
        content: content.to_string(),
        mentions: vec![],
        timestamp: t0(),
        edited_timestamp: None,
    }
}

pub fn mentioning(mut msg: Message, user_id: &str) -> Message {
    msg.mentions.push(user(user_id, "mentioned"));
    msg
}

pub fn context(
    host: Arc<InMemoryMessageStore>,
    kv: Arc<InMemoryKeyValueStore>,
    clock: Arc<ManualClock>,
    notifier: Arc<dyn Notifier>,
) -> LoggerContext {
    LoggerContext::new(host, Arc::new(StaticCurrentUser::new(ME, "me")), notifier, kv)
        .with_clock(clock)
}

/// Everything a handler test needs, wired to in-memory collaborators.
pub struct Harness {
    pub logger: MessageLogger,
    pub host: Arc<InMemoryMessageStore>,
    pub kv: Arc<InMemoryKeyValueStore>,
    pub clock: Arc<ManualClock>,
    recorder: Option<Arc<RecordingNotifier>>,
}

impl Harness {
    /// Notifications seen by the recording notifier from [`harness`].
    pub fn sent(&self) -> Vec<(String, Severity)> {
        self.recorder
            .as_ref()
            .expect("harness was built with a caller-supplied notifier")
            .sent()
    }
}

pub fn harness(settings: Settings) -> Harness {
    let recorder = Arc::new(RecordingNotifier::default());
    build_harness(settings, recorder.clone(), Some(recorder))
}

/// Like [`harness`] but with the caller's notifier; `Harness::sent` is
/// unavailable.
pub fn harness_with_notifier(settings: Settings, notifier: Arc<dyn Notifier>) -> Harness {
    build_harness(settings, notifier, None)
}

fn build_harness(
    settings: Settings,
    notifier: Arc<dyn Notifier>,
    recorder: Option<Arc<RecordingNotifier>>,
) -> Harness {
    let host = Arc::new(InMemoryMessageStore::new());
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let clock = Arc::new(ManualClock::new(t0()));

    let ctx = context(host.clone(), kv.clone(), clock.clone(), notifier);
    let persistence = CachePersistence::new(kv.clone(), PLUGIN_NAME);
    let logger = MessageLogger::new(ctx, settings, persistence);

    Harness { logger, host, kv, clock, recorder }
}

pub fn ids<'a, I>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    messages.into_iter().map(|m| m.id.clone()).collect()
}
