// File: msglog-core/tests/plugin_lifecycle_tests.rs

mod test_utils;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

use msglog_common::models::{MessageEvent, SettingValue};
use msglog_core::platforms::InMemoryMessageStore;
use msglog_core::repositories::InMemoryKeyValueStore;
use msglog_core::{MessageLoggerPlugin, PLUGIN_NAME};

use test_utils::helpers::*;

struct Fixture {
    plugin: MessageLoggerPlugin,
    host: Arc<InMemoryMessageStore>,
    kv: Arc<InMemoryKeyValueStore>,
    clock: Arc<ManualClock>,
}

fn fixture_with(kv: Arc<InMemoryKeyValueStore>) -> Fixture {
    let host = Arc::new(InMemoryMessageStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let ctx = context(
        host.clone(),
        kv.clone(),
        clock.clone(),
        Arc::new(RecordingNotifier::default()),
    );
    Fixture { plugin: MessageLoggerPlugin::new(ctx), host, kv, clock }
}

fn fixture() -> Fixture {
    fixture_with(Arc::new(InMemoryKeyValueStore::new()))
}

#[tokio::test]
async fn start_restores_saved_snapshot() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    kv.insert(
        PLUGIN_NAME,
        "messageCache",
        json!({
            "deleted": [["C9", [{
                "id": "m1",
                "channel_id": "C9",
                "author": { "id": "7", "username": "user7" },
                "content": "restored",
                "timestamp": "2024-05-01T12:00:00Z",
                "deletedAt": 1714564800000i64
            }]]],
            "edits": [["m5", [{ "content": "old", "editedAt": 1714564800000i64 }]]]
        }),
    );
    let mut f = fixture_with(kv);

    f.plugin.start().await;

    let logger = f.plugin.logger();
    let deleted = logger.deleted_messages("C9").await;
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].message.content, "restored");
    assert_eq!(deleted[0].deleted_at, t0());
    assert_eq!(logger.edit_history("m5").await[0].content, "old");
    // ghostPings was absent from the blob
    assert_eq!(logger.stats().await.ghost_pings, 0);

    f.plugin.stop().await;
}

#[tokio::test]
async fn malformed_snapshot_starts_empty() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    kv.insert(PLUGIN_NAME, "messageCache", json!({ "deleted": "not a list" }));
    let mut f = fixture_with(kv);

    f.plugin.start().await;

    assert!(f.plugin.is_running());
    assert_eq!(f.plugin.logger().stats().await.deleted_messages, 0);
    f.plugin.stop().await;
}

#[tokio::test]
async fn stop_saves_and_halts() {
    let mut f = fixture();
    f.plugin.start().await;
    assert!(f.plugin.is_running());

    f.host.insert(message("m1", "C1", "7", "x"));
    f.plugin.logger().handle_delete("C1", "m1").await;
    let saves = f.kv.save_count();

    f.plugin.stop().await;

    assert!(!f.plugin.is_running());
    assert_eq!(f.kv.save_count(), saves + 1);
    let saved = f.kv.get(PLUGIN_NAME, "messageCache").unwrap();
    assert_eq!(saved["deleted"][0][1][0]["id"], "m1");
}

#[tokio::test]
async fn stop_without_persistence_does_not_save() {
    let mut f = fixture();
    f.plugin
        .apply_setting("general", "persistentStorage", SettingValue::Bool(false))
        .await
        .unwrap();
    f.plugin.start().await;
    f.plugin.stop().await;
    assert_eq!(f.kv.save_count(), 0);
}

#[tokio::test]
async fn double_start_is_ignored() {
    let mut f = fixture();
    f.plugin.start().await;

    f.host.insert(message("m1", "C1", "7", "x"));
    f.plugin.logger().handle_delete("C1", "m1").await;

    // A second start must not reload (and so wipe) the live cache.
    f.kv.insert(PLUGIN_NAME, "messageCache", json!({}));
    f.plugin.start().await;

    assert_eq!(f.plugin.logger().deleted_messages("C1").await.len(), 1);
    f.plugin.stop().await;
}

#[tokio::test]
async fn attached_stream_is_consumed_in_order() {
    let mut f = fixture();
    f.plugin.start().await;
    f.host.insert(message("m1", "C1", "7", "first"));
    f.host.insert(message("m2", "C1", "7", "second"));

    let (tx, rx) = mpsc::channel(8);
    f.plugin.attach(rx);
    tx.send(MessageEvent::Updated { message: message("m1", "C1", "7", "first!") })
        .await
        .unwrap();
    tx.send(MessageEvent::Deleted { channel_id: "C1".into(), id: "m2".into() })
        .await
        .unwrap();

    let logger = f.plugin.logger().clone();
    timeout(StdDuration::from_secs(2), async {
        loop {
            let stats = logger.stats().await;
            if stats.edit_records == 1 && stats.deleted_messages == 1 {
                break;
            }
            sleep(StdDuration::from_millis(5)).await;
        }
    })
    .await
    .expect("events were not processed");

    assert_eq!(logger.edit_history("m1").await[0].content, "first");
    f.plugin.stop().await;
}

#[tokio::test(start_paused = true)]
async fn sweeper_runs_on_its_interval() {
    let mut f = fixture();
    f.plugin.start().await;

    f.host.insert(message("m1", "C1", "7", "x"));
    f.plugin.logger().handle_delete("C1", "m1").await;
    f.clock.advance(Duration::days(8));

    sleep(StdDuration::from_secs(3601)).await;

    assert!(f.plugin.logger().deleted_messages("C1").await.is_empty());
    f.plugin.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stopped_plugin_no_longer_sweeps() {
    let mut f = fixture();
    f.plugin.start().await;

    f.host.insert(message("m1", "C1", "7", "x"));
    f.plugin.logger().handle_delete("C1", "m1").await;
    f.plugin.stop().await;

    f.clock.advance(Duration::days(8));
    sleep(StdDuration::from_secs(2 * 3600)).await;

    assert_eq!(f.plugin.logger().deleted_messages("C1").await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn custom_sweep_interval_is_honored() {
    let f = fixture();
    let mut plugin = f.plugin.with_sweep_interval(StdDuration::from_secs(60));
    plugin.start().await;

    f.host.insert(message("m1", "C1", "7", "x"));
    plugin.logger().handle_delete("C1", "m1").await;
    f.clock.advance(Duration::days(8));

    sleep(StdDuration::from_secs(61)).await;

    assert!(plugin.logger().deleted_messages("C1").await.is_empty());
    plugin.stop().await;
}

#[tokio::test]
async fn load_merges_and_clamps_saved_settings() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    kv.insert(
        PLUGIN_NAME,
        "settings",
        json!({
            "general": { "logEdits": false },
            "storage": { "maxMessages": 5000, "storageDays": 0 }
        }),
    );
    let f = fixture_with(kv);

    let settings = f.plugin.load().await;

    assert!(!settings.general.log_edits);
    assert!(settings.general.log_deletes);
    assert_eq!(settings.storage.max_messages, 1000);
    assert_eq!(settings.storage.storage_days, 1);
    assert_eq!(settings.appearance.deleted_color, "#f04747");
    assert_eq!(f.plugin.logger().settings().await, settings);
}

#[tokio::test]
async fn applied_settings_are_saved_and_reloaded() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let f = fixture_with(kv.clone());

    f.plugin
        .apply_setting("storage", "storageDays", SettingValue::Number(3))
        .await
        .unwrap();
    f.plugin
        .apply_setting("filters", "ignoredUsers", SettingValue::Text("1,2".into()))
        .await
        .unwrap();
    assert!(f
        .plugin
        .apply_setting("storage", "storageDays", SettingValue::Number(31))
        .await
        .is_err());
    assert!(f
        .plugin
        .apply_setting("general", "logEdits", SettingValue::Text("yes".into()))
        .await
        .is_err());
    f.plugin.save_settings().await.unwrap();

    let reloaded = fixture_with(kv).plugin.load().await;
    assert_eq!(reloaded.storage.storage_days, 3);
    assert_eq!(reloaded.filters.ignored_users, "1,2");
    assert!(reloaded.general.log_edits);
}

#[tokio::test]
async fn stop_before_start_leaves_stored_cache_alone() {
    let kv = Arc::new(InMemoryKeyValueStore::new());
    let stored = json!({
        "deleted": [],
        "edits": [["m5", [{ "content": "old", "editedAt": 1714564800000i64 }]]],
        "ghostPings": []
    });
    kv.insert(PLUGIN_NAME, "messageCache", stored.clone());
    let mut f = fixture_with(kv);

    f.plugin.load().await;
    f.plugin.stop().await;

    assert_eq!(f.kv.save_count(), 0);
    assert_eq!(f.kv.get(PLUGIN_NAME, "messageCache"), Some(stored));
}
