use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use msglog_common::models::SettingValue;
use msglog_common::models::settings_schema::default_config;
use msglog_core::platforms::{InMemoryMessageStore, StaticCurrentUser};
use msglog_core::repositories::JsonFileStore;
use msglog_core::services::TracingNotifier;
use msglog_core::{LoggerContext, MessageLoggerPlugin, PLUGIN_NAME};

mod events;
use events::{ReplayEvent, read_event_log};

#[derive(Parser, Debug, Clone)]
#[command(name = "msglog-replay")]
#[command(author, version, about = "Replay a recorded message-event log through the message logger")]
struct Args {
    /// Directory holding `<namespace>.config.json` files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON-lines event log to replay.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Id of the account the session was recorded as.
    #[arg(long, default_value = "0")]
    user_id: String,

    #[arg(long, default_value = "me")]
    username: String,

    /// Change a setting before replaying, e.g. `--set storage.maxMessages=50`.
    /// May be repeated; changed settings are saved.
    #[arg(long = "set", value_name = "CATEGORY.ID=VALUE")]
    set: Vec<String>,

    /// Run a retention sweep after the replay.
    #[arg(long, default_value = "false")]
    sweep: bool,

    /// Print the cache snapshot as JSON when done.
    #[arg(long, default_value = "false")]
    dump: bool,

    /// Print the settings controls as JSON and exit.
    #[arg(long, default_value = "false")]
    schema: bool,
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("msglog_core=info".parse()?)
        .add_directive("msglog_replay=info".parse()?)
        .add_directive("msglog::notify=info".parse()?);
    let sub = fmt().with_env_filter(filter).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(sub).context("Failed to set global subscriber")?;
    Ok(())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("msglog")
}

/// `category.id=value`. `true`/`false` become switches and plain integers
/// slider values; anything else is text.
fn parse_assignment(raw: &str) -> anyhow::Result<(String, String, SettingValue)> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected CATEGORY.ID=VALUE, got '{raw}'"))?;
    let (category, id) = path
        .split_once('.')
        .ok_or_else(|| anyhow!("expected CATEGORY.ID, got '{path}'"))?;

    let value = match value {
        "true" => SettingValue::Bool(true),
        "false" => SettingValue::Bool(false),
        v => match v.parse::<u32>() {
            Ok(n) => SettingValue::Number(n),
            Err(_) => SettingValue::Text(v.to_string()),
        },
    };
    Ok((category.to_string(), id.to_string(), value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    if args.schema {
        println!("{}", serde_json::to_string_pretty(&default_config())?);
        return Ok(());
    }

    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    info!("msglog-replay starting. data_dir={}", data_dir.display());

    let host = Arc::new(InMemoryMessageStore::new());
    let ctx = LoggerContext::new(
        host.clone(),
        Arc::new(StaticCurrentUser::new(args.user_id.clone(), args.username.clone())),
        Arc::new(TracingNotifier),
        Arc::new(JsonFileStore::new(&data_dir)),
    );
    let mut plugin = MessageLoggerPlugin::new(ctx);

    plugin.load().await;
    if !args.set.is_empty() {
        for raw in &args.set {
            let (category, id, value) = parse_assignment(raw)?;
            plugin
                .apply_setting(&category, &id, value)
                .await
                .with_context(|| format!("--set {raw}"))?;
        }
        plugin.save_settings().await?;
    }

    plugin.start().await;

    if let Some(path) = args.events.as_ref() {
        let events = read_event_log(path)?;
        info!("Replaying {} events from {}", events.len(), path.display());
        let logger = plugin.logger();
        for event in &events {
            match event {
                ReplayEvent::Created(message) => host.insert(message.clone()),
                ReplayEvent::Changed(change) => {
                    // The logger must see the message as it was before the change.
                    logger.handle_event(change).await;
                    host.apply(change);
                }
            }
        }
    } else {
        warn!("No --events given; only loading and saving {}", PLUGIN_NAME);
    }

    if args.sweep {
        let report = plugin.logger().sweep().await;
        info!("Sweep removed {} records", report.total());
    }

    let stats = plugin.logger().stats().await;
    info!(
        "Cache: {} deleted in {} channels, {} edits on {} messages, {} ghost pings",
        stats.deleted_messages,
        stats.deleted_channels,
        stats.edit_records,
        stats.edited_messages,
        stats.ghost_pings
    );

    if args.dump {
        let snapshot = plugin.logger().snapshot().await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }

    plugin.stop().await;
    info!("Main finished. Goodbye!");
    Ok(())
}
