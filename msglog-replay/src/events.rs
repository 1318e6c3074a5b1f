// Event-log parsing for the replay tool.

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;
use serde_json::Value;

use msglog_common::models::{Message, MessageEvent};

/// One line of a recorded session.
///
/// `MESSAGE_CREATE` only feeds the host-side message store; everything else
/// is a [`MessageEvent`] the logger reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayEvent {
    Created(Message),
    Changed(MessageEvent),
}

#[derive(Deserialize)]
struct CreatedLine {
    message: Message,
}

impl ReplayEvent {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(line)?;
        match value.get("type").and_then(Value::as_str) {
            Some("MESSAGE_CREATE") => {
                let created: CreatedLine = serde_json::from_value(value)?;
                Ok(ReplayEvent::Created(created.message))
            }
            Some(_) => Ok(ReplayEvent::Changed(serde_json::from_value(value)?)),
            None => bail!("event has no \"type\" field"),
        }
    }
}

/// Read a JSON-lines event log. Blank lines and lines starting with `#` are
/// skipped.
pub fn read_event_log(path: &Path) -> anyhow::Result<Vec<ReplayEvent>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading event log {}", path.display()))?;

    let mut events = Vec::new();
    for (n, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = ReplayEvent::parse(line)
            .with_context(|| format!("{}:{}", path.display(), n + 1))?;
        events.push(event);
    }
    Ok(events)
}
