use tracing::{error, info, warn};

use msglog_common::traits::{Notifier, Severity};

/// Sends notifications to the log instead of a UI toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!(target: "msglog::notify", "{}", message),
            Severity::Warning => warn!(target: "msglog::notify", "{}", message),
            Severity::Error => error!(target: "msglog::notify", "{}", message),
        }
    }
}
