// src/lib.rs

pub mod cache;
pub mod platforms;
pub mod plugin;
pub mod repositories;
pub mod services;
pub mod tasks;

pub use msglog_common::error::Error;
pub use plugin::{MessageLoggerPlugin, PLUGIN_NAME};
pub use services::{LoggerContext, MessageLogger, Outcome, SkipReason};
