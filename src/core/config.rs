//! # Configuration
//!
//! Environment-driven settings. Call `dotenvy::dotenv()` first so values from a
//! local `.env` file are visible.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Optional SCHEDULE_PATH and NOTIFIER selection
//! - 1.0.0: Initial release with data dir, poll interval and instance port

use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default reminder polling interval
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Loopback port used as the single-instance lock
pub const DEFAULT_INSTANCE_PORT: u16 = 47813;

pub const MESSAGES_FILE: &str = "messages.json";
pub const WORKOUTS_FILE: &str = "workouts.json";

/// Which notification presenter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierKind {
    /// Native desktop notifications via the platform's notification tool
    Desktop,
    /// Framed text on stdout
    Console,
}

impl NotifierKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "desktop" => Some(NotifierKind::Desktop),
            "console" => Some(NotifierKind::Console),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub messages_path: PathBuf,
    pub workouts_path: PathBuf,
    /// Optional JSON schedule overriding the built-in table
    pub schedule_path: Option<PathBuf>,
    pub poll_interval: Duration,
    pub instance_port: u16,
    pub notifier: NotifierKind,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let data_dir = env::var("WATERQUEST_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let messages_path = env::var("MESSAGES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join(MESSAGES_FILE));
        let workouts_path = env::var("WORKOUTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join(WORKOUTS_FILE));
        let schedule_path = env::var("SCHEDULE_PATH").ok().map(PathBuf::from);

        let poll_interval_secs = match env::var("POLL_INTERVAL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| anyhow!("POLL_INTERVAL_SECS must be a positive integer: {raw}"))?,
            Err(_) => DEFAULT_POLL_INTERVAL_SECS,
        };

        let instance_port = match env::var("INSTANCE_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow!("Invalid INSTANCE_PORT '{raw}': {e}"))?,
            Err(_) => DEFAULT_INSTANCE_PORT,
        };

        let notifier = match env::var("NOTIFIER") {
            Ok(raw) => NotifierKind::parse(&raw)
                .ok_or_else(|| anyhow!("NOTIFIER must be 'desktop' or 'console', got '{raw}'"))?,
            Err(_) => NotifierKind::Desktop,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            data_dir,
            messages_path,
            workouts_path,
            schedule_path,
            poll_interval: Duration::from_secs(poll_interval_secs),
            instance_port,
            notifier,
            log_level,
        })
    }
}

/// Directory containing the running executable, falling back to the working directory
fn default_data_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
