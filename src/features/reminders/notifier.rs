//! # Notification Presenters
//!
//! Fire-and-forget delivery of a reminder body plus attribution line. The
//! desktop presenter shells out to the platform notification tool and falls
//! back to the console when that tool is unavailable.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: macOS support through osascript
//! - 1.0.0: notify-send and console presenters

use crate::core::NotifierKind;
use log::{debug, warn};
use std::process::Command;
use std::sync::Arc;

pub const APP_NAME: &str = "WaterQuest";

/// Presents a notification. Called from the reminder task and the menu
/// thread, so implementations must be shareable across threads.
pub trait Notifier: Send + Sync {
    fn show(&self, body: &str, attribution: &str);
}

/// Build the presenter selected in config
pub fn notifier_for(kind: NotifierKind) -> Arc<dyn Notifier> {
    match kind {
        NotifierKind::Desktop => Arc::new(DesktopNotifier::new()),
        NotifierKind::Console => Arc::new(ConsoleNotifier),
    }
}

/// Prints a framed toast to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, body: &str, attribution: &str) {
        println!("{}", render_toast(body, attribution));
    }
}

fn render_toast(body: &str, attribution: &str) -> String {
    let width = body
        .lines()
        .chain(std::iter::once(attribution))
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(width + 2);

    let mut out = format!("┌{rule}┐\n");
    for line in body.lines() {
        out.push_str(&format!("│ {line:<width$} │\n"));
    }
    out.push_str(&format!("│ {attribution:<width$} │\n"));
    out.push_str(&format!("└{rule}┘"));
    out
}

/// Native notifications via `notify-send` (Linux) or `osascript` (macOS)
#[derive(Debug, Clone, Default)]
pub struct DesktopNotifier {
    fallback: ConsoleNotifier,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(body: &str, attribution: &str) -> Option<Command> {
        if cfg!(target_os = "macos") {
            let script = format!(
                "display notification \"{}\" with title \"{}\" subtitle \"{}\"",
                escape_applescript(body),
                APP_NAME,
                escape_applescript(attribution)
            );
            let mut cmd = Command::new("osascript");
            cmd.args(["-e", &script]);
            Some(cmd)
        } else if cfg!(unix) {
            let mut cmd = Command::new("notify-send");
            cmd.arg(format!("--app-name={APP_NAME}"))
                .arg("--")
                .arg(body)
                .arg(attribution);
            Some(cmd)
        } else {
            None
        }
    }
}

impl Notifier for DesktopNotifier {
    fn show(&self, body: &str, attribution: &str) {
        let Some(mut cmd) = Self::command(body, attribution) else {
            self.fallback.show(body, attribution);
            return;
        };

        match cmd.status() {
            Ok(status) if status.success() => debug!("Desktop notification shown"),
            Ok(status) => {
                warn!("Notification tool exited with {status}, using console");
                self.fallback.show(body, attribution);
            }
            Err(e) => {
                warn!("Failed to run notification tool: {e}, using console");
                self.fallback.show(body, attribution);
            }
        }
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
