//! # Reminders Feature
//!
//! Daily habit reminders: schedule table, message catalog, notification
//! presenters and the polling scheduler.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Optional JSON schedule file
//! - 1.0.0: Initial release with built-in schedule and desktop notifications

pub mod messages;
pub mod notifier;
pub mod schedule;
pub mod scheduler;
pub mod service;

pub use messages::{MessagePool, ReminderMessage};
pub use notifier::{notifier_for, ConsoleNotifier, DesktopNotifier, Notifier};
pub use schedule::{CategorySchedule, ScheduleError, ScheduleTable};
pub use scheduler::{tick, FiredKey, FiredSet, ReminderScheduler};
pub use service::ReminderService;
