//! # Features
//!
//! - `reminders`: scheduled habit notifications
//! - `workouts`: daily exercise log
//! - `menu`: tray menu actions
//! - `vignette`: console mini-game

pub mod menu;
pub mod reminders;
pub mod vignette;
pub mod workouts;

pub use menu::{FrontEnd, Menu, MenuAction, MenuOutcome};
pub use reminders::{MessagePool, ReminderScheduler, ReminderService, ScheduleTable};
pub use workouts::{WorkoutRecord, WorkoutStore};
