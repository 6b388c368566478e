// Core layer - configuration and shared error types
pub mod core;

// Features layer - reminders, workouts, menu, vignette
pub mod features;

// Single-instance lock
pub mod instance;

pub use crate::core::Config;
pub use instance::InstanceGuard;

pub use features::{
    // Menu
    FrontEnd, Menu, MenuAction, MenuOutcome,
    // Reminders
    MessagePool, ReminderScheduler, ReminderService, ScheduleTable,
    // Workouts
    WorkoutRecord, WorkoutStore,
};
