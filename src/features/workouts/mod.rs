//! # Workouts Feature
//!
//! Daily exercise log kept in a local JSON file, with an entry form and a
//! history report.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Per-day totals and overall averages in the history report
//! - 1.0.0: Initial release with log form and history view

pub mod form;
pub mod record;
pub mod report;
pub mod store;

pub use record::{WorkoutRecord, EXERCISE_TYPES};
pub use report::{format_history, summarize, HistorySummary};
pub use store::WorkoutStore;
