//! # Reminder Schedule
//!
//! Category → times-of-day table. Built in by default, optionally replaced by a
//! JSON file of the form:
//!
//! ```json
//! { "schedule": [ { "category": "Hydration", "times": ["08:00", "10:00"] } ] }
//! ```
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Load schedule from JSON with validation
//! - 1.0.0: Built-in table and next-reminder query

use crate::core::error::{read_json, LoadError};
use chrono::{NaiveTime, Timelike};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Built-in schedule, in menu order
const DEFAULT_SCHEDULE: &[(&str, &[(u32, u32)])] = &[
    ("Hydration", &[(8, 0), (10, 0), (12, 0), (14, 0), (16, 0), (18, 0)]),
    ("Workout", &[(22, 0), (23, 0)]),
    ("Russian", &[(9, 0), (13, 0), (17, 0)]),
    ("CTF", &[(19, 0), (20, 0)]),
    ("Sleep", &[(23, 30), (23, 40), (23, 50), (0, 0)]),
];

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule has no categories")]
    NoCategories,

    #[error("category '{0}' has no scheduled times")]
    EmptyCategory(String),

    #[error("category '{0}' is defined more than once")]
    DuplicateCategory(String),

    #[error("invalid time '{time}' for category '{category}' (expected HH:MM)")]
    InvalidTime { category: String, time: String },

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Scheduled times for one reminder category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySchedule {
    pub category: String,
    pub times: Vec<NaiveTime>,
}

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    schedule: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    category: String,
    times: Vec<String>,
}

/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    categories: Vec<CategorySchedule>,
}

impl Default for ScheduleTable {
    fn default() -> Self {
        let categories = DEFAULT_SCHEDULE
            .iter()
            .map(|(name, times)| CategorySchedule {
                category: name.to_string(),
                times: times
                    .iter()
                    .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
                    .collect(),
            })
            .collect();
        ScheduleTable { categories }
    }
}

impl ScheduleTable {
    /// Build a table, truncating times to the minute.
    pub fn new(categories: Vec<CategorySchedule>) -> Result<Self, ScheduleError> {
        if categories.is_empty() {
            return Err(ScheduleError::NoCategories);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(categories.len());
        for entry in categories {
            if entry.times.is_empty() {
                return Err(ScheduleError::EmptyCategory(entry.category));
            }
            if !seen.insert(entry.category.clone()) {
                return Err(ScheduleError::DuplicateCategory(entry.category));
            }
            let times = entry
                .times
                .iter()
                .filter_map(|t| t.with_second(0).and_then(|t| t.with_nanosecond(0)))
                .collect();
            normalized.push(CategorySchedule {
                category: entry.category,
                times,
            });
        }

        Ok(ScheduleTable {
            categories: normalized,
        })
    }

    /// Load a schedule file. Unlike the message catalog this is strict: a
    /// broken schedule would silently disable every reminder.
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let file: ScheduleFile = read_json(path)?;

        let mut categories = Vec::with_capacity(file.schedule.len());
        for raw in file.schedule {
            let mut times = Vec::with_capacity(raw.times.len());
            for time in &raw.times {
                let parsed = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).map_err(|_| {
                    ScheduleError::InvalidTime {
                        category: raw.category.clone(),
                        time: time.clone(),
                    }
                })?;
                times.push(parsed);
            }
            categories.push(CategorySchedule {
                category: raw.category,
                times,
            });
        }

        Self::new(categories)
    }

    pub fn categories(&self) -> &[CategorySchedule] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.category.as_str())
    }

    pub fn times_for(&self, category: &str) -> Option<&[NaiveTime]> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.times.as_slice())
    }

    /// Next scheduled time per category, in table order.
    pub fn next_reminders(&self, now: NaiveTime) -> Vec<(&str, NaiveTime)> {
        self.categories
            .iter()
            .filter_map(|c| next_reminder_time(&c.times, now).map(|t| (c.category.as_str(), t)))
            .collect()
    }

    /// Menu text for "Check Next Reminder"
    pub fn format_next_reminders(&self, now: NaiveTime) -> String {
        self.next_reminders(now)
            .into_iter()
            .map(|(category, time)| format!("Next {}: {}", category, time.format(TIME_FORMAT)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Smallest time strictly after `now`, wrapping to the earliest time of the
/// next day when every slot has passed.
pub fn next_reminder_time(times: &[NaiveTime], now: NaiveTime) -> Option<NaiveTime> {
    times
        .iter()
        .copied()
        .filter(|t| *t > now)
        .min()
        .or_else(|| times.iter().copied().min())
}
