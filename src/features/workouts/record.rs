//! Workout record and its on-disk JSON shape:
//!
//! ```json
//! { "Date": "2024-01-01T00:00:00", "Exercises": { "Push-ups": 20 } }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Exercise types offered by the entry form, in display order
pub const EXERCISE_TYPES: &[&str] = &["Push-ups", "Squats", "Jumping Jacks", "Abs", "Advanced Squats"];

/// Repetition counts for one day. The date is the record's unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    #[serde(rename = "Date", with = "day_as_datetime")]
    pub date: NaiveDate,
    #[serde(rename = "Exercises")]
    pub exercises: BTreeMap<String, u32>,
}

impl WorkoutRecord {
    pub fn new(date: NaiveDate, exercises: BTreeMap<String, u32>) -> Self {
        WorkoutRecord { date, exercises }
    }

    pub fn total_reps(&self) -> u64 {
        self.exercises.values().map(|&reps| u64::from(reps)).sum()
    }
}

/// Days are stored as midnight date-times. Reading accepts any ISO-8601
/// date-time (offset included) or a bare date and keeps the date part.
mod day_as_datetime {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%dT00:00:00").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid workout date: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        let (day, rest) = (raw.get(..10)?, raw.get(10..)?);
        if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
            return None;
        }
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}
