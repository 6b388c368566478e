//! Interactive "Log Today's Workout" form.

use crate::features::workouts::record::{WorkoutRecord, EXERCISE_TYPES};
use anyhow::Result;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use dialoguer::{Confirm, Input};
use std::collections::BTreeMap;

/// Upper bound accepted for a single exercise count
pub const MAX_REPS: u32 = 1000;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Before noon the form assumes you're logging last night's session.
pub fn default_entry_date(now: NaiveDateTime) -> NaiveDate {
    if now.hour() < 12 {
        (now - Duration::days(1)).date()
    } else {
        now.date()
    }
}

pub fn validate_reps(reps: u32) -> Result<(), String> {
    if reps > MAX_REPS {
        Err(format!("Count must be between 0 and {MAX_REPS}"))
    } else {
        Ok(())
    }
}

pub fn parse_entry_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| format!("Use the {DATE_FORMAT} format, e.g. 2024-01-31"))
}

/// Prompt for every exercise count and the date. `None` if the user declines
/// to save.
pub fn prompt_workout(now: NaiveDateTime) -> Result<Option<WorkoutRecord>> {
    println!("Log Workout");
    println!("===========\n");

    let mut exercises = BTreeMap::new();
    for exercise in EXERCISE_TYPES {
        let reps: u32 = Input::new()
            .with_prompt(*exercise)
            .default(0)
            .validate_with(|reps: &u32| validate_reps(*reps))
            .interact_text()?;
        exercises.insert(exercise.to_string(), reps);
    }

    let date_text: String = Input::new()
        .with_prompt("Date")
        .default(default_entry_date(now).format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| parse_entry_date(input).map(|_| ()))
        .interact_text()?;
    let date = parse_entry_date(&date_text).map_err(anyhow::Error::msg)?;

    let save = Confirm::new()
        .with_prompt("Save")
        .default(true)
        .interact()?;

    Ok(save.then(|| WorkoutRecord::new(date, exercises)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_default_entry_date_morning_is_yesterday() {
        assert_eq!(
            default_entry_date(at(1, 9)),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_default_entry_date_afternoon_is_today() {
        assert_eq!(
            default_entry_date(at(15, 12)),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_validate_reps_bounds() {
        assert!(validate_reps(0).is_ok());
        assert!(validate_reps(MAX_REPS).is_ok());
        assert!(validate_reps(MAX_REPS + 1).is_err());
    }

    #[test]
    fn test_parse_entry_date() {
        assert_eq!(
            parse_entry_date(" 2024-01-31 "),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert!(parse_entry_date("31/01/2024").is_err());
    }
}
