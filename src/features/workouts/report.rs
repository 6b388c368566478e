//! Workout history report: per-day breakdown, newest first, followed by
//! overall totals.

use crate::features::workouts::record::WorkoutRecord;

/// Aggregates across every recorded day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySummary {
    pub days: usize,
    pub total_reps: u64,
    pub mean_reps_per_day: f64,
}

/// `None` for an empty history, where the mean is undefined.
pub fn summarize(records: &[WorkoutRecord]) -> Option<HistorySummary> {
    if records.is_empty() {
        return None;
    }

    let total_reps: u64 = records.iter().map(WorkoutRecord::total_reps).sum();
    Some(HistorySummary {
        days: records.len(),
        total_reps,
        mean_reps_per_day: total_reps as f64 / records.len() as f64,
    })
}

/// Render the history text. Returns `None` for an empty history.
pub fn format_history(records: &[WorkoutRecord]) -> Option<String> {
    let summary = summarize(records)?;

    let mut sorted: Vec<&WorkoutRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut out = String::new();
    for record in sorted {
        out.push_str(&format!("Date: {}\n", record.date.format("%Y-%m-%d")));
        for (name, reps) in &record.exercises {
            out.push_str(&format!("  {name}: {reps}\n"));
        }
        out.push_str(&format!("  Total: {}\n\n", record.total_reps()));
    }

    out.push_str(&format!("Days recorded: {}\n", summary.days));
    out.push_str(&format!("Total reps: {}\n", summary.total_reps));
    out.push_str(&format!("Average per day: {:.1}", summary.mean_reps_per_day));
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample() -> Vec<WorkoutRecord> {
        vec![
            WorkoutRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                BTreeMap::from([("Pushups".to_string(), 10), ("Squats".to_string(), 5)]),
            ),
            WorkoutRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                BTreeMap::from([("Pushups".to_string(), 20)]),
            ),
        ]
    }

    #[test]
    fn test_summarize_totals_and_mean() {
        let summary = summarize(&sample()).unwrap();
        assert_eq!(summary.days, 2);
        assert_eq!(summary.total_reps, 35);
        assert!((summary.mean_reps_per_day - 17.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_history_has_no_summary() {
        assert!(summarize(&[]).is_none());
        assert!(format_history(&[]).is_none());
    }

    #[test]
    fn test_format_history_newest_first() {
        let text = format_history(&sample()).unwrap();
        let expected = "\
Date: 2024-01-02
  Pushups: 20
  Total: 20

Date: 2024-01-01
  Pushups: 10
  Squats: 5
  Total: 15

Days recorded: 2
Total reps: 35
Average per day: 17.5";
        assert_eq!(text, expected);
    }
}
