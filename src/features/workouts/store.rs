//! # Workout Store
//!
//! Flat JSON file holding one record per day. Every read loads the whole file;
//! every write rewrites it through a temporary sibling that is renamed into
//! place.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Write through temp file + rename, per-store lock
//! - 1.0.0: Initial upsert-by-date store

use crate::core::error::{read_json, LoadError};
use crate::features::workouts::record::WorkoutRecord;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct WorkoutStore {
    path: PathBuf,
    /// Serialises load/save against this file
    lock: Mutex<()>,
}

impl WorkoutStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        WorkoutStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load records, reporting why the file could not be read.
    pub fn try_load(&self) -> Result<Vec<WorkoutRecord>, LoadError> {
        let _guard = self.guard();
        read_json(&self.path)
    }

    /// Load records, treating a missing or unreadable file as empty.
    pub fn load(&self) -> Vec<WorkoutRecord> {
        let _guard = self.guard();
        self.load_unlocked()
    }

    fn load_unlocked(&self) -> Vec<WorkoutRecord> {
        match read_json(&self.path) {
            Ok(records) => records,
            Err(e) if e.is_not_found() => {
                debug!("No workout file at {}", self.path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Treating workout history as empty: {e}");
                Vec::new()
            }
        }
    }

    /// Insert `record`, replacing any record with the same date.
    pub fn save(&self, record: WorkoutRecord) -> Result<()> {
        let _guard = self.guard();

        let mut records = self.load_unlocked();
        let before = records.len();
        records.retain(|r| r.date != record.date);
        let replaced = records.len() != before;

        let date = record.date;
        records.push(record);
        self.write_all(&records)?;

        info!(
            "💪 {} workout for {date} ({} records on file)",
            if replaced { "Replaced" } else { "Saved" },
            records.len()
        );
        Ok(())
    }

    fn write_all(&self, records: &[WorkoutRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = temp_path(&self.path);
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn record(y: i32, m: u32, d: u32, exercises: &[(&str, u32)]) -> WorkoutRecord {
        WorkoutRecord::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            exercises
                .iter()
                .map(|(name, reps)| (name.to_string(), *reps))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = WorkoutStore::new(dir.path().join("workouts.json"));

        assert!(store.load().is_empty());
        assert!(store.try_load().unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        fs::write(&path, r#"[{"Date": "2024-01-01T00:00:00", "Exer"#).unwrap();
        let store = WorkoutStore::new(&path);

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(LoadError::Corrupt { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = WorkoutStore::new(dir.path().join("workouts.json"));

        store.save(record(2024, 1, 1, &[("Push-ups", 10)])).unwrap();
        store.save(record(2024, 1, 2, &[("Squats", 15)])).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1], record(2024, 1, 2, &[("Squats", 15)]));
    }

    #[test]
    fn test_save_same_date_replaces_record() {
        let dir = tempdir().unwrap();
        let store = WorkoutStore::new(dir.path().join("workouts.json"));

        store
            .save(record(2024, 1, 1, &[("Push-ups", 10), ("Squats", 5)]))
            .unwrap();
        store.save(record(2024, 1, 1, &[("Abs", 30)])).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![record(2024, 1, 1, &[("Abs", 30)])]);
    }

    #[test]
    fn test_saved_file_is_pretty_json_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("workouts.json");
        let store = WorkoutStore::new(&path);

        store.save(record(2024, 5, 6, &[("Abs", 12)])).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(text.contains("\"Date\": \"2024-05-06T00:00:00\""));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let store = WorkoutStore::new(dir.path().join("nested").join("workouts.json"));

        store.save(record(2024, 1, 1, &[("Abs", 1)])).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_concurrent_saves_keep_every_day() {
        let dir = tempdir().unwrap();
        let store = Arc::new(WorkoutStore::new(dir.path().join("workouts.json")));

        let handles: Vec<_> = (1..=8)
            .map(|day| {
                let store = store.clone();
                std::thread::spawn(move || store.save(record(2024, 2, day, &[("Squats", day)])))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(store.load().len(), 8);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/workouts.json");
        assert_eq!(temp_path(path), PathBuf::from("/data/workouts.json.tmp"));
    }
}
