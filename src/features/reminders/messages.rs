//! # Message Pool
//!
//! Reminder texts loaded once at startup from the JSON catalog and grouped by
//! category. Loading is best-effort: any failure yields an empty pool.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::core::error::{read_json, LoadError};
use log::{debug, info, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One reminder text from the catalog. Missing members read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderMessage {
    /// Notification body
    #[serde(default)]
    pub message: String,
    /// Subtype label shown in the attribution line
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Deserialize)]
struct MessageCatalog {
    messages: Vec<ReminderMessage>,
}

/// Messages keyed by category, file order preserved within a category.
#[derive(Debug, Clone, Default)]
pub struct MessagePool {
    by_category: HashMap<String, Vec<ReminderMessage>>,
}

impl MessagePool {
    pub fn from_messages(messages: Vec<ReminderMessage>) -> Self {
        let mut by_category: HashMap<String, Vec<ReminderMessage>> = HashMap::new();
        for message in messages {
            // Unreachable by any category or nothing to show
            if message.category.is_empty() || message.message.is_empty() {
                debug!("Skipping incomplete catalog entry: {message:?}");
                continue;
            }
            by_category
                .entry(message.category.clone())
                .or_default()
                .push(message);
        }
        MessagePool { by_category }
    }

    pub fn try_load(path: &Path) -> Result<Self, LoadError> {
        let catalog: MessageCatalog = read_json(path)?;
        Ok(Self::from_messages(catalog.messages))
    }

    /// Load the catalog, falling back to an empty pool on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(pool) => {
                info!(
                    "Loaded {} reminder messages in {} categories from {}",
                    pool.len(),
                    pool.by_category.len(),
                    path.display()
                );
                pool
            }
            Err(e) if e.is_not_found() => {
                debug!("No message catalog at {}", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring message catalog: {e}");
                Self::default()
            }
        }
    }

    pub fn messages_for(&self, category: &str) -> &[ReminderMessage] {
        self.by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Uniformly random message for `category`, `None` when it has none.
    pub fn pick<R: Rng + ?Sized>(&self, category: &str, rng: &mut R) -> Option<&ReminderMessage> {
        self.messages_for(category).choose(rng)
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn msg(text: &str, kind: &str, category: &str) -> ReminderMessage {
        ReminderMessage {
            message: text.to_string(),
            kind: kind.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_groups_by_category_in_order() {
        let pool = MessagePool::from_messages(vec![
            msg("Drink a glass", "Reminder", "Hydration"),
            msg("Ten pushups", "Challenge", "Workout"),
            msg("Refill your bottle", "Tip", "Hydration"),
        ]);

        let hydration: Vec<&str> = pool
            .messages_for("Hydration")
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert_eq!(hydration, vec!["Drink a glass", "Refill your bottle"]);
        assert_eq!(pool.messages_for("Workout").len(), 1);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_pick_unknown_category_is_none() {
        let pool = MessagePool::from_messages(vec![msg("Sip", "Reminder", "Hydration")]);
        let mut rng = rand::rng();
        assert!(pool.pick("Sleep", &mut rng).is_none());
        assert_eq!(pool.pick("Hydration", &mut rng).unwrap().message, "Sip");
    }

    #[test]
    fn test_load_catalog_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(
            &path,
            r#"{"messages": [
                {"message": "Time for water", "type": "Reminder", "category": "Hydration"},
                {"message": "Lights out", "type": "Bedtime", "category": "Sleep"}
            ]}"#,
        )
        .unwrap();

        let pool = MessagePool::load(&path);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.messages_for("Sleep")[0].kind, "Bedtime");
    }

    #[test]
    fn test_entries_with_missing_members_do_not_empty_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(
            &path,
            r#"{"messages": [
                {"message": "Time for water", "category": "Hydration"},
                {"message": "Orphan text", "type": "Tip"},
                {"message": "Say privet", "type": "Phrase", "category": "Russian"}
            ]}"#,
        )
        .unwrap();

        let pool = MessagePool::try_load(&path).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.messages_for("Hydration")[0].kind, "");
        assert_eq!(pool.messages_for("Russian")[0].message, "Say privet");
    }

    #[test]
    fn test_bundled_catalog_covers_default_categories() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("messages.json");
        let pool = MessagePool::try_load(&path).unwrap();
        for category in ["Hydration", "Workout", "Russian", "CTF", "Sleep"] {
            assert!(!pool.messages_for(category).is_empty(), "no messages for {category}");
        }
    }

    #[test]
    fn test_missing_or_malformed_catalog_is_empty() {
        let dir = tempdir().unwrap();
        assert!(MessagePool::load(&dir.path().join("absent.json")).is_empty());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(MessagePool::load(&bad).is_empty());

        let wrong_key = dir.path().join("wrong.json");
        std::fs::write(&wrong_key, r#"{"reminders": []}"#).unwrap();
        assert!(MessagePool::load(&wrong_key).is_empty());
    }
}
