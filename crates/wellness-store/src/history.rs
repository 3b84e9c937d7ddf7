//! Wellness history questionnaire (`wellness_history.json`).
//!
//! Free-text answers the user fills in once and revisits. Unreadable files load as empty.

use crate::error::StoreError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const HISTORY_FILE: &str = "wellness_history.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellnessHistory {
    pub since_when: String,
    pub main_concerns: String,
    pub desired_changes: String,
    pub tried_before: String,
    pub stressors: String,
    pub emotional_patterns: String,
    pub notes_for_therapist: String,
    pub last_updated: Option<DateTime<Local>>,
}

impl WellnessHistory {
    pub fn is_empty(&self) -> bool {
        [
            &self.since_when,
            &self.main_concerns,
            &self.desired_changes,
            &self.tried_before,
            &self.stressors,
            &self.emotional_patterns,
            &self.notes_for_therapist,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct WellnessHistoryStore {
    path: PathBuf,
}

impl WellnessHistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HISTORY_FILE))
    }

    pub fn load(&self) -> WellnessHistory {
        let Ok(json) = fs::read_to_string(&self.path) else {
            return WellnessHistory::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(
                target: "wellness::store",
                error = %e,
                "wellness history unreadable; starting empty"
            );
            WellnessHistory::default()
        })
    }

    /// Saves and stamps `last_updated`.
    pub fn save(&self, history: &mut WellnessHistory) -> Result<(), StoreError> {
        history.last_updated = Some(Local::now());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(history)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_corrupt_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = WellnessHistoryStore::in_dir(dir.path());
        assert!(store.load().is_empty());
        fs::write(dir.path().join(HISTORY_FILE), "[1, 2").unwrap();
        assert_eq!(store.load(), WellnessHistory::default());
    }

    #[test]
    fn save_stamps_last_updated() {
        let dir = tempfile::tempdir().unwrap();
        let store = WellnessHistoryStore::in_dir(dir.path());
        let mut h = WellnessHistory {
            since_when: "από τον Σεπτέμβριο".to_string(),
            stressors: "εξεταστική".to_string(),
            ..Default::default()
        };
        store.save(&mut h).unwrap();
        assert!(h.last_updated.is_some());
        let loaded = store.load();
        assert_eq!(loaded.stressors, "εξεταστική");
        assert!(loaded.last_updated.is_some());
        assert!(!loaded.is_empty());
    }
}
