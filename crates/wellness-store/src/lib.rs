//! File-backed collaborators for the check-in engine.
//!
//! Everything lives under one storage directory:
//! `user_data.csv`, `user_profile.json`, `support_phrases.csv`, `exercises_log.csv`,
//! `wellness_history.json`.

mod csv;
pub mod error;
pub mod exercise_log;
pub mod history;
pub mod phrases;
pub mod profile;
pub mod report;
pub mod turn_log;

pub use error::StoreError;
pub use exercise_log::{CompletedExercise, ExerciseLog};
pub use history::{WellnessHistory, WellnessHistoryStore};
pub use phrases::{PhraseArchive, SavedPhrase};
pub use profile::ProfileStore;
pub use report::StatsReport;
pub use turn_log::TurnLog;

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// All stores rooted at one directory.
#[derive(Debug, Clone)]
pub struct WellnessStores {
    root: PathBuf,
    pub turn_log: Arc<TurnLog>,
    pub profile: ProfileStore,
    pub phrases: Arc<PhraseArchive>,
    pub exercises: ExerciseLog,
    pub history: WellnessHistoryStore,
}

impl WellnessStores {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            turn_log: Arc::new(TurnLog::in_dir(root)),
            profile: ProfileStore::in_dir(root),
            phrases: Arc::new(PhraseArchive::in_dir(root)),
            exercises: ExerciseLog::in_dir(root),
            history: WellnessHistoryStore::in_dir(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stats over everything in the turn log.
    pub fn stats(&self) -> Result<StatsReport, StoreError> {
        Ok(StatsReport::from_records(&self.turn_log.read_all()?))
    }
}
