//! Completed exercises (`exercises_log.csv`).

use crate::csv::CsvFile;
use crate::error::StoreError;
use chrono::Local;
use std::path::{Path, PathBuf};
use wellness_core::Exercise;

pub const EXERCISE_LOG_FILE: &str = "exercises_log.csv";
const HEADER: &[&str] = &["timestamp", "exercise_id", "label"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedExercise {
    pub timestamp: String,
    pub exercise_id: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct ExerciseLog {
    file: CsvFile,
}

impl ExerciseLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: CsvFile::new(path, HEADER),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(EXERCISE_LOG_FILE))
    }

    pub fn record(&self, exercise: Exercise) -> Result<(), StoreError> {
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        self.file.append(&[&timestamp, exercise.id(), exercise.title()])
    }

    /// Records by catalog id, as typed by the user.
    pub fn record_id(&self, id: &str) -> Result<Exercise, StoreError> {
        let exercise =
            Exercise::from_id(id).ok_or_else(|| StoreError::UnknownExercise(id.to_string()))?;
        self.record(exercise)?;
        Ok(exercise)
    }

    pub fn list(&self) -> Result<Vec<CompletedExercise>, StoreError> {
        Ok(self
            .file
            .read_rows()?
            .into_iter()
            .filter(|r| r.len() >= HEADER.len())
            .map(|r| {
                let mut it = r.into_iter();
                CompletedExercise {
                    timestamp: it.next().unwrap_or_default(),
                    exercise_id: it.next().unwrap_or_default(),
                    label: it.next().unwrap_or_default(),
                }
            })
            .collect())
    }

    /// Completion count per label, most frequent first (ties by label).
    pub fn counts(&self) -> Result<Vec<(String, usize)>, StoreError> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for done in self.list()? {
            match counts.iter_mut().find(|(label, _)| *label == done.label) {
                Some((_, n)) => *n += 1,
                None => counts.push((done.label, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_counts_completions() {
        let dir = tempfile::tempdir().unwrap();
        let log = ExerciseLog::in_dir(dir.path());
        log.record(Exercise::Breathing).unwrap();
        log.record_id("thought_dump").unwrap();
        log.record_id(" breathing_4_2_6 ").unwrap();
        assert!(matches!(log.record_id("yoga"), Err(StoreError::UnknownExercise(_))));

        let list = log.list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].exercise_id, "thought_dump");

        let counts = log.counts().unwrap();
        assert_eq!(counts[0], (Exercise::Breathing.title().to_string(), 2));
        assert_eq!(counts[1].1, 1);
    }
}
