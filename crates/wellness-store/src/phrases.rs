//! Saved support phrases (`support_phrases.csv`).

use crate::csv::CsvFile;
use crate::error::StoreError;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;
use wellness_core::{PhraseSink, PhraseSource, SinkError};

pub const PHRASES_FILE: &str = "support_phrases.csv";
const HEADER: &[&str] = &["timestamp", "source", "text"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPhrase {
    pub timestamp: String,
    pub source: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PhraseArchive {
    file: CsvFile,
}

impl PhraseArchive {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: CsvFile::new(path, HEADER),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(PHRASES_FILE))
    }

    /// Stores the phrase on one line.
    pub fn add(&self, text: &str, source: PhraseSource) -> Result<(), StoreError> {
        let flat = text.replace(['\r', '\n'], " ");
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        self.file.append(&[&timestamp, source.as_str(), flat.trim()])?;
        info!(target: "wellness::store", source = source.as_str(), "support phrase saved");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<SavedPhrase>, StoreError> {
        Ok(self
            .file
            .read_rows()?
            .into_iter()
            .filter(|r| r.len() >= HEADER.len())
            .map(|mut r| {
                r.truncate(HEADER.len());
                SavedPhrase {
                    text: r.swap_remove(2),
                    source: r.swap_remove(1),
                    timestamp: r.swap_remove(0),
                }
            })
            .collect())
    }
}

impl PhraseSink for PhraseArchive {
    fn save(&self, text: &str, source: PhraseSource) -> Result<(), SinkError> {
        self.add(text, source).map_err(|e| e.into_sink("support_phrases"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_are_flattened_and_tagged() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PhraseArchive::in_dir(dir.path());
        archive.add("Βήμα 1\nΒήμα 2", PhraseSource::Plan).unwrap();
        archive.add("Είσαι αρκετός/ή.", PhraseSource::Bot).unwrap();

        let list = archive.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "Βήμα 1 Βήμα 2");
        assert_eq!(list[0].source, "plan");
        assert_eq!(list[1].source, "bot");
    }
}
