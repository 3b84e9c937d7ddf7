//! Durable turn log (`user_data.csv`).

use crate::csv::CsvFile;
use crate::error::StoreError;
use chrono::{Local, NaiveDateTime, TimeZone};
use std::path::{Path, PathBuf};
use tracing::debug;
use wellness_core::{SinkError, TurnRecord, TurnSink};

pub const TURN_LOG_FILE: &str = "user_data.csv";
const HEADER: &[&str] = &["timestamp", "mood", "sleep", "water", "message"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct TurnLog {
    file: CsvFile,
}

impl TurnLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: CsvFile::new(path, HEADER),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TURN_LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn append_record(&self, record: &TurnRecord) -> Result<(), StoreError> {
        let timestamp = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
        self.file.append(&[
            &timestamp,
            &record.mood,
            &record.sleep,
            &record.water,
            &record.text,
        ])
    }

    /// All readable rows, oldest first. Rows with a bad timestamp or short arity are skipped.
    pub fn read_all(&self) -> Result<Vec<TurnRecord>, StoreError> {
        let rows = self.file.read_rows()?;
        let total = rows.len();
        let records: Vec<TurnRecord> = rows.into_iter().filter_map(parse_row).collect();
        if records.len() < total {
            debug!(
                target: "wellness::store",
                skipped = total - records.len(),
                "unreadable turn log rows skipped"
            );
        }
        Ok(records)
    }
}

fn parse_row(mut row: Vec<String>) -> Option<TurnRecord> {
    if row.len() < HEADER.len() {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(&row[0], TIMESTAMP_FORMAT).ok()?;
    let timestamp = Local.from_local_datetime(&naive).earliest()?;
    row.truncate(HEADER.len());
    let text = row.swap_remove(4);
    Some(TurnRecord {
        timestamp,
        mood: std::mem::take(&mut row[1]),
        sleep: std::mem::take(&mut row[2]),
        water: std::mem::take(&mut row[3]),
        text,
    })
}

impl TurnSink for TurnLog {
    fn append(&self, record: &TurnRecord) -> Result<(), SinkError> {
        self.append_record(record).map_err(|e| e.into_sink("turn_log"))
    }
}
