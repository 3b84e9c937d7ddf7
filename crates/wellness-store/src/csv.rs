//! Minimal CSV: RFC 4180 quoting, header-once appends, and a reader for quoted fields.

use crate::error::StoreError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Serializes every append in the process so rows from different sessions never interleave.
static APPEND_LOCK: Mutex<()> = Mutex::new(());

pub(crate) fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub(crate) fn format_row(fields: &[&str]) -> String {
    let mut line = fields.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(",");
    line.push('\n');
    line
}

/// Parses whole-file content into records. Quoted fields may span lines.
pub(crate) fn parse(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    records
}

/// An append-only CSV file with a fixed header.
#[derive(Debug, Clone)]
pub(crate) struct CsvFile {
    path: PathBuf,
    header: &'static [&'static str],
}

impl CsvFile {
    pub(crate) fn new(path: PathBuf, header: &'static [&'static str]) -> Self {
        Self { path, header }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row, writing the header first when the file is new or empty.
    pub(crate) fn append(&self, fields: &[&str]) -> Result<(), StoreError> {
        let _guard = APPEND_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut chunk = String::new();
        if f.metadata()?.len() == 0 {
            chunk.push_str(&format_row(self.header));
        }
        chunk.push_str(&format_row(fields));
        f.write_all(chunk.as_bytes())?;
        Ok(())
    }

    /// Data rows (header skipped). Missing file yields no rows.
    pub(crate) fn read_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(parse(&content).into_iter().skip(1).collect())
    }
}
