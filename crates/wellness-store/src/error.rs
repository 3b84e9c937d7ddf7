//! Store errors.

use thiserror::Error;
use wellness_core::SinkError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown exercise id: {0}")]
    UnknownExercise(String),
}

impl StoreError {
    pub(crate) fn into_sink(self, collaborator: &'static str) -> SinkError {
        SinkError::new(collaborator, self.to_string())
    }
}
