//! Error types for the check-in engine.

use thiserror::Error;

/// Input rejected before a turn reaches the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckinError {
    #[error("turn text is empty")]
    EmptyText,
}

/// Failure of the external reply generator. Never leaves the orchestrator.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generator not configured")]
    NotConfigured,

    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed generation response: {0}")]
    Malformed(String),

    #[error("generation returned no text")]
    Empty,
}

impl GenerationError {
    /// Short class name, safe to log (no payload).
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::NotConfigured => "not_configured",
            GenerationError::Transport(_) => "transport",
            GenerationError::Api { .. } => "api",
            GenerationError::Malformed(_) => "malformed",
            GenerationError::Empty => "empty",
        }
    }
}

/// Failure of a write-only collaborator (turn log, phrase archive).
#[derive(Error, Debug)]
#[error("{collaborator}: {message}")]
pub struct SinkError {
    pub collaborator: &'static str,
    pub message: String,
}

impl SinkError {
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}
