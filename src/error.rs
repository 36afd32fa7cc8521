//! Errors raised by the I/O collaborators around the ranking core.
//!
//! Parsing, scoring and ranking never fail: malformed data degrades to
//! defaults. Only reading the dataset, settings or history from disk and
//! writing exports can go wrong.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read dataset at {path}")]
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A settings or history file could not be read.
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write CSV rows to {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Returned when a string names none of the four indicators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown indicator `{0}` (expected housing, life, safety or transport)")]
pub struct UnknownIndicator(pub String);
