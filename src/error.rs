//! Error types for the token analytics reporter

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Every way a report run can fail. All of them are fatal to the run.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The input CSV does not exist yet
    #[error("CSV file not found at {}", .path.display())]
    DatasetNotFound { path: PathBuf },

    /// The input CSV exists but could not be opened
    #[error("Error opening CSV {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A header or value failed validation
    #[error("Error loading CSV{}: {reason}", .row.map(|r| format!(" (row {r})")).unwrap_or_default())]
    Parse { row: Option<usize>, reason: String },

    /// A data row could not be read or deserialized
    #[error("Error loading CSV (row {row}): {source}")]
    Record {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// Underlying CSV reader failure outside a data row
    #[error("Error loading CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The summary file could not be written
    #[error("Failed to write summary to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the printed report failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AnalyticsError {
    pub(crate) fn parse(row: Option<usize>, reason: impl Into<String>) -> Self {
        AnalyticsError::Parse {
            row,
            reason: reason.into(),
        }
    }
}
