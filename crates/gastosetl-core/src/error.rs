//! Error types for the extraction pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building the dataset.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read archive {}: {reason}", path.display())]
    Archive { path: PathBuf, reason: String },

    #[error("archive {} contains no entries", path.display())]
    EmptyArchive { path: PathBuf },

    #[error("header is missing projected columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("cannot split rows: {reason}")]
    Parse { reason: String },

    #[error("value '{value}' in column '{column}' was never fitted by its encoder")]
    EncoderMiss { column: String, value: String },

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Returns `true` if the error indicates a fit/transform mismatch,
    /// which is an internal bug rather than a bad input.
    pub fn is_consistency_bug(&self) -> bool {
        matches!(self, Self::EncoderMiss { .. })
    }
}
