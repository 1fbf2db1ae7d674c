//! Error types for recording I/O

use thiserror::Error;

/// Errors that can occur while reading or writing landmark recordings
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("line {line}: expected {expected} values, found {found}")]
    FieldCount { line: usize, expected: usize, found: usize },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: non-finite coordinate")]
    NonFinite { line: usize },

    #[error("line {line}: not valid UTF-8")]
    InvalidText { line: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RecordingError {
    /// 1-based line number of the offending row, if the error came from one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::FieldCount { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::NonFinite { line }
            | Self::InvalidText { line } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

impl From<RecordingError> for gesturecrate_core::Error {
    fn from(err: RecordingError) -> Self {
        match err {
            RecordingError::Io(e) => gesturecrate_core::Error::Io(e),
            other => gesturecrate_core::Error::Recording(other.to_string()),
        }
    }
}
