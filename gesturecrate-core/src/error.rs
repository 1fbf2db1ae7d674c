//! Error types for gesturecrate

use thiserror::Error;

/// Main error type for gesturecrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid observation: expected {expected} landmarks, found {found}")]
    InvalidObservation { expected: usize, found: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Landmark source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Recording error: {0}")]
    Recording(String),
}

/// Result type alias for gesturecrate operations
pub type Result<T> = std::result::Result<T, Error>;
