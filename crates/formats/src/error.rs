//! Error types for format readers and writers

use thiserror::Error;

/// Format reader/writer errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid UTF-8 in field {field} at line {line}")]
    Decode { line: u64, field: usize },

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No columns to parse from file")]
    EmptyInput,
}

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, Error>;
