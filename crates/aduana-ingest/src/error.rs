//! Ingestion error types
//!
//! Every variant here is a file-level failure except [`IngestError::Config`]
//! and [`IngestError::Pattern`], which stop the run before any file is read.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is not valid {encoding}")]
    Decode { encoding: &'static str },

    #[error("Malformed delimited record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema mismatch at line {line}: expected at least {expected} fields, found {found}")]
    Schema {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IngestError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error should abort the whole run rather than one file
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Pattern(_))
    }
}
