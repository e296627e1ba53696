//! Report error types

use thiserror::Error;

pub type ReportResult<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid limit: {0} (must be between 1 and {max})", max = crate::queries::MAX_LIMIT)]
    InvalidLimit(i64),
}
