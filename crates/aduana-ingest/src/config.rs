//! Loader configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{IngestError, Result};

/// Default directory holding the monthly extracts.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default glob for extract file names (e.g. `Exportaciones_Enero_2024.txt`).
pub const DEFAULT_FILE_PATTERN: &str = "Exportaciones*202*.txt";

/// Default number of rows per multi-row INSERT statement.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Postgres accepts at most 65535 bind parameters per statement and each row
/// binds one per column.
pub const MAX_CHUNK_SIZE: usize = 65535 / 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Directory scanned for extracts (not recursive)
    pub data_dir: PathBuf,
    /// Glob matched against file names
    pub file_pattern: String,
    /// Rows per INSERT statement
    pub chunk_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_file_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(IngestError::config(format!(
                "chunk size must be between 1 and {}, got {}",
                MAX_CHUNK_SIZE, self.chunk_size
            )));
        }

        if self.file_pattern.trim().is_empty() {
            return Err(IngestError::config("file pattern cannot be empty"));
        }

        globset::Glob::new(&self.file_pattern)?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LoaderConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.file_pattern, "Exportaciones*202*.txt");
        assert_eq!(config.chunk_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_chunk_size_bounds() {
        assert!(LoaderConfig::new().with_chunk_size(0).validate().is_err());
        assert!(LoaderConfig::new()
            .with_chunk_size(MAX_CHUNK_SIZE)
            .validate()
            .is_ok());
        assert!(LoaderConfig::new()
            .with_chunk_size(MAX_CHUNK_SIZE + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let result = LoaderConfig::new().with_file_pattern("Exportaciones[").validate();
        assert!(matches!(result, Err(IngestError::Pattern(_))));

        let result = LoaderConfig::new().with_file_pattern("  ").validate();
        assert!(matches!(result, Err(IngestError::Config(_))));
    }
}
