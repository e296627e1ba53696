//! Destination seam for normalized records

use aduana_common::ExportRecord;
use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::Result;

/// Append-only destination for a file's normalized records.
///
/// Implementations must not deduplicate: appending the same batch twice
/// stores it twice.
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Append one file's batch, returning the number of rows written
    async fn append(&self, source: &str, records: &[ExportRecord]) -> Result<u64>;
}

/// In-memory sink used for dry runs and tests
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: Mutex<Vec<ExportRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows appended so far
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every appended row, in append order
    pub fn records(&self) -> Vec<ExportRecord> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ExportSink for MemorySink {
    async fn append(&self, _source: &str, records: &[ExportRecord]) -> Result<u64> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| crate::IngestError::config("memory sink lock poisoned"))?;
        rows.extend_from_slice(records);
        Ok(records.len() as u64)
    }
}
