//! Postgres storage for normalized export records
//!
//! Each file's batch is appended inside its own transaction using multi-row
//! `INSERT` statements of `chunk_size` rows. Nothing is deduplicated.

use aduana_common::record::EXPORTS_TABLE;
use aduana_common::ExportRecord;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{debug, info};

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::Result;
use crate::sink::ExportSink;

/// Append-only writer for the `exportaciones` table
#[derive(Debug, Clone)]
pub struct PgExportStore {
    pool: PgPool,
    chunk_size: usize,
}

impl PgExportStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set rows per INSERT statement
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Total rows currently in the destination table
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", EXPORTS_TABLE))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_chunk(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        records: &[ExportRecord],
    ) -> Result<u64> {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            EXPORTS_TABLE,
            ExportRecord::COLUMNS.join(", ")
        ));

        query_builder.push_values(records, |mut b, record| {
            b.push_bind(record.year)
                .push_bind(record.month)
                .push_bind(&record.region_name)
                .push_bind(&record.destination_country)
                .push_bind(&record.product_code)
                .push_bind(&record.fob_value);
        });

        let result = query_builder.build().execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ExportSink for PgExportStore {
    async fn append(&self, source: &str, records: &[ExportRecord]) -> Result<u64> {
        if records.is_empty() {
            debug!(file = %source, "Nothing to append");
            return Ok(0);
        }

        let total_chunks = records.len().div_ceil(self.chunk_size);
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for (chunk_idx, chunk) in records.chunks(self.chunk_size).enumerate() {
            debug!(
                file = %source,
                "Appending chunk {} / {} ({} rows)",
                chunk_idx + 1,
                total_chunks,
                chunk.len()
            );
            written += self.insert_chunk(&mut tx, chunk).await?;
        }

        tx.commit().await?;

        info!(file = %source, rows = written, "Batch appended");
        Ok(written)
    }
}
