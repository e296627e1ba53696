//! Aduana Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Batch loader for Chilean customs export extracts.
//!
//! # Pipeline
//!
//! 1. [`discovery`] lists the input files matching the naming pattern, sorted
//!    by name
//! 2. [`parser`] decodes each file from its single-byte charset and reads the
//!    five relevant columns by position
//! 3. [`normalize`] repairs dates, product codes and decimal-comma values and
//!    maps region codes to names
//! 4. [`sink`] appends each file's batch to the destination (Postgres via
//!    [`storage::PgExportStore`], or memory for dry runs)
//!
//! File-level failures are logged and skipped; the run continues with the
//! next file. Loads are append-only, so loading a file twice duplicates its
//! rows.
//!
//! # Example
//!
//! ```no_run
//! use aduana_ingest::{config::LoaderConfig, loader::Loader, sink::MemorySink};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let loader = Loader::new(LoaderConfig::default().with_data_dir("./data"))?;
//!     let sink = MemorySink::new();
//!     let summary = loader.run(&sink).await?;
//!     println!("{} rows parsed", summary.rows_loaded());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod parser;
pub mod ping;
pub mod sink;
pub mod storage;

pub use error::{IngestError, Result};
