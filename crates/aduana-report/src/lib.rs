//! Aduana Report Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Read-only aggregation queries over the `exportaciones` table, consumed by
//! an external dashboard.
//!
//! # Overview
//!
//! - [`filter::ReportFilter`]: optional year and region restriction
//! - [`queries`]: one module per aggregate (totals, monthly series, top
//!   products, top destinations, raw rows, filter options)
//! - [`cache::QueryCache`]: time-to-live memoization keyed by filter
//! - [`service::ReportService`]: assembles a cached [`service::Dashboard`]
//!
//! # Example
//!
//! ```no_run
//! use aduana_common::db::{create_pool, DbConfig};
//! use aduana_report::{filter::ReportFilter, service::{ReportConfig, ReportService}};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = create_pool(&DbConfig::from_env()?).await?;
//!     let service = ReportService::new(pool, ReportConfig::default());
//!     let dashboard = service.dashboard(&ReportFilter::new(Some(2024), None)).await?;
//!     println!("{}", dashboard.summary.total_fob);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod queries;
pub mod service;

pub use error::{ReportError, ReportResult};
