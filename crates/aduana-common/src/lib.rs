//! Aduana Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, reference data, and plumbing for the Aduana Monitor workspace.
//!
//! # Overview
//!
//! - **Records**: [`ExportRecord`], the normalized customs export row
//! - **Lookups**: region names, product names, and month names
//! - **Database**: pool configuration and a trivial health check
//! - **Logging**: centralized `tracing` setup shared by every binary
//! - **Checksums**: file fingerprints used to spot repeated loads
//!
//! # Example
//!
//! ```no_run
//! use aduana_common::lookup::{product_name, region_name};
//!
//! assert_eq!(region_name("5"), "Valparaíso");
//! assert_eq!(product_name("74031100"), "Cátodos de Cobre refinado");
//! ```

pub mod checksum;
pub mod db;
pub mod logging;
pub mod lookup;
pub mod record;

// Re-export commonly used types
pub use record::ExportRecord;
