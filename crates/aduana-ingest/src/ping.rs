//! Store connectivity probe
//!
//! Issues `SELECT 1` against the store named by `DATABASE_URL`. A missing URL
//! is reported before any connection attempt.

use aduana_common::db::{create_pool, health_check, DbConfig, DbError};
use thiserror::Error;
use tracing::info;

/// Process exit status for a configuration problem
pub const EXIT_CONFIG: u8 = 2;

/// Process exit status for an unreachable or failing store
pub const EXIT_UNREACHABLE: u8 = 1;

#[derive(Error, Debug)]
pub enum PingError {
    #[error("{0}")]
    Config(DbError),

    #[error("Could not connect to the store: {0}")]
    Connect(DbError),

    #[error("Probe query failed: {0}")]
    Query(DbError),
}

impl PingError {
    /// Non-zero exit status for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            PingError::Config(_) => EXIT_CONFIG,
            PingError::Connect(_) | PingError::Query(_) => EXIT_UNREACHABLE,
        }
    }
}

/// Probe the store configured in the environment
pub async fn ping_from_env() -> Result<(), PingError> {
    let config = DbConfig::from_env().map_err(PingError::Config)?;
    ping(&config.single_connection()).await
}

/// Probe the store described by `config`
pub async fn ping(config: &DbConfig) -> Result<(), PingError> {
    let pool = create_pool(config).await.map_err(PingError::Connect)?;
    let result = health_check(&pool).await.map_err(PingError::Query);
    pool.close().await;
    result?;

    info!("Store reachable");
    Ok(())
}
