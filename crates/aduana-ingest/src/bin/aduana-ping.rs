//! Aduana Ping - store connectivity probe
//!
//! Exit status: 0 reachable, 1 unreachable, 2 missing configuration.

use aduana_common::logging::{init_logging, LogConfig, LogLevel};
use aduana_ingest::ping::ping_from_env;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "aduana-ping")]
#[command(author, version, about = "Check that the exports store is reachable")]
struct Cli {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        })
        .log_file_prefix("aduana-ping")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);
    // The probe still reports through its exit status without logging.
    let _log_guard = init_logging(&log_config).ok();

    match ping_from_env().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Connectivity check failed");
            ExitCode::from(e.exit_code())
        },
    }
}
