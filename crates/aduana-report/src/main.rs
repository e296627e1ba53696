//! Aduana Report - print dashboard aggregates as JSON

use aduana_common::db::{create_pool, DbConfig};
use aduana_common::logging::{init_logging, LogConfig, LogLevel};
use aduana_report::filter::ReportFilter;
use aduana_report::service::{ReportConfig, ReportService};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "aduana-report")]
#[command(author, version, about = "Aggregate loaded customs exports")]
struct Cli {
    /// Year to report on ("Todos" for every year)
    #[arg(short, long, default_value = "Todos")]
    year: String,

    /// Region name to report on ("Todas" for every region)
    #[arg(short, long, default_value = "Todas")]
    region: String,

    /// Number of products in the ranking
    #[arg(long)]
    top_products: Option<i64>,

    /// Number of destinations in the ranking
    #[arg(long)]
    top_destinations: Option<i64>,

    /// Number of detail rows
    #[arg(long)]
    rows: Option<i64>,

    /// Print the available years and regions instead of a dashboard
    #[arg(long)]
    options: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .log_file_prefix("aduana-report")
        .build()
        .merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    let mut config = ReportConfig::from_env()?;
    if let Some(n) = cli.top_products {
        config = config.with_top_products(n);
    }
    if let Some(n) = cli.top_destinations {
        config = config.with_top_destinations(n);
    }
    if let Some(n) = cli.rows {
        config = config.with_row_limit(n);
    }
    config.validate()?;

    let filter = ReportFilter::from_selection(&cli.year, &cli.region)?;

    let db_config = DbConfig::from_env().context("Store configuration")?;
    let pool = create_pool(&db_config)
        .await
        .context("Failed to connect to the store")?;
    let service = ReportService::new(pool.clone(), config);

    let output = if cli.options {
        serde_json::to_string_pretty(&service.filter_options().await?)?
    } else {
        serde_json::to_string_pretty(service.dashboard(&filter).await?.as_ref())?
    };
    pool.close().await;

    println!("{}", output);
    Ok(())
}
