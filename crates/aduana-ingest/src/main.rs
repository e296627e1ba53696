//! Aduana Ingest - batch loader for customs export extracts

use aduana_common::db::{create_pool, DbConfig};
use aduana_common::logging::{init_logging, LogConfig, LogLevel};
use aduana_ingest::config::{
    LoaderConfig, DEFAULT_CHUNK_SIZE, DEFAULT_DATA_DIR, DEFAULT_FILE_PATTERN,
};
use aduana_ingest::discovery::display_name;
use aduana_ingest::loader::{LoadSummary, Loader};
use aduana_ingest::sink::{ExportSink, MemorySink};
use aduana_ingest::storage::PgExportStore;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "aduana-ingest")]
#[command(author, version, about = "Load customs export extracts into the exports table")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse every matching extract and append its rows.
    ///
    /// Loads are append-only: running twice over the same files stores
    /// their rows twice.
    Load {
        #[command(flatten)]
        input: InputArgs,

        /// Rows per INSERT statement
        #[arg(long, env = "ADUANA_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Parse and count rows without connecting to the store
        #[arg(long)]
        dry_run: bool,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// List the files a load would process, in order
    Discover {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Directory holding the extracts
    #[arg(short, long, env = "ADUANA_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// File name glob
    #[arg(short, long, env = "ADUANA_FILE_PATTERN", default_value = DEFAULT_FILE_PATTERN)]
    pattern: String,
}

impl InputArgs {
    fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new()
            .with_data_dir(&self.data_dir)
            .with_file_pattern(&self.pattern)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        })
        .log_file_prefix("aduana-ingest")
        .build()
        .merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    match cli.command {
        Command::Load {
            input,
            chunk_size,
            dry_run,
            json,
        } => {
            let config = input.loader_config().with_chunk_size(chunk_size);
            let summary = load(config, dry_run).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        },
        Command::Discover { input } => {
            let loader = Loader::new(input.loader_config())?;
            for path in loader.discover()? {
                println!("{}", display_name(&path));
            }
        },
    }

    Ok(())
}

async fn load(config: LoaderConfig, dry_run: bool) -> Result<LoadSummary> {
    let chunk_size = config.chunk_size;
    let loader = Loader::new(config)?;

    if dry_run {
        info!("Dry run: rows are parsed but not stored");
        let sink = MemorySink::new();
        return run(&loader, &sink).await;
    }

    let db_config = DbConfig::from_env().context("Store configuration")?;
    let pool = create_pool(&db_config)
        .await
        .context("Failed to connect to the store")?;

    let store = PgExportStore::new(pool.clone()).with_chunk_size(chunk_size);
    let summary = run(&loader, &store).await;
    pool.close().await;

    summary
}

async fn run(loader: &Loader, sink: &dyn ExportSink) -> Result<LoadSummary> {
    info!("Starting load");
    let summary = loader.run(sink).await?;
    info!(
        files = summary.files.len(),
        failed = summary.files_failed(),
        rows = summary.rows_loaded(),
        "Load complete"
    );
    Ok(summary)
}
