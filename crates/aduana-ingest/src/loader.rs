//! Batch loader
//!
//! Discovers the extracts, then for each file in name order: read, parse,
//! normalize, and append. A failing file is logged and skipped; the run goes
//! on. A missing data directory or an empty match is logged and yields an
//! empty run; only configuration problems such as a bad pattern abort it.

use aduana_common::checksum::bytes_sha256;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span, warn, Instrument};

use crate::config::LoaderConfig;
use crate::discovery::{discover_files, display_name};
use crate::error::Result;
use crate::parser::ExtractParser;
use crate::sink::ExportSink;

/// Outcome of one file in a run
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Loaded {
        /// Rows appended to the destination
        rows: u64,
        /// Rows dropped as malformed
        dropped: usize,
        /// SHA-256 of the file contents
        checksum: String,
    },
    Failed {
        error: String,
    },
}

/// Result of a loader run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadSummary {
    pub files: Vec<FileOutcome>,
}

impl LoadSummary {
    /// Total rows appended across all files
    pub fn rows_loaded(&self) -> u64 {
        self.files
            .iter()
            .map(|f| match f.status {
                FileStatus::Loaded { rows, .. } => rows,
                FileStatus::Failed { .. } => 0,
            })
            .sum()
    }

    /// Total malformed rows dropped across all files
    pub fn rows_dropped(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.status {
                FileStatus::Loaded { dropped, .. } => dropped,
                FileStatus::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn files_loaded(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Loaded { .. }))
            .count()
    }

    pub fn files_failed(&self) -> usize {
        self.files.len() - self.files_loaded()
    }

    pub fn has_failures(&self) -> bool {
        self.files_failed() > 0
    }
}

/// Stats for one successfully loaded file
#[derive(Debug, Clone)]
struct FileLoad {
    rows: u64,
    dropped: usize,
    checksum: String,
}

/// Extract loader
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    parser: ExtractParser,
}

impl Loader {
    /// Create a loader, validating the configuration
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parser: ExtractParser::new(),
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Files the next run would process, in processing order
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover_files(&self.config.data_dir, &self.config.file_pattern)
    }

    /// Load every matching file into `sink`.
    ///
    /// Returns `Err` only for configuration problems detected before any file
    /// is read. Per-file failures are recorded in the summary.
    pub async fn run(&self, sink: &dyn ExportSink) -> Result<LoadSummary> {
        let files = self.discover()?;

        info!(
            dir = %self.config.data_dir.display(),
            pattern = %self.config.file_pattern,
            files = files.len(),
            "Discovered input files"
        );

        if files.is_empty() {
            warn!(
                dir = %self.config.data_dir.display(),
                pattern = %self.config.file_pattern,
                "No input files matched the naming pattern"
            );
            return Ok(LoadSummary::default());
        }

        self.load_files(&files, sink).await
    }

    /// Load an explicit list of files in the given order
    pub async fn load_files(&self, files: &[PathBuf], sink: &dyn ExportSink) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        let mut seen_checksums: HashMap<String, String> = HashMap::new();

        for path in files {
            let file = display_name(path);
            let span = info_span!("load_file", file = %file);

            let status = match self.load_file(path, &file, sink).instrument(span).await {
                Ok(load) => {
                    info!(
                        file = %file,
                        rows = load.rows,
                        dropped = load.dropped,
                        "File loaded"
                    );

                    if let Some(first) = seen_checksums.get(&load.checksum) {
                        warn!(
                            file = %file,
                            same_as = %first,
                            "File contents identical to an earlier file in this run; rows were appended again"
                        );
                    } else {
                        seen_checksums.insert(load.checksum.clone(), file.clone());
                    }

                    FileStatus::Loaded {
                        rows: load.rows,
                        dropped: load.dropped,
                        checksum: load.checksum,
                    }
                },
                Err(e) => {
                    error!(file = %file, error = %e, "Failed to load file");
                    FileStatus::Failed {
                        error: e.to_string(),
                    }
                },
            };

            summary.files.push(FileOutcome {
                file,
                path: path.clone(),
                status,
            });
        }

        info!(
            files_loaded = summary.files_loaded(),
            files_failed = summary.files_failed(),
            rows = summary.rows_loaded(),
            dropped = summary.rows_dropped(),
            "Load finished"
        );

        Ok(summary)
    }

    async fn load_file(&self, path: &Path, file: &str, sink: &dyn ExportSink) -> Result<FileLoad> {
        let bytes = tokio::fs::read(path).await?;
        let checksum = bytes_sha256(&bytes);

        let parsed = self.parser.parse_bytes(&bytes)?;
        let rows = sink.append(file, &parsed.records).await?;

        Ok(FileLoad {
            rows,
            dropped: parsed.rows_dropped,
            checksum,
        })
    }
}
