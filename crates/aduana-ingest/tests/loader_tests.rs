//! Loader integration tests
//!
//! Runs the full discover -> parse -> append pipeline against fixture
//! directories and an in-memory sink.

use aduana_common::ExportRecord;
use aduana_ingest::config::LoaderConfig;
use aduana_ingest::loader::{FileStatus, Loader};
use aduana_ingest::parser::{
    COUNTRY_COLUMN, DATE_COLUMN, FOB_COLUMN, PRODUCT_COLUMN, REGION_COLUMN,
};
use aduana_ingest::sink::{ExportSink, MemorySink};
use aduana_ingest::{IngestError, Result};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;

const FIELDS_PER_LINE: usize = 80;

fn line(date: &str, region: &str, country: &str, product: &str, fob: &str) -> String {
    let mut fields: Vec<String> = (0..FIELDS_PER_LINE).map(|i| format!("f{}", i)).collect();
    fields[DATE_COLUMN] = date.to_string();
    fields[REGION_COLUMN] = region.to_string();
    fields[COUNTRY_COLUMN] = country.to_string();
    fields[PRODUCT_COLUMN] = product.to_string();
    fields[FOB_COLUMN] = fob.to_string();
    fields.join(";")
}

fn write_file(dir: &Path, name: &str, lines: &[String]) {
    let mut content = lines.join("\r\n");
    content.push_str("\r\n");
    std::fs::write(dir.join(name), content).unwrap();
}

fn loader_for(dir: &TempDir) -> Loader {
    Loader::new(LoaderConfig::new().with_data_dir(dir.path())).unwrap()
}

#[tokio::test]
async fn test_reference_row_end_to_end() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Enero_2024.txt",
        &[line("01012024", "5", "US", "74031100", "1000,50")],
    );

    let sink = MemorySink::new();
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    assert_eq!(summary.rows_loaded(), 1);
    assert!(!summary.has_failures());
    assert_eq!(
        sink.records(),
        vec![ExportRecord {
            year: 2024,
            month: 1,
            region_name: "Valparaíso".to_string(),
            destination_country: "US".to_string(),
            product_code: "74031100".to_string(),
            fob_value: BigDecimal::from_str("1000.50").unwrap(),
        }]
    );
}

#[tokio::test]
async fn test_rerun_appends_duplicates() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Febrero_2024.txt",
        &[
            line("01022024", "2", "CN", "26030000", "250000,00"),
            line("15022024", "13", "US", "0808.1000", "12,5"),
            line("29022024", "10", "JP", "03044120", "9800"),
        ],
    );

    let loader = loader_for(&dir);
    let sink = MemorySink::new();

    let first = loader.run(&sink).await.unwrap();
    assert_eq!(first.rows_loaded(), 3);
    assert_eq!(sink.len(), 3);

    let second = loader.run(&sink).await.unwrap();
    assert_eq!(second.rows_loaded(), 3);
    assert_eq!(sink.len(), 6);

    let records = sink.records();
    assert_eq!(records[..3], records[3..]);
}

#[tokio::test]
async fn test_file_without_valid_dates_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Marzo_2024.txt",
        &[
            line("FECHA", "5", "US", "74031100", "1,0"),
            line("", "5", "US", "74031100", "1,0"),
            line("32132024", "5", "US", "74031100", "1,0"),
        ],
    );

    let sink = MemorySink::new();
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    assert!(sink.is_empty());
    assert_eq!(summary.files.len(), 1);
    match &summary.files[0].status {
        FileStatus::Loaded { rows, dropped, .. } => {
            assert_eq!(*rows, 0);
            assert_eq!(*dropped, 3);
        },
        other => panic!("file should not fail, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_file_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Abril_2024.txt",
        &[line("01042024", "4", "BR", "08061010", "10")],
    );
    // Truncated export: too few columns for the positional layout.
    write_file(
        dir.path(),
        "Exportaciones_Agosto_2024.txt",
        &["01082024;4;BR".to_string()],
    );
    write_file(
        dir.path(),
        "Exportaciones_Mayo_2024.txt",
        &[line("01052024", "4", "BR", "08061010", "20")],
    );

    let sink = MemorySink::new();
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    let names: Vec<&str> = summary.files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Exportaciones_Abril_2024.txt",
            "Exportaciones_Agosto_2024.txt",
            "Exportaciones_Mayo_2024.txt",
        ]
    );

    assert_eq!(summary.files_loaded(), 2);
    assert_eq!(summary.files_failed(), 1);
    assert!(matches!(summary.files[1].status, FileStatus::Failed { .. }));
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_trailing_short_line_keeps_valid_rows() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Noviembre_2024.txt",
        &[
            line("01112024", "2", "CN", "74031100", "10"),
            line("02112024", "2", "CN", "74031100", "20"),
            line("03112024", "2", "CN", "74031100", "30"),
            "TOTAL;3".to_string(),
        ],
    );

    let sink = MemorySink::new();
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    assert_eq!(summary.files_failed(), 0);
    assert_eq!(summary.rows_loaded(), 3);
    assert_eq!(summary.rows_dropped(), 1);
    assert_eq!(sink.len(), 3);
}

#[tokio::test]
async fn test_no_matching_files_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Importaciones_2024.txt",
        &[line("01012024", "5", "US", "74031100", "1")],
    );

    let sink = MemorySink::new();
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    assert!(summary.files.is_empty());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_missing_data_dir_is_an_empty_run() {
    let dir = TempDir::new().unwrap();
    let loader = Loader::new(LoaderConfig::new().with_data_dir(dir.path().join("data"))).unwrap();

    let sink = MemorySink::new();
    let summary = loader.run(&sink).await.unwrap();

    assert!(summary.files.is_empty());
    assert!(!summary.has_failures());
    assert!(sink.is_empty());
}

#[test]
fn test_invalid_pattern_is_fatal() {
    let err = Loader::new(LoaderConfig::new().with_file_pattern("Exportaciones[")).unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_identical_files_share_checksum() {
    let dir = TempDir::new().unwrap();
    let rows = [line("01062024", "1", "KR", "28369130", "55,5")];
    write_file(dir.path(), "Exportaciones_Junio_2024.txt", &rows);
    write_file(dir.path(), "Exportaciones_Junio_2024_copia.txt", &rows);

    let sink = MemorySink::new();
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    let checksums: Vec<&str> = summary
        .files
        .iter()
        .filter_map(|f| match &f.status {
            FileStatus::Loaded { checksum, .. } => Some(checksum.as_str()),
            FileStatus::Failed { .. } => None,
        })
        .collect();

    assert_eq!(checksums.len(), 2);
    assert_eq!(checksums[0], checksums[1]);
    assert_eq!(sink.len(), 2);
}

/// Sink that rejects one named file and stores the rest
struct FlakySink {
    reject: &'static str,
    inner: MemorySink,
}

#[async_trait]
impl ExportSink for FlakySink {
    async fn append(&self, source: &str, records: &[ExportRecord]) -> Result<u64> {
        if source == self.reject {
            return Err(IngestError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "store went away",
            )));
        }
        self.inner.append(source, records).await
    }
}

#[tokio::test]
async fn test_store_failure_is_isolated_to_its_file() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Julio_2024.txt",
        &[line("01072024", "3", "CL", "71081200", "1")],
    );
    write_file(
        dir.path(),
        "Exportaciones_Septiembre_2024.txt",
        &[line("01092024", "3", "CL", "71081200", "2")],
    );

    let sink = FlakySink {
        reject: "Exportaciones_Julio_2024.txt",
        inner: MemorySink::new(),
    };
    let summary = loader_for(&dir).run(&sink).await.unwrap();

    assert_eq!(summary.files_failed(), 1);
    match &summary.files[0].status {
        FileStatus::Failed { error } => assert!(error.contains("store went away")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(sink.inner.len(), 1);
    assert_eq!(sink.inner.records()[0].month, 9);
}

#[tokio::test]
async fn test_summary_serializes_with_status_tag() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "Exportaciones_Octubre_2024.txt",
        &[line("01102024", "12", "AR", "27101991", "3")],
    );

    let summary = loader_for(&dir).run(&MemorySink::new()).await.unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["files"][0]["status"], "loaded");
    assert_eq!(json["files"][0]["rows"], 1);
    assert_eq!(json["files"][0]["file"], "Exportaciones_Octubre_2024.txt");
}
