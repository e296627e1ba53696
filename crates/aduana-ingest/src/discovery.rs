//! Input file discovery

use globset::Glob;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

/// List regular files directly inside `dir` whose name matches `pattern`,
/// sorted by file name.
///
/// A missing data directory is treated like an empty one: it is logged at
/// `warn` and yields no files. Only an invalid pattern is an error.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Glob::new(pattern)?.compile_matcher();

    if !dir.is_dir() {
        warn!(
            dir = %dir.display(),
            "Data directory does not exist or is not a directory; check that it is present"
        );
        return Ok(Vec::new());
    }
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        if matcher.is_match(Path::new(&name)) {
            files.push(entry.path());
        } else {
            debug!(file = %name.to_string_lossy(), "Skipping file not matching pattern");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// File name used in logs and summaries
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FILE_PATTERN;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_matches_and_sorts() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Exportaciones_Marzo_2024.txt");
        touch(dir.path(), "Exportaciones_Enero_2023.txt");
        touch(dir.path(), "Exportaciones_Abril_2019.txt");
        touch(dir.path(), "Importaciones_Enero_2024.txt");
        touch(dir.path(), "Exportaciones_Enero_2024.csv");
        std::fs::create_dir(dir.path().join("Exportaciones_2024.txt")).unwrap();

        let files = discover_files(dir.path(), DEFAULT_FILE_PATTERN).unwrap();
        let names: Vec<String> = files.iter().map(|p| display_name(p)).collect();

        assert_eq!(
            names,
            vec!["Exportaciones_Enero_2023.txt", "Exportaciones_Marzo_2024.txt"]
        );
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = discover_files(dir.path(), DEFAULT_FILE_PATTERN).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_directory_yields_no_files() {
        let dir = TempDir::new().unwrap();
        let files = discover_files(&dir.path().join("data"), DEFAULT_FILE_PATTERN).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = discover_files(dir.path(), "Exportaciones[");
        assert!(matches!(result, Err(crate::error::IngestError::Pattern(_))));
    }
}
