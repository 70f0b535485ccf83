//! SQL file discovery and decoding.

use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::SqlInspectError;

/// Read a SQL file as text.
///
/// UTF-8 is tried first, then Windows-1252 (common for scripts saved on
/// Windows). A leading byte-order mark is stripped.
pub fn read_sql_file(path: &Path) -> Result<String, SqlInspectError> {
    let bytes = std::fs::read(path).map_err(|e| SqlInspectError::SqlFileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(err.as_bytes());
            if had_errors {
                return Err(SqlInspectError::SqlFileEncodingError {
                    path: path.to_path_buf(),
                });
            }
            decoded.into_owned()
        }
    };

    Ok(match text.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}

/// Recursively collect `*.sql` files under `dir`, sorted by path.
pub fn collect_sql_files(dir: &Path) -> Result<Vec<PathBuf>, SqlInspectError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself must be readable; unreadable children are skipped.
            Err(e) if e.depth() == 0 => {
                return Err(SqlInspectError::DirectoryWalkError {
                    path: dir.to_path_buf(),
                    source: e,
                })
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_sql_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Expand a glob pattern into the matching `*.sql` files, sorted by path.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>, SqlInspectError> {
    let paths = glob::glob(pattern).map_err(|e| SqlInspectError::InvalidGlobPattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(path = %e.path().display(), "skipping unreadable glob match");
                None
            }
        })
        .filter(|path| path.is_file() && is_sql_file(path))
        .collect();
    files.sort();
    Ok(files)
}
