//! Error types for rust-sqlinspect

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the tokenizer and the file-input layer.
///
/// Analysis itself never fails: an unrecognized statement is reported as
/// `UNKNOWN` with empty sets.
#[derive(Error, Debug)]
pub enum SqlInspectError {
    #[error("Failed to tokenize SQL: {message}")]
    TokenizeError { message: String },

    #[error("Unsupported SQL dialect: {name} (expected one of: {})", crate::parser::SqlDialect::NAMES.join(", "))]
    UnsupportedDialect { name: String },

    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL file is not valid UTF-8 or Windows-1252: {path}")]
    SqlFileEncodingError { path: PathBuf },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to walk directory: {path}")]
    DirectoryWalkError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
