//! rust-sqlinspect: lightweight extraction of tables and columns from SQL
//!
//! This library classifies a DML statement (SELECT, INSERT, UPDATE, DELETE)
//! and reports the tables and columns it references, working from a grouped
//! token tree rather than a full parse.

pub mod analyzer;
pub mod error;
pub mod files;
pub mod model;
pub mod parser;
pub mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, warn};

pub use analyzer::analyze_tree;
pub use error::SqlInspectError;
pub use model::{Analysis, StatementAnalysis, StatementKind, TokenTree};
pub use parser::{SqlDialect, SqlTokenizer, SqlparserTokenizer};

/// Options for analyzing SQL text or files
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Dialect used to lex the input
    pub dialect: SqlDialect,
    /// Only analyze the first statement of each input
    pub first_statement_only: bool,
    /// Enable verbose output
    pub verbose: bool,
}

impl AnalyzeOptions {
    fn tokenizer(&self) -> SqlparserTokenizer {
        SqlparserTokenizer::new(self.dialect)
    }

    /// Default log filter directive, used when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Analyze the first statement of `sql` with the default tokenizer.
pub fn analyze_sql(sql: &str) -> Result<Analysis, SqlInspectError> {
    analyze_sql_with(sql, &SqlparserTokenizer::default())
}

/// Analyze the first statement of `sql` with a custom tokenizer.
pub fn analyze_sql_with<T>(sql: &str, tokenizer: &T) -> Result<Analysis, SqlInspectError>
where
    T: SqlTokenizer + ?Sized,
{
    let tree = tokenizer.tokenize(sql)?;
    Ok(analyze_tree(&tree))
}

/// Analyze every statement of a script.
pub fn analyze_script(
    sql: &str,
    options: &AnalyzeOptions,
) -> Result<Vec<StatementAnalysis>, SqlInspectError> {
    let mut trees = options.tokenizer().tokenize_script(sql)?;
    if options.first_statement_only {
        trees.truncate(1);
    }

    Ok(trees
        .iter()
        .map(|tree| {
            let analysis = analyze_tree(tree);
            debug!(
                kind = %analysis.kind,
                tables = analysis.tables.len(),
                columns = analysis.columns.len(),
                "analyzed statement"
            );
            StatementAnalysis {
                sql: tree.to_sql().trim().to_string(),
                analysis,
            }
        })
        .collect())
}

/// Result of analyzing one file.
#[derive(Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub result: Result<Vec<StatementAnalysis>>,
}

impl FileAnalysis {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// Analyze a set of SQL files, in parallel for larger sets.
///
/// Results keep the order of `files`. A file that cannot be read or
/// tokenized records its error and does not stop the batch.
pub fn analyze_files(files: &[PathBuf], options: &AnalyzeOptions) -> Vec<FileAnalysis> {
    debug!(count = files.len(), "analyzing SQL files");

    if files.len() >= PARALLEL_THRESHOLD {
        files
            .par_iter()
            .map(|file| analyze_file(file, options))
            .collect()
    } else {
        files
            .iter()
            .map(|file| analyze_file(file, options))
            .collect()
    }
}

/// Analyze a single SQL file
pub fn analyze_file(path: &Path, options: &AnalyzeOptions) -> FileAnalysis {
    let result = files::read_sql_file(path)
        .and_then(|content| analyze_script(&content, options))
        .map_err(anyhow::Error::from);

    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "failed to analyze file");
    }

    FileAnalysis {
        path: path.to_path_buf(),
        result,
    }
}
