use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rust_sqlinspect::files::{collect_sql_files, expand_glob};
use rust_sqlinspect::report::format_statements;
use rust_sqlinspect::{analyze_files, analyze_script, AnalyzeOptions, SqlDialect, SqlTokenizer};

#[derive(Parser)]
#[command(name = "rust-sqlinspect")]
#[command(author, version, about = "Extract tables and columns from SQL statements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report statement type, tables and columns for SQL text or files
    Analyze {
        /// SQL text to analyze
        #[arg(long)]
        sql: Option<String>,

        /// SQL files to analyze
        files: Vec<PathBuf>,

        /// Analyze every .sql file under this directory
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Analyze every .sql file matching this glob pattern
        #[arg(short, long)]
        glob: Option<String>,

        /// Lexer dialect (generic, ansi, mssql, postgres, mysql, sqlite)
        #[arg(long, default_value = "generic")]
        dialect: SqlDialect,

        /// Analyze every statement instead of only the first
        #[arg(short, long)]
        all_statements: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the grouped token tree of a statement
    Tokens {
        /// SQL text to tokenize
        sql: String,

        /// Lexer dialect
        #[arg(long, default_value = "generic")]
        dialect: SqlDialect,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Initialize logging based on CLI options.
fn init_logging(options: &AnalyzeOptions) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Analyze {
            sql,
            files,
            dir,
            glob,
            dialect,
            all_statements,
            verbose,
        } => {
            let options = AnalyzeOptions {
                dialect,
                first_statement_only: !all_statements,
                verbose,
            };
            init_logging(&options);

            let mut paths = files;
            if let Some(dir) = dir {
                paths.extend(collect_sql_files(&dir)?);
            }
            if let Some(pattern) = glob {
                paths.extend(expand_glob(&pattern)?);
            }
            if sql.is_none() && paths.is_empty() {
                bail!("nothing to analyze: pass --sql, files, --dir or --glob");
            }

            let mut blocks = Vec::new();
            if let Some(sql) = sql {
                blocks.push(format_statements(&analyze_script(&sql, &options)?));
            }

            let mut failed = false;
            for file in analyze_files(&paths, &options) {
                match file.result {
                    Ok(statements) => blocks.push(format!(
                        "File: {}\n{}",
                        file.path.display(),
                        format_statements(&statements)
                    )),
                    Err(e) => {
                        failed = true;
                        eprintln!("Error: {}: {e:#}", file.path.display());
                    }
                }
            }
            print!("{}", blocks.join("\n"));

            Ok(if failed {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Tokens { sql, dialect } => {
            init_logging(&AnalyzeOptions {
                dialect,
                ..Default::default()
            });
            let tokenizer = rust_sqlinspect::SqlparserTokenizer::new(dialect);
            for tree in tokenizer.tokenize_script(&sql)? {
                print!("{}", tree.outline());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
