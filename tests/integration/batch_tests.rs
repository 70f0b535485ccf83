//! Batch analysis over files on disk

use std::collections::BTreeSet;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_sqlinspect::files::{collect_sql_files, expand_glob};
use rust_sqlinspect::{analyze_files, AnalyzeOptions, SqlDialect, StatementKind};

use crate::common::TestContext;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Single files
// ============================================================================

#[test]
fn test_script_file_reports_every_statement() {
    let ctx = TestContext::new();
    let path = ctx.write(
        "orders.sql",
        "-- nightly cleanup\n\
         DELETE FROM orders WHERE created < '2020-01-01';\n\
         UPDATE orders SET status = 'archived' WHERE id = 7;\n\
         SELECT id, total FROM orders;\n",
    );

    let results = ctx.analyze(&[path.clone()]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].path, path);

    let statements = results[0].result.as_ref().unwrap();
    let kinds: Vec<StatementKind> = statements.iter().map(|s| s.analysis.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Delete,
            StatementKind::Update,
            StatementKind::Select
        ]
    );
    assert_eq!(
        statements[0].sql,
        "-- nightly cleanup\nDELETE FROM orders WHERE created < '2020-01-01';"
    );
    assert_eq!(statements[1].analysis.columns, set(&["status"]));
    assert_eq!(statements[2].analysis.columns, set(&["id", "total"]));
}

#[test]
fn test_first_statement_only() {
    let ctx = TestContext::new();
    let path = ctx.write("two.sql", "SELECT a FROM t; SELECT b FROM u;");
    let options = AnalyzeOptions {
        first_statement_only: true,
        ..Default::default()
    };

    let results = analyze_files(&[path], &options);
    let statements = results[0].result.as_ref().unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].analysis.tables, set(&["t"]));
}

#[test]
fn test_windows_1252_file() {
    let ctx = TestContext::new();
    let path = ctx.write("legacy.sql", b"SELECT nom FROM caf\xE9s".as_slice());

    let results = ctx.analyze(&[path]);
    let statements = results[0].result.as_ref().unwrap();
    assert_eq!(statements[0].analysis.tables, set(&["cafés"]));
}

#[test]
fn test_mssql_dialect_file() {
    let ctx = TestContext::new();
    let path = ctx.write(
        "report.sql",
        "SELECT [o].[Total], [c].[Name] FROM [dbo].[Orders] [o] JOIN [dbo].[Customers] [c] ON [o].[CustomerId] = [c].[Id]",
    );
    let options = AnalyzeOptions {
        dialect: SqlDialect::MsSql,
        ..Default::default()
    };

    let results = analyze_files(&[path], &options);
    let analysis = &results[0].result.as_ref().unwrap()[0].analysis;
    assert_eq!(analysis.tables, set(&["Customers", "Orders"]));
    assert_eq!(analysis.columns, set(&["c.Name", "o.Total"]));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_failed_file_does_not_stop_batch() {
    let ctx = TestContext::new();
    let good = ctx.write("good.sql", "SELECT a FROM t");
    let bad = ctx.write("bad.sql", "SELECT 'unterminated FROM t");
    let missing = ctx.root.join("missing.sql");

    let results = ctx.analyze(&[good, bad, missing]);
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(!results[1].is_ok());
    assert!(!results[2].is_ok());
    let message = format!("{:#}", results[2].result.as_ref().unwrap_err());
    assert!(message.contains("missing.sql"), "{message}");
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_directory_walk_and_parallel_batch() {
    let ctx = TestContext::new();
    for i in 0..12 {
        ctx.write(
            &format!("queries/set_{}/q{i:02}.sql", i % 3),
            format!("SELECT col_{i} FROM table_{i}"),
        );
    }
    ctx.write("queries/readme.md", "not sql");

    let files = collect_sql_files(&ctx.root.join("queries")).unwrap();
    assert_eq!(files.len(), 12);

    let results = ctx.analyze(&files);
    assert_eq!(results.len(), 12);
    for (file, result) in files.iter().zip(&results) {
        assert_eq!(&result.path, file);
        let stem = file.file_stem().unwrap().to_string_lossy();
        let i: usize = stem.trim_start_matches('q').parse().unwrap();
        let analysis = &result.result.as_ref().unwrap()[0].analysis;
        assert_eq!(analysis.tables, set(&[format!("table_{i}").as_str()]));
        assert_eq!(analysis.columns, set(&[format!("col_{i}").as_str()]));
    }
}

#[test]
fn test_glob_expansion() {
    let ctx = TestContext::new();
    ctx.write("a/one.sql", "SELECT 1");
    ctx.write("b/two.sql", "SELECT 2");
    ctx.write("b/three.txt", "SELECT 3");

    let pattern = format!("{}/**/*", ctx.root.display());
    let files = expand_glob(&pattern).unwrap();
    let names: Vec<PathBuf> = files
        .iter()
        .map(|f| f.strip_prefix(&ctx.root).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![PathBuf::from("a/one.sql"), PathBuf::from("b/two.sql")]
    );
}
