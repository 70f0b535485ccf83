//! Plain-text rendering of analysis results.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::model::StatementAnalysis;

fn format_set(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "N/A".to_string()
    } else {
        let names: Vec<&str> = set.iter().map(String::as_str).collect();
        format!("[{}]", names.join(", "))
    }
}

/// Render one statement's result as a block of labelled lines.
pub fn format_statement(statement: &StatementAnalysis) -> String {
    let analysis = &statement.analysis;
    let mut out = String::new();
    let _ = writeln!(out, "Original Query: {}", statement.sql);
    let _ = writeln!(out, "Statement Type: {}", analysis.kind);
    let _ = writeln!(out, "Tables: {}", format_set(&analysis.tables));
    let _ = writeln!(out, "Columns: {}", format_set(&analysis.columns));
    out
}

/// Render a list of statements, separated by blank lines.
pub fn format_statements(statements: &[StatementAnalysis]) -> String {
    statements
        .iter()
        .map(format_statement)
        .collect::<Vec<_>>()
        .join("\n")
}
