//! Analysis results.

use std::collections::BTreeSet;
use std::fmt;

/// Coarse category of a SQL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    #[default]
    Unknown,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Unknown => "UNKNOWN",
        }
    }

    /// Map a leading DML keyword to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        [
            StatementKind::Select,
            StatementKind::Insert,
            StatementKind::Update,
            StatementKind::Delete,
        ]
        .into_iter()
        .find(|kind| kind.as_str().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tables and columns referenced by one statement.
///
/// Both sets are sorted and disjoint; the column set never contains a
/// reserved keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    pub kind: StatementKind,
    pub tables: BTreeSet<String>,
    pub columns: BTreeSet<String>,
}

impl Analysis {
    /// The result for an unrecognized statement.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// An analysis together with the statement text it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementAnalysis {
    pub sql: String,
    pub analysis: Analysis,
}
