//! Turn raw candidate lists into the final result sets.

use std::collections::BTreeSet;

use crate::model::{Analysis, StatementKind};
use crate::parser::keywords::is_reserved_keyword;

/// Build the final [`Analysis`] from raw candidates.
///
/// Names are deduplicated and sorted. A column is dropped when it is empty,
/// matches a table name (ignoring case), or is a reserved keyword. DELETE
/// statements never report columns.
pub fn consolidate<T, C>(kind: StatementKind, tables: T, columns: C) -> Analysis
where
    T: IntoIterator<Item = String>,
    C: IntoIterator<Item = String>,
{
    let tables: BTreeSet<String> = tables.into_iter().filter(|t| !t.is_empty()).collect();

    let columns = if kind == StatementKind::Delete {
        BTreeSet::new()
    } else {
        columns
            .into_iter()
            .filter(|c| !c.is_empty())
            .filter(|c| !is_reserved_keyword(c))
            .filter(|c| !tables.iter().any(|t| t.eq_ignore_ascii_case(c)))
            .collect()
    };

    Analysis {
        kind,
        tables,
        columns,
    }
}
