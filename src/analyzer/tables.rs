//! Table extraction.
//!
//! INSERT, UPDATE and DELETE name their target in a fixed position. SELECT
//! (and the embedded SELECT of `INSERT ... SELECT`) runs a small state machine
//! over the FROM/JOIN clauses.

use super::{keyword_position, real_names, Statement};
use crate::model::{StatementKind, TokenId, TokenKind, TokenTree};
use crate::parser::keywords::is_join_modifier;

/// State of the FROM/JOIN scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableScan {
    /// Outside any table list.
    Seeking,
    /// After `FROM` or `JOIN`: names are table candidates.
    InTableList,
}

impl TableScan {
    /// Transition on a keyword.
    pub(crate) fn on_keyword(self, keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("FROM") || keyword.eq_ignore_ascii_case("JOIN") {
            return TableScan::InTableList;
        }
        match self {
            TableScan::InTableList
                if keyword.eq_ignore_ascii_case("AS")
                    || keyword.eq_ignore_ascii_case("ON")
                    || is_join_modifier(keyword) =>
            {
                TableScan::InTableList
            }
            _ => TableScan::Seeking,
        }
    }
}

pub(crate) fn extract_tables(statement: &Statement<'_>) -> Vec<String> {
    let tree = statement.tree();
    let seq = statement.tokens();
    match statement.kind() {
        StatementKind::Select => scan_table_lists(tree, seq),
        StatementKind::Insert => {
            let mut tables = insert_target(tree, seq);
            if let Some(select) = keyword_position(tree, seq, "SELECT", 0) {
                tables.extend(scan_table_lists(tree, &seq[select + 1..]));
            }
            tables
        }
        StatementKind::Update => seq
            .iter()
            .find_map(|id| tree[*id].as_identifier())
            .map(|ident| vec![ident.real_name().to_string()])
            .unwrap_or_default(),
        StatementKind::Delete => delete_target(tree, seq),
        StatementKind::Unknown => Vec::new(),
    }
}

fn is_name(tree: &TokenTree, id: TokenId) -> bool {
    matches!(
        tree[id].kind(),
        TokenKind::Identifier(_) | TokenKind::IdentifierList
    )
}

/// The identifier (list) immediately after `INTO`.
fn insert_target(tree: &TokenTree, seq: &[TokenId]) -> Vec<String> {
    let Some(into) = keyword_position(tree, seq, "INTO", 0) else {
        return Vec::new();
    };
    match tree.next_significant(seq, into) {
        Some(next) if is_name(tree, seq[next]) => real_names(tree, seq[next]),
        _ => Vec::new(),
    }
}

/// The first identifier (list) after `FROM`.
fn delete_target(tree: &TokenTree, seq: &[TokenId]) -> Vec<String> {
    let Some(from) = keyword_position(tree, seq, "FROM", 0) else {
        return Vec::new();
    };
    seq[from + 1..]
        .iter()
        .find(|id| is_name(tree, **id))
        .map(|id| real_names(tree, *id))
        .unwrap_or_default()
}

/// Run the FROM/JOIN state machine over a token sequence.
pub(crate) fn scan_table_lists(tree: &TokenTree, seq: &[TokenId]) -> Vec<String> {
    let mut state = TableScan::Seeking;
    let mut tables = Vec::new();

    for (pos, id) in seq.iter().enumerate() {
        let token = &tree[*id];
        match token.kind() {
            TokenKind::Keyword => state = state.on_keyword(token.text()),
            TokenKind::Identifier(_) | TokenKind::IdentifierList
                if state == TableScan::InTableList =>
            {
                if is_alias_target(tree, seq, pos) {
                    // `FROM (subquery) s, other`: only `s` is an alias.
                    for item in tree.list_items(*id).into_iter().skip(1) {
                        tables.extend(real_names(tree, item));
                    }
                    continue;
                }
                tables.extend(real_names(tree, *id));
            }
            _ => {}
        }
    }
    tables
}

/// A name directly preceded by another identifier, `AS` or a closing
/// parenthesis is an alias.
fn is_alias_target(tree: &TokenTree, seq: &[TokenId], pos: usize) -> bool {
    super::introduces_alias(tree, seq, pos)
        || tree
            .prev_significant(seq, pos)
            .is_some_and(|prev| tree[seq[prev]].as_identifier().is_some())
}
