//! Column extraction.
//!
//! Each statement kind reads columns from exactly one clause: the SELECT
//! projection, the INSERT column list, or the UPDATE SET list. Predicates are
//! never read. Function arguments are never visited on their own: a function
//! contributes its rendered text as one derived column.

use super::{follows_as, items_after_alias, keyword_position, real_names, Statement};
use crate::model::{StatementKind, TokenId, TokenKind, TokenTree};
use crate::parser::strip_quotes;

pub(crate) fn extract_columns(statement: &Statement<'_>) -> Vec<String> {
    let tree = statement.tree();
    let seq = statement.tokens();
    match statement.kind() {
        StatementKind::Select => projection_columns(tree, seq),
        StatementKind::Insert => {
            let list = insert_column_list(tree, seq);
            let embedded_select = keyword_position(tree, seq, "SELECT", 0).is_some();
            if list.closed || !embedded_select {
                list.columns
            } else {
                let mut columns = list.columns;
                columns.extend(projection_columns(tree, seq));
                columns
            }
        }
        StatementKind::Update => set_columns(tree, seq),
        StatementKind::Delete | StatementKind::Unknown => Vec::new(),
    }
}

// ============================================================================
// SELECT projection
// ============================================================================

/// State of the projection scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Projection {
    /// Reading projection items.
    Items,
    /// Inside `CASE ... END`, started at `start`, nested `depth` deep.
    Case { start: usize, depth: usize },
}

/// Columns of the first SELECT's projection (between `SELECT` and `FROM`).
pub(crate) fn projection_columns(tree: &TokenTree, seq: &[TokenId]) -> Vec<String> {
    let Some(select) = keyword_position(tree, seq, "SELECT", 0) else {
        return Vec::new();
    };

    let mut columns = Vec::new();
    let mut state = Projection::Items;
    for pos in select + 1..seq.len() {
        let token = &tree[seq[pos]];
        state = match state {
            Projection::Case { start, depth } => {
                let depth = if token.is_keyword("CASE") {
                    depth + 1
                } else if token.is_keyword("END") {
                    depth - 1
                } else {
                    depth
                };
                if depth == 0 {
                    columns.push(render(tree, &seq[start..=pos]));
                    Projection::Items
                } else {
                    Projection::Case { start, depth }
                }
            }
            Projection::Items if token.is_keyword("FROM") => break,
            Projection::Items if token.is_keyword("CASE") => Projection::Case {
                start: pos,
                depth: 1,
            },
            Projection::Items => {
                for item in items_after_alias(tree, seq, pos) {
                    projection_item(tree, item, &mut columns);
                }
                Projection::Items
            }
        };
    }
    columns
}

fn projection_item(tree: &TokenTree, id: TokenId, columns: &mut Vec<String>) {
    match tree[id].kind() {
        TokenKind::Identifier(ident) => columns.push(ident.full_name()),
        TokenKind::Function { .. } => columns.push(function_text(tree, id)),
        TokenKind::Wildcard => columns.push(tree[id].text().to_string()),
        TokenKind::IdentifierList => {
            for item in tree.list_items(id) {
                projection_item(tree, item, columns);
            }
        }
        TokenKind::Keyword
        | TokenKind::Comparison { .. }
        | TokenKind::Punctuation
        | TokenKind::Literal
        | TokenKind::Whitespace => {}
    }
}

/// Rendered text of a function call, without its alias.
fn function_text(tree: &TokenTree, id: TokenId) -> String {
    let token = &tree[id];
    let call = match token.kind() {
        // An aliased function is a group whose first child is the call itself.
        TokenKind::Function { alias: Some(_), .. } => {
            token.children().first().map(|c| &tree[*c]).unwrap_or(token)
        }
        _ => token,
    };
    strip_quotes(call.text().trim())
}

fn render(tree: &TokenTree, span: &[TokenId]) -> String {
    let text: String = span.iter().map(|id| tree[*id].text()).collect();
    strip_quotes(text.trim())
}

// ============================================================================
// INSERT column list
// ============================================================================

/// State of the INSERT column-list scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntoColumns {
    /// Before `INTO`.
    SeekingInto,
    /// After `INTO`, waiting for the target table.
    SeekingTable,
    /// After the target table, waiting for `(`.
    AfterTable,
    /// Inside the parenthesized list.
    InList,
}

pub(crate) struct ColumnList {
    pub(crate) columns: Vec<String>,
    /// The list was terminated by `)`.
    pub(crate) closed: bool,
}

/// The parenthesized column list following the INSERT target table.
pub(crate) fn insert_column_list(tree: &TokenTree, seq: &[TokenId]) -> ColumnList {
    let mut list = ColumnList {
        columns: Vec::new(),
        closed: false,
    };
    let mut state = IntoColumns::SeekingInto;

    for id in seq {
        let token = &tree[*id];
        if token.is_whitespace() {
            continue;
        }
        state = match state {
            IntoColumns::SeekingInto if token.is_keyword("INTO") => IntoColumns::SeekingTable,
            IntoColumns::SeekingInto => IntoColumns::SeekingInto,
            IntoColumns::SeekingTable => match token.kind() {
                TokenKind::Identifier(_) | TokenKind::IdentifierList => IntoColumns::AfterTable,
                _ => break,
            },
            IntoColumns::AfterTable if token.is_punctuation("(") => IntoColumns::InList,
            IntoColumns::AfterTable => break,
            IntoColumns::InList => match token.kind() {
                TokenKind::Identifier(_) | TokenKind::IdentifierList => {
                    list.columns.extend(real_names(tree, *id));
                    IntoColumns::InList
                }
                TokenKind::Punctuation if token.is_punctuation(")") => {
                    list.closed = true;
                    break;
                }
                TokenKind::Punctuation => IntoColumns::InList,
                // VALUES, SELECT or anything else means the list was never closed.
                _ => break,
            },
        };
    }
    list
}

// ============================================================================
// UPDATE SET list
// ============================================================================

/// State of the SET-list scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetScan {
    BeforeSet,
    InSet,
}

/// Assignment targets between `SET` and `WHERE`.
pub(crate) fn set_columns(tree: &TokenTree, seq: &[TokenId]) -> Vec<String> {
    let mut state = SetScan::BeforeSet;
    let mut start = seq.len();
    let mut end = seq.len();

    for (pos, id) in seq.iter().enumerate() {
        let token = &tree[*id];
        match state {
            SetScan::BeforeSet if token.is_keyword("SET") => {
                state = SetScan::InSet;
                start = pos + 1;
            }
            SetScan::InSet if token.is_keyword("WHERE") => {
                end = pos;
                break;
            }
            _ => {}
        }
    }

    let mut columns = Vec::new();
    if state == SetScan::InSet {
        assignment_targets(tree, &seq[start..end], &mut columns);
    }
    columns
}

fn assignment_targets(tree: &TokenTree, seq: &[TokenId], columns: &mut Vec<String>) {
    for (pos, id) in seq.iter().enumerate() {
        match tree[*id].kind() {
            TokenKind::Comparison { left, .. } => {
                if let Some(ident) = tree[*left].as_identifier() {
                    columns.push(ident.real_name().to_string());
                }
            }
            TokenKind::IdentifierList => {
                assignment_targets(tree, tree[*id].children(), columns);
            }
            TokenKind::Identifier(ident) if !follows_as(tree, seq, pos) => {
                let assigned = tree
                    .next_significant(seq, pos)
                    .is_some_and(|next| tree[seq[next]].is_punctuation("="));
                if assigned {
                    columns.push(ident.real_name().to_string());
                }
            }
            _ => {}
        }
    }
}
