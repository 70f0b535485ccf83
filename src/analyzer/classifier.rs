//! Statement classification from the leading keyword.

use crate::model::{StatementKind, TokenTree};

/// Classify a statement by its first significant token.
///
/// A leading `WITH` clause is skipped: the statement takes the kind of the
/// first DML keyword found outside parentheses after it. Anything else that
/// does not start with SELECT, INSERT, UPDATE or DELETE is `Unknown`.
pub fn classify(tree: &TokenTree) -> StatementKind {
    let roots = tree.roots();
    let Some(first) = roots.iter().position(|id| !tree[*id].is_whitespace()) else {
        return StatementKind::Unknown;
    };

    let leading = &tree[roots[first]];
    if !leading.is_any_keyword() {
        return StatementKind::Unknown;
    }
    if let Some(kind) = StatementKind::from_keyword(leading.text()) {
        return kind;
    }
    if !leading.is_keyword("WITH") {
        return StatementKind::Unknown;
    }

    let mut depth = 0usize;
    for id in &roots[first + 1..] {
        let token = &tree[*id];
        if token.is_punctuation("(") {
            depth += 1;
        } else if token.is_punctuation(")") {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && token.is_any_keyword() {
            if let Some(kind) = StatementKind::from_keyword(token.text()) {
                return kind;
            }
        }
    }
    StatementKind::Unknown
}
