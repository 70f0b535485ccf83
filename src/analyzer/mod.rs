//! Clause-aware classification of identifiers into tables and columns.
//!
//! The analyzer is a pure function over an immutable [`TokenTree`]: the
//! table and column passes are independent read-only walks that each return
//! fresh candidate lists, which the consolidator turns into the final sets.
//! It never fails; malformed clauses simply yield fewer names.

mod classifier;
mod columns;
mod consolidate;
mod tables;

pub use classifier::classify;
pub use consolidate::consolidate;

use crate::model::{Analysis, StatementKind, TokenId, TokenKind, TokenTree};

/// A classified statement: its kind plus its direct token sequence.
#[derive(Debug, Clone, Copy)]
pub struct Statement<'a> {
    kind: StatementKind,
    tree: &'a TokenTree,
}

impl<'a> Statement<'a> {
    pub fn new(tree: &'a TokenTree) -> Self {
        Self {
            kind: classify(tree),
            tree,
        }
    }

    #[inline]
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    #[inline]
    pub fn tree(&self) -> &'a TokenTree {
        self.tree
    }

    /// The statement's direct children.
    #[inline]
    pub fn tokens(&self) -> &'a [TokenId] {
        self.tree.roots()
    }

    /// Raw table candidates, before consolidation.
    pub fn table_candidates(&self) -> Vec<String> {
        tables::extract_tables(self)
    }

    /// Raw column candidates, before consolidation.
    pub fn column_candidates(&self) -> Vec<String> {
        columns::extract_columns(self)
    }
}

/// Analyze one statement's token tree.
pub fn analyze_tree(tree: &TokenTree) -> Analysis {
    let statement = Statement::new(tree);
    if statement.kind() == StatementKind::Unknown {
        return Analysis::unknown();
    }
    consolidate(
        statement.kind(),
        statement.table_candidates(),
        statement.column_candidates(),
    )
}

// ============================================================================
// Shared sequence helpers
// ============================================================================

/// Position of the first `keyword` in `seq` at or after `from`.
pub(crate) fn keyword_position(
    tree: &TokenTree,
    seq: &[TokenId],
    keyword: &str,
    from: usize,
) -> Option<usize> {
    (from..seq.len()).find(|&i| tree[seq[i]].is_keyword(keyword))
}

/// Check if the token at `pos` directly follows an `AS` keyword.
pub(crate) fn follows_as(tree: &TokenTree, seq: &[TokenId], pos: usize) -> bool {
    tree.prev_significant(seq, pos)
        .is_some_and(|prev| tree[seq[prev]].is_keyword("AS"))
}

/// Check if the token at `pos` is a bare or `AS` alias of the expression
/// before it: it follows `AS`, a closing parenthesis or a CASE's `END`.
pub(crate) fn introduces_alias(tree: &TokenTree, seq: &[TokenId], pos: usize) -> bool {
    tree.prev_significant(seq, pos).is_some_and(|prev| {
        let prev = &tree[seq[prev]];
        prev.is_keyword("AS") || prev.is_keyword("END") || prev.is_punctuation(")")
    })
}

/// Items of `id` (itself, or the entries of an identifier list), minus the
/// first entry when it aliases the expression before it.
pub(crate) fn items_after_alias(
    tree: &TokenTree,
    seq: &[TokenId],
    pos: usize,
) -> Vec<TokenId> {
    let mut items = tree.list_items(seq[pos]);
    if introduces_alias(tree, seq, pos) && !items.is_empty() {
        items.remove(0);
    }
    items
}

/// Real names of the identifiers in `id` (an identifier or a list of them).
pub(crate) fn real_names(tree: &TokenTree, id: TokenId) -> Vec<String> {
    tree.list_items(id)
        .into_iter()
        .filter_map(|item| match tree[item].kind() {
            TokenKind::Identifier(ident) => Some(ident.real_name().to_string()),
            _ => None,
        })
        .collect()
}
