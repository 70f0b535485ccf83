//! Keyword tables used by the grouping pass and the analyzer.
//!
//! sqlparser's own keyword list is deliberately broad (it contains `NAME`,
//! `STATUS`, `DATE`, ...), so a word only becomes a keyword token here when it
//! shapes clause structure.

/// Words that become [`TokenKind::Keyword`](crate::model::TokenKind::Keyword) tokens.
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "ALL",
    "ALTER",
    "AND",
    "ANY",
    "AS",
    "ASC",
    "BETWEEN",
    "BY",
    "CASE",
    "COLLATE",
    "CREATE",
    "CROSS",
    "DEFAULT",
    "DELETE",
    "DESC",
    "DISTINCT",
    "DROP",
    "ELSE",
    "END",
    "ESCAPE",
    "EXCEPT",
    "EXISTS",
    "FETCH",
    "FOR",
    "FROM",
    "FULL",
    "GROUP",
    "HAVING",
    "ILIKE",
    "IN",
    "INNER",
    "INSERT",
    "INTERSECT",
    "INTO",
    "IS",
    "JOIN",
    "LATERAL",
    "LEFT",
    "LIKE",
    "LIMIT",
    "NATURAL",
    "NOT",
    "OFFSET",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "OVER",
    "PARTITION",
    "RECURSIVE",
    "RETURNING",
    "RIGHT",
    "SELECT",
    "SET",
    "SOME",
    "TABLE",
    "THEN",
    "TOP",
    "TRUNCATE",
    "UNION",
    "UPDATE",
    "USING",
    "VALUES",
    "WHEN",
    "WHERE",
    "WINDOW",
    "WITH",
];

/// Keyword-looking words that are really values.
const LITERAL_WORDS: &[&str] = &["NULL", "TRUE", "FALSE"];

/// Keywords that double as function names when directly followed by `(`.
const FUNCTION_KEYWORDS: &[&str] = &["LEFT", "RIGHT"];

/// Join-type modifiers that may sit between a table list and `JOIN`.
pub const JOIN_MODIFIERS: &[&str] = &["INNER", "LEFT", "RIGHT", "FULL", "OUTER", "CROSS"];

/// Names that are never reported as columns.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "JOIN",
    "INNER", "LEFT", "RIGHT", "OUTER", "ON", "GROUP", "BY", "ORDER", "HAVING", "LIMIT", "AS",
    "DISTINCT", "CASE", "WHEN", "THEN", "ELSE", "END", "AND", "OR", "NOT",
];

#[inline]
fn contains_ci(table: &[&str], word: &str) -> bool {
    table.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Check if an unquoted word is a structural keyword.
pub fn is_structural_keyword(word: &str) -> bool {
    contains_ci(STRUCTURAL_KEYWORDS, word)
}

/// Check if an unquoted word is `NULL`, `TRUE` or `FALSE`.
pub fn is_literal_word(word: &str) -> bool {
    contains_ci(LITERAL_WORDS, word)
}

/// Check if a keyword may start a function call (`LEFT(name, 3)`).
pub fn is_function_keyword(word: &str) -> bool {
    contains_ci(FUNCTION_KEYWORDS, word)
}

/// Check if a keyword is a join-type modifier.
pub fn is_join_modifier(word: &str) -> bool {
    contains_ci(JOIN_MODIFIERS, word)
}

/// Check if a name collides with a reserved keyword (case-insensitive).
pub fn is_reserved_keyword(name: &str) -> bool {
    contains_ci(RESERVED_KEYWORDS, name)
}
