//! Identifier and token text helpers.
//!
//! The grouping pass keeps the raw source text of every token (quotes
//! included) so a tree can always be rendered back to the statement it came
//! from, while identifier payloads carry unquoted names.

use sqlparser::tokenizer::{Token, Word};

/// Removes double quotes and backticks anywhere in a rendered expression.
///
/// Derived columns such as `COUNT("id")` are reported as `COUNT(id)`.
pub fn strip_quotes(text: &str) -> String {
    text.chars().filter(|c| *c != '"' && *c != '`').collect()
}

/// Converts a sqlparser-rs Word token to its source form.
///
/// - `Some('[')` -> `[identifier]`
/// - `Some('"')` -> `"identifier"`
/// - `Some('`')` -> `` `identifier` ``
/// - `None` -> `identifier`
pub fn format_word(word: &Word) -> String {
    match word.quote_style {
        Some('[') => format!("[{}]", word.value),
        Some(q) => format!("{q}{}{q}", word.value),
        None => word.value.clone(),
    }
}

/// Converts a sqlparser-rs Token to its source form.
///
/// Words keep their original quoting; everything else uses the tokenizer's
/// own rendering.
pub fn format_token(token: &Token) -> String {
    match token {
        Token::Word(w) => format_word(w),
        Token::Whitespace(ws) => ws.to_string(),
        other => other.to_string(),
    }
}
