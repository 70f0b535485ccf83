//! SQL tokenization: lexing with sqlparser-rs and grouping into token trees.

mod dialect;
mod grouping;
mod identifier_utils;
pub mod keywords;
mod token_parser_base;

pub use dialect::SqlDialect;
pub use identifier_utils::strip_quotes;

use crate::error::SqlInspectError;
use crate::model::TokenTree;

/// Turns SQL text into token trees.
///
/// Implement this to plug a different lexer into the analyzer.
pub trait SqlTokenizer {
    /// Tokenize the first statement of `sql`.
    fn tokenize(&self, sql: &str) -> Result<TokenTree, SqlInspectError>;

    /// Tokenize every statement of a script.
    ///
    /// The default treats the whole text as one statement.
    fn tokenize_script(&self, sql: &str) -> Result<Vec<TokenTree>, SqlInspectError> {
        let tree = self.tokenize(sql)?;
        Ok(if tree.is_empty() { Vec::new() } else { vec![tree] })
    }
}

/// Default tokenizer built on the sqlparser-rs lexer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlparserTokenizer {
    dialect: SqlDialect,
}

impl SqlparserTokenizer {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> SqlDialect {
        self.dialect
    }
}

impl SqlTokenizer for SqlparserTokenizer {
    fn tokenize(&self, sql: &str) -> Result<TokenTree, SqlInspectError> {
        Ok(self
            .tokenize_script(sql)?
            .into_iter()
            .next()
            .unwrap_or_default())
    }

    fn tokenize_script(&self, sql: &str) -> Result<Vec<TokenTree>, SqlInspectError> {
        let dialect = self.dialect.build();
        let tokens = token_parser_base::lex(dialect.as_ref(), sql)?;
        Ok(token_parser_base::split_statements(tokens)
            .into_iter()
            .map(grouping::group_statement)
            .collect())
    }
}
