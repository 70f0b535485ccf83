//! Base token cursor over the sqlparser-rs lexer output.
//!
//! `TokenParser` owns the flat token stream of one statement and a position,
//! and provides the navigation helpers the grouping pass is written against.

use sqlparser::dialect::Dialect;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::SqlInspectError;

/// Lex SQL text with the given dialect.
pub fn lex(dialect: &dyn Dialect, sql: &str) -> Result<Vec<Token>, SqlInspectError> {
    Tokenizer::new(dialect, sql)
        .tokenize()
        .map_err(|e| SqlInspectError::TokenizeError {
            message: e.to_string(),
        })
}

/// Split a token stream into statements on `;` outside parentheses.
///
/// The terminating semicolon stays with its statement. Statements made only
/// of whitespace and comments are dropped.
pub fn split_statements(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut statements = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;

    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            _ => {}
        }
        let terminator = depth == 0 && matches!(token, Token::SemiColon);
        current.push(token);
        if terminator {
            statements.push(std::mem::take(&mut current));
        }
    }
    statements.push(current);

    statements.retain(|stmt| {
        stmt.iter()
            .any(|t| !matches!(t, Token::Whitespace(_) | Token::SemiColon | Token::EOF))
    });
    statements
}

/// Cursor over the tokens of one statement.
pub struct TokenParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenParser {
    /// Create a TokenParser with pre-lexed tokens.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ========================================================================
    // Position and state
    // ========================================================================

    /// Check if at end of tokens.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // ========================================================================
    // Token access
    // ========================================================================

    /// Get current token without consuming.
    #[inline]
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Peek at a token at an offset from current position.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Advance to next token.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    // ========================================================================
    // Token type checks
    // ========================================================================

    /// Check if current token matches a specific token type (by discriminant).
    ///
    /// For example, `check_token(&Token::LParen)` matches any left parenthesis.
    #[inline]
    pub fn check_token(&self, expected: &Token) -> bool {
        self.current_token()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Check if the token at `offset` matches a specific token type.
    #[inline]
    pub fn check_token_at(&self, offset: usize, expected: &Token) -> bool {
        self.peek(offset)
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Check if the token at `offset` is a name or `*` (a qualified-name part).
    #[inline]
    pub fn check_name_part_at(&self, offset: usize) -> bool {
        matches!(self.peek(offset), Some(Token::Word(_)) | Some(Token::Mul))
    }

    /// Offset of the first non-whitespace token at or after the cursor.
    ///
    /// Comments count as whitespace.
    pub fn significant_offset(&self) -> usize {
        let mut offset = 0;
        while matches!(self.peek(offset), Some(Token::Whitespace(_))) {
            offset += 1;
        }
        offset
    }
}
