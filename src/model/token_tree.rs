//! Token tree consumed by the analyzer.
//!
//! A statement is represented as an append-only arena of [`Token`]s. Grouped
//! tokens (identifier lists, functions, comparisons, qualified identifiers)
//! own their children by index, and every child records the index of its
//! parent. Once [`TreeBuilder::finish`] has produced a [`TokenTree`] it is
//! never mutated, so sibling look-back and look-ahead are plain index
//! arithmetic over a slice of [`TokenId`]s.

use std::fmt;
use std::ops::Index;

/// Index of a token inside the [`TokenTree`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

impl TokenId {
    /// Position of the token in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A (possibly qualified, possibly aliased) name, with quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Final component of the name (`col` in `t.col`)
    pub name: String,
    /// Dot prefix of the name (`t` in `t.col`, `db.dbo` in `db.dbo.t`)
    pub qualifier: Option<String>,
    /// Name introduced by `AS alias` or a bare trailing `alias`
    pub alias: Option<String>,
}

impl Identifier {
    /// Create an unqualified identifier without alias.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
            alias: None,
        }
    }

    /// Create a qualified identifier (`qualifier.name`).
    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: Some(qualifier.into()),
            alias: None,
        }
    }

    /// Attach an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The real name: the final dotted component, never the alias.
    #[inline]
    pub fn real_name(&self) -> &str {
        &self.name
    }

    /// The pre-alias name including its qualifier, e.g. `c.name`.
    pub fn full_name(&self) -> String {
        match &self.qualifier {
            Some(qualifier) => format!("{}.{}", qualifier, self.name),
            None => self.name.clone(),
        }
    }
}

/// Kind of a token, carrying the structured payload of grouped tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// A structural SQL keyword (`SELECT`, `FROM`, `JOIN`, ...)
    Keyword,
    /// A name; its children are the raw parts it was grouped from
    Identifier(Identifier),
    /// Comma-separated items; children include the commas and whitespace
    IdentifierList,
    /// `name(args)`; children are the name, the parentheses and the grouped arguments
    Function {
        name: String,
        alias: Option<String>,
    },
    /// `left op right`
    Comparison {
        left: TokenId,
        operator: String,
        right: TokenId,
    },
    /// Parentheses, commas, semicolons and operators
    Punctuation,
    /// A bare `*` projection
    Wildcard,
    /// Numbers, strings and placeholders
    Literal,
    /// Whitespace and comments
    Whitespace,
}

/// One node of the token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    parent: Option<TokenId>,
    children: Vec<TokenId>,
}

impl Token {
    #[inline]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Source text of the token (for groups: the concatenated text of its children).
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn parent(&self) -> Option<TokenId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[TokenId] {
        &self.children
    }

    #[inline]
    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    /// Check if this token is the given keyword (case-insensitive).
    #[inline]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword) && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Check if this token is a keyword at all.
    #[inline]
    pub fn is_any_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword)
    }

    /// Check if this token is the given punctuation or operator.
    #[inline]
    pub fn is_punctuation(&self, value: &str) -> bool {
        matches!(self.kind, TokenKind::Punctuation) && self.text == value
    }

    #[inline]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match &self.kind {
            TokenKind::Identifier(ident) => Some(ident),
            _ => None,
        }
    }
}

/// An immutable token tree for one SQL statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTree {
    tokens: Vec<Token>,
    roots: Vec<TokenId>,
}

impl TokenTree {
    /// A tree without any tokens (classifies as UNKNOWN).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The statement's direct children, in source order.
    #[inline]
    pub fn roots(&self) -> &[TokenId] {
        &self.roots
    }

    /// Bounds-checked access.
    #[inline]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    /// Total number of tokens in the arena (all nesting levels).
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Reconstruct the statement text.
    pub fn to_sql(&self) -> String {
        self.roots
            .iter()
            .filter_map(|id| self.get(*id))
            .map(Token::text)
            .collect()
    }

    /// Position in `seq` of the closest non-whitespace token before `pos`.
    pub fn prev_significant(&self, seq: &[TokenId], pos: usize) -> Option<usize> {
        (0..pos.min(seq.len()))
            .rev()
            .find(|&i| self.get(seq[i]).is_some_and(|t| !t.is_whitespace()))
    }

    /// Position in `seq` of the closest non-whitespace token after `pos`.
    pub fn next_significant(&self, seq: &[TokenId], pos: usize) -> Option<usize> {
        (pos.saturating_add(1)..seq.len())
            .find(|&i| self.get(seq[i]).is_some_and(|t| !t.is_whitespace()))
    }

    /// Items of an identifier list, skipping commas and whitespace.
    ///
    /// For any other token, yields the token itself.
    pub fn list_items(&self, id: TokenId) -> Vec<TokenId> {
        match self.get(id) {
            Some(token) if matches!(token.kind, TokenKind::IdentifierList) => token
                .children
                .iter()
                .copied()
                .filter(|child| {
                    self.get(*child).is_some_and(|t| {
                        !t.is_whitespace() && !matches!(t.kind, TokenKind::Punctuation)
                    })
                })
                .collect(),
            Some(_) => vec![id],
            None => Vec::new(),
        }
    }

    /// Render a subtree as an indented outline (used by the `tokens` command).
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for id in &self.roots {
            self.outline_into(*id, 0, &mut out);
        }
        out
    }

    fn outline_into(&self, id: TokenId, depth: usize, out: &mut String) {
        let Some(token) = self.get(id) else {
            return;
        };
        if token.is_whitespace() {
            return;
        }
        let label = match &token.kind {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier(_) => "Identifier",
            TokenKind::IdentifierList => "IdentifierList",
            TokenKind::Function { .. } => "Function",
            TokenKind::Comparison { .. } => "Comparison",
            TokenKind::Punctuation => "Punctuation",
            TokenKind::Wildcard => "Wildcard",
            TokenKind::Literal => "Literal",
            TokenKind::Whitespace => "Whitespace",
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(label);
        out.push_str(" '");
        out.push_str(token.text.trim());
        out.push_str("'\n");
        if matches!(
            token.kind,
            TokenKind::IdentifierList | TokenKind::Function { .. } | TokenKind::Comparison { .. }
        ) {
            for child in &token.children {
                self.outline_into(*child, depth + 1, out);
            }
        }
    }
}

impl Index<TokenId> for TokenTree {
    type Output = Token;

    /// Every id reachable from the roots is in bounds: [`TreeBuilder::finish`]
    /// drops the ones it did not hand out.
    fn index(&self, id: TokenId) -> &Token {
        &self.tokens[id.0]
    }
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Append-only builder for a [`TokenTree`].
///
/// Leaves are pushed first; groups are created over already-pushed children
/// and become their parent.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tokens: Vec<Token>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a leaf token.
    pub fn leaf(&mut self, kind: TokenKind, text: impl Into<String>) -> TokenId {
        let id = TokenId(self.tokens.len());
        self.tokens.push(Token {
            kind,
            text: text.into(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Push a group over existing tokens; its text is the concatenation of theirs.
    pub fn group(&mut self, kind: TokenKind, children: Vec<TokenId>) -> TokenId {
        let id = TokenId(self.tokens.len());
        let text: String = children
            .iter()
            .filter_map(|c| self.tokens.get(c.0))
            .map(|t| t.text.as_str())
            .collect();
        for child in &children {
            if let Some(token) = self.tokens.get_mut(child.0) {
                token.parent = Some(id);
            }
        }
        self.tokens.push(Token {
            kind,
            text,
            parent: None,
            children,
        });
        id
    }

    pub fn keyword(&mut self, text: &str) -> TokenId {
        self.leaf(TokenKind::Keyword, text)
    }

    pub fn whitespace(&mut self) -> TokenId {
        self.leaf(TokenKind::Whitespace, " ")
    }

    pub fn punctuation(&mut self, text: &str) -> TokenId {
        self.leaf(TokenKind::Punctuation, text)
    }

    pub fn literal(&mut self, text: &str) -> TokenId {
        self.leaf(TokenKind::Literal, text)
    }

    /// Push an identifier whose text is its full name (plus ` AS alias`).
    pub fn identifier(&mut self, ident: Identifier) -> TokenId {
        let mut text = ident.full_name();
        if let Some(alias) = &ident.alias {
            text.push_str(" AS ");
            text.push_str(alias);
        }
        self.leaf(TokenKind::Identifier(ident), text)
    }

    #[inline]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0)
    }

    /// Freeze the arena with the given statement-level sequence.
    ///
    /// Ids this builder never handed out are dropped: children must precede
    /// their group, and a comparison with a foreign operand becomes a literal.
    pub fn finish(self, mut roots: Vec<TokenId>) -> TokenTree {
        let mut tokens = self.tokens;
        let len = tokens.len();
        for (i, token) in tokens.iter_mut().enumerate() {
            token.children.retain(|child| child.0 < i);
            if let TokenKind::Comparison { left, right, .. } = &token.kind {
                if left.0 >= i || right.0 >= i {
                    token.kind = TokenKind::Literal;
                }
            }
            if token.parent.is_some_and(|parent| parent.0 <= i || parent.0 >= len) {
                token.parent = None;
            }
        }
        roots.retain(|id| id.0 < len);
        TokenTree { tokens, roots }
    }
}
