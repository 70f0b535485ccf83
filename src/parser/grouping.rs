//! Grouping pass: turns the flat lexer output of one statement into a
//! [`TokenTree`].
//!
//! Grouping happens per nesting level in four steps:
//!
//! 1. names (`a.b.c`, `t.*`) become identifiers, and a name followed by `(`
//!    becomes a function whose arguments are grouped recursively;
//! 2. `AS alias` or a bare trailing name is folded into the preceding
//!    identifier, function or literal;
//! 3. `operand op operand` becomes a comparison;
//! 4. comma-separated items become an identifier list.
//!
//! Parentheses that do not belong to a function stay flat at their level, so
//! the clause keywords of a subquery are visible to the statement-level
//! scanners.

use sqlparser::tokenizer::Token;

use super::identifier_utils::{format_token, format_word};
use super::keywords::{is_function_keyword, is_literal_word, is_structural_keyword};
use super::token_parser_base::TokenParser;
use crate::model::{Identifier, TokenId, TokenKind, TokenTree, TreeBuilder};

const COMPARISON_OPERATORS: &[&str] = &["=", "==", "<>", "!=", "<", ">", "<=", ">=", "<=>"];

/// Group the tokens of one statement into a tree.
pub fn group_statement(tokens: Vec<Token>) -> TokenTree {
    let mut parser = TokenParser::from_tokens(tokens);
    let mut builder = TreeBuilder::new();
    let mut roots = parse_level(&mut parser, &mut builder);
    // A stray `)` ends the statement level early; keep going after it.
    while !parser.is_at_end() {
        let stray = builder.punctuation(")");
        parser.advance();
        roots.push(stray);
        roots.extend(parse_level(&mut parser, &mut builder));
    }
    builder.finish(roots)
}

/// Parse one nesting level, stopping before an unmatched `)`.
fn parse_level(parser: &mut TokenParser, b: &mut TreeBuilder) -> Vec<TokenId> {
    let mut seq = Vec::new();
    let mut depth = 0usize;

    while let Some(token) = parser.current_token().cloned() {
        let id = match token {
            // Closes the enclosing function, or is unbalanced at statement level.
            Token::RParen if depth == 0 => break,
            Token::LParen => {
                depth += 1;
                parser.advance();
                b.punctuation("(")
            }
            Token::RParen => {
                depth -= 1;
                parser.advance();
                b.punctuation(")")
            }
            Token::Word(_) => parse_word(parser, b, &seq),
            Token::Mul => {
                parser.advance();
                if last_is_operand(b, &seq) {
                    b.punctuation("*")
                } else {
                    b.leaf(TokenKind::Wildcard, "*")
                }
            }
            Token::Whitespace(_) => {
                parser.advance();
                b.leaf(TokenKind::Whitespace, format_token(&token))
            }
            Token::EOF => {
                parser.advance();
                continue;
            }
            ref t if is_literal_token(t) => {
                parser.advance();
                b.literal(&format_token(t))
            }
            ref t => {
                parser.advance();
                b.punctuation(&format_token(t))
            }
        };
        seq.push(id);
    }

    let seq = group_aliases(b, seq);
    let seq = group_comparisons(b, seq);
    group_lists(b, seq)
}

fn is_literal_token(token: &Token) -> bool {
    matches!(
        token,
        Token::Number(_, _)
            | Token::SingleQuotedString(_)
            | Token::DoubleQuotedString(_)
            | Token::NationalStringLiteral(_)
            | Token::EscapedStringLiteral(_)
            | Token::HexStringLiteral(_)
            | Token::DollarQuotedString(_)
            | Token::Placeholder(_)
    )
}

/// Parse a word at the cursor into a keyword, literal, identifier or function.
fn parse_word(parser: &mut TokenParser, b: &mut TreeBuilder, seq: &[TokenId]) -> TokenId {
    let Some(Token::Word(word)) = parser.current_token().cloned() else {
        return b.punctuation("");
    };

    if word.quote_style.is_none() {
        if is_literal_word(&word.value) {
            parser.advance();
            return b.literal(&word.value);
        }
        let call = parser.check_token_at(1, &Token::LParen);
        if is_structural_keyword(&word.value) && !(call && is_function_keyword(&word.value)) {
            parser.advance();
            return b.keyword(&word.value);
        }
    }

    let mut parts = vec![word.value.clone()];
    let mut raw = format_word(&word);
    let mut quoted = word.quote_style.is_some();
    parser.advance();
    while parser.check_token(&Token::Period) && parser.check_name_part_at(1) {
        let (part, part_raw) = match parser.peek(1) {
            Some(Token::Word(w)) => {
                quoted = w.quote_style.is_some();
                (w.value.clone(), format_word(w))
            }
            _ => ("*".to_string(), "*".to_string()),
        };
        parser.advance();
        parser.advance();
        raw.push('.');
        raw.push_str(&part_raw);
        let star = part == "*";
        parts.push(part);
        if star {
            break;
        }
    }

    let name = parts.pop().unwrap_or_default();
    let ident = if parts.is_empty() {
        Identifier::new(name)
    } else {
        Identifier::qualified(parts.join("."), name)
    };
    let function_name = ident.full_name();
    let ident_id = b.leaf(TokenKind::Identifier(ident), raw);

    // The name right after INTO is the target table, even as `t(a, b)`.
    let after_into = last_significant(b, seq).is_some_and(|t| t.is_keyword("INTO"));
    if after_into || function_name.ends_with('*') {
        return ident_id;
    }

    // `COUNT (*)`: an unquoted name may be separated from its arguments,
    // except where it names a table with a column list.
    let gap = parser.significant_offset();
    let spaced_ok = !quoted && !last_significant(b, seq).is_some_and(names_table_columns);
    if !parser.check_token_at(gap, &Token::LParen) || (gap > 0 && !spaced_ok) {
        return ident_id;
    }

    let mut head = vec![ident_id];
    for _ in 0..gap {
        if let Some(ws) = parser.current_token().cloned() {
            head.push(b.leaf(TokenKind::Whitespace, format_token(&ws)));
        }
        parser.advance();
    }
    parse_function(parser, b, head, function_name)
}

/// Parse `(args)` at the cursor; `head` is the function name plus any
/// whitespace before the parenthesis.
fn parse_function(
    parser: &mut TokenParser,
    b: &mut TreeBuilder,
    head: Vec<TokenId>,
    name: String,
) -> TokenId {
    parser.advance();
    let open = b.punctuation("(");
    let args = parse_level(parser, b);

    let mut children = Vec::with_capacity(head.len() + args.len() + 2);
    children.extend(head);
    children.push(open);
    children.extend(args);
    if parser.check_token(&Token::RParen) {
        parser.advance();
        children.push(b.punctuation(")"));
    }
    b.group(TokenKind::Function { name, alias: None }, children)
}

// ============================================================================
// Sequence helpers
// ============================================================================

fn last_significant<'a>(b: &'a TreeBuilder, seq: &[TokenId]) -> Option<&'a crate::model::Token> {
    seq.iter()
        .rev()
        .filter_map(|id| b.get(*id))
        .find(|t| !t.is_whitespace())
}

/// Keywords after which `name (a, b)` is a table or view with a column list.
fn names_table_columns(token: &crate::model::Token) -> bool {
    ["TABLE", "ON", "WITH"]
        .iter()
        .any(|kw| token.is_keyword(kw))
}

fn next_significant(b: &TreeBuilder, seq: &[TokenId], pos: usize) -> Option<usize> {
    (pos + 1..seq.len()).find(|&i| b.get(seq[i]).is_some_and(|t| !t.is_whitespace()))
}

fn last_is_operand(b: &TreeBuilder, seq: &[TokenId]) -> bool {
    last_significant(b, seq).is_some_and(|t| {
        matches!(
            t.kind(),
            TokenKind::Identifier(_) | TokenKind::Literal | TokenKind::Function { .. }
        ) || t.is_punctuation(")")
    })
}

fn kind_of(b: &TreeBuilder, id: TokenId) -> Option<&TokenKind> {
    b.get(id).map(|t| t.kind())
}

// ============================================================================
// Step 2: aliases
// ============================================================================

/// A plain name that can serve as an alias target.
fn bare_alias(b: &TreeBuilder, id: TokenId) -> Option<String> {
    let token = b.get(id)?;
    match token.kind() {
        TokenKind::Identifier(ident)
            if ident.qualifier.is_none() && ident.alias.is_none() && ident.name != "*" =>
        {
            Some(ident.name.clone())
        }
        _ => None,
    }
}

fn group_aliases(b: &mut TreeBuilder, seq: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(seq.len());
    let mut i = 0;
    while i < seq.len() {
        let id = seq[i];
        let aliased_kind = match kind_of(b, id) {
            Some(TokenKind::Identifier(ident)) if ident.alias.is_none() && ident.name != "*" => {
                Some(TokenKind::Identifier(ident.clone()))
            }
            Some(TokenKind::Function { alias: None, .. }) | Some(TokenKind::Literal) => {
                kind_of(b, id).cloned()
            }
            _ => None,
        };

        if let Some(kind) = aliased_kind {
            if let Some((end, alias)) = alias_after(b, &seq, i) {
                let kind = match kind {
                    TokenKind::Identifier(ident) => TokenKind::Identifier(ident.with_alias(alias)),
                    TokenKind::Function { name, .. } => TokenKind::Function {
                        name,
                        alias: Some(alias),
                    },
                    other => other,
                };
                out.push(b.group(kind, seq[i..=end].to_vec()));
                i = end + 1;
                continue;
            }
        }
        out.push(id);
        i += 1;
    }
    out
}

/// Find `AS alias` or a bare `alias` after position `pos`.
fn alias_after(b: &TreeBuilder, seq: &[TokenId], pos: usize) -> Option<(usize, String)> {
    let j = next_significant(b, seq, pos)?;
    if b.get(seq[j])?.is_keyword("AS") {
        let k = next_significant(b, seq, j)?;
        return bare_alias(b, seq[k]).map(|alias| (k, alias));
    }
    bare_alias(b, seq[j]).map(|alias| (j, alias))
}

// ============================================================================
// Step 3: comparisons
// ============================================================================

fn is_operand(b: &TreeBuilder, id: TokenId) -> bool {
    matches!(
        kind_of(b, id),
        Some(TokenKind::Identifier(_)) | Some(TokenKind::Literal) | Some(TokenKind::Function { .. })
    )
}

fn group_comparisons(b: &mut TreeBuilder, seq: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(seq.len());
    let mut i = 0;
    while i < seq.len() {
        if is_operand(b, seq[i]) {
            let found = next_significant(b, &seq, i).and_then(|j| {
                let op = b.get(seq[j])?;
                let is_op = matches!(op.kind(), TokenKind::Punctuation)
                    && COMPARISON_OPERATORS.contains(&op.text());
                if !is_op {
                    return None;
                }
                let operator = op.text().to_string();
                let k = next_significant(b, &seq, j)?;
                is_operand(b, seq[k]).then_some((k, operator))
            });
            if let Some((k, operator)) = found {
                let kind = TokenKind::Comparison {
                    left: seq[i],
                    operator,
                    right: seq[k],
                };
                out.push(b.group(kind, seq[i..=k].to_vec()));
                i = k + 1;
                continue;
            }
        }
        out.push(seq[i]);
        i += 1;
    }
    out
}

// ============================================================================
// Step 4: identifier lists
// ============================================================================

fn is_list_item(b: &TreeBuilder, id: TokenId) -> bool {
    matches!(
        kind_of(b, id),
        Some(TokenKind::Identifier(_))
            | Some(TokenKind::Function { .. })
            | Some(TokenKind::Literal)
            | Some(TokenKind::Comparison { .. })
            | Some(TokenKind::Wildcard)
    )
}

fn group_lists(b: &mut TreeBuilder, seq: Vec<TokenId>) -> Vec<TokenId> {
    let mut out = Vec::with_capacity(seq.len());
    let mut i = 0;
    while i < seq.len() {
        if is_list_item(b, seq[i]) {
            let mut end = i;
            while let Some(comma) = next_significant(b, &seq, end) {
                if !b.get(seq[comma]).is_some_and(|t| t.is_punctuation(",")) {
                    break;
                }
                match next_significant(b, &seq, comma) {
                    Some(item) if is_list_item(b, seq[item]) => end = item,
                    _ => break,
                }
            }
            if end > i {
                out.push(b.group(TokenKind::IdentifierList, seq[i..=end].to_vec()));
                i = end + 1;
                continue;
            }
        }
        out.push(seq[i]);
        i += 1;
    }
    out
}
