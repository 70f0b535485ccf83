//! Tokenizer and token tree tests

use std::str::FromStr;

use pretty_assertions::assert_eq;
use rust_sqlinspect::model::TokenKind;
use rust_sqlinspect::{SqlDialect, SqlInspectError, SqlTokenizer, SqlparserTokenizer, TokenTree};

fn tokenize(sql: &str) -> TokenTree {
    SqlparserTokenizer::default().tokenize(sql).unwrap()
}

fn kinds(tree: &TokenTree) -> Vec<&'static str> {
    tree.roots()
        .iter()
        .map(|id| &tree[*id])
        .filter(|t| !t.is_whitespace())
        .map(|t| match t.kind() {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::IdentifierList => "list",
            TokenKind::Function { .. } => "function",
            TokenKind::Comparison { .. } => "comparison",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Wildcard => "wildcard",
            TokenKind::Literal => "literal",
            TokenKind::Whitespace => "whitespace",
        })
        .collect()
}

#[test]
fn test_statement_shape() {
    let tree = tokenize("SELECT a, b FROM t WHERE a = 1;");
    assert_eq!(
        kinds(&tree),
        vec![
            "keyword",
            "list",
            "keyword",
            "identifier",
            "keyword",
            "comparison",
            "punctuation"
        ]
    );
}

#[test]
fn test_tree_preserves_source_text() {
    let sql = "UPDATE  t\n  SET a = a * 2, b = 'x' -- note\nWHERE id IN (1, 2);";
    assert_eq!(tokenize(sql).to_sql(), sql);
}

#[test]
fn test_every_child_points_to_its_parent() {
    let tree = tokenize("SELECT COUNT(id) AS n, MAX(price) FROM items i");
    let mut stack: Vec<_> = tree.roots().to_vec();
    while let Some(id) = stack.pop() {
        for child in tree[id].children() {
            assert_eq!(tree[*child].parent(), Some(id));
            stack.push(*child);
        }
    }
    for root in tree.roots() {
        assert_eq!(tree[*root].parent(), None);
    }
}

#[test]
fn test_multiplication_is_not_a_wildcard() {
    let tree = tokenize("SELECT price * 2 FROM t");
    assert!(!kinds(&tree).contains(&"wildcard"));
    let tree = tokenize("SELECT * FROM t");
    assert_eq!(kinds(&tree)[1], "wildcard");
}

#[test]
fn test_null_is_a_literal() {
    let tree = tokenize("SELECT NULL");
    assert_eq!(kinds(&tree), vec!["keyword", "literal"]);
}

#[test]
fn test_outline_lists_groups() {
    let outline = tokenize("SELECT COUNT(*) FROM t").outline();
    assert!(outline.contains("Keyword 'SELECT'"));
    assert!(outline.contains("Function 'COUNT(*)'"));
    assert!(outline.contains("  Wildcard '*'"));
}

#[test]
fn test_script_split_drops_empty_statements() {
    let trees = SqlparserTokenizer::default()
        .tokenize_script("SELECT a FROM t;;\n-- trailing comment\n")
        .unwrap();
    assert_eq!(trees.len(), 1);
}

#[test]
fn test_semicolon_inside_parentheses_does_not_split() {
    let trees = SqlparserTokenizer::default()
        .tokenize_script("SELECT f(';') FROM t; SELECT 1;")
        .unwrap();
    assert_eq!(trees.len(), 2);
}

#[test]
fn test_unterminated_string_is_an_error() {
    let err = SqlparserTokenizer::default()
        .tokenize("SELECT 'oops FROM t")
        .unwrap_err();
    assert!(matches!(err, SqlInspectError::TokenizeError { .. }));
}

#[test]
fn test_dialect_names() {
    assert_eq!(SqlDialect::from_str("mssql").unwrap(), SqlDialect::MsSql);
    assert_eq!(SqlDialect::from_str("PostgreSQL").unwrap(), SqlDialect::Postgres);
    assert_eq!(SqlDialect::default(), SqlDialect::Generic);
    let err = SqlDialect::from_str("oracle").unwrap_err();
    assert!(err.to_string().contains("oracle"));
}

#[test]
fn test_mssql_bracket_identifiers() {
    let tree = SqlparserTokenizer::new(SqlDialect::MsSql)
        .tokenize("SELECT [Order Id] FROM [dbo].[Orders]")
        .unwrap();
    let names: Vec<String> = tree
        .roots()
        .iter()
        .filter_map(|id| tree[*id].as_identifier())
        .map(|ident| ident.full_name())
        .collect();
    assert_eq!(names, vec!["Order Id", "dbo.Orders"]);
}
