//! Analyzer tests over the public API
//!
//! Each test feeds a statement through the default tokenizer and checks the
//! consolidated statement type, tables and columns.

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rust_sqlinspect::model::{Identifier, TokenKind, TreeBuilder};
use rust_sqlinspect::parser::keywords::RESERVED_KEYWORDS;
use rust_sqlinspect::{
    analyze_sql, analyze_sql_with, analyze_tree, Analysis, SqlInspectError, SqlTokenizer,
    SqlparserTokenizer, StatementKind, TokenTree,
};

fn analyze(sql: &str) -> Analysis {
    analyze_sql(sql).expect("statement should tokenize")
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_analysis(sql: &str, kind: StatementKind, tables: &[&str], columns: &[&str]) {
    let analysis = analyze(sql);
    assert_eq!(analysis.kind, kind, "kind of {sql}");
    assert_eq!(analysis.tables, set(tables), "tables of {sql}");
    assert_eq!(analysis.columns, set(columns), "columns of {sql}");
}

// ============================================================================
// Statement scenarios
// ============================================================================

#[test]
fn test_simple_select() {
    assert_analysis(
        "SELECT id, name, email FROM users WHERE age > 30;",
        StatementKind::Select,
        &["users"],
        &["email", "id", "name"],
    );
}

#[test]
fn test_insert_with_column_list() {
    assert_analysis(
        "INSERT INTO products (name, price, category_id) VALUES ('Laptop', 1200.00, 1);",
        StatementKind::Insert,
        &["products"],
        &["category_id", "name", "price"],
    );
}

#[test]
fn test_update_set_list() {
    assert_analysis(
        "UPDATE customers SET address = '123 Main St', city = 'Anytown' WHERE id = 101;",
        StatementKind::Update,
        &["customers"],
        &["address", "city"],
    );
}

#[test]
fn test_select_with_join_and_aliases() {
    assert_analysis(
        "SELECT c.name, o.order_date FROM customers c JOIN orders o ON c.id = o.customer_id;",
        StatementKind::Select,
        &["customers", "orders"],
        &["c.name", "o.order_date"],
    );
}

#[test]
fn test_left_join_with_where() {
    assert_analysis(
        "SELECT u.name, o.total FROM users u LEFT JOIN orders o ON u.id = o.user_id WHERE o.total > 10",
        StatementKind::Select,
        &["orders", "users"],
        &["o.total", "u.name"],
    );
}

#[test]
fn test_delete_without_where() {
    assert_analysis(
        "DELETE FROM shopping_cart_items;",
        StatementKind::Delete,
        &["shopping_cart_items"],
        &[],
    );
}

#[test]
fn test_delete_with_where_has_no_columns() {
    assert_analysis(
        "DELETE FROM orders WHERE order_date < '2023-01-01' AND status = 'cancelled';",
        StatementKind::Delete,
        &["orders"],
        &[],
    );
}

#[test]
fn test_not_sql_is_unknown() {
    assert_analysis("THIS IS NOT SQL", StatementKind::Unknown, &[], &[]);
}

#[test]
fn test_ddl_is_unknown() {
    assert_analysis(
        "CREATE TABLE accounts (id INT PRIMARY KEY)",
        StatementKind::Unknown,
        &[],
        &[],
    );
}

#[test]
fn test_aggregate_with_alias() {
    assert_analysis(
        "SELECT COUNT(*) AS total_users, status FROM users GROUP BY status;",
        StatementKind::Select,
        &["users"],
        &["COUNT(*)", "status"],
    );
}

#[test]
fn test_aggregate_with_space_before_arguments() {
    assert_analysis(
        "SELECT COUNT (*) FROM t",
        StatementKind::Select,
        &["t"],
        &["COUNT (*)"],
    );
}

#[test]
fn test_derived_table_with_bare_alias() {
    assert_analysis(
        "SELECT s.n FROM (SELECT n FROM orders) s",
        StatementKind::Select,
        &["orders"],
        &["s.n"],
    );
}

#[test]
fn test_bare_alias_after_expression_is_not_a_column() {
    assert_analysis(
        "SELECT CASE WHEN age > 60 THEN 'senior' ELSE 'adult' END bracket, name FROM people",
        StatementKind::Select,
        &["people"],
        &["CASE WHEN age > 60 THEN 'senior' ELSE 'adult' END", "name"],
    );
    assert_analysis(
        "SELECT (price + tax) total FROM items",
        StatementKind::Select,
        &["items"],
        &["price", "tax"],
    );
}

#[test]
fn test_subquery_tables_are_reported() {
    assert_analysis(
        "SELECT name FROM users WHERE id IN (SELECT user_id FROM memberships WHERE status = 'active');",
        StatementKind::Select,
        &["memberships", "users"],
        &["name"],
    );
}

#[test]
fn test_quoted_identifiers() {
    assert_analysis(
        "SELECT \"user\".id, \"user\".\"full name\" FROM \"user\" WHERE \"user\".id = 1;",
        StatementKind::Select,
        &["user"],
        &["user.full name", "user.id"],
    );
}

#[test]
fn test_keyword_function_call() {
    assert_analysis(
        "SELECT LEFT(name, 3) FROM people",
        StatementKind::Select,
        &["people"],
        &["LEFT(name, 3)"],
    );
}

#[test]
fn test_insert_select_without_column_list() {
    assert_analysis(
        "INSERT INTO archive SELECT id, total FROM orders WHERE total > 100",
        StatementKind::Insert,
        &["archive", "orders"],
        &["id", "total"],
    );
}

#[test]
fn test_common_table_expression() {
    assert_analysis(
        "WITH recent AS (SELECT id FROM orders) SELECT id FROM recent",
        StatementKind::Select,
        &["orders", "recent"],
        &["id"],
    );
}

#[test]
fn test_mixed_case_keywords() {
    assert_analysis(
        "select Id, Name from Users where Id = 3",
        StatementKind::Select,
        &["Users"],
        &["Id", "Name"],
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_plain_projection_column_count() {
    for n in 1..=12 {
        let names: Vec<String> = (0..n).map(|i| format!("col_{i}")).collect();
        let sql = format!("SELECT {} FROM wide_table", names.join(", "));
        let analysis = analyze(&sql);
        assert_eq!(analysis.columns.len(), n, "{sql}");
    }
}

#[test]
fn test_tables_and_columns_are_disjoint() {
    let statements = [
        "SELECT users FROM users",
        "SELECT Orders, total FROM orders",
        "UPDATE stock SET stock = stock - 1",
        "INSERT INTO log (log, message) VALUES (1, 'x')",
    ];
    for sql in statements {
        let analysis = analyze(sql);
        let lowered: BTreeSet<String> =
            analysis.tables.iter().map(|t| t.to_lowercase()).collect();
        for column in &analysis.columns {
            assert!(
                !lowered.contains(&column.to_lowercase()),
                "{column} is also a table in {sql}"
            );
        }
    }
}

#[test]
fn test_no_column_is_a_reserved_keyword() {
    let analysis = analyze("SELECT \"select\", \"Where\", amount FROM payments");
    assert_eq!(analysis.columns, set(&["amount"]));
    for column in &analysis.columns {
        assert!(!RESERVED_KEYWORDS
            .iter()
            .any(|k| k.eq_ignore_ascii_case(column)));
    }
}

#[test]
fn test_reanalysis_is_identical() {
    let tree = SqlparserTokenizer::default()
        .tokenize("SELECT c.name FROM customers c JOIN orders o ON c.id = o.customer_id")
        .unwrap();
    let first = analyze_tree(&tree);
    let second = analyze_tree(&tree);
    assert_eq!(first, second);
}

// ============================================================================
// Custom tokenizers
// ============================================================================

/// Tokenizer that ignores its input and returns a fixed tree.
struct FixedTokenizer(TokenTree);

impl SqlTokenizer for FixedTokenizer {
    fn tokenize(&self, _sql: &str) -> Result<TokenTree, SqlInspectError> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_analyze_with_custom_tokenizer() {
    let mut b = TreeBuilder::new();
    let delete = b.keyword("DELETE");
    let ws1 = b.whitespace();
    let from = b.keyword("FROM");
    let ws2 = b.whitespace();
    let table = b.identifier(Identifier::qualified("audit", "events"));
    let tree = b.finish(vec![delete, ws1, from, ws2, table]);

    let analysis = analyze_sql_with("ignored", &FixedTokenizer(tree)).unwrap();
    assert_eq!(analysis.kind, StatementKind::Delete);
    assert_eq!(analysis.tables, set(&["events"]));
    assert!(analysis.columns.is_empty());
}

#[test]
fn test_ids_from_another_builder_are_ignored() {
    let mut other = TreeBuilder::new();
    for _ in 0..20 {
        other.whitespace();
    }
    let foreign = other.literal("'x'");

    let mut b = TreeBuilder::new();
    let update = b.keyword("UPDATE");
    let ws1 = b.whitespace();
    let table = b.identifier(Identifier::new("t"));
    let ws2 = b.whitespace();
    let set_kw = b.keyword("SET");
    let ws3 = b.whitespace();
    let column = b.identifier(Identifier::new("email"));
    let assignment = b.group(
        TokenKind::Comparison {
            left: foreign,
            operator: "=".to_string(),
            right: column,
        },
        vec![foreign, column],
    );
    let tree = b.finish(vec![update, ws1, table, ws2, set_kw, ws3, assignment, foreign]);

    let analysis = analyze_tree(&tree);
    assert_eq!(analysis.kind, StatementKind::Update);
    assert_eq!(analysis.tables, set(&["t"]));
}

#[test]
fn test_empty_tree_is_unknown() {
    let analysis = analyze_sql_with("", &FixedTokenizer(TokenTree::empty())).unwrap();
    assert_eq!(analysis, Analysis::unknown());
}
