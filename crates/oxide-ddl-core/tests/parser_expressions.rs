//! Tests for expression parsing and formatting: precedence, predicates,
//! CASE, CAST, tuples and arrays.

mod common;
use common::*;

use oxide_ddl_core::ast::{BinaryOp, Expr, Literal, Node, UnaryOp};

/// Formats the WHERE clause of `SELECT * FROM t WHERE {predicate}`.
fn where_sql(predicate: &str) -> String {
    one_line(&format!("SELECT * FROM t WHERE {predicate}"))
        .trim_start_matches("SELECT * FROM t WHERE ")
        .to_string()
}

fn where_expr(predicate: &str) -> Expr {
    parse_query(&format!("SELECT * FROM t WHERE {predicate}"))
        .select
        .where_clause
        .unwrap()
}

// ===================================================================
// Precedence
// ===================================================================

#[test]
fn multiplication_binds_tighter() {
    let expr = where_expr("a + b * c = 1");
    let Expr::Binary { left, op, .. } = expr else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Eq);
    assert!(matches!(
        *left,
        Expr::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

#[test]
fn and_binds_tighter_than_or() {
    let expr = where_expr("a = 1 OR b = 2 AND c = 3");
    assert!(matches!(
        expr,
        Expr::Binary {
            op: BinaryOp::Or,
            ..
        }
    ));
}

#[test]
fn not_applies_to_comparison() {
    let expr = where_expr("NOT a = 1 AND b");
    let Expr::Binary { left, op, .. } = expr else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(
        *left,
        Expr::Unary {
            op: UnaryOp::Not,
            ..
        }
    ));
}

#[test]
fn parentheses_kept() {
    assert_eq!(where_sql("(a + b) * c > 0"), "(a + b) * c > 0");
    assert_eq!(where_sql("a - (b - c) = 0"), "a - (b - c) = 0");
    assert_eq!(where_sql("(a = 1 OR b = 2) AND c = 3"), "(a = 1 OR b = 2) AND c = 3");
}

#[test]
fn redundant_parentheses_kept_as_written() {
    assert_eq!(where_sql("(a * b) + c = 1"), "(a * b) + c = 1");
}

#[test]
fn negative_numbers() {
    assert_eq!(where_sql("a > -1"), "a > -1");
    assert_eq!(where_sql("a = -b * 2"), "a = -b * 2");
    assert_eq!(where_sql("a = -1.5"), "a = -1.5");
}

#[test]
fn string_concat() {
    assert_eq!(where_sql("a || 'x' = 'ax'"), "a || 'x' = 'ax'");
}

// ===================================================================
// Predicates
// ===================================================================

#[test]
fn is_null() {
    assert!(matches!(
        where_expr("x IS NULL"),
        Expr::IsNull { negated: false, .. }
    ));
    assert!(matches!(
        where_expr("x IS NOT NULL"),
        Expr::IsNull { negated: true, .. }
    ));
    round_trip("SELECT * FROM t WHERE x IS NOT NULL");
}

#[test]
fn between() {
    let Expr::Between {
        negated, low, high, ..
    } = where_expr("x BETWEEN 1 AND 10")
    else {
        panic!("Expected BETWEEN");
    };
    assert!(!negated);
    assert_eq!(*low, Expr::Literal(Literal::Integer(1)));
    assert_eq!(*high, Expr::Literal(Literal::Integer(10)));
}

#[test]
fn between_inside_and() {
    let expr = where_expr("x BETWEEN 1 AND 10 AND y = 2");
    assert!(matches!(
        expr,
        Expr::Binary {
            op: BinaryOp::And,
            ..
        }
    ));
    assert_eq!(
        where_sql("x BETWEEN 1 AND 10 AND y = 2"),
        "x BETWEEN 1 AND 10 AND y = 2"
    );
}

#[test]
fn not_between() {
    assert!(matches!(
        where_expr("x NOT BETWEEN 1 AND 10"),
        Expr::Between { negated: true, .. }
    ));
    round_trip("SELECT * FROM t WHERE x NOT BETWEEN 1 AND 10");
}

#[test]
fn in_list() {
    let Expr::In { list, negated, .. } = where_expr("x IN (1, 2, 3)") else {
        panic!("Expected IN");
    };
    assert!(!negated);
    assert_eq!(list.len(), 3);
    assert_eq!(where_sql("x NOT IN ('a', 'b')"), "x NOT IN ('a', 'b')");
}

#[test]
fn like() {
    assert_eq!(where_sql("name LIKE 'a%'"), "name LIKE 'a%'");
    assert_eq!(where_sql("name NOT LIKE 'a%'"), "name NOT LIKE 'a%'");
}

// ===================================================================
// CASE / CAST
// ===================================================================

#[test]
fn case_searched() {
    assert_eq!(
        one_line("SELECT CASE WHEN x > 0 THEN 'pos' WHEN x < 0 THEN 'neg' ELSE 'zero' END FROM t"),
        "SELECT CASE WHEN x > 0 THEN 'pos' WHEN x < 0 THEN 'neg' ELSE 'zero' END FROM t"
    );
}

#[test]
fn case_simple() {
    let query = parse_query("SELECT CASE x WHEN 1 THEN 'one' END FROM t");
    assert!(matches!(
        &query.select.columns[0].expr,
        Expr::Case {
            operand: Some(_),
            else_clause: None,
            ..
        }
    ));
    round_trip("SELECT CASE x WHEN 1 THEN 'one' END FROM t");
}

#[test]
fn cast() {
    assert_eq!(
        one_line("SELECT CAST(x AS Nullable(Decimal(10, 2))) FROM t"),
        "SELECT CAST(x AS Nullable(Decimal(10, 2))) FROM t"
    );
}

// ===================================================================
// Tuples, arrays, functions
// ===================================================================

#[test]
fn tuples_and_arrays() {
    assert_eq!(
        one_line("SELECT (1, 'a'), [1, 2, 3], [], () FROM t"),
        "SELECT (1, 'a'), [1, 2, 3], [], () FROM t"
    );
}

#[test]
fn function_spelled_like_keyword() {
    assert_eq!(
        one_line("SELECT if(a > 1, 'x', 'y') FROM t"),
        "SELECT if(a > 1, 'x', 'y') FROM t"
    );
}

#[test]
fn count_distinct() {
    assert_eq!(
        one_line("SELECT count(DISTINCT user_id) FROM t"),
        "SELECT count(DISTINCT user_id) FROM t"
    );
}

#[test]
fn subquery_in_where() {
    round_trip("SELECT * FROM t WHERE id IN (SELECT id FROM other WHERE x = 1)");
    assert_eq!(
        where_sql("id NOT IN (SELECT id FROM other)"),
        "id NOT IN (SELECT id FROM other)"
    );
}

#[test]
fn in_subquery_is_a_single_operand() {
    let Expr::In { list, negated, .. } = where_expr("id IN (SELECT id FROM other)") else {
        panic!("Expected IN predicate");
    };
    assert!(!negated);
    assert_eq!(list.len(), 1);
    assert!(matches!(list[0], Expr::Subquery(_)));
}

#[test]
fn in_list_with_parenthesized_subquery_is_stable() {
    assert_eq!(
        where_sql("id IN ((SELECT id FROM other))"),
        "id IN (SELECT id FROM other)"
    );
}

#[test]
fn qualified_columns_and_wildcards() {
    assert_eq!(
        one_line("SELECT t.*, t.a FROM db.t AS t"),
        "SELECT t.*, t.a FROM db.t AS t"
    );
}

#[test]
fn output_options() {
    let query = parse_query("SELECT 1 INTO OUTFILE 'x.tsv' FORMAT TabSeparated");
    assert_eq!(query.output.out_file.as_deref(), Some("x.tsv"));
    assert_eq!(query.output.format.as_deref(), Some("TabSeparated"));
    assert_eq!(
        parse("SELECT 1 INTO OUTFILE 'x.tsv' FORMAT TabSeparated").to_sql(),
        "SELECT 1\nINTO OUTFILE 'x.tsv'\nFORMAT TabSeparated"
    );
}

#[test]
fn round_trips() {
    round_trip("SELECT a + b * c - d / e % f FROM t");
    round_trip("SELECT -(a + b), NOT (a AND b) FROM t");
    round_trip("SELECT * FROM t WHERE NOT a = 1 OR b IS NULL AND c LIKE 'x'");
    round_trip("SELECT * FROM t ORDER BY a DESC NULLS LAST, b LIMIT 5 OFFSET 10");
}
