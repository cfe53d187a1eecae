#![allow(dead_code)]

use oxide_ddl_core::ast::{CreateStatement, Node, QueryStatement, Statement};
use oxide_ddl_core::format::{strip_highlighting, FormatSettings};
use oxide_ddl_core::{parse_statement, ParseError};

pub fn parse(sql: &str) -> Statement {
    parse_statement(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_statement(sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_create(sql: &str) -> CreateStatement {
    match parse(sql) {
        Statement::Create(c) => *c,
        other => panic!("Expected CREATE, got {other:?}"),
    }
}

pub fn parse_query(sql: &str) -> QueryStatement {
    match parse(sql) {
        Statement::Select(q) => q,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

/// Formats `sql` on one line.
pub fn one_line(sql: &str) -> String {
    parse(sql).to_sql_with(&FormatSettings::one_line())
}

/// Verifies that formatting is a fixed point in both layouts:
/// format(parse(format(parse(sql)))) == format(parse(sql)).
///
/// Also checks that highlighted output, with escapes removed, is the
/// plain output.
pub fn round_trip(sql: &str) {
    for settings in [FormatSettings::new(), FormatSettings::one_line()] {
        let ast1 = parse(sql);
        let rendered1 = ast1.to_sql_with(&settings);
        let ast2 = parse(&rendered1);
        let rendered2 = ast2.to_sql_with(&settings);
        assert_eq!(
            rendered1, rendered2,
            "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
        );

        let highlighted = ast1.to_sql_with(&settings.with_highlight(true));
        assert_eq!(strip_highlighting(&highlighted), rendered1);
    }
}

/// Formats a statement built in code, in both layouts, and verifies the
/// text parses back to a statement that formats identically. Returns the
/// one-line text.
pub fn round_trip_built(create: &CreateStatement) -> String {
    let mut rendered = String::new();
    for settings in [FormatSettings::new(), FormatSettings::one_line()] {
        rendered = create.to_sql_with(&settings);
        let reparsed = parse_statement(&rendered)
            .unwrap_or_else(|e| panic!("Formatted text does not parse: {rendered}\nError: {e:?}"));
        assert_eq!(reparsed.to_sql_with(&settings), rendered);
    }
    rendered
}
