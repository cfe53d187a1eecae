//! Tests for layout, indentation and highlighting.

mod common;
use common::*;

use oxide_ddl_core::ast::Node;
use oxide_ddl_core::format::strip_highlighting;
use oxide_ddl_core::{FormatSettings, Layout};

const TABLE: &str = "CREATE TABLE db1.t (x Int32, y String) ENGINE = MergeTree() ORDER BY x";

#[test]
fn default_is_multi_line_plain() {
    let settings = FormatSettings::default();
    assert_eq!(settings, FormatSettings::new());
    assert!(!settings.highlight);
    assert_eq!(settings.layout, Layout::MultiLine);
    assert_eq!(settings.indent_unit, 4);
}

#[test]
fn indent_unit() {
    let settings = FormatSettings::new().with_indent_unit(2);
    assert_eq!(
        parse(TABLE).to_sql_with(&settings),
        "CREATE TABLE db1.t\n(\n  x Int32,\n  y String\n)\nENGINE = MergeTree()\nORDER BY x"
    );
}

#[test]
fn layout_switch() {
    let settings = FormatSettings::new().with_layout(Layout::OneLine);
    assert_eq!(settings, FormatSettings::one_line());
    assert_eq!(
        parse(TABLE).to_sql_with(&settings),
        "CREATE TABLE db1.t (x Int32, y String) ENGINE = MergeTree() ORDER BY x"
    );
}

#[test]
fn one_line_ignores_indent_unit() {
    let settings = FormatSettings::one_line().with_indent_unit(8);
    assert_eq!(
        parse(TABLE).to_sql_with(&settings),
        parse(TABLE).to_sql_with(&FormatSettings::one_line())
    );
}

#[test]
fn highlight_wraps_keywords() {
    let highlighted = parse("CREATE DATABASE db1").to_sql_with(&FormatSettings::new().with_highlight(true));
    assert!(highlighted.contains("\x1b[1mCREATE\x1b[0m"));
    assert!(highlighted.contains("\x1b[1mDATABASE\x1b[0m"));
    assert!(!highlighted.contains("\x1b[1mdb1"));
}

#[test]
fn highlight_stripped_equals_plain() {
    for sql in [
        TABLE,
        "CREATE MATERIALIZED VIEW mv TO target AS SELECT count() FROM src WHERE a IS NOT NULL",
        "CREATE DICTIONARY d (k UInt64) PRIMARY KEY k SOURCE(MYSQL(PORT 1 USER 'u')) LAYOUT(FLAT())",
    ] {
        for settings in [FormatSettings::new(), FormatSettings::one_line()] {
            let statement = parse(sql);
            let plain = statement.to_sql_with(&settings);
            let highlighted = statement.to_sql_with(&settings.with_highlight(true));
            assert_ne!(plain, highlighted);
            assert_eq!(strip_highlighting(&highlighted), plain);
        }
    }
}

#[test]
fn strip_plain_text_is_identity() {
    assert_eq!(strip_highlighting("CREATE TABLE t"), "CREATE TABLE t");
}
