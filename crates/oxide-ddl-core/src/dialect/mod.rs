//! SQL Dialect support.
//!
//! Identifier and string quoting rules differ between databases. The
//! formatter goes through this trait for every raw name and string literal
//! it emits, so the canonical text always lexes back to the same tokens.

mod clickhouse;

pub use clickhouse::ClickHouseDialect;

use crate::lexer::Keyword;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns true if `word` is reserved and must be quoted when used as
    /// a name.
    fn is_reserved(&self, word: &str) -> bool {
        Keyword::from_str(word).is_some()
    }

    /// Returns true if `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
    fn is_word(&self, name: &str) -> bool {
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Returns true if `name` cannot be written bare.
    ///
    /// A bare name is a word (see [`Dialect::is_word`]) that is not reserved.
    fn needs_quoting(&self, name: &str) -> bool {
        !self.is_word(name) || self.is_reserved(name)
    }

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(quote);
        for c in name.chars() {
            if c == quote {
                quoted.push(quote);
            }
            quoted.push(c);
        }
        quoted.push(quote);
        quoted
    }

    /// Quotes an identifier only when it cannot be written bare.
    fn quote_identifier_if_needed(&self, name: &str) -> String {
        if self.needs_quoting(name) {
            self.quote_identifier(name)
        } else {
            String::from(name)
        }
    }

    /// Quotes a string literal. Backslashes, single quotes and control
    /// characters with a backslash sequence are escaped.
    fn quote_string(&self, value: &str) -> String {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('\'');
        for c in value.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '\'' => quoted.push_str("''"),
                '\n' => quoted.push_str("\\n"),
                '\t' => quoted.push_str("\\t"),
                '\r' => quoted.push_str("\\r"),
                '\0' => quoted.push_str("\\0"),
                '\u{8}' => quoted.push_str("\\b"),
                '\u{c}' => quoted.push_str("\\f"),
                _ => quoted.push(c),
            }
        }
        quoted.push('\'');
        quoted
    }
}

/// Quotes `name` with the dialect used by the formatter.
#[must_use]
pub fn quote_name(name: &str) -> String {
    ClickHouseDialect::new().quote_identifier_if_needed(name)
}

/// Quotes `name` unless it is a word. For positions where keywords are
/// accepted as names: engines, dictionary sources and layouts, and the
/// keys of their arguments.
#[must_use]
pub fn quote_word(name: &str) -> String {
    let dialect = ClickHouseDialect::new();
    if dialect.is_word(name) {
        String::from(name)
    } else {
        dialect.quote_identifier(name)
    }
}

/// Quotes a function name in an expression. Keywords may name functions,
/// e.g. `if(c, a, b)`, except those that start an expression of their own.
#[must_use]
pub fn quote_function_name(name: &str) -> String {
    const CLAIMED: [&str; 7] = ["CASE", "CAST", "NOT", "NULL", "TRUE", "FALSE", "DISTINCT"];
    if CLAIMED.iter().any(|k| k.eq_ignore_ascii_case(name)) {
        ClickHouseDialect::new().quote_identifier(name)
    } else {
        quote_word(name)
    }
}

/// Quotes `value` as a string literal with the dialect used by the formatter.
#[must_use]
pub fn quote_string(value: &str) -> String {
    ClickHouseDialect::new().quote_string(value)
}
