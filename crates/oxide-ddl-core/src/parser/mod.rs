//! SQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing
//! for CREATE / ATTACH statements and the SELECT queries they embed.

mod create;
mod error;
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::Parser;

use crate::ast::Statement;

/// Parses exactly one statement, optionally terminated by `;`.
///
/// # Errors
///
/// Returns a `ParseError` if `sql` is not a single valid statement.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    Parser::new(sql).parse_single()
}

/// Parses a `;`-separated script.
///
/// # Errors
///
/// Returns the first `ParseError` in `sql`.
pub fn parse_statements(sql: &str) -> Result<Vec<Statement>, ParseError> {
    Parser::new(sql).parse_statements()
}
