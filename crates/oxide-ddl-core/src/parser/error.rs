//! Parser error types.

use thiserror::Error;

use crate::lexer::{Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at position {}..{}", .span.start, .span.end)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    ///
    /// A lexer error token carries its own message, which is used instead.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        let message = match &found {
            TokenKind::Error(message) => message.clone(),
            TokenKind::Eof => format!("Unexpected end of input: expected {expected}"),
            other => format!("Unexpected token: expected {expected}, found {other:?}"),
        };
        Self {
            message,
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        Self::unexpected(expected, TokenKind::Eof, span)
    }

    /// Renders the error with a 1-based line and column into `source`.
    #[must_use]
    pub fn describe(&self, source: &str) -> String {
        let (line, column) = self.span.line_col(source);
        format!("{} (line {line}, column {column})", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ParseError::new("bad", Span::new(3, 5));
        assert_eq!(err.to_string(), "bad at position 3..5");
    }

    #[test]
    fn test_unexpected() {
        let err = ParseError::unexpected("identifier", TokenKind::Comma, Span::new(0, 1));
        assert_eq!(
            err.message,
            "Unexpected token: expected identifier, found Comma"
        );
        assert_eq!(err.expected.as_deref(), Some("identifier"));
        assert_eq!(err.found, Some(TokenKind::Comma));
    }

    #[test]
    fn test_lexer_error_message_is_kept() {
        let err = ParseError::unexpected(
            "expression",
            TokenKind::Error(String::from("Unterminated string literal")),
            Span::new(4, 8),
        );
        assert_eq!(err.message, "Unterminated string literal");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = ParseError::unexpected_eof("RightParen", Span::new(9, 9));
        assert_eq!(err.message, "Unexpected end of input: expected RightParen");
        assert_eq!(err.found, Some(TokenKind::Eof));
    }

    #[test]
    fn test_describe() {
        let sql = "CREATE TABLE t\n(x Int32,";
        let err = ParseError::unexpected_eof("identifier", Span::new(24, 24));
        assert_eq!(
            err.describe(sql),
            "Unexpected end of input: expected identifier (line 2, column 10)"
        );
    }
}
