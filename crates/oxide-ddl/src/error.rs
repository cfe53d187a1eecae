//! Error types for the command-line tool.

use oxide_ddl_core::ParseError;

/// Errors that can occur while reading, parsing or re-formatting input.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input could not be read.
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// The input name.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An input is not valid DDL.
    #[error("Failed to parse '{path}': {message}")]
    Parse {
        /// The input name.
        path: String,
        /// The error with its line and column.
        message: String,
        /// The parser error.
        #[source]
        source: ParseError,
    },

    /// Formatted output did not parse back.
    #[error("Statement {index} in '{path}' does not parse after formatting: {message}")]
    Reparse {
        /// The input name.
        path: String,
        /// 1-based statement position in the input.
        index: usize,
        /// The error with its line and column in the formatted text.
        message: String,
    },

    /// Formatting a statement twice gave different text.
    #[error("Statement {index} in '{path}' is not stable:\n  first:  {first}\n  second: {second}")]
    RoundTrip {
        /// The input name.
        path: String,
        /// 1-based statement position in the input.
        index: usize,
        /// Text of the first formatting pass.
        first: String,
        /// Text of the second formatting pass.
        second: String,
    },

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
