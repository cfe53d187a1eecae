//! ClickHouse SQL dialect.

use super::Dialect;

/// The ClickHouse dialect: backtick-quoted identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClickHouseDialect;

impl ClickHouseDialect {
    /// Creates a new ClickHouse dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for ClickHouseDialect {
    fn name(&self) -> &'static str {
        "clickhouse"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }
}
