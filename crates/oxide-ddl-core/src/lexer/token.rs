//! Token types for the DDL lexer.

use super::Span;

/// Reserved SQL keywords.
///
/// Words that only carry meaning inside one clause (`KEY`, `FORMAT`,
/// `SOURCE`, `LIFETIME`, `LAYOUT`, `USER`, ...) are deliberately not
/// keywords: they lex as identifiers so they stay usable as column names,
/// and the parser matches them by text where the grammar expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Order,
    By,
    Group,
    Having,
    Limit,
    Offset,
    Distinct,
    All,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,
    Using,

    // Statement verbs and objects
    Create,
    Attach,
    Table,
    View,
    Materialized,
    Database,
    Dictionary,
    Temporary,
    Replace,
    If,
    Exists,
    Cluster,
    To,
    Populate,

    // Storage clauses
    Engine,
    Partition,
    Primary,
    Sample,
    Settings,
    Default,

    // Output options
    Into,
    Outfile,

    // Logical operators and predicates
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Is,
    Null,
    True,
    False,

    // Ordering
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Expressions
    As,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "GROUP" => Some(Self::Group),
            "HAVING" => Some(Self::Having),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "JOIN" => Some(Self::Join),
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "OUTER" => Some(Self::Outer),
            "CROSS" => Some(Self::Cross),
            "ON" => Some(Self::On),
            "USING" => Some(Self::Using),
            "CREATE" => Some(Self::Create),
            "ATTACH" => Some(Self::Attach),
            "TABLE" => Some(Self::Table),
            "VIEW" => Some(Self::View),
            "MATERIALIZED" => Some(Self::Materialized),
            "DATABASE" => Some(Self::Database),
            "DICTIONARY" => Some(Self::Dictionary),
            "TEMPORARY" => Some(Self::Temporary),
            "REPLACE" => Some(Self::Replace),
            "IF" => Some(Self::If),
            "EXISTS" => Some(Self::Exists),
            "CLUSTER" => Some(Self::Cluster),
            "TO" => Some(Self::To),
            "POPULATE" => Some(Self::Populate),
            "ENGINE" => Some(Self::Engine),
            "PARTITION" => Some(Self::Partition),
            "PRIMARY" => Some(Self::Primary),
            "SAMPLE" => Some(Self::Sample),
            "SETTINGS" => Some(Self::Settings),
            "DEFAULT" => Some(Self::Default),
            "INTO" => Some(Self::Into),
            "OUTFILE" => Some(Self::Outfile),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "BETWEEN" => Some(Self::Between),
            "LIKE" => Some(Self::Like),
            "IS" => Some(Self::Is),
            "NULL" => Some(Self::Null),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "NULLS" => Some(Self::Nulls),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            "AS" => Some(Self::As),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "CAST" => Some(Self::Cast),
            _ => None,
        }
    }

    /// Returns the keyword as an upper-case string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Group => "GROUP",
            Self::Having => "HAVING",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Create => "CREATE",
            Self::Attach => "ATTACH",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Materialized => "MATERIALIZED",
            Self::Database => "DATABASE",
            Self::Dictionary => "DICTIONARY",
            Self::Temporary => "TEMPORARY",
            Self::Replace => "REPLACE",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Cluster => "CLUSTER",
            Self::To => "TO",
            Self::Populate => "POPULATE",
            Self::Engine => "ENGINE",
            Self::Partition => "PARTITION",
            Self::Primary => "PRIMARY",
            Self::Sample => "SAMPLE",
            Self::Settings => "SETTINGS",
            Self::Default => "DEFAULT",
            Self::Into => "INTO",
            Self::Outfile => "OUTFILE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::As => "AS",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Float literal (e.g., 3.14)
    Float(f64),
    /// String literal (e.g., 'hello')
    String(String),

    // Identifiers and keywords
    /// Bare or quoted identifier (e.g., `events`, "my table")
    Identifier(String),
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown token
    Error(String),
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token is an identifier spelled `word`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }
}
