//! # oxide-ddl-core
//!
//! AST, formatter and parser for `CREATE` / `ATTACH` DDL statements:
//! databases, tables, views, materialized views and dictionaries.
//!
//! This crate provides:
//! - A node model where every optional sub-clause lives in one keyed
//!   container, with typed accessors as views over it
//! - A formatter producing canonical SQL in one-line or multi-line layout,
//!   with optional keyword highlighting
//! - A hand-written recursive descent parser with Pratt expression parsing
//!   that reads back everything the formatter writes
//!
//! ## Round trip
//!
//! ```rust
//! use oxide_ddl_core::{parse_statement, Node};
//!
//! let stmt = parse_statement(
//!     "create table db1.t (x Int32) engine = MergeTree() order by x",
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     stmt.to_sql(),
//!     "CREATE TABLE db1.t\n(\n    x Int32\n)\nENGINE = MergeTree()\nORDER BY x"
//! );
//! ```
//!
//! ## Running a statement on a single node
//!
//! ```rust
//! use oxide_ddl_core::{parse_statement, Node};
//!
//! let stmt = parse_statement("CREATE DATABASE IF NOT EXISTS db1 ON CLUSTER main").unwrap();
//! let local = stmt.as_create().unwrap().rewrite_without_on_cluster("db2");
//!
//! assert_eq!(local.to_sql(), "CREATE DATABASE IF NOT EXISTS db2");
//! ```

pub mod ast;
pub mod dialect;
pub mod format;
pub mod lexer;
pub mod parser;

pub use ast::{CreateStatement, Expr, Node, Statement};
pub use format::{FormatSettings, Layout};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_statement, parse_statements, ParseError, Parser};
