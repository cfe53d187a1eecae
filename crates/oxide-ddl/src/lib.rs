//! Command-line formatter for CREATE / ATTACH DDL.
//!
//! `oxide-ddl` reads DDL scripts (files or standard input), parses them with
//! `oxide-ddl-core` and prints them back in canonical form. It can also
//! verify that formatting is stable, rewrite distributed statements for a
//! single node, and dump node trees.
//!
//! # CLI Usage
//!
//! ```bash
//! # Canonical multi-line text
//! oxide-ddl fmt schema.sql
//!
//! # One statement per line, keywords highlighted
//! oxide-ddl --one-line --highlight fmt schema.sql
//!
//! # Fail if format -> parse -> format changes anything
//! oxide-ddl check schema.sql
//!
//! # Drop ON CLUSTER and retarget at a local database
//! oxide-ddl rewrite --database shard_1 < schema.sql
//!
//! # Node identities as JSON
//! oxide-ddl tree --json schema.sql
//! ```

pub mod commands;
pub mod error;
pub mod tree;

pub use commands::{
    check_inputs, format_inputs, read_inputs, rewrite_inputs, tree_inputs, Input, Rendered,
};
pub use error::{CliError, Result};
pub use tree::TreeNode;
