//! Abstract Syntax Tree (AST) types for DDL statements.
//!
//! Every type implements [`Node`]: it can report a structural identity,
//! list its children and format itself back to SQL.

mod create;
mod expression;
mod node;
mod source;
mod statement;
mod storage;
mod types;

pub use create::{
    AttachError, CreateKind, CreatePart, CreateSlot, CreateStatement, CreateVerb, QualifiedName,
    Shape,
};
pub use expression::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp};
pub use node::{Children, Node, Part};
pub use source::{
    KeyValueFunction, KeyValueList, KeyValuePair, SourceClause, SourcePart, SourceSlot,
    HIDDEN_PASSWORD,
};
pub use statement::{
    JoinClause, JoinType, NullOrdering, OrderBy, OrderDirection, OutputOptions, QueryStatement,
    SelectColumn, SelectStatement, Statement, TableRef,
};
pub use storage::{Setting, SettingsList, StorageClause, StoragePart, StorageSlot};
pub use types::{ColumnDef, ColumnDefault, ColumnList, DataType, DefaultKind, TypeArg};
