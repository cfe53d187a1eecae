//! CREATE / ATTACH statements.

use core::fmt;

use thiserror::Error;
use tracing::debug;

use super::node::{Children, Node, Part};
use super::source::SourceClause;
use super::statement::{OutputOptions, SelectStatement};
use super::storage::StorageClause;
use super::types::ColumnList;
use crate::dialect::quote_name;
use crate::format::{FormatFrame, FormatSettings, FormatState};

/// Whether the statement creates a new object or attaches an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateVerb {
    /// `CREATE`.
    #[default]
    Create,
    /// `ATTACH`.
    Attach,
}

impl CreateVerb {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Attach => "ATTACH",
        }
    }

    const fn identity(self) -> &'static str {
        match self {
            Self::Create => "CreateQuery",
            Self::Attach => "AttachQuery",
        }
    }
}

/// An optionally database-qualified object name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Database, when given.
    pub database: Option<String>,
    /// Object name.
    pub name: String,
}

impl QualifiedName {
    /// An unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            database: None,
            name: name.into(),
        }
    }

    /// A `database.name` pair.
    #[must_use]
    pub fn qualified(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: Some(database.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(database) = &self.database {
            write!(f, "{}.", quote_name(database))?;
        }
        f.write_str(&quote_name(&self.name))
    }
}

/// The kind of object a statement creates, with the scalars that only
/// make sense for that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateKind {
    /// `CREATE DATABASE`.
    Database {
        /// Database name.
        name: String,
    },
    /// `CREATE TABLE`.
    Table {
        /// Table name.
        name: QualifiedName,
        /// `OR REPLACE`.
        replace: bool,
        /// `TEMPORARY`.
        temporary: bool,
        /// `AS db.table`: copy the structure of another table.
        as_table: Option<QualifiedName>,
    },
    /// `CREATE VIEW`.
    View {
        /// View name.
        name: QualifiedName,
        /// `OR REPLACE`.
        replace: bool,
    },
    /// `CREATE MATERIALIZED VIEW`.
    MaterializedView {
        /// View name.
        name: QualifiedName,
        /// `OR REPLACE`.
        replace: bool,
        /// `TO db.table`: table the view writes into.
        to: Option<QualifiedName>,
        /// `POPULATE`.
        populate: bool,
    },
    /// `CREATE DICTIONARY`.
    Dictionary {
        /// Dictionary name.
        name: QualifiedName,
    },
}

impl CreateKind {
    /// A plain `CREATE DATABASE name`.
    #[must_use]
    pub fn database(name: impl Into<String>) -> Self {
        Self::Database { name: name.into() }
    }

    /// A plain `CREATE TABLE name`.
    #[must_use]
    pub const fn table(name: QualifiedName) -> Self {
        Self::Table {
            name,
            replace: false,
            temporary: false,
            as_table: None,
        }
    }

    /// A plain `CREATE VIEW name`.
    #[must_use]
    pub const fn view(name: QualifiedName) -> Self {
        Self::View {
            name,
            replace: false,
        }
    }

    /// A plain `CREATE MATERIALIZED VIEW name`.
    #[must_use]
    pub const fn materialized_view(name: QualifiedName) -> Self {
        Self::MaterializedView {
            name,
            replace: false,
            to: None,
            populate: false,
        }
    }

    /// A plain `CREATE DICTIONARY name`.
    #[must_use]
    pub const fn dictionary(name: QualifiedName) -> Self {
        Self::Dictionary { name }
    }

    /// The discriminant.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Database { .. } => Shape::Database,
            Self::Table { .. } => Shape::Table,
            Self::View { .. } => Shape::View,
            Self::MaterializedView { .. } => Shape::MaterializedView,
            Self::Dictionary { .. } => Shape::Dictionary,
        }
    }

    /// The object name, for every shape but `Database`.
    #[must_use]
    pub const fn object_name(&self) -> Option<&QualifiedName> {
        match self {
            Self::Database { .. } => None,
            Self::Table { name, .. }
            | Self::View { name, .. }
            | Self::MaterializedView { name, .. }
            | Self::Dictionary { name } => Some(name),
        }
    }

    fn object_name_mut(&mut self) -> Option<&mut QualifiedName> {
        match self {
            Self::Database { .. } => None,
            Self::Table { name, .. }
            | Self::View { name, .. }
            | Self::MaterializedView { name, .. }
            | Self::Dictionary { name } => Some(name),
        }
    }

    const fn replace(&self) -> bool {
        match self {
            Self::Table { replace, .. }
            | Self::View { replace, .. }
            | Self::MaterializedView { replace, .. } => *replace,
            Self::Database { .. } | Self::Dictionary { .. } => false,
        }
    }
}

/// Statement shape: which kind of object is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Database.
    Database,
    /// Table.
    Table,
    /// View.
    View,
    /// Materialized view.
    MaterializedView,
    /// Dictionary.
    Dictionary,
}

impl Shape {
    /// The object keyword(s).
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Database => "DATABASE",
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::MaterializedView => "MATERIALIZED VIEW",
            Self::Dictionary => "DICTIONARY",
        }
    }

    /// Returns true if statements of this shape can hold `slot`.
    #[must_use]
    pub const fn accepts(&self, slot: CreateSlot) -> bool {
        matches!(
            (self, slot),
            (Self::Database, CreateSlot::Storage)
                | (
                    Self::Table,
                    CreateSlot::Columns | CreateSlot::Storage | CreateSlot::Select
                )
                | (Self::View, CreateSlot::Columns | CreateSlot::Select)
                | (
                    Self::MaterializedView,
                    CreateSlot::Columns | CreateSlot::Storage | CreateSlot::Select
                )
                | (Self::Dictionary, CreateSlot::Columns | CreateSlot::Source)
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Slot of a [`CreatePart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreateSlot {
    /// Column list.
    Columns,
    /// Storage definition.
    Storage,
    /// `AS SELECT` body.
    Select,
    /// Dictionary source definition.
    Source,
}

impl fmt::Display for CreateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Columns => "column list",
            Self::Storage => "storage",
            Self::Select => "select",
            Self::Source => "source",
        })
    }
}

/// A sub-node of a CREATE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatePart {
    /// Column list.
    Columns(ColumnList),
    /// Storage definition.
    Storage(StorageClause),
    /// `AS SELECT` body.
    Select(Box<SelectStatement>),
    /// Dictionary source definition.
    Source(SourceClause),
}

impl Part for CreatePart {
    type Slot = CreateSlot;

    fn slot(&self) -> CreateSlot {
        match self {
            Self::Columns(_) => CreateSlot::Columns,
            Self::Storage(_) => CreateSlot::Storage,
            Self::Select(_) => CreateSlot::Select,
            Self::Source(_) => CreateSlot::Source,
        }
    }

    fn as_node(&self) -> &dyn Node {
        match self {
            Self::Columns(columns) => columns,
            Self::Storage(storage) => storage,
            Self::Select(select) => select.as_ref(),
            Self::Source(source) => source,
        }
    }
}

/// A sub-node was attached to a statement whose shape cannot hold it.
#[derive(Debug, Error)]
#[error("{shape} statements cannot hold a {} clause", .part.slot())]
pub struct AttachError {
    /// The statement's shape.
    pub shape: Shape,
    /// The rejected part, handed back to the caller.
    pub part: CreatePart,
}

/// A CREATE or ATTACH statement for a database, table, view, materialized
/// view or dictionary.
///
/// The shape is the explicit [`CreateKind`]; sub-nodes live in one keyed
/// container and the typed accessors are views over it. Sub-nodes the
/// shape cannot hold are rejected by [`CreateStatement::attach`].
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStatement {
    /// CREATE or ATTACH.
    pub verb: CreateVerb,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// `ON CLUSTER` target.
    pub cluster: Option<String>,
    /// `INTO OUTFILE` / `FORMAT`.
    pub output: OutputOptions,
    kind: CreateKind,
    parts: Children<CreatePart>,
}

impl CreateStatement {
    /// Creates a `CREATE` statement of the given kind with no sub-nodes.
    #[must_use]
    pub fn new(kind: CreateKind) -> Self {
        Self {
            verb: CreateVerb::Create,
            if_not_exists: false,
            cluster: None,
            output: OutputOptions::new(),
            kind,
            parts: Children::new(),
        }
    }

    /// Sets the verb.
    #[must_use]
    pub fn with_verb(mut self, verb: CreateVerb) -> Self {
        self.verb = verb;
        self
    }

    /// Sets `IF NOT EXISTS`.
    #[must_use]
    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    /// Sets the `ON CLUSTER` target.
    #[must_use]
    pub fn on_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    /// Attaches `part` and returns `self`, for building statements in
    /// one expression.
    ///
    /// # Errors
    ///
    /// Returns an [`AttachError`] if the shape cannot hold `part`.
    pub fn with_part(mut self, part: CreatePart) -> Result<Self, AttachError> {
        self.attach(part)?;
        Ok(self)
    }

    /// The statement's kind.
    #[must_use]
    pub const fn kind(&self) -> &CreateKind {
        &self.kind
    }

    /// The statement's shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.kind.shape()
    }

    /// Replaces the kind and returns the sub-nodes the new kind cannot hold.
    pub fn set_kind(&mut self, kind: CreateKind) -> Vec<CreatePart> {
        let shape = kind.shape();
        self.kind = kind;
        self.parts.remove_where(|part| !shape.accepts(part.slot()))
    }

    /// The database: the created database itself for the `Database` shape,
    /// the qualifier of the object name otherwise.
    #[must_use]
    pub fn database(&self) -> Option<&str> {
        match &self.kind {
            CreateKind::Database { name } => Some(name),
            other => other
                .object_name()
                .and_then(|name| name.database.as_deref()),
        }
    }

    /// The object name; empty for the `Database` shape.
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.object_name().map_or("", |name| name.name.as_str())
    }

    /// Replaces the database, as [`CreateStatement::database`] defines it.
    pub fn set_database(&mut self, database: impl Into<String>) {
        let database = database.into();
        match &mut self.kind {
            CreateKind::Database { name } => *name = database,
            other => {
                if let Some(name) = other.object_name_mut() {
                    name.database = Some(database);
                }
            }
        }
    }

    /// Sets a sub-node, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns an [`AttachError`] carrying `part` back if the statement's
    /// shape cannot hold it.
    pub fn attach(&mut self, part: CreatePart) -> Result<Option<CreatePart>, AttachError> {
        let shape = self.shape();
        if !shape.accepts(part.slot()) {
            return Err(AttachError { shape, part });
        }
        Ok(self.parts.attach(part))
    }

    /// Removes a sub-node.
    pub fn detach(&mut self, slot: CreateSlot) -> Option<CreatePart> {
        self.parts.detach(slot)
    }

    /// The present sub-nodes.
    #[must_use]
    pub const fn parts(&self) -> &Children<CreatePart> {
        &self.parts
    }

    /// The column list.
    #[must_use]
    pub fn columns(&self) -> Option<&ColumnList> {
        match self.parts.get(CreateSlot::Columns) {
            Some(CreatePart::Columns(columns)) => Some(columns),
            _ => None,
        }
    }

    /// The storage definition.
    #[must_use]
    pub fn storage(&self) -> Option<&StorageClause> {
        match self.parts.get(CreateSlot::Storage) {
            Some(CreatePart::Storage(storage)) => Some(storage),
            _ => None,
        }
    }

    /// The storage definition, mutably.
    pub fn storage_mut(&mut self) -> Option<&mut StorageClause> {
        match self.parts.get_mut(CreateSlot::Storage) {
            Some(CreatePart::Storage(storage)) => Some(storage),
            _ => None,
        }
    }

    /// The `AS SELECT` body.
    #[must_use]
    pub fn select(&self) -> Option<&SelectStatement> {
        match self.parts.get(CreateSlot::Select) {
            Some(CreatePart::Select(select)) => Some(select.as_ref()),
            _ => None,
        }
    }

    /// The dictionary source definition.
    #[must_use]
    pub fn source(&self) -> Option<&SourceClause> {
        match self.parts.get(CreateSlot::Source) {
            Some(CreatePart::Source(source)) => Some(source),
            _ => None,
        }
    }

    /// Returns a copy to run on a single node: the `ON CLUSTER` target is
    /// dropped and the database replaced by `new_database`.
    #[must_use]
    pub fn rewrite_without_on_cluster(&self, new_database: &str) -> Self {
        let mut rewritten = self.clone();
        let cluster = rewritten.cluster.take();
        rewritten.set_database(new_database);
        debug!(
            cluster = cluster.as_deref().unwrap_or(""),
            database = new_database,
            name = rewritten.name(),
            "rewrote statement without ON CLUSTER"
        );
        rewritten
    }

    fn write_cluster(&self, settings: &FormatSettings, out: &mut String) {
        if let Some(cluster) = &self.cluster {
            out.push(' ');
            settings.write_keyword(out, "ON CLUSTER");
            out.push(' ');
            out.push_str(&quote_name(cluster));
        }
    }

    fn write_part(
        &self,
        slot: CreateSlot,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        if let Some(part) = self.parts.get(slot) {
            part.as_node().format(settings, state, frame, out);
        }
    }

    /// Dictionaries are always written as `CREATE DICTIONARY`, without a
    /// cluster qualifier.
    fn write_header(&self, settings: &FormatSettings, out: &mut String) {
        let dictionary = self.shape() == Shape::Dictionary;
        let verb = if dictionary {
            CreateVerb::Create
        } else {
            self.verb
        };
        settings.write_keyword(out, verb.as_str());
        if self.kind.replace() {
            out.push(' ');
            settings.write_keyword(out, "OR REPLACE");
        }
        if matches!(self.kind, CreateKind::Table { temporary: true, .. }) {
            out.push(' ');
            settings.write_keyword(out, "TEMPORARY");
        }
        out.push(' ');
        settings.write_keyword(out, self.shape().keyword());
        if self.if_not_exists {
            out.push(' ');
            settings.write_keyword(out, "IF NOT EXISTS");
        }
        out.push(' ');
        match &self.kind {
            CreateKind::Database { name } => out.push_str(&quote_name(name)),
            other => {
                if let Some(name) = other.object_name() {
                    out.push_str(&name.to_string());
                }
            }
        }
        if !dictionary {
            self.write_cluster(settings, out);
        }
    }
}

impl Node for CreateStatement {
    fn identity(&self, delimiter: char) -> String {
        format!(
            "{}{delimiter}{}{delimiter}{}",
            self.verb.identity(),
            self.database().unwrap_or(""),
            self.name()
        )
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.parts.as_nodes()
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        self.write_header(settings, out);

        match &self.kind {
            CreateKind::Database { .. } => {
                self.write_part(CreateSlot::Storage, settings, state, frame, out);
            }
            CreateKind::Dictionary { .. } => {
                self.write_part(CreateSlot::Columns, settings, state, frame, out);
                self.write_part(CreateSlot::Source, settings, state, frame, out);
            }
            CreateKind::Table { as_table, .. } => {
                if let Some(as_table) = as_table {
                    out.push(' ');
                    settings.write_keyword(out, "AS");
                    out.push(' ');
                    out.push_str(&as_table.to_string());
                }
                self.write_table_like_body(false, settings, state, frame, out);
            }
            CreateKind::View { .. } => {
                self.write_table_like_body(false, settings, state, frame, out);
            }
            CreateKind::MaterializedView { to, populate, .. } => {
                if let Some(to) = to {
                    out.push(' ');
                    settings.write_keyword(out, "TO");
                    out.push(' ');
                    out.push_str(&to.to_string());
                }
                self.write_table_like_body(*populate, settings, state, frame, out);
            }
        }

        self.output.format_into(settings, out);
    }
}

impl CreateStatement {
    /// Columns, storage, `POPULATE` and the `AS SELECT` body, in that order.
    fn write_table_like_body(
        &self,
        populate: bool,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        self.write_part(CreateSlot::Columns, settings, state, frame, out);
        self.write_part(CreateSlot::Storage, settings, state, frame, out);
        if populate {
            out.push(' ');
            settings.write_keyword(out, "POPULATE");
        }
        if let Some(select) = self.select() {
            out.push(' ');
            settings.write_keyword(out, "AS");
            out.push_str(settings.nl_or_ws());
            select.format(settings, state, frame, out);
        }
    }
}
