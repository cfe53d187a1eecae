//! The storage definition of a table-like statement: engine, keys and
//! settings.

use super::expression::{write_list, Expr, FunctionCall, Literal};
use super::node::{Children, Node, Part};
use crate::dialect::{quote_name, quote_word};
use crate::format::{FormatFrame, FormatSettings, FormatState};

/// One `name = value` entry of a SETTINGS clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    /// Setting name.
    pub name: String,
    /// Setting value.
    pub value: Literal,
}

/// The entries of a SETTINGS clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsList {
    /// Entries in the order written.
    pub entries: Vec<Setting>,
}

impl SettingsList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `name = value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Literal) -> Self {
        self.entries.push(Setting {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Literal> {
        self.entries
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.value)
    }
}

impl Node for SettingsList {
    fn identity(&self, _delimiter: char) -> String {
        String::from("set")
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![]
    }

    fn format(
        &self,
        _settings: &FormatSettings,
        _state: &mut FormatState,
        _frame: FormatFrame,
        out: &mut String,
    ) {
        for (i, setting) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&quote_name(&setting.name));
            out.push_str(" = ");
            out.push_str(&setting.value.to_sql());
        }
    }
}

/// Slot of a [`StoragePart`]. Declaration order is emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageSlot {
    /// `ENGINE = ...`
    Engine,
    /// `PARTITION BY ...`
    PartitionBy,
    /// `PRIMARY KEY ...`
    PrimaryKey,
    /// `ORDER BY ...`
    OrderBy,
    /// `SAMPLE BY ...`
    SampleBy,
    /// `SETTINGS ...`
    Settings,
}

impl StorageSlot {
    /// The clause keywords.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Engine => "ENGINE",
            Self::PartitionBy => "PARTITION BY",
            Self::PrimaryKey => "PRIMARY KEY",
            Self::OrderBy => "ORDER BY",
            Self::SampleBy => "SAMPLE BY",
            Self::Settings => "SETTINGS",
        }
    }
}

/// A sub-clause of a storage definition.
#[derive(Debug, Clone, PartialEq)]
pub enum StoragePart {
    /// The table engine call.
    Engine(FunctionCall),
    /// Partitioning key.
    PartitionBy(Expr),
    /// Primary key.
    PrimaryKey(Expr),
    /// Sorting key.
    OrderBy(Expr),
    /// Sampling key.
    SampleBy(Expr),
    /// Engine settings.
    Settings(SettingsList),
}

impl Part for StoragePart {
    type Slot = StorageSlot;

    fn slot(&self) -> StorageSlot {
        match self {
            Self::Engine(_) => StorageSlot::Engine,
            Self::PartitionBy(_) => StorageSlot::PartitionBy,
            Self::PrimaryKey(_) => StorageSlot::PrimaryKey,
            Self::OrderBy(_) => StorageSlot::OrderBy,
            Self::SampleBy(_) => StorageSlot::SampleBy,
            Self::Settings(_) => StorageSlot::Settings,
        }
    }

    fn as_node(&self) -> &dyn Node {
        match self {
            Self::Engine(engine) => engine,
            Self::PartitionBy(expr)
            | Self::PrimaryKey(expr)
            | Self::OrderBy(expr)
            | Self::SampleBy(expr) => expr,
            Self::Settings(settings) => settings,
        }
    }
}

/// Storage definition: `ENGINE = ... PARTITION BY ... ORDER BY ...`.
///
/// Every sub-clause is optional. Clauses are emitted in grammar order no
/// matter the order they were attached in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StorageClause {
    parts: Children<StoragePart>,
}

macro_rules! storage_expr_accessor {
    ($(#[$doc:meta])* $name:ident, $variant:ident) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name(&self) -> Option<&Expr> {
            match self.parts.get(StorageSlot::$variant) {
                Some(StoragePart::$variant(expr)) => Some(expr),
                _ => None,
            }
        }
    };
}

impl StorageClause {
    /// Creates an empty storage definition.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parts: Children::new(),
        }
    }

    /// Creates a storage definition with just an engine.
    #[must_use]
    pub fn with_engine(engine: FunctionCall) -> Self {
        let mut storage = Self::new();
        storage.attach(StoragePart::Engine(engine));
        storage
    }

    /// Sets a sub-clause, returning the one it replaced.
    pub fn attach(&mut self, part: StoragePart) -> Option<StoragePart> {
        self.parts.attach(part)
    }

    /// Removes a sub-clause.
    pub fn detach(&mut self, slot: StorageSlot) -> Option<StoragePart> {
        self.parts.detach(slot)
    }

    /// The present sub-clauses, in emission order.
    #[must_use]
    pub const fn parts(&self) -> &Children<StoragePart> {
        &self.parts
    }

    /// Returns true if no sub-clause is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The engine call.
    #[must_use]
    pub fn engine(&self) -> Option<&FunctionCall> {
        match self.parts.get(StorageSlot::Engine) {
            Some(StoragePart::Engine(engine)) => Some(engine),
            _ => None,
        }
    }

    storage_expr_accessor!(
        /// The partitioning key.
        partition_by,
        PartitionBy
    );
    storage_expr_accessor!(
        /// The primary key.
        primary_key,
        PrimaryKey
    );
    storage_expr_accessor!(
        /// The sorting key.
        order_by,
        OrderBy
    );
    storage_expr_accessor!(
        /// The sampling key.
        sample_by,
        SampleBy
    );

    /// The engine settings.
    #[must_use]
    pub fn settings(&self) -> Option<&SettingsList> {
        match self.parts.get(StorageSlot::Settings) {
            Some(StoragePart::Settings(settings)) => Some(settings),
            _ => None,
        }
    }
}

impl Node for StorageClause {
    fn identity(&self, _delimiter: char) -> String {
        String::from("Storage definition")
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.parts.as_nodes()
    }

    /// Writes each present clause preceded by the layout's separator. An
    /// empty SETTINGS list is skipped.
    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        for part in &self.parts {
            if matches!(part, StoragePart::Settings(list) if list.is_empty()) {
                continue;
            }
            out.push_str(settings.nl_or_ws());
            settings.write_keyword(out, part.slot().keyword());
            match part {
                StoragePart::Engine(engine) => {
                    out.push_str(" = ");
                    settings.write_function(out, &quote_word(&engine.name));
                    out.push('(');
                    if engine.distinct {
                        settings.write_keyword(out, "DISTINCT");
                        out.push(' ');
                    }
                    write_list(&engine.args, settings, state, frame, out);
                    out.push(')');
                }
                _ => {
                    out.push(' ');
                    part.as_node().format(settings, state, frame, out);
                }
            }
        }
    }
}
