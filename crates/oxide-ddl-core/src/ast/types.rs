//! Column definitions and data types.

use super::expression::{write_list, Expr};
use super::node::Node;
use crate::dialect::quote_name;
use crate::format::{FormatFrame, FormatSettings, FormatState};

/// An argument of a parameterised type: either a nested type
/// (`Nullable(String)`) or a value (`Decimal(10, 2)`, `DateTime('UTC')`).
#[derive(Debug, Clone, PartialEq)]
pub enum TypeArg {
    /// A nested type.
    Type(DataType),
    /// A value expression.
    Value(Expr),
}

impl TypeArg {
    fn as_node(&self) -> &dyn Node {
        match self {
            Self::Type(data_type) => data_type,
            Self::Value(expr) => expr,
        }
    }
}

impl Node for TypeArg {
    fn identity(&self, delimiter: char) -> String {
        self.as_node().identity(delimiter)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.as_node().children()
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        self.as_node().format(settings, state, frame, out);
    }
}

/// A column data type such as `UInt64`, `LowCardinality(String)` or
/// `Decimal(18, 4)`.
///
/// The name is kept as written; the engine resolves it, not the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    /// The type name.
    pub name: String,
    /// Type parameters, empty for a plain type.
    pub args: Vec<TypeArg>,
}

impl DataType {
    /// Creates a type without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Adds a nested type parameter.
    #[must_use]
    pub fn with_type(mut self, data_type: Self) -> Self {
        self.args.push(TypeArg::Type(data_type));
        self
    }

    /// Adds a value parameter.
    #[must_use]
    pub fn with_value(mut self, value: Expr) -> Self {
        self.args.push(TypeArg::Value(value));
        self
    }
}

impl Node for DataType {
    fn identity(&self, delimiter: char) -> String {
        format!("DataType{delimiter}{}", self.name)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.args.iter().map(|a| a as &dyn Node).collect()
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        out.push_str(&quote_name(&self.name));
        if !self.args.is_empty() {
            out.push('(');
            write_list(&self.args, settings, state, frame, out);
            out.push(')');
        }
    }
}

/// How a column's default expression is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    /// `DEFAULT expr`: stored, computed when omitted on insert.
    Default,
    /// `MATERIALIZED expr`: stored, always computed.
    Materialized,
    /// `ALIAS expr`: never stored.
    Alias,
}

impl DefaultKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::Materialized => "MATERIALIZED",
            Self::Alias => "ALIAS",
        }
    }
}

/// A column's default expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefault {
    /// How the expression is applied.
    pub kind: DefaultKind,
    /// The expression.
    pub expr: Expr,
}

/// A column declaration: `name [Type] [DEFAULT|MATERIALIZED|ALIAS expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// The column name.
    pub name: String,
    /// The declared type. May be omitted when a default is given.
    pub data_type: Option<DataType>,
    /// The default expression.
    pub default: Option<ColumnDefault>,
}

impl ColumnDef {
    /// Creates a column of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type),
            default: None,
        }
    }

    /// Sets the default expression.
    #[must_use]
    pub fn with_default(mut self, kind: DefaultKind, expr: Expr) -> Self {
        self.default = Some(ColumnDefault { kind, expr });
        self
    }
}

impl Node for ColumnDef {
    fn identity(&self, delimiter: char) -> String {
        format!("ColumnDeclaration{delimiter}{}", self.name)
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = Vec::new();
        if let Some(data_type) = &self.data_type {
            children.push(data_type);
        }
        if let Some(default) = &self.default {
            children.push(&default.expr);
        }
        children
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        out.push_str(&quote_name(&self.name));
        if let Some(data_type) = &self.data_type {
            out.push(' ');
            data_type.format(settings, state, frame, out);
        }
        if let Some(default) = &self.default {
            out.push(' ');
            settings.write_keyword(out, default.kind.as_str());
            out.push(' ');
            default.expr.format(settings, state, frame, out);
        }
    }
}

/// The parenthesised column list of a table, view or dictionary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnList {
    /// The columns, in declaration order.
    pub columns: Vec<ColumnDef>,
}

impl ColumnList {
    /// Creates a column list.
    #[must_use]
    pub const fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Node for ColumnList {
    fn identity(&self, _delimiter: char) -> String {
        String::from("Columns definition")
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.columns.iter().map(|c| c as &dyn Node).collect()
    }

    /// Writes the list including its leading separator: `" (a, b)"` on one
    /// line, otherwise one indented column per line. An empty list writes
    /// nothing.
    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        if self.columns.is_empty() {
            return;
        }
        if settings.is_one_line() {
            out.push_str(" (");
            write_list(&self.columns, settings, state, frame, out);
            out.push(')');
            return;
        }

        let inner = frame.nested();
        let indent = settings.indent(inner);
        out.push_str("\n(");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('\n');
            out.push_str(&indent);
            column.format(settings, state, inner, out);
        }
        out.push('\n');
        out.push_str(&settings.indent(frame));
        out.push(')');
    }
}
