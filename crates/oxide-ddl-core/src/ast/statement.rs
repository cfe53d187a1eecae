//! SQL statement AST types.

use core::fmt;

use super::create::CreateStatement;
use super::expression::{write_list, Expr};
use super::node::Node;
use crate::dialect::{quote_name, quote_string};
use crate::format::{FormatFrame, FormatSettings, FormatState};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
}

impl OrderBy {
    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        self.expr.format(settings, state, frame, out);
        // ASC is the default and is not written back.
        if self.direction == OrderDirection::Desc {
            out.push(' ');
            settings.write_keyword(out, self.direction.as_str());
        }
        if let Some(nulls) = self.nulls {
            out.push(' ');
            settings.write_keyword(out, nulls.as_str());
        }
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join condition (for non-CROSS joins).
    pub on: Option<Expr>,
    /// USING columns (alternative to ON).
    pub using: Vec<String>,
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A simple table name.
    Table {
        /// Database name (optional).
        schema: Option<String>,
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// A subquery.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias (required for subqueries).
        alias: String,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// Creates a table reference with a database qualifier.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Table {
            schema: Some(schema.into()),
            name: name.into(),
            alias: None,
        }
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Table { schema, name, .. } => Self::Table {
                schema,
                name,
                alias: Some(alias.into()),
            },
            Self::Subquery { query, .. } => Self::Subquery {
                query,
                alias: alias.into(),
            },
            Self::Join { left, join } => Self::Join {
                left: Box::new((*left).alias(alias)),
                join,
            },
        }
    }
}

fn write_alias(alias: &str, settings: &FormatSettings, out: &mut String) {
    out.push(' ');
    settings.write_keyword(out, "AS");
    out.push(' ');
    out.push_str(&quote_name(alias));
}

impl Node for TableRef {
    fn identity(&self, delimiter: char) -> String {
        match self {
            Self::Table { name, .. } => format!("TableIdentifier{delimiter}{name}"),
            Self::Subquery { alias, .. } => format!("Subquery{delimiter}{alias}"),
            Self::Join { join, .. } => format!("Join{delimiter}{}", join.join_type.as_str()),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Table { .. } => vec![],
            Self::Subquery { query, .. } => vec![query.as_ref() as &dyn Node],
            Self::Join { left, join } => {
                let mut children: Vec<&dyn Node> =
                    vec![left.as_ref() as &dyn Node, &join.table as &dyn Node];
                if let Some(on) = &join.on {
                    children.push(on);
                }
                children
            }
        }
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        match self {
            Self::Table {
                schema,
                name,
                alias,
            } => {
                if let Some(schema) = schema {
                    out.push_str(&quote_name(schema));
                    out.push('.');
                }
                out.push_str(&quote_name(name));
                if let Some(alias) = alias {
                    write_alias(alias, settings, out);
                }
            }
            Self::Subquery { query, alias } => {
                out.push('(');
                query.format(settings, state, frame, out);
                out.push(')');
                write_alias(alias, settings, out);
            }
            Self::Join { left, join } => {
                left.format(settings, state, frame, out);
                out.push(' ');
                settings.write_keyword(out, join.join_type.as_str());
                out.push(' ');
                join.table.format(settings, state, frame, out);
                if let Some(on) = &join.on {
                    out.push(' ');
                    settings.write_keyword(out, "ON");
                    out.push(' ');
                    on.format(settings, state, frame, out);
                } else if !join.using.is_empty() {
                    out.push(' ');
                    settings.write_keyword(out, "USING");
                    out.push_str(" (");
                    let names: Vec<String> = join.using.iter().map(|c| quote_name(c)).collect();
                    out.push_str(&names.join(", "));
                    out.push(')');
                }
            }
        }
    }
}

/// A SELECT statement.
///
/// Always formatted on a single line, whatever the layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select.
    pub columns: Vec<SelectColumn>,
    /// The FROM clause.
    pub from: Option<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
}

impl SelectStatement {
    /// Creates a SELECT of `columns` with no other clauses.
    #[must_use]
    pub fn new(columns: Vec<SelectColumn>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// `SELECT * FROM <table>`.
    #[must_use]
    pub fn star_from(table: TableRef) -> Self {
        Self::new(vec![SelectColumn::new(Expr::Wildcard { table: None })]).with_from(table)
    }

    /// Sets the FROM clause.
    #[must_use]
    pub fn with_from(mut self, from: TableRef) -> Self {
        self.from = Some(from);
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn with_where(mut self, predicate: Expr) -> Self {
        self.where_clause = Some(predicate);
        self
    }

    fn write_clause(
        keyword: &str,
        expr: Option<&Expr>,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        if let Some(expr) = expr {
            out.push(' ');
            settings.write_keyword(out, keyword);
            out.push(' ');
            expr.format(settings, state, frame, out);
        }
    }
}

impl Node for SelectStatement {
    fn identity(&self, _delimiter: char) -> String {
        String::from("SelectQuery")
    }

    fn children(&self) -> Vec<&dyn Node> {
        let mut children: Vec<&dyn Node> = Vec::new();
        children.extend(self.columns.iter().map(|c| &c.expr as &dyn Node));
        if let Some(from) = &self.from {
            children.push(from);
        }
        if let Some(where_clause) = &self.where_clause {
            children.push(where_clause);
        }
        children.extend(self.group_by.iter().map(|e| e as &dyn Node));
        if let Some(having) = &self.having {
            children.push(having);
        }
        children.extend(self.order_by.iter().map(|o| &o.expr as &dyn Node));
        if let Some(limit) = &self.limit {
            children.push(limit);
        }
        if let Some(offset) = &self.offset {
            children.push(offset);
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
        settings.write_keyword(out, "SELECT");
        out.push(' ');
        if self.distinct {
            settings.write_keyword(out, "DISTINCT");
            out.push(' ');
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            column.expr.format(settings, state, frame, out);
            if let Some(alias) = &column.alias {
                write_alias(alias, settings, out);
            }
        }

        if let Some(from) = &self.from {
            out.push(' ');
            settings.write_keyword(out, "FROM");
            out.push(' ');
            from.format(settings, state, frame, out);
        }

        Self::write_clause("WHERE", self.where_clause.as_ref(), settings, state, frame, out);

        if !self.group_by.is_empty() {
            out.push(' ');
            settings.write_keyword(out, "GROUP BY");
            out.push(' ');
            write_list(&self.group_by, settings, state, frame, out);
        }

        Self::write_clause("HAVING", self.having.as_ref(), settings, state, frame, out);

        if !self.order_by.is_empty() {
            out.push(' ');
            settings.write_keyword(out, "ORDER BY");
            out.push(' ');
            for (i, item) in self.order_by.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                item.format(settings, state, frame, out);
            }
        }

        Self::write_clause("LIMIT", self.limit.as_ref(), settings, state, frame, out);
        Self::write_clause("OFFSET", self.offset.as_ref(), settings, state, frame, out);
    }
}

/// A column in SELECT clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// Where and how a statement's result is written: `INTO OUTFILE` and
/// `FORMAT`.
///
/// Shared by every statement kind that produces tabular output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputOptions {
    /// Target file of `INTO OUTFILE`.
    pub out_file: Option<String>,
    /// Output format name.
    pub format: Option<String>,
}

impl OutputOptions {
    /// No output options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            out_file: None,
            format: None,
        }
    }

    /// Returns true if no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.out_file.is_none() && self.format.is_none()
    }

    /// Writes the options, each preceded by the layout's clause separator.
    pub fn format_into(&self, settings: &FormatSettings, out: &mut String) {
        if let Some(file) = &self.out_file {
            out.push_str(settings.nl_or_ws());
            settings.write_keyword(out, "INTO OUTFILE");
            out.push(' ');
            out.push_str(&quote_string(file));
        }
        if let Some(format) = &self.format {
            out.push_str(settings.nl_or_ws());
            settings.write_keyword(out, "FORMAT");
            out.push(' ');
            out.push_str(&quote_name(format));
        }
    }
}

/// A top-level SELECT with its output options.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryStatement {
    /// The query.
    pub select: SelectStatement,
    /// `INTO OUTFILE` / `FORMAT`.
    pub output: OutputOptions,
}

impl Node for QueryStatement {
    fn identity(&self, delimiter: char) -> String {
        self.select.identity(delimiter)
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.select.children()
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        self.select.format(settings, state, frame, out);
        self.output.format_into(settings, out);
    }
}

/// A parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE or ATTACH statement.
    Create(Box<CreateStatement>),
    /// SELECT statement.
    Select(QueryStatement),
}

impl Statement {
    fn as_node(&self) -> &dyn Node {
        match self {
            Self::Create(create) => create.as_ref(),
            Self::Select(query) => query,
        }
    }

    /// Returns the CREATE statement, if this is one.
    #[must_use]
    pub fn as_create(&self) -> Option<&CreateStatement> {
        match self {
            Self::Create(create) => Some(create.as_ref()),
            Self::Select(_) => None,
        }
    }
}

impl Node for Statement {
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

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
