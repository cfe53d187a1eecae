//! Expression AST types.

use super::node::Node;
use super::statement::SelectStatement;
use super::types::DataType;
use crate::dialect::{quote_function_name, quote_name, quote_string};
use crate::format::{FormatFrame, FormatSettings, FormatState};

/// Precedence of expressions that never need parentheses.
const ATOM_PRECEDENCE: u8 = 8;
/// Precedence of comparison-like predicates (`IN`, `BETWEEN`, `IS NULL`).
const PREDICATE_PRECEDENCE: u8 = 4;
/// Precedence of unary minus.
const NEG_PRECEDENCE: u8 = 7;
/// Precedence of `NOT`.
const NOT_PRECEDENCE: u8 = 3;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

impl Literal {
    /// Returns the SQL representation of the literal.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Integer(i) => i.to_string(),
            Self::Float(f) if f.is_nan() => String::from("CAST('nan' AS Float64)"),
            Self::Float(f) if f.is_infinite() => {
                let sign = if f.is_sign_negative() { "-" } else { "" };
                format!("CAST('{sign}inf' AS Float64)")
            }
            Self::Float(f) => format!("{f:?}"),
            Self::String(s) => quote_string(s),
            Self::Boolean(true) => String::from("TRUE"),
            Self::Boolean(false) => String::from("FALSE"),
            Self::Null => String::from("NULL"),
        }
    }

    /// Returns true for negative numbers, which print with a leading `-`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(i) => *i < 0,
            Self::Float(f) => f.is_finite() && f.is_sign_negative(),
            _ => false,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,
    NotLike,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Like
            | Self::NotLike => PREDICATE_PRECEDENCE,
            Self::Add | Self::Sub | Self::Concat => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
        }
    }

    /// Returns true if the operator is spelled with keywords.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Like | Self::NotLike)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

impl FunctionCall {
    /// Creates a call of `name` with `args`.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            distinct: false,
        }
    }
}

impl Node for FunctionCall {
    fn identity(&self, delimiter: char) -> String {
        format!("Function{delimiter}{}", self.name)
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
        settings.write_function(out, &quote_function_name(&self.name));
        out.push('(');
        if self.distinct {
            settings.write_keyword(out, "DISTINCT");
            out.push(' ');
        }
        write_list(&self.args, settings, state, frame, out);
        out.push(')');
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference (optionally qualified with table name).
    Column {
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A subquery.
    Subquery(Box<SelectStatement>),

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
    },

    /// Parenthesized expression.
    Paren(Box<Expr>),

    /// Tuple, e.g. `(a, b)` in a sorting key.
    Tuple(Vec<Expr>),

    /// Array literal, e.g. `[1, 2, 3]`.
    Array(Vec<Expr>),

    /// Wildcard (*) in SELECT.
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new float literal.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self::Literal(Literal::Float(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a new boolean literal.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Literal(Literal::Boolean(value))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a function call expression.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall::new(name, args))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a NOT expression.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// Creates a negation.
    #[must_use]
    pub fn neg(self) -> Self {
        Self::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(self),
        }
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
            negated: false,
        }
    }

    /// Creates an IN expression.
    #[must_use]
    pub fn in_list(self, list: Vec<Self>) -> Self {
        Self::In {
            expr: Box::new(self),
            list,
            negated: false,
        }
    }

    /// Creates an IN expression over a subquery.
    #[must_use]
    pub fn in_subquery(self, query: SelectStatement) -> Self {
        self.in_list(vec![Self::Subquery(Box::new(query))])
    }

    /// Binding strength of the expression's outermost construct, used to
    /// decide where the formatter must add parentheses.
    #[must_use]
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Unary {
                op: UnaryOp::Not, ..
            } => NOT_PRECEDENCE,
            Self::Unary {
                op: UnaryOp::Neg, ..
            } => NEG_PRECEDENCE,
            Self::Literal(lit) if lit.is_negative() => NEG_PRECEDENCE,
            Self::IsNull { .. } | Self::In { .. } | Self::Between { .. } => PREDICATE_PRECEDENCE,
            _ => ATOM_PRECEDENCE,
        }
    }

    fn write_child(
        child: &Self,
        need_parens: bool,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        child.format(settings, state, frame.with_parens(need_parens), out);
    }
}

/// Writes `items` separated by `, `.
pub(crate) fn write_list<N: Node>(
    items: &[N],
    settings: &FormatSettings,
    state: &mut FormatState,
    frame: FormatFrame,
    out: &mut String,
) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        item.format(settings, state, frame, out);
    }
}

impl Node for Expr {
    fn identity(&self, delimiter: char) -> String {
        match self {
            Self::Literal(lit) => format!("Literal{delimiter}{}", lit.to_sql()),
            Self::Column {
                table: Some(table),
                name,
                ..
            } => format!("Identifier{delimiter}{table}.{name}"),
            Self::Column { name, .. } => format!("Identifier{delimiter}{name}"),
            Self::Binary { op, .. } => format!("Binary{delimiter}{}", op.as_str()),
            Self::Unary { op, .. } => format!("Unary{delimiter}{}", op.as_str()),
            Self::Function(call) => call.identity(delimiter),
            Self::Subquery(_) => String::from("Subquery"),
            Self::IsNull { negated, .. } => {
                String::from(if *negated { "IsNotNull" } else { "IsNull" })
            }
            Self::In { negated, .. } => String::from(if *negated { "NotIn" } else { "In" }),
            Self::Between { negated, .. } => {
                String::from(if *negated { "NotBetween" } else { "Between" })
            }
            Self::Case { .. } => String::from("Case"),
            Self::Cast { .. } => String::from("Cast"),
            Self::Paren(_) => String::from("Paren"),
            Self::Tuple(_) => String::from("Tuple"),
            Self::Array(_) => String::from("Array"),
            Self::Wildcard { table: Some(table) } => {
                format!("QualifiedAsterisk{delimiter}{table}")
            }
            Self::Wildcard { table: None } => String::from("Asterisk"),
        }
    }

    fn children(&self) -> Vec<&dyn Node> {
        match self {
            Self::Literal(_) | Self::Column { .. } | Self::Wildcard { .. } => vec![],
            Self::Binary { left, right, .. } => {
                vec![left.as_ref() as &dyn Node, right.as_ref() as &dyn Node]
            }
            Self::Unary { operand, .. } => vec![operand.as_ref() as &dyn Node],
            Self::Function(call) => call.children(),
            Self::Subquery(query) => vec![query.as_ref() as &dyn Node],
            Self::IsNull { expr, .. } | Self::Paren(expr) => vec![expr.as_ref() as &dyn Node],
            Self::In { expr, list, .. } => {
                let mut children: Vec<&dyn Node> = vec![expr.as_ref() as &dyn Node];
                children.extend(list.iter().map(|e| e as &dyn Node));
                children
            }
            Self::Between {
                expr, low, high, ..
            } => vec![
                expr.as_ref() as &dyn Node,
                low.as_ref() as &dyn Node,
                high.as_ref() as &dyn Node,
            ],
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                let mut children: Vec<&dyn Node> = Vec::new();
                if let Some(operand) = operand {
                    children.push(operand.as_ref());
                }
                for (when, then) in when_clauses {
                    children.push(when);
                    children.push(then);
                }
                if let Some(else_clause) = else_clause {
                    children.push(else_clause.as_ref());
                }
                children
            }
            Self::Cast { expr, data_type } => {
                vec![expr.as_ref() as &dyn Node, data_type as &dyn Node]
            }
            Self::Tuple(items) | Self::Array(items) => {
                items.iter().map(|e| e as &dyn Node).collect()
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
        let need_parens = frame.need_parens;
        if need_parens {
            out.push('(');
        }
        let frame = frame.with_parens(false);

        match self {
            Self::Literal(lit) => out.push_str(&lit.to_sql()),
            Self::Column { table, name, .. } => {
                if let Some(table) = table {
                    out.push_str(&quote_name(table));
                    out.push('.');
                }
                out.push_str(&quote_name(name));
            }
            Self::Binary { left, op, right } => {
                let prec = op.precedence();
                Self::write_child(left, left.precedence() < prec, settings, state, frame, out);
                out.push(' ');
                if op.is_keyword() {
                    settings.write_keyword(out, op.as_str());
                } else {
                    out.push_str(op.as_str());
                }
                out.push(' ');
                Self::write_child(right, right.precedence() <= prec, settings, state, frame, out);
            }
            Self::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                out.push('-');
                let parens = operand.precedence() <= NEG_PRECEDENCE;
                Self::write_child(operand, parens, settings, state, frame, out);
            }
            Self::Unary {
                op: UnaryOp::Not,
                operand,
            } => {
                settings.write_keyword(out, "NOT");
                out.push(' ');
                let parens = operand.precedence() < NOT_PRECEDENCE;
                Self::write_child(operand, parens, settings, state, frame, out);
            }
            Self::Function(call) => call.format(settings, state, frame, out),
            Self::Subquery(query) => {
                out.push('(');
                query.format(settings, state, frame, out);
                out.push(')');
            }
            Self::IsNull { expr, negated } => {
                let parens = expr.precedence() < PREDICATE_PRECEDENCE;
                Self::write_child(expr, parens, settings, state, frame, out);
                out.push(' ');
                settings.write_keyword(out, if *negated { "IS NOT NULL" } else { "IS NULL" });
            }
            Self::In {
                expr,
                list,
                negated,
            } => {
                let parens = expr.precedence() < PREDICATE_PRECEDENCE;
                Self::write_child(expr, parens, settings, state, frame, out);
                out.push(' ');
                settings.write_keyword(out, if *negated { "NOT IN" } else { "IN" });
                out.push(' ');
                if let [subquery @ Self::Subquery(_)] = list.as_slice() {
                    subquery.format(settings, state, frame, out);
                } else {
                    out.push('(');
                    write_list(list, settings, state, frame, out);
                    out.push(')');
                }
            }
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let parens = expr.precedence() < PREDICATE_PRECEDENCE;
                Self::write_child(expr, parens, settings, state, frame, out);
                out.push(' ');
                settings.write_keyword(out, if *negated { "NOT BETWEEN" } else { "BETWEEN" });
                out.push(' ');
                let parens = low.precedence() <= PREDICATE_PRECEDENCE;
                Self::write_child(low, parens, settings, state, frame, out);
                out.push(' ');
                settings.write_keyword(out, "AND");
                out.push(' ');
                let parens = high.precedence() <= PREDICATE_PRECEDENCE;
                Self::write_child(high, parens, settings, state, frame, out);
            }
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                settings.write_keyword(out, "CASE");
                if let Some(operand) = operand {
                    out.push(' ');
                    operand.format(settings, state, frame, out);
                }
                for (when, then) in when_clauses {
                    out.push(' ');
                    settings.write_keyword(out, "WHEN");
                    out.push(' ');
                    when.format(settings, state, frame, out);
                    out.push(' ');
                    settings.write_keyword(out, "THEN");
                    out.push(' ');
                    then.format(settings, state, frame, out);
                }
                if let Some(else_clause) = else_clause {
                    out.push(' ');
                    settings.write_keyword(out, "ELSE");
                    out.push(' ');
                    else_clause.format(settings, state, frame, out);
                }
                out.push(' ');
                settings.write_keyword(out, "END");
            }
            Self::Cast { expr, data_type } => {
                settings.write_function(out, "CAST");
                out.push('(');
                expr.format(settings, state, frame, out);
                out.push(' ');
                settings.write_keyword(out, "AS");
                out.push(' ');
                data_type.format(settings, state, frame, out);
                out.push(')');
            }
            Self::Paren(expr) => {
                out.push('(');
                expr.format(settings, state, frame, out);
                out.push(')');
            }
            Self::Tuple(items) => {
                out.push('(');
                write_list(items, settings, state, frame, out);
                out.push(')');
            }
            Self::Array(items) => {
                out.push('[');
                write_list(items, settings, state, frame, out);
                out.push(']');
            }
            Self::Wildcard { table } => {
                if let Some(table) = table {
                    out.push_str(&quote_name(table));
                    out.push('.');
                }
                out.push('*');
            }
        }

        if need_parens {
            out.push(')');
        }
    }
}
