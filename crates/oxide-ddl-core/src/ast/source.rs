//! Dictionary source definition: where a dictionary loads its data from
//! and how it is refreshed and laid out in memory.

use core::fmt;

use super::expression::Expr;
use super::node::{Children, Node, Part};
use crate::dialect::{quote_string, quote_word};
use crate::format::{FormatFrame, FormatSettings, FormatState};

/// Placeholder written in place of a masked password.
pub const HIDDEN_PASSWORD: &str = "[HIDDEN]";

/// One `KEY value` pair of a dictionary clause, e.g. `HOST 'localhost'`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair {
    /// The key, as written.
    pub key: String,
    /// The value.
    pub value: Expr,
}

/// Space-separated `KEY value` pairs, e.g. `MIN 0 MAX 1000`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyValueList {
    /// The pairs, in the order written.
    pub pairs: Vec<KeyValuePair>,
}

impl KeyValueList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends `key value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Expr) -> Self {
        self.pairs.push(KeyValuePair {
            key: key.into(),
            value,
        });
        self
    }

    /// Returns the value of the first pair whose key matches `key`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Expr> {
        self.pairs
            .iter()
            .find(|p| p.key.eq_ignore_ascii_case(key))
            .map(|p| &p.value)
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Node for KeyValueList {
    fn identity(&self, _delimiter: char) -> String {
        String::from("KeyValueList")
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.pairs.iter().map(|p| &p.value as &dyn Node).collect()
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            settings.write_keyword(out, &quote_word(&pair.key));
            out.push(' ');
            pair.value.format(settings, state, frame, out);
        }
    }
}

/// A named key-value call, e.g. `MYSQL(HOST 'h')` or `FLAT()`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueFunction {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: KeyValueList,
}

impl KeyValueFunction {
    /// Creates a call of `name` with `args`.
    #[must_use]
    pub fn new(name: impl Into<String>, args: KeyValueList) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Node for KeyValueFunction {
    fn identity(&self, delimiter: char) -> String {
        format!("KeyValueFunction{delimiter}{}", self.name)
    }

    fn children(&self) -> Vec<&dyn Node> {
        vec![&self.args as &dyn Node]
    }

    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        settings.write_function(out, &quote_word(&self.name));
        out.push('(');
        self.args.format(settings, state, frame, out);
        out.push(')');
    }
}

/// Slot of a [`SourcePart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceSlot {
    /// The source function.
    Source,
    /// Replica list inside the source.
    Replica,
    /// Refresh interval.
    Lifetime,
    /// In-memory layout.
    Layout,
    /// Dictionary key.
    PrimaryKey,
}

/// A sub-tree of a dictionary source definition.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePart {
    /// `SOURCE(NAME(...))`: the connector and its parameters.
    Source(KeyValueFunction),
    /// `REPLICA(...)` inside the source call.
    Replica(KeyValueList),
    /// `LIFETIME(...)`.
    Lifetime(KeyValueList),
    /// `LAYOUT(NAME(...))`.
    Layout(KeyValueFunction),
    /// `PRIMARY KEY ...`.
    PrimaryKey(Expr),
}

impl Part for SourcePart {
    type Slot = SourceSlot;

    fn slot(&self) -> SourceSlot {
        match self {
            Self::Source(_) => SourceSlot::Source,
            Self::Replica(_) => SourceSlot::Replica,
            Self::Lifetime(_) => SourceSlot::Lifetime,
            Self::Layout(_) => SourceSlot::Layout,
            Self::PrimaryKey(_) => SourceSlot::PrimaryKey,
        }
    }

    fn as_node(&self) -> &dyn Node {
        match self {
            Self::Source(function) | Self::Layout(function) => function,
            Self::Replica(list) | Self::Lifetime(list) => list,
            Self::PrimaryKey(expr) => expr,
        }
    }
}

/// Source definition of a dictionary.
///
/// The connection scalars (`port`, `user`, `password`, `db`, `table`) are
/// written inside the `SOURCE(...)` call, after the connector's own pairs.
///
/// The password is kept in plain text because `format` must reproduce the
/// statement. It is masked in `Debug` output and never part of the
/// identity; use [`SourceClause::redacted`] before logging formatted text.
#[derive(Clone, PartialEq, Default)]
pub struct SourceClause {
    /// Connection user.
    pub user: Option<String>,
    /// Connection password.
    pub password: Option<String>,
    /// Connection port.
    pub port: Option<u16>,
    /// Source database.
    pub database: Option<String>,
    /// Source table.
    pub table: Option<String>,
    parts: Children<SourcePart>,
}

macro_rules! source_accessor {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name(&self) -> Option<&$ty> {
            match self.parts.get(SourceSlot::$variant) {
                Some(SourcePart::$variant(value)) => Some(value),
                _ => None,
            }
        }
    };
}

impl SourceClause {
    /// Creates an empty source definition.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            user: None,
            password: None,
            port: None,
            database: None,
            table: None,
            parts: Children::new(),
        }
    }

    /// Sets a sub-tree, returning the one it replaced.
    pub fn attach(&mut self, part: SourcePart) -> Option<SourcePart> {
        self.parts.attach(part)
    }

    /// Removes a sub-tree.
    pub fn detach(&mut self, slot: SourceSlot) -> Option<SourcePart> {
        self.parts.detach(slot)
    }

    /// The present sub-trees.
    #[must_use]
    pub const fn parts(&self) -> &Children<SourcePart> {
        &self.parts
    }

    source_accessor!(
        /// The source function.
        source,
        Source,
        KeyValueFunction
    );
    source_accessor!(
        /// The replica list.
        replica,
        Replica,
        KeyValueList
    );
    source_accessor!(
        /// The refresh interval.
        lifetime,
        Lifetime,
        KeyValueList
    );
    source_accessor!(
        /// The memory layout.
        layout,
        Layout,
        KeyValueFunction
    );
    source_accessor!(
        /// The dictionary key.
        primary_key,
        PrimaryKey,
        Expr
    );

    /// Returns a copy with the password masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.password.is_some() {
            copy.password = Some(String::from(HIDDEN_PASSWORD));
        }
        copy
    }

    fn write_source(
        &self,
        source: &KeyValueFunction,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        settings.write_keyword(out, "SOURCE");
        out.push('(');
        settings.write_function(out, &quote_word(&source.name));
        out.push('(');

        let mut first = source.args.is_empty();
        source.args.format(settings, state, frame, out);

        let mut write_key = |out: &mut String, key: &str| {
            if !first {
                out.push(' ');
            }
            first = false;
            settings.write_keyword(out, key);
            out.push(' ');
        };

        if let Some(port) = self.port {
            write_key(out, "PORT");
            out.push_str(&port.to_string());
        }
        if let Some(user) = &self.user {
            write_key(out, "USER");
            out.push_str(&quote_string(user));
        }
        if let Some(password) = &self.password {
            write_key(out, "PASSWORD");
            out.push_str(&quote_string(password));
            state.credentials_written = true;
        }
        if let Some(database) = &self.database {
            write_key(out, "DB");
            out.push_str(&quote_string(database));
        }
        if let Some(table) = &self.table {
            write_key(out, "TABLE");
            out.push_str(&quote_string(table));
        }
        if let Some(replica) = self.replica() {
            if !first {
                out.push(' ');
            }
            settings.write_keyword(out, "REPLICA");
            out.push('(');
            replica.format(settings, state, frame, out);
            out.push(')');
        }

        out.push_str("))");
    }
}

impl fmt::Debug for SourceClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceClause")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| HIDDEN_PASSWORD))
            .field("port", &self.port)
            .field("database", &self.database)
            .field("table", &self.table)
            .field("parts", &self.parts)
            .finish()
    }
}

impl Node for SourceClause {
    fn identity(&self, _delimiter: char) -> String {
        String::from("Source definition")
    }

    fn children(&self) -> Vec<&dyn Node> {
        self.parts.as_nodes()
    }

    /// Writes `PRIMARY KEY`, `SOURCE`, `LIFETIME` and `LAYOUT`, each
    /// preceded by the layout's separator. Without a source function the
    /// `SOURCE` segment and its connection scalars are omitted.
    fn format(
        &self,
        settings: &FormatSettings,
        state: &mut FormatState,
        frame: FormatFrame,
        out: &mut String,
    ) {
        if let Some(key) = self.primary_key() {
            out.push_str(settings.nl_or_ws());
            settings.write_keyword(out, "PRIMARY KEY");
            out.push(' ');
            key.format(settings, state, frame, out);
        }
        if let Some(source) = self.source() {
            out.push_str(settings.nl_or_ws());
            self.write_source(source, settings, state, frame, out);
        }
        if let Some(lifetime) = self.lifetime() {
            out.push_str(settings.nl_or_ws());
            settings.write_keyword(out, "LIFETIME");
            out.push('(');
            lifetime.format(settings, state, frame, out);
            out.push(')');
        }
        if let Some(layout) = self.layout() {
            out.push_str(settings.nl_or_ws());
            settings.write_keyword(out, "LAYOUT");
            out.push('(');
            layout.format(settings, state, frame, out);
            out.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clickhouse_source() -> SourceClause {
        let mut source = SourceClause::new();
        source.port = Some(9000);
        source.user = Some(String::from("default"));
        source.password = Some(String::from("s3cret"));
        source.database = Some(String::from("dicts"));
        source.table = Some(String::from("regions"));
        source.attach(SourcePart::Source(KeyValueFunction::new(
            "CLICKHOUSE",
            KeyValueList::new().with("HOST", Expr::string("localhost")),
        )));
        source.attach(SourcePart::Lifetime(
            KeyValueList::new()
                .with("MIN", Expr::integer(0))
                .with("MAX", Expr::integer(1000)),
        ));
        source.attach(SourcePart::Layout(KeyValueFunction::new(
            "FLAT",
            KeyValueList::new(),
        )));
        source.attach(SourcePart::PrimaryKey(Expr::column("id")));
        source
    }

    #[test]
    fn test_format_full_source() {
        let source = clickhouse_source();
        assert_eq!(
            source.to_sql(),
            "\nPRIMARY KEY id\
             \nSOURCE(CLICKHOUSE(HOST 'localhost' PORT 9000 USER 'default' PASSWORD 's3cret' DB 'dicts' TABLE 'regions'))\
             \nLIFETIME(MIN 0 MAX 1000)\
             \nLAYOUT(FLAT())"
        );
    }

    #[test]
    fn test_scalars_without_source_function_are_omitted() {
        let mut source = SourceClause::new();
        source.user = Some(String::from("u"));
        source.attach(SourcePart::Layout(KeyValueFunction::new(
            "HASHED",
            KeyValueList::new(),
        )));
        assert_eq!(
            source.to_sql_with(&FormatSettings::one_line()),
            " LAYOUT(HASHED())"
        );
    }

    #[test]
    fn test_replica_inside_source() {
        let mut source = SourceClause::new();
        source.attach(SourcePart::Source(KeyValueFunction::new(
            "MYSQL",
            KeyValueList::new(),
        )));
        source.attach(SourcePart::Replica(
            KeyValueList::new()
                .with("HOST", Expr::string("r1"))
                .with("PRIORITY", Expr::integer(1)),
        ));
        source.port = Some(3306);
        assert_eq!(
            source.to_sql_with(&FormatSettings::one_line()),
            " SOURCE(MYSQL(PORT 3306 REPLICA(HOST 'r1' PRIORITY 1)))"
        );
    }

    #[test]
    fn test_password_marks_state() {
        let source = clickhouse_source();
        let mut state = FormatState::default();
        let mut out = String::new();
        source.format(
            &FormatSettings::default(),
            &mut state,
            FormatFrame::default(),
            &mut out,
        );
        assert!(state.credentials_written);

        let mut state = FormatState::default();
        let mut out = String::new();
        SourceClause::new().format(
            &FormatSettings::default(),
            &mut state,
            FormatFrame::default(),
            &mut out,
        );
        assert!(!state.credentials_written);
    }

    #[test]
    fn test_password_never_in_debug_or_identity() {
        let source = clickhouse_source();
        assert!(!format!("{source:?}").contains("s3cret"));
        assert!(format!("{source:?}").contains(HIDDEN_PASSWORD));
        assert!(!source.tree_identity('_').contains("s3cret"));
        assert!(!source.dump_tree().contains("s3cret"));
    }

    #[test]
    fn test_redacted() {
        let source = clickhouse_source();
        let redacted = source.redacted();
        assert_eq!(redacted.password.as_deref(), Some(HIDDEN_PASSWORD));
        assert!(!redacted.to_sql().contains("s3cret"));
        assert_eq!(source.password.as_deref(), Some("s3cret"));
        assert_eq!(SourceClause::new().redacted().password, None);
    }

    #[test]
    fn test_children_follow_parts() {
        let mut source = clickhouse_source();
        assert_eq!(source.children().len(), 4);
        source.detach(SourceSlot::Lifetime);
        assert_eq!(source.children().len(), 3);
        assert!(source.lifetime().is_none());
        assert_eq!(source.identity('_'), "Source definition");
    }
}
