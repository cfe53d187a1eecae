//! CREATE / ATTACH statement parsing.

use tracing::debug;

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    ColumnDef, ColumnDefault, ColumnList, CreateKind, CreatePart, CreateStatement, CreateVerb,
    DefaultKind, Expr, FunctionCall, KeyValueFunction, KeyValueList, KeyValuePair, Literal, Part,
    QualifiedName, SettingsList, Shape, SourceClause, SourcePart, StorageClause, StoragePart,
};
use crate::lexer::{Keyword, Span, TokenKind};

/// Statement header: everything up to the object name.
struct Header {
    verb: CreateVerb,
    replace: bool,
    temporary: bool,
    shape: Shape,
    if_not_exists: bool,
}

fn attach_part(
    statement: &mut CreateStatement,
    part: CreatePart,
    span: Span,
) -> Result<(), ParseError> {
    statement
        .attach(part)
        .map(|_| ())
        .map_err(|err| ParseError::new(err.to_string(), span))
}

impl Parser<'_> {
    /// From `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        Span::new(start.start, self.previous.span.end.max(start.end))
    }

    /// Parses a CREATE or ATTACH statement.
    pub(super) fn parse_create_statement(&mut self) -> Result<CreateStatement, ParseError> {
        let start = self.current.span;
        let header = self.parse_create_header()?;

        let name = if header.shape == Shape::Database {
            QualifiedName::new(self.expect_name()?)
        } else {
            let (database, name) = self.parse_qualified_name()?;
            QualifiedName { database, name }
        };

        let cluster_span = self.current.span;
        let cluster = if self.eat_keyword(Keyword::On) {
            if header.shape == Shape::Dictionary {
                return Err(ParseError::new(
                    format!("ON CLUSTER is not valid for {}", header.shape),
                    cluster_span,
                ));
            }
            self.expect_keyword(Keyword::Cluster)?;
            Some(self.expect_name()?)
        } else {
            None
        };

        let mut statement = match header.shape {
            Shape::Database => {
                let mut statement = CreateStatement::new(CreateKind::database(name.name));
                let storage = self.parse_storage_clause()?;
                if !storage.is_empty() {
                    let span = self.span_from(start);
                    attach_part(&mut statement, CreatePart::Storage(storage), span)?;
                }
                statement
            }
            Shape::Dictionary => {
                let mut statement = CreateStatement::new(CreateKind::dictionary(name));
                self.parse_dictionary_body(&mut statement, start)?;
                statement
            }
            Shape::Table | Shape::View | Shape::MaterializedView => {
                self.parse_table_like(&header, name, start)?
            }
        };

        statement.verb = header.verb;
        statement.if_not_exists = header.if_not_exists;
        statement.cluster = cluster;
        statement.output = self.parse_output_options()?;

        debug!(
            verb = ?statement.verb,
            shape = %statement.shape(),
            database = statement.database().unwrap_or(""),
            name = statement.name(),
            "parsed create statement"
        );
        Ok(statement)
    }

    /// Parses `CREATE|ATTACH [OR REPLACE] [TEMPORARY] <object> [IF NOT EXISTS]`.
    fn parse_create_header(&mut self) -> Result<Header, ParseError> {
        let verb = if self.eat_keyword(Keyword::Attach) {
            CreateVerb::Attach
        } else {
            self.expect_keyword(Keyword::Create)?;
            CreateVerb::Create
        };

        let replace = if self.eat_keyword(Keyword::Or) {
            self.expect_keyword(Keyword::Replace)?;
            true
        } else {
            false
        };
        let temporary = self.eat_keyword(Keyword::Temporary);

        let object_span = self.current.span;
        let shape = match &self.current.kind {
            TokenKind::Keyword(Keyword::Database) => Shape::Database,
            TokenKind::Keyword(Keyword::Table) => Shape::Table,
            TokenKind::Keyword(Keyword::View) => Shape::View,
            TokenKind::Keyword(Keyword::Materialized) => {
                self.advance();
                if !self.check_keyword(Keyword::View) {
                    return Err(ParseError::unexpected(
                        "VIEW",
                        self.current.kind.clone(),
                        self.current.span,
                    ));
                }
                Shape::MaterializedView
            }
            TokenKind::Keyword(Keyword::Dictionary) => Shape::Dictionary,
            _ => {
                return Err(ParseError::unexpected(
                    "DATABASE, TABLE, VIEW, MATERIALIZED VIEW, or DICTIONARY",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();

        if replace && matches!(shape, Shape::Database | Shape::Dictionary) {
            return Err(ParseError::new(
                format!("OR REPLACE is not valid for {shape}"),
                object_span,
            ));
        }
        if verb == CreateVerb::Attach && shape == Shape::Dictionary {
            return Err(ParseError::new(
                format!("ATTACH is not valid for {shape}"),
                object_span,
            ));
        }
        if temporary && shape != Shape::Table {
            return Err(ParseError::new(
                format!("TEMPORARY is not valid for {shape}"),
                object_span,
            ));
        }

        let if_not_exists = if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        Ok(Header {
            verb,
            replace,
            temporary,
            shape,
            if_not_exists,
        })
    }

    /// Parses the body of a table, view or materialized view:
    /// `[TO t] [AS t] [(columns)] [storage] [POPULATE] [AS SELECT ...]`.
    fn parse_table_like(
        &mut self,
        header: &Header,
        name: QualifiedName,
        start: Span,
    ) -> Result<CreateStatement, ParseError> {
        let to = if header.shape == Shape::MaterializedView && self.eat_keyword(Keyword::To) {
            Some(self.parse_create_target()?)
        } else {
            None
        };

        let as_table = if header.shape == Shape::Table
            && self.check_keyword(Keyword::As)
            && !matches!(self.peek_kind(), TokenKind::Keyword(Keyword::Select))
        {
            self.advance();
            Some(self.parse_create_target()?)
        } else {
            None
        };

        let columns = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_column_list()?)
        } else {
            None
        };

        let storage = if header.shape == Shape::View {
            StorageClause::new()
        } else {
            self.parse_storage_clause()?
        };

        let populate =
            header.shape == Shape::MaterializedView && self.eat_keyword(Keyword::Populate);

        let select = if self.eat_keyword(Keyword::As) {
            Some(self.parse_select_statement()?)
        } else {
            None
        };

        let kind = match header.shape {
            Shape::Table => CreateKind::Table {
                name,
                replace: header.replace,
                temporary: header.temporary,
                as_table,
            },
            Shape::View => CreateKind::View {
                name,
                replace: header.replace,
            },
            _ => CreateKind::MaterializedView {
                name,
                replace: header.replace,
                to,
                populate,
            },
        };

        let span = self.span_from(start);
        let mut statement = CreateStatement::new(kind);
        if let Some(columns) = columns {
            attach_part(&mut statement, CreatePart::Columns(columns), span)?;
        }
        if !storage.is_empty() {
            attach_part(&mut statement, CreatePart::Storage(storage), span)?;
        }
        if let Some(select) = select {
            attach_part(&mut statement, CreatePart::Select(Box::new(select)), span)?;
        }
        Ok(statement)
    }

    fn parse_create_target(&mut self) -> Result<QualifiedName, ParseError> {
        let (database, name) = self.parse_qualified_name()?;
        Ok(QualifiedName { database, name })
    }

    /// Parses `(column, ...)`.
    fn parse_column_list(&mut self) -> Result<ColumnList, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![];
        loop {
            columns.push(self.parse_column_def()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(ColumnList::new(columns))
    }

    /// Parses `name [Type] [DEFAULT|MATERIALIZED|ALIAS expr]`.
    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.expect_name()?;

        let data_type = if self.is_name() && self.column_default_kind().is_none() {
            Some(self.parse_data_type()?)
        } else {
            None
        };

        let default = match self.column_default_kind() {
            Some(kind) => {
                self.advance();
                Some(ColumnDefault {
                    kind,
                    expr: self.parse_expression(0)?,
                })
            }
            None => None,
        };

        if data_type.is_none() && default.is_none() {
            return Err(ParseError::unexpected(
                "column type or default expression",
                self.current.kind.clone(),
                self.current.span,
            ));
        }

        Ok(ColumnDef {
            name,
            data_type,
            default,
        })
    }

    fn column_default_kind(&self) -> Option<DefaultKind> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Default) => Some(DefaultKind::Default),
            TokenKind::Keyword(Keyword::Materialized) => Some(DefaultKind::Materialized),
            _ if self.current.is_word("ALIAS") => Some(DefaultKind::Alias),
            _ => None,
        }
    }

    /// Parses storage sub-clauses in any order until none follows.
    fn parse_storage_clause(&mut self) -> Result<StorageClause, ParseError> {
        let mut storage = StorageClause::new();
        loop {
            let clause_span = self.current.span;
            let part = match &self.current.kind {
                TokenKind::Keyword(Keyword::Engine) => {
                    self.advance();
                    if self.check(&TokenKind::Eq) {
                        self.advance();
                    }
                    let name = self.expect_name()?;
                    let engine = if self.check(&TokenKind::LeftParen) {
                        self.parse_function_call(name)?
                    } else {
                        FunctionCall::new(name, vec![])
                    };
                    StoragePart::Engine(engine)
                }
                TokenKind::Keyword(Keyword::Partition) => {
                    self.advance();
                    self.expect_keyword(Keyword::By)?;
                    StoragePart::PartitionBy(self.parse_key_expression()?)
                }
                TokenKind::Keyword(Keyword::Primary) => {
                    self.advance();
                    self.expect_word("KEY")?;
                    StoragePart::PrimaryKey(self.parse_key_expression()?)
                }
                TokenKind::Keyword(Keyword::Order) => {
                    self.advance();
                    self.expect_keyword(Keyword::By)?;
                    StoragePart::OrderBy(self.parse_key_expression()?)
                }
                TokenKind::Keyword(Keyword::Sample) => {
                    self.advance();
                    self.expect_keyword(Keyword::By)?;
                    StoragePart::SampleBy(self.parse_expression(0)?)
                }
                TokenKind::Keyword(Keyword::Settings) => {
                    self.advance();
                    StoragePart::Settings(self.parse_settings_list()?)
                }
                _ => break,
            };

            let slot = part.slot();
            if storage.parts().contains(slot) {
                return Err(ParseError::new(
                    format!("Duplicate {} clause", slot.keyword()),
                    clause_span,
                ));
            }
            storage.attach(part);
        }
        Ok(storage)
    }

    /// Parses a key: one expression, or a bare comma list read as a tuple.
    fn parse_key_expression(&mut self) -> Result<Expr, ParseError> {
        let mut exprs = self.parse_expression_list()?;
        if exprs.len() == 1 {
            Ok(exprs.remove(0))
        } else {
            Ok(Expr::Tuple(exprs))
        }
    }

    /// Parses `name = literal, ...`.
    fn parse_settings_list(&mut self) -> Result<SettingsList, ParseError> {
        let mut settings = SettingsList::new();
        loop {
            let name = self.expect_name()?;
            self.expect(&TokenKind::Eq)?;
            let value: Literal = self.parse_literal()?;
            settings = settings.with(name, value);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(settings)
    }

    /// Parses a dictionary's columns and source definition. The
    /// `PRIMARY KEY`, `SOURCE`, `LIFETIME` and `LAYOUT` clauses may come in
    /// any order.
    fn parse_dictionary_body(
        &mut self,
        statement: &mut CreateStatement,
        start: Span,
    ) -> Result<(), ParseError> {
        if self.check(&TokenKind::LeftParen) {
            let columns = self.parse_column_list()?;
            attach_part(statement, CreatePart::Columns(columns), self.span_from(start))?;
        }

        let mut source = SourceClause::new();
        let mut any_clause = false;
        loop {
            let clause_span = self.current.span;
            let part = if self.check_keyword(Keyword::Primary) {
                self.advance();
                self.expect_word("KEY")?;
                SourcePart::PrimaryKey(self.parse_key_expression()?)
            } else if self.current.is_word("SOURCE") {
                self.advance();
                SourcePart::Source(self.parse_source_function(&mut source)?)
            } else if self.current.is_word("LIFETIME") {
                self.advance();
                SourcePart::Lifetime(self.parse_lifetime()?)
            } else if self.current.is_word("LAYOUT") {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let layout = self.parse_key_value_function()?;
                self.expect(&TokenKind::RightParen)?;
                SourcePart::Layout(layout)
            } else {
                break;
            };

            if source.parts().contains(part.slot()) {
                return Err(ParseError::new(
                    format!("Duplicate {:?} clause in dictionary", part.slot()),
                    clause_span,
                ));
            }
            source.attach(part);
            any_clause = true;
        }

        if any_clause {
            attach_part(statement, CreatePart::Source(source), self.span_from(start))?;
        }
        Ok(())
    }

    /// Parses `(NAME(KEY value ...))` after `SOURCE`, moving the
    /// connection scalars and the replica list into `source`.
    fn parse_source_function(
        &mut self,
        source: &mut SourceClause,
    ) -> Result<KeyValueFunction, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let name = self.expect_name()?;
        self.expect(&TokenKind::LeftParen)?;

        let mut args = KeyValueList::new();
        while !self.check(&TokenKind::RightParen) {
            let key_span = self.current.span;
            let key = self.expect_name()?;
            let upper = key.to_ascii_uppercase();
            let duplicate = match upper.as_str() {
                "PORT" => source.port.is_some(),
                "USER" => source.user.is_some(),
                "PASSWORD" => source.password.is_some(),
                "DB" => source.database.is_some(),
                "TABLE" => source.table.is_some(),
                "REPLICA" => source.replica().is_some(),
                _ => false,
            };
            if duplicate {
                return Err(ParseError::new(
                    format!("Duplicate {upper} in SOURCE"),
                    key_span,
                ));
            }
            match upper.as_str() {
                "PORT" => source.port = Some(self.parse_port()?),
                "USER" => source.user = Some(self.expect_string()?),
                "PASSWORD" => source.password = Some(self.expect_string()?),
                "DB" => source.database = Some(self.expect_string()?),
                "TABLE" => source.table = Some(self.expect_string()?),
                "REPLICA" => {
                    self.expect(&TokenKind::LeftParen)?;
                    let replica = self.parse_key_value_list()?;
                    self.expect(&TokenKind::RightParen)?;
                    source.attach(SourcePart::Replica(replica));
                }
                _ => {
                    let value = self.parse_expression(0)?;
                    args.pairs.push(KeyValuePair { key, value });
                }
            }
        }

        self.expect(&TokenKind::RightParen)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(KeyValueFunction::new(name, args))
    }

    fn parse_port(&mut self) -> Result<u16, ParseError> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Integer(n) => {
                let port = u16::try_from(*n)
                    .map_err(|_| ParseError::new(format!("Port {n} out of range"), span))?;
                self.advance();
                Ok(port)
            }
            _ => Err(ParseError::unexpected(
                "port number",
                self.current.kind.clone(),
                span,
            )),
        }
    }

    /// Parses `(KEY value ...)` after `LIFETIME`. A single number is the
    /// maximum with a minimum of zero.
    fn parse_lifetime(&mut self) -> Result<KeyValueList, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let lifetime = if let TokenKind::Integer(max) = self.current.kind {
            self.advance();
            KeyValueList::new()
                .with("MIN", Expr::integer(0))
                .with("MAX", Expr::integer(max))
        } else {
            self.parse_key_value_list()?
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(lifetime)
    }

    /// Parses `NAME(KEY value ...)`.
    fn parse_key_value_function(&mut self) -> Result<KeyValueFunction, ParseError> {
        let name = self.expect_name()?;
        self.expect(&TokenKind::LeftParen)?;
        let args = self.parse_key_value_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(KeyValueFunction::new(name, args))
    }

    /// Parses `KEY value` pairs up to, not including, a closing parenthesis.
    fn parse_key_value_list(&mut self) -> Result<KeyValueList, ParseError> {
        let mut list = KeyValueList::new();
        while !self.check(&TokenKind::RightParen) {
            let key = self.expect_name()?;
            let value = self.parse_expression(0)?;
            list.pairs.push(KeyValuePair { key, value });
        }
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{CreateKind, Node, Shape, Statement};
    use crate::parser::{ParseError, Parser};

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_single()
    }

    #[test]
    fn test_create_database() {
        let stmt = parse("CREATE DATABASE IF NOT EXISTS db1 ON CLUSTER main ENGINE = Atomic")
            .unwrap();
        let create = stmt.as_create().unwrap();
        assert_eq!(create.shape(), Shape::Database);
        assert!(create.if_not_exists);
        assert_eq!(create.database(), Some("db1"));
        assert_eq!(create.cluster.as_deref(), Some("main"));
        assert_eq!(
            create.storage().and_then(|s| s.engine()).map(|e| e.name.as_str()),
            Some("Atomic")
        );
    }

    #[test]
    fn test_create_table_full() {
        let sql = "CREATE TABLE IF NOT EXISTS db.events (
                id UInt64,
                ts DateTime('UTC'),
                day Date MATERIALIZED toDate(ts),
                name LowCardinality(String) DEFAULT ''
            )
            ENGINE = MergeTree()
            ORDER BY (id, ts)
            PARTITION BY toYYYYMM(day)
            SETTINGS index_granularity = 8192";
        let stmt = parse(sql).unwrap();
        let create = stmt.as_create().unwrap();
        assert_eq!(create.shape(), Shape::Table);
        assert_eq!(create.columns().map(|c| c.len()), Some(4));
        let storage = create.storage().unwrap();
        assert!(storage.partition_by().is_some());
        assert!(matches!(storage.order_by(), Some(crate::ast::Expr::Tuple(_))));
        assert_eq!(storage.parts().len(), 4);
    }

    #[test]
    fn test_create_table_as_other_table() {
        let create = parse("CREATE TABLE t2 AS db.t1 ENGINE = Memory").unwrap();
        let create = create.as_create().unwrap();
        let CreateKind::Table { as_table, .. } = create.kind() else {
            panic!("Expected table");
        };
        assert_eq!(as_table.as_ref().map(|t| t.name.as_str()), Some("t1"));
    }

    #[test]
    fn test_create_materialized_view() {
        let stmt = parse(
            "CREATE MATERIALIZED VIEW IF NOT EXISTS mv ENGINE = SummingMergeTree() \
             ORDER BY k POPULATE AS SELECT k, count() AS c FROM src GROUP BY k",
        )
        .unwrap();
        let create = stmt.as_create().unwrap();
        let CreateKind::MaterializedView { populate, to, .. } = create.kind() else {
            panic!("Expected materialized view");
        };
        assert!(*populate);
        assert!(to.is_none());
        assert!(create.select().is_some());
        assert!(create.storage().is_some());
    }

    #[test]
    fn test_create_dictionary_any_clause_order() {
        let stmt = parse(
            "CREATE DICTIONARY dict (id UInt64, name String DEFAULT '')
             LAYOUT(HASHED())
             SOURCE(CLICKHOUSE(HOST 'localhost' PORT 9000 USER 'default' PASSWORD 'pw' TABLE 'src'))
             PRIMARY KEY id
             LIFETIME(300)",
        )
        .unwrap();
        let create = stmt.as_create().unwrap();
        let source = create.source().unwrap();
        assert_eq!(source.port, Some(9000));
        assert_eq!(source.user.as_deref(), Some("default"));
        assert_eq!(source.password.as_deref(), Some("pw"));
        assert_eq!(source.table.as_deref(), Some("src"));
        assert_eq!(source.source().map(|s| s.args.pairs.len()), Some(1));
        assert_eq!(source.children().len(), 4);
        assert!(source.lifetime().unwrap().get("max").is_some());
    }

    #[test]
    fn test_attach_verb() {
        let stmt = parse("ATTACH TABLE t (x Int32) ENGINE = Log").unwrap();
        assert!(stmt.to_sql().starts_with("ATTACH TABLE t"));
    }

    #[test]
    fn test_invalid_modifiers() {
        let err = parse("CREATE OR REPLACE DATABASE d").unwrap_err();
        assert_eq!(err.message, "OR REPLACE is not valid for DATABASE");
        let err = parse("CREATE TEMPORARY VIEW v AS SELECT 1").unwrap_err();
        assert_eq!(err.message, "TEMPORARY is not valid for VIEW");
        let err = parse("ATTACH DICTIONARY d (k UInt64)").unwrap_err();
        assert_eq!(err.message, "ATTACH is not valid for DICTIONARY");
        let err = parse("CREATE DICTIONARY d ON CLUSTER c (k UInt64)").unwrap_err();
        assert_eq!(err.message, "ON CLUSTER is not valid for DICTIONARY");
    }

    #[test]
    fn test_duplicate_storage_clause() {
        let err = parse("CREATE TABLE t (x Int8) ENGINE = Log ENGINE = Memory").unwrap_err();
        assert_eq!(err.message, "Duplicate ENGINE clause");
    }

    #[test]
    fn test_view_rejects_storage() {
        assert!(parse("CREATE VIEW v ENGINE = Memory AS SELECT 1").is_err());
    }

    #[test]
    fn test_port_out_of_range() {
        let err = parse("CREATE DICTIONARY d (id UInt64) SOURCE(MYSQL(PORT 70000))").unwrap_err();
        assert_eq!(err.message, "Port 70000 out of range");
    }
}
