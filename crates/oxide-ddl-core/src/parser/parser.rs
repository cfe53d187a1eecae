//! SQL Parser implementation.

use tracing::{debug, trace};

use super::error::ParseError;
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
    PREDICATE_BP,
};
use crate::ast::{
    BinaryOp, DataType, Expr, FunctionCall, JoinClause, JoinType, Literal, NullOrdering, OrderBy,
    OrderDirection, OutputOptions, QueryStatement, SelectColumn, SelectStatement, Statement,
    TableRef, TypeArg,
};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// SQL Parser.
///
/// Parses the CREATE / ATTACH family and top-level SELECT statements.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(super) current: Token,
    pub(super) previous: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
        }
    }

    /// Parses a single SQL statement.
    ///
    /// Stops after the statement; a trailing `;` is left unconsumed.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        trace!(position = self.current.span.start, "parsing statement");
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Create | Keyword::Attach) => Ok(Statement::Create(
                Box::new(self.parse_create_statement()?),
            )),
            TokenKind::Keyword(Keyword::Select) => {
                let select = self.parse_select_statement()?;
                let output = self.parse_output_options()?;
                Ok(Statement::Select(QueryStatement { select, output }))
            }
            _ => Err(ParseError::unexpected(
                "CREATE, ATTACH, or SELECT",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Parses every `;`-separated statement up to the end of input.
    ///
    /// Empty statements (stray semicolons) are skipped.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        loop {
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_statement()?);
            if !self.current.is_eof() {
                self.expect(&TokenKind::Semicolon)?;
            }
        }
        debug!(statements = statements.len(), "parsed input");
        Ok(statements)
    }

    /// Parses exactly one statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a single valid statement.
    pub fn parse_single(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_statement()?;
        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(ParseError::unexpected(
                "end of input",
                self.current.kind.clone(),
                self.current.span,
            ));
        }
        Ok(statement)
    }

    /// Parses a SELECT statement.
    pub(super) fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        // DISTINCT or ALL
        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else if self.check_keyword(Keyword::All) {
            self.advance();
            false
        } else {
            false
        };

        // SELECT columns
        let columns = self.parse_select_columns()?;

        // FROM clause (optional for expressions like SELECT 1+1)
        let from = if self.check_keyword(Keyword::From) {
            self.advance();
            Some(self.parse_table_ref()?)
        } else {
            None
        };

        // WHERE clause
        let where_clause = if self.check_keyword(Keyword::Where) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        // GROUP BY clause
        let group_by = if self.check_keyword(Keyword::Group) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_expression_list()?
        } else {
            vec![]
        };

        // HAVING clause
        let having = if self.check_keyword(Keyword::Having) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        // ORDER BY clause
        let order_by = if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };

        // LIMIT clause
        let limit = if self.check_keyword(Keyword::Limit) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        // OFFSET clause
        let offset = if self.check_keyword(Keyword::Offset) {
            self.advance();
            Some(self.parse_expression(0)?)
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
            offset,
        })
    }

    /// Parses SELECT columns.
    fn parse_select_columns(&mut self) -> Result<Vec<SelectColumn>, ParseError> {
        let mut columns = vec![];

        loop {
            let expr = self.parse_expression(0)?;
            let alias = self.parse_optional_alias()?;
            columns.push(SelectColumn { expr, alias });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        Ok(columns)
    }

    /// Parses a table reference.
    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut table_ref = if self.check(&TokenKind::LeftParen) {
            // Subquery or grouped table ref
            self.advance();
            if self.check_keyword(Keyword::Select) {
                let query = self.parse_select_statement()?;
                self.expect(&TokenKind::RightParen)?;
                let alias = self.parse_optional_alias()?;
                TableRef::Subquery {
                    query: Box::new(query),
                    alias: alias.unwrap_or_else(|| String::from("subquery")),
                }
            } else {
                let inner = self.parse_table_ref()?;
                self.expect(&TokenKind::RightParen)?;
                inner
            }
        } else {
            self.parse_simple_table_ref()?
        };

        // Parse joins
        while self.is_join_keyword() {
            let join_type = self.parse_join_type()?;
            let right = self.parse_simple_table_ref()?;

            let (on, using) = if join_type == JoinType::Cross {
                (None, vec![])
            } else if self.check_keyword(Keyword::On) {
                self.advance();
                (Some(self.parse_expression(0)?), vec![])
            } else if self.check_keyword(Keyword::Using) {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let cols = self.parse_name_list()?;
                self.expect(&TokenKind::RightParen)?;
                (None, cols)
            } else {
                return Err(ParseError::new(
                    "Expected ON or USING clause",
                    self.current.span,
                ));
            };

            table_ref = TableRef::Join {
                left: Box::new(table_ref),
                join: Box::new(JoinClause {
                    join_type,
                    table: right,
                    on,
                    using,
                }),
            };
        }

        Ok(table_ref)
    }

    /// Parses a simple table reference (no joins).
    fn parse_simple_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let (schema, name) = self.parse_qualified_name()?;
        let alias = self.parse_optional_alias()?;

        Ok(TableRef::Table {
            schema,
            name,
            alias,
        })
    }

    /// Parses `name` or `database.name`.
    pub(super) fn parse_qualified_name(
        &mut self,
    ) -> Result<(Option<String>, String), ParseError> {
        let first = self.expect_name()?;
        if self.check(&TokenKind::Dot) {
            self.advance();
            let second = self.expect_name()?;
            Ok((Some(first), second))
        } else {
            Ok((None, first))
        }
    }

    /// Checks if current token is a join keyword.
    fn is_join_keyword(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Keyword(
                Keyword::Join
                    | Keyword::Inner
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::Full
                    | Keyword::Cross
            )
        )
    }

    /// Parses a join type.
    fn parse_join_type(&mut self) -> Result<JoinType, ParseError> {
        let join_type = match &self.current.kind {
            TokenKind::Keyword(Keyword::Join) => {
                self.advance();
                JoinType::Inner
            }
            TokenKind::Keyword(Keyword::Inner) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Inner
            }
            TokenKind::Keyword(kw @ (Keyword::Left | Keyword::Right | Keyword::Full)) => {
                let join_type = match kw {
                    Keyword::Left => JoinType::Left,
                    Keyword::Right => JoinType::Right,
                    _ => JoinType::Full,
                };
                self.advance();
                if self.check_keyword(Keyword::Outer) {
                    self.advance();
                }
                self.expect_keyword(Keyword::Join)?;
                join_type
            }
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                self.expect_keyword(Keyword::Join)?;
                JoinType::Cross
            }
            _ => {
                return Err(ParseError::unexpected(
                    "JOIN keyword",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        Ok(join_type)
    }

    /// Parses an optional alias: `AS name`, or a bare identifier that does
    /// not start an output clause.
    fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.check_keyword(Keyword::As) {
            // `AS SELECT` belongs to the enclosing CREATE.
            if matches!(self.peek_kind(), TokenKind::Keyword(Keyword::Select)) {
                return Ok(None);
            }
            self.advance();
            Ok(Some(self.expect_name()?))
        } else if matches!(&self.current.kind, TokenKind::Identifier(_))
            && !self.current.is_word("FORMAT")
        {
            Ok(Some(self.expect_name()?))
        } else {
            Ok(None)
        }
    }

    /// Parses an ORDER BY list.
    fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expression(0)?;
            let direction = if self.check_keyword(Keyword::Desc) {
                self.advance();
                OrderDirection::Desc
            } else if self.check_keyword(Keyword::Asc) {
                self.advance();
                OrderDirection::Asc
            } else {
                OrderDirection::Asc
            };

            let nulls = if self.check_keyword(Keyword::Nulls) {
                self.advance();
                if self.check_keyword(Keyword::First) {
                    self.advance();
                    Some(NullOrdering::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullOrdering::Last)
                }
            } else {
                None
            };

            items.push(OrderBy {
                expr,
                direction,
                nulls,
            });

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(items)
    }

    /// Parses `INTO OUTFILE 'file'` and `FORMAT name`, both optional.
    pub(super) fn parse_output_options(&mut self) -> Result<OutputOptions, ParseError> {
        let mut output = OutputOptions::new();
        if self.check_keyword(Keyword::Into) {
            self.advance();
            self.expect_keyword(Keyword::Outfile)?;
            output.out_file = Some(self.expect_string()?);
        }
        if self.current.is_word("FORMAT") {
            self.advance();
            output.format = Some(self.expect_name()?);
        }
        Ok(output)
    }

    /// Parses an expression using Pratt parsing.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        // Parse prefix (primary expression or unary operator)
        let mut lhs = self.parse_prefix()?;

        // Parse infix operators
        loop {
            // Check if current token is an infix operator
            let Some((l_bp, r_bp)) = infix_binding_power(&self.current.kind) else {
                break;
            };

            if l_bp < min_bp {
                break;
            }

            // Handle special infix operators
            match &self.current.kind {
                TokenKind::Keyword(Keyword::Not) => {
                    // NOT IN / NOT LIKE / NOT BETWEEN
                    let next = self.peek_kind();
                    if !matches!(
                        next,
                        TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Between)
                    ) {
                        break;
                    }
                    self.advance();
                    lhs = self.parse_predicate(lhs, true, r_bp)?;
                }
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let negated = if self.check_keyword(Keyword::Not) {
                        self.advance();
                        true
                    } else {
                        false
                    };
                    self.expect_keyword(Keyword::Null)?;
                    lhs = Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                    };
                }
                TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Between) => {
                    lhs = self.parse_predicate(lhs, false, r_bp)?;
                }
                _ => {
                    // Standard binary operator
                    let Some(op) = token_to_binary_op(&self.current.kind) else {
                        break;
                    };
                    self.advance();
                    let rhs = self.parse_expression(r_bp)?;
                    lhs = Expr::Binary {
                        left: Box::new(lhs),
                        op,
                        right: Box::new(rhs),
                    };
                }
            }
        }

        Ok(lhs)
    }

    /// Parses the rest of an `IN`, `LIKE` or `BETWEEN` predicate; the
    /// current token is the operator keyword.
    fn parse_predicate(&mut self, lhs: Expr, negated: bool, r_bp: u8) -> Result<Expr, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let list = if self.check(&TokenKind::RightParen) {
                    vec![]
                } else if self.check_keyword(Keyword::Select) {
                    vec![Expr::Subquery(Box::new(self.parse_select_statement()?))]
                } else {
                    self.parse_expression_list()?
                };
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::In {
                    expr: Box::new(lhs),
                    list,
                    negated,
                })
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.advance();
                let rhs = self.parse_expression(r_bp)?;
                Ok(Expr::Binary {
                    left: Box::new(lhs),
                    op: if negated {
                        BinaryOp::NotLike
                    } else {
                        BinaryOp::Like
                    },
                    right: Box::new(rhs),
                })
            }
            _ => {
                self.expect_keyword(Keyword::Between)?;
                let low = self.parse_expression(PREDICATE_BP.1)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(PREDICATE_BP.1)?;
                Ok(Expr::Between {
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                })
            }
        }
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        // Check for unary operators
        if let Some(op) = token_to_unary_op(&self.current.kind) {
            let bp = prefix_binding_power(&self.current.kind).unwrap_or(13);
            self.advance();
            let operand = self.parse_expression(bp)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current.clone();

        match &token.kind {
            // Literals
            TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Keyword(Keyword::True | Keyword::False | Keyword::Null) => {
                Ok(Expr::Literal(self.parse_literal()?))
            }

            // Wildcard
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard { table: None })
            }

            // Parenthesized expression, tuple or subquery
            TokenKind::LeftParen => {
                self.advance();
                if self.check_keyword(Keyword::Select) {
                    let subquery = self.parse_select_statement()?;
                    self.expect(&TokenKind::RightParen)?;
                    return Ok(Expr::Subquery(Box::new(subquery)));
                }
                if self.check(&TokenKind::RightParen) {
                    self.advance();
                    return Ok(Expr::Tuple(vec![]));
                }
                let mut items = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                if items.len() == 1 {
                    let expr = items.remove(0);
                    Ok(Expr::Paren(Box::new(expr)))
                } else {
                    Ok(Expr::Tuple(items))
                }
            }

            // Array literal
            TokenKind::LeftBracket => {
                self.advance();
                let items = if self.check(&TokenKind::RightBracket) {
                    vec![]
                } else {
                    self.parse_expression_list()?
                };
                self.expect(&TokenKind::RightBracket)?;
                Ok(Expr::Array(items))
            }

            TokenKind::Keyword(Keyword::Cast) => {
                self.advance();
                self.parse_cast_expression()
            }

            // CASE expression
            TokenKind::Keyword(Keyword::Case) => self.parse_case_expression(),

            // Identifier (column reference or function call)
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();

                // Check for function call
                if self.check(&TokenKind::LeftParen) {
                    return Ok(Expr::Function(self.parse_function_call(name)?));
                }

                // Check for qualified name (table.column or table.*)
                if self.check(&TokenKind::Dot) {
                    self.advance();
                    if self.check(&TokenKind::Star) {
                        self.advance();
                        return Ok(Expr::Wildcard { table: Some(name) });
                    }
                    let column = self.expect_name()?;
                    return Ok(Expr::Column {
                        table: Some(name),
                        name: column,
                    });
                }

                Ok(Expr::Column { table: None, name })
            }

            // Functions spelled like keywords, e.g. `if(c, a, b)`
            TokenKind::Keyword(_) if matches!(self.peek_kind(), TokenKind::LeftParen) => {
                let name = self.expect_name()?;
                Ok(Expr::Function(self.parse_function_call(name)?))
            }

            _ => Err(ParseError::unexpected(
                "expression",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Parses a literal, including a negative number written with a
    /// leading `-`.
    pub(super) fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let negative = if self.check(&TokenKind::Minus) {
            self.advance();
            true
        } else {
            false
        };

        let literal = match (&self.current.kind, negative) {
            (TokenKind::Integer(n), _) => Literal::Integer(if negative { -*n } else { *n }),
            (TokenKind::Float(f), _) => Literal::Float(if negative { -*f } else { *f }),
            (TokenKind::String(s), false) => Literal::String(s.clone()),
            (TokenKind::Keyword(Keyword::True), false) => Literal::Boolean(true),
            (TokenKind::Keyword(Keyword::False), false) => Literal::Boolean(false),
            (TokenKind::Keyword(Keyword::Null), false) => Literal::Null,
            _ => {
                return Err(ParseError::unexpected(
                    if negative { "number" } else { "literal" },
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();
        Ok(literal)
    }

    /// Parses the argument list of a function call; the current token is
    /// the opening parenthesis.
    pub(super) fn parse_function_call(&mut self, name: String) -> Result<FunctionCall, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let distinct = if self.check_keyword(Keyword::Distinct) {
            self.advance();
            true
        } else {
            false
        };

        let args = if self.check(&TokenKind::RightParen) {
            vec![]
        } else {
            self.parse_expression_list()?
        };

        self.expect(&TokenKind::RightParen)?;

        Ok(FunctionCall {
            name,
            args,
            distinct,
        })
    }

    /// Parses a CAST expression.
    fn parse_cast_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expression(0)?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_data_type()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
        })
    }

    /// Parses a CASE expression.
    fn parse_case_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        // Check for simple CASE (CASE expr WHEN ...)
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression(0)?))
        };

        // Parse WHEN/THEN clauses
        let mut when_clauses = vec![];
        while self.check_keyword(Keyword::When) {
            self.advance();
            let when_expr = self.parse_expression(0)?;
            self.expect_keyword(Keyword::Then)?;
            let then_expr = self.parse_expression(0)?;
            when_clauses.push((when_expr, then_expr));
        }
        if when_clauses.is_empty() {
            return Err(ParseError::unexpected(
                "WHEN",
                self.current.kind.clone(),
                self.current.span,
            ));
        }

        // Parse ELSE clause
        let else_clause = if self.check_keyword(Keyword::Else) {
            self.advance();
            Some(Box::new(self.parse_expression(0)?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// Parses a data type: a name with optional parameters, each either a
    /// nested type or a value.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let mut data_type = DataType::new(self.expect_name()?);
        if !self.check(&TokenKind::LeftParen) {
            return Ok(data_type);
        }
        self.advance();

        if !self.check(&TokenKind::RightParen) {
            loop {
                let arg = if self.is_name() {
                    TypeArg::Type(self.parse_data_type()?)
                } else {
                    TypeArg::Value(self.parse_expression(0)?)
                };
                data_type.args.push(arg);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(data_type)
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];
        loop {
            exprs.push(self.parse_expression(0)?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(exprs)
    }

    /// Parses a comma-separated list of names.
    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![];
        loop {
            names.push(self.expect_name()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(names)
    }

    // --- Helper methods ---

    /// Advances to the next token.
    pub(super) fn advance(&mut self) {
        self.previous = core::mem::replace(&mut self.current, self.lexer.next_token());
    }

    /// Returns the kind of the token after the current one.
    pub(super) fn peek_kind(&self) -> TokenKind {
        self.lexer.clone().next_token().kind
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.advance();
        }
        found
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                format!("{kind:?}"),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Expects an identifier spelled `word`, ignoring ASCII case.
    pub(super) fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.current.is_word(word) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                word,
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    /// Returns true if the current token can be read as a name.
    pub(super) fn is_name(&self) -> bool {
        matches!(
            &self.current.kind,
            TokenKind::Identifier(_) | TokenKind::Keyword(_)
        )
    }

    /// Expects and returns a name: an identifier, or a keyword used as a
    /// name, spelled as in the source.
    pub(super) fn expect_name(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Keyword(_) => {
                let name = self.current.span.slice(self.lexer.input()).to_string();
                self.advance();
                Ok(name)
            }
            _ => Err(ParseError::unexpected(
                "identifier",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }

    /// Expects and returns a string literal.
    pub(super) fn expect_string(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(ParseError::unexpected(
                "string literal",
                self.current.kind.clone(),
                self.current.span,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Node, UnaryOp};

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_single()
    }

    fn parse_expr(sql: &str) -> Expr {
        Parser::new(sql).parse_expression(0).unwrap()
    }

    #[test]
    fn test_simple_select() {
        let stmt = parse("SELECT id, name FROM users").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_select_with_where() {
        let stmt = parse("SELECT * FROM users WHERE id = 1").unwrap();
        if let Statement::Select(query) = stmt {
            assert!(query.select.where_clause.is_some());
        } else {
            panic!("Expected SELECT statement");
        }
    }

    #[test]
    fn test_select_with_join() {
        let stmt =
            parse("SELECT u.id, o.amount FROM users u JOIN orders o ON u.id = o.user_id").unwrap();
        assert!(matches!(stmt, Statement::Select(_)));
    }

    #[test]
    fn test_select_output_options() {
        let stmt = parse("SELECT * FROM t INTO OUTFILE 'out.tsv' FORMAT TSV").unwrap();
        let Statement::Select(query) = stmt else {
            panic!("Expected SELECT statement");
        };
        assert_eq!(query.output.out_file.as_deref(), Some("out.tsv"));
        assert_eq!(query.output.format.as_deref(), Some("TSV"));
        assert!(matches!(
            query.select.from,
            Some(TableRef::Table { alias: None, .. })
        ));
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let expr = parse_expr("1 + 2 * 3");
        if let Expr::Binary { op, right, .. } = &expr {
            assert_eq!(*op, BinaryOp::Add);
            assert!(matches!(
                right.as_ref(),
                Expr::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        } else {
            panic!("Expected binary expression");
        }
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let expr = parse_expr("NOT a = 1 AND b");
        let Expr::Binary { op, left, .. } = &expr else {
            panic!("Expected binary expression");
        };
        assert_eq!(*op, BinaryOp::And);
        assert!(matches!(
            left.as_ref(),
            Expr::Unary {
                op: UnaryOp::Not,
                ..
            }
        ));
    }

    #[test]
    fn test_negated_predicates() {
        assert!(matches!(
            parse_expr("a NOT IN (1, 2)"),
            Expr::In { negated: true, .. }
        ));
        assert!(matches!(
            parse_expr("a NOT BETWEEN 1 AND 2"),
            Expr::Between { negated: true, .. }
        ));
        assert!(matches!(
            parse_expr("a NOT LIKE 'x%'"),
            Expr::Binary {
                op: BinaryOp::NotLike,
                ..
            }
        ));
        assert!(matches!(
            parse_expr("a IS NOT NULL"),
            Expr::IsNull { negated: true, .. }
        ));
    }

    #[test]
    fn test_tuples_and_arrays() {
        assert!(matches!(parse_expr("(a, b)"), Expr::Tuple(items) if items.len() == 2));
        assert!(matches!(parse_expr("()"), Expr::Tuple(items) if items.is_empty()));
        assert!(matches!(parse_expr("(a)"), Expr::Paren(_)));
        assert!(matches!(parse_expr("[1, 2, 3]"), Expr::Array(items) if items.len() == 3));
    }

    #[test]
    fn test_keyword_function_name() {
        let expr = parse_expr("if(a > 1, 'x', 'y')");
        assert!(matches!(expr, Expr::Function(call) if call.name == "if" && call.args.len() == 3));
    }

    #[test]
    fn test_case_expression() {
        let stmt =
            parse("SELECT CASE WHEN status = 1 THEN 'active' ELSE 'inactive' END FROM users")
                .unwrap();
        if let Statement::Select(query) = stmt {
            assert!(matches!(query.select.columns[0].expr, Expr::Case { .. }));
        }
    }

    #[test]
    fn test_cast_with_parameterised_type() {
        let expr = parse_expr("CAST(x AS Nullable(Decimal(10, 2)))");
        let Expr::Cast { data_type, .. } = &expr else {
            panic!("Expected CAST");
        };
        assert_eq!(data_type.to_sql(), "Nullable(Decimal(10, 2))");
    }

    #[test]
    fn test_aggregate_functions() {
        let stmt = parse("SELECT count(*), sum(amount), uniq(DISTINCT user) FROM orders").unwrap();
        if let Statement::Select(query) = stmt {
            assert_eq!(query.select.columns.len(), 3);
            assert!(matches!(query.select.columns[0].expr, Expr::Function(_)));
            assert!(matches!(
                &query.select.columns[2].expr,
                Expr::Function(call) if call.distinct
            ));
        }
    }

    #[test]
    fn test_order_by_nulls() {
        let stmt = parse("SELECT a FROM t ORDER BY a DESC NULLS FIRST, b").unwrap();
        let Statement::Select(query) = stmt else {
            panic!("Expected SELECT statement");
        };
        assert_eq!(query.select.order_by.len(), 2);
        assert_eq!(query.select.order_by[0].nulls, Some(NullOrdering::First));
        assert_eq!(query.select.order_by[1].direction, OrderDirection::Asc);
    }

    #[test]
    fn test_parse_statements_skips_empty() {
        let statements = Parser::new(";SELECT 1;; SELECT 2;")
            .parse_statements()
            .unwrap();
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_parse_single_rejects_trailing_tokens() {
        assert!(parse("SELECT 1 2 3").is_err());
        assert!(parse("SELECT 1;").is_ok());
    }

    #[test]
    fn test_unknown_statement() {
        let err = parse("DROP TABLE t").unwrap_err();
        assert_eq!(err.expected.as_deref(), Some("CREATE, ATTACH, or SELECT"));
    }
}
