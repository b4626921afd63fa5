use crate::ast::{self, Expression, Operator, Statement};
use crate::stack::ensure_sufficient_stack;
use crate::token::{Keyword, Token, TokenType};
use custom_error::custom_error;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{line: usize, expected: String, found: String} = "ParseError at line {line}: expected {expected}, found {found}",
    InvalidAssignmentTarget{line: usize, target: String} = "ParseError at line {line}: expected assignable target, found {target}",
    InvalidNumber{line: usize, literal: String} = "ParseError at line {line}: invalid number literal {literal}",
    ReturnOutsideFunction{line: usize} = "ParseError at line {line}: 'thiruppu' used outside of a 'seyal' body",
}

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(token_type: TokenType) -> Precedence {
    match token_type {
        TokenType::Eq | TokenType::NotEq => Precedence::Equals,
        TokenType::LT | TokenType::GT | TokenType::LTEq | TokenType::GTEq => {
            Precedence::LessGreater
        }
        TokenType::Plus | TokenType::Minus => Precedence::Sum,
        TokenType::Asterisk | TokenType::Slash | TokenType::Percent => Precedence::Product,
        TokenType::LParen | TokenType::LBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Builds a program from a token stream, stopping at the first error.
pub fn parse(tokens: Vec<Token>) -> Result<ast::Program> {
    Parser::new(tokens).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    function_depth: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().map_or(false, |t| t.is(TokenType::Eof)) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenType::Eof, "", line));
        }

        Self {
            tokens,
            position: 0,
            function_depth: 0,
        }
    }

    fn cur_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn peek_token(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + 1).min(last)]
    }

    fn next_token(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    pub fn parse_program(mut self) -> Result<ast::Program> {
        let mut program = ast::Program::default();

        while !self.cur_token().is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement()? {
                program.statements.push(stmt);
            }
            self.next_token();
        }

        tracing::debug!(statements = program.statements.len(), "parsed program");
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Option<Statement>> {
        let stmt = match self.cur_token().token_type {
            TokenType::Keyword(Keyword::Vaippu) => self.parse_var_decl_statement()?,
            TokenType::Keyword(Keyword::Kaattu) => self.parse_print_statement()?,
            TokenType::Keyword(Keyword::Endraal) => self.parse_if_statement()?,
            TokenType::Keyword(Keyword::Thirumba) => self.parse_while_statement()?,
            TokenType::Keyword(Keyword::Foru) => self.parse_for_statement()?,
            TokenType::Keyword(Keyword::Seyal) => self.parse_function_statement()?,
            TokenType::Keyword(Keyword::Thiruppu) => self.parse_return_statement()?,
            TokenType::Keyword(Keyword::Karuthu) => {
                // `karuthu "..."` documents the program and produces nothing
                self.expect_peek(TokenType::String)?;
                return Ok(None);
            }
            TokenType::LBrace => Statement::Block(self.parse_block_statement()?),
            _ => self.parse_expression_statement()?,
        };
        Ok(Some(stmt))
    }

    fn parse_var_decl_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;

        let type_hint = match self.peek_token().token_type {
            TokenType::Keyword(kw) if kw.is_type_hint() => {
                self.next_token();
                Some(kw)
            }
            _ => None,
        };

        self.expect_peek(TokenType::Ident)?;
        let name = self.cur_token().literal.clone();

        self.expect_peek(TokenType::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(Statement::VarDecl(ast::VarDeclStatement {
            line,
            name,
            type_hint,
            value,
        }))
    }

    fn parse_print_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(Statement::Print(ast::PrintStatement { line, value }))
    }

    fn parse_if_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;
        let mut branches = vec![self.parse_conditional_block()?];
        let mut alternative = None;

        while self.peek_token().is_keyword(Keyword::Illai) {
            self.next_token();
            if self.peek_token().is_keyword(Keyword::Endraal) {
                self.next_token();
                branches.push(self.parse_conditional_block()?);
            } else {
                self.expect_peek(TokenType::LBrace)?;
                alternative = Some(self.parse_block_statement()?);
                break;
            }
        }

        Ok(Statement::If(ast::IfStatement {
            line,
            branches,
            alternative,
        }))
    }

    /// Parses `<cond> { ... }` following an `endraal` or `thirumba`.
    fn parse_conditional_block(&mut self) -> Result<ast::ConditionalBranch> {
        self.next_token();
        let line = self.cur_token().line;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::LBrace)?;
        let consequence = self.parse_block_statement()?;
        Ok(ast::ConditionalBranch {
            line,
            condition,
            consequence,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;
        let branch = self.parse_conditional_block()?;

        Ok(Statement::While(ast::WhileStatement {
            line,
            condition: branch.condition,
            body: branch.consequence,
        }))
    }

    fn parse_for_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;

        self.expect_peek(TokenType::Ident)?;
        let variable = self.cur_token().literal.clone();

        let peek = self.peek_token();
        if !(peek.is(TokenType::Ident) && peek.literal == "in") {
            return Err(self.peek_error("'in'"));
        }
        self.next_token();

        self.next_token();
        let iterable = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::LBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Statement::For(ast::ForStatement {
            line,
            variable,
            iterable,
            body,
        }))
    }

    fn parse_function_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;

        self.expect_peek(TokenType::Ident)?;
        let name = self.cur_token().literal.clone();

        self.expect_peek(TokenType::LParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenType::LBrace)?;
        self.function_depth += 1;
        let body = self.parse_block_statement();
        self.function_depth -= 1;

        Ok(Statement::Function(ast::FunctionStatement {
            line,
            name,
            parameters,
            body: body?,
        }))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<String>> {
        let mut identifiers = vec![];

        if self.peek_token().is(TokenType::RParen) {
            self.next_token();
            return Ok(identifiers);
        }

        self.expect_peek(TokenType::Ident)?;
        identifiers.push(self.cur_token().literal.clone());

        while self.peek_token().is(TokenType::Comma) {
            self.next_token();
            self.expect_peek(TokenType::Ident)?;
            identifiers.push(self.cur_token().literal.clone());
        }

        self.expect_peek(TokenType::RParen)?;

        Ok(identifiers)
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;
        if self.function_depth == 0 {
            return Err(ParseError::ReturnOutsideFunction { line });
        }

        let peek = self.peek_token();
        let bare = peek.is(TokenType::RBrace) || peek.is(TokenType::Eof) || peek.line != line;
        let value = if bare {
            None
        } else {
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        };

        Ok(Statement::Return(ast::ReturnStatement { line, value }))
    }

    fn parse_block_statement(&mut self) -> Result<ast::BlockStatement> {
        let line = self.cur_token().line;
        let mut statements = vec![];

        self.next_token();

        while !self.cur_token().is(TokenType::RBrace) {
            if self.cur_token().is(TokenType::Eof) {
                return Err(self.cur_error("'}'"));
            }
            if let Some(stmt) = ensure_sufficient_stack(|| self.parse_statement())? {
                statements.push(stmt);
            }
            self.next_token();
        }

        Ok(ast::BlockStatement { line, statements })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let line = self.cur_token().line;
        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.peek_token().is(TokenType::Assign) {
            return Ok(Statement::Expr(ast::ExpressionStatement { line, expression }));
        }

        if expression.assignment_root().is_none() {
            return Err(ParseError::InvalidAssignmentTarget {
                line,
                target: expression.to_string(),
            });
        }

        self.next_token();
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        Ok(Statement::Assign(ast::AssignStatement {
            line,
            target: expression,
            value,
        }))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;

            while !self.peek_token().is(TokenType::Eof) && precedence < self.peek_precedence() {
                self.next_token();
                left = self.parse_infix(left)?;
            }

            Ok(left)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        let token = self.cur_token().clone();

        match token.token_type {
            TokenType::Ident => Ok(Expression::Identifier(token.literal)),
            TokenType::Keyword(kw) if kw.is_callable() => Ok(Expression::Identifier(kw.to_string())),
            TokenType::Number => token
                .literal
                .parse::<f64>()
                .map(Expression::Number)
                .map_err(|_| ParseError::InvalidNumber {
                    line: token.line,
                    literal: token.literal.clone(),
                }),
            TokenType::String => Ok(Expression::String(token.literal)),
            TokenType::True => Ok(Expression::Boolean(true.into())),
            TokenType::False => Ok(Expression::Boolean(false.into())),
            TokenType::Bang | TokenType::Minus => self.parse_prefix_expression(token.token_type),
            TokenType::LParen => self.parse_grouped_expression(),
            TokenType::LBracket => self.parse_list_literal(),
            TokenType::Keyword(Keyword::Listu) => {
                self.expect_peek(TokenType::LBracket)?;
                self.parse_list_literal()
            }
            TokenType::Keyword(Keyword::Agarathi) => {
                self.expect_peek(TokenType::LBrace)?;
                self.parse_dict_literal()
            }
            _ => Err(self.cur_error("expression")),
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Result<Expression> {
        let token_type = self.cur_token().token_type;

        match token_type {
            TokenType::LParen => {
                let arguments = self.parse_expression_list(TokenType::RParen)?;
                Ok(Expression::Call(ast::CallExpression {
                    function: Box::new(left),
                    arguments,
                }))
            }
            TokenType::LBracket => {
                self.next_token();
                let index = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenType::RBracket)?;
                Ok(Expression::Index(ast::IndexExpression {
                    left: Box::new(left),
                    index: Box::new(index),
                }))
            }
            _ => {
                let operator = match Operator::from_token(token_type) {
                    Some(op) => op,
                    None => return Err(self.cur_error("operator")),
                };
                let precedence = precedence_of(token_type);
                self.next_token();
                let right = self.parse_expression(precedence)?;
                Ok(Expression::Infix(ast::InfixExpression {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                }))
            }
        }
    }

    fn parse_prefix_expression(&mut self, token_type: TokenType) -> Result<Expression> {
        let operator = match Operator::from_token(token_type) {
            Some(op) => op,
            None => return Err(self.cur_error("prefix operator")),
        };
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(ast::PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::RParen)?;
        Ok(expression)
    }

    fn parse_list_literal(&mut self) -> Result<Expression> {
        let elements = self.parse_expression_list(TokenType::RBracket)?;
        Ok(Expression::List(elements.into()))
    }

    fn parse_dict_literal(&mut self) -> Result<Expression> {
        let mut pairs = vec![];

        while !self.peek_token().is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(TokenType::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_token().is(TokenType::RBrace) {
                self.expect_peek(TokenType::Comma)?;
            }
        }
        self.expect_peek(TokenType::RBrace)?;

        Ok(Expression::Dict(pairs.into()))
    }

    /// Comma separated expressions up to `end`; a trailing comma is allowed.
    fn parse_expression_list(&mut self, end: TokenType) -> Result<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_token().is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token().is(TokenType::Comma) {
            self.next_token();
            if self.peek_token().is(end) {
                break;
            }
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;

        Ok(list)
    }

    /// Calls and indexing only continue an expression on the same line, so a
    /// parenthesised expression on the next line starts a new statement.
    fn peek_precedence(&self) -> Precedence {
        let peek = self.peek_token();
        match peek.token_type {
            TokenType::LParen | TokenType::LBracket if peek.line != self.cur_token().line => {
                Precedence::Lowest
            }
            token_type => precedence_of(token_type),
        }
    }

    fn expect_peek(&mut self, expected: TokenType) -> Result<()> {
        if self.peek_token().is(expected) {
            self.next_token();
            Ok(())
        } else {
            Err(self.peek_error(&expected.to_string()))
        }
    }

    fn peek_error(&self, expected: &str) -> ParseError {
        let peek = self.peek_token();
        ParseError::UnexpectedToken {
            line: peek.line,
            expected: expected.to_owned(),
            found: peek.describe(),
        }
    }

    fn cur_error(&self, expected: &str) -> ParseError {
        let cur = self.cur_token();
        ParseError::UnexpectedToken {
            line: cur.line,
            expected: expected.to_owned(),
            found: cur.describe(),
        }
    }
}
