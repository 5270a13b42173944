//! Recursive-descent parser turning a token stream into an AST.
//!
//! Parser tracing (`-p`) is emitted via `log::trace!` as each grammar rule is
//! entered. Like the lexer, its only contract with the core is handing the
//! driver a statement list plus a set of `FunctionDefinition`s.

mod error;

pub use error::*;

use std::rc::Rc;

use crate::ast::*;
use crate::lexer::{Token, TokenKind};
use crate::location::Location;

pub struct Program {
    pub functions: Vec<FunctionDefinition>,
    pub statements: Vec<Statement>,
}

pub struct Parser {
    file: Rc<str>,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(file: Rc<str>, tokens: Vec<Token>) -> Self {
        Self { file, tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        // `lex` always appends a trailing Eof, so this never runs off the end.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn loc(&self) -> Location {
        self.current().location.clone()
    }

    fn at_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !self.at_eof() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(ParseError {
                message: format!("expected {what}, found {}", self.current().kind),
                location: self.loc(),
            })
        }
    }

    fn expect_ident(&mut self) -> ParseResult<(Rc<str>, Location)> {
        let location = self.loc();
        match self.advance().kind {
            TokenKind::Ident(name) => Ok((Rc::from(name.as_str()), location)),
            other => Err(ParseError {
                message: format!("expected identifier, found {other}"),
                location,
            }),
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Program> {
        log::trace!("parsing program");
        let mut functions = vec![];
        let mut statements = vec![];

        while !self.at_eof() {
            if self.check(&TokenKind::Function) {
                functions.push(self.parse_function_def()?);
            } else {
                statements.push(self.parse_statement()?);
            }
        }

        Ok(Program { functions, statements })
    }

    fn parse_function_def(&mut self) -> ParseResult<FunctionDefinition> {
        log::trace!("parsing function definition");
        let start = self.loc();
        self.expect(TokenKind::Function, "'function'")?;
        let (name, _) = self.expect_ident()?;

        self.expect(TokenKind::LParen, "'('")?;
        let mut params = vec![];
        if !self.check(&TokenKind::RParen) {
            loop {
                let (param, _) = self.expect_ident()?;
                params.push(param);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_block()?;
        let location = start.merge(&body.location);

        Ok(FunctionDefinition { name, params, body, location })
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.loc();
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut statements = vec![];
        while !self.check(&TokenKind::RBrace) {
            if self.at_eof() {
                return Err(ParseError {
                    message: "unexpected end of file inside block".to_owned(),
                    location: self.loc(),
                });
            }
            statements.push(self.parse_statement()?);
        }

        let end = self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Block { statements, location: start.merge(&end.location) })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        log::trace!("parsing statement at {}", self.loc());
        match &self.current().kind {
            TokenKind::Global => self.parse_global(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => {
                let location = self.advance().location;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Statement::Break(location))
            }
            TokenKind::Continue => {
                let location = self.advance().location;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Statement::Continue(location))
            }
            _ => self.parse_expr_statement(),
        }
    }

    fn parse_global(&mut self) -> ParseResult<Statement> {
        let start = self.loc();
        self.expect(TokenKind::Global, "'global'")?;

        let mut names = vec![];
        loop {
            let (name, _) = self.expect_ident()?;
            names.push(name);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let end = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Statement::Global(GlobalStmt { names, location: start.merge(&end.location) }))
    }

    fn parse_if(&mut self) -> ParseResult<Statement> {
        let start = self.loc();
        self.expect(TokenKind::If, "'if'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_block = self.parse_block()?;

        let mut elseifs = vec![];
        let mut else_block = None;
        let mut end_location = then_block.location.clone();

        loop {
            if self.check(&TokenKind::ElseIf) {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let cond = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                let block = self.parse_block()?;
                end_location = block.location.clone();
                elseifs.push(ElseIf { condition: cond, block });
            } else if self.check(&TokenKind::Else) {
                self.advance();
                let block = self.parse_block()?;
                end_location = block.location.clone();
                else_block = Some(block);
                break;
            } else {
                break;
            }
        }

        Ok(Statement::If(IfStmt {
            condition,
            then_block,
            elseifs,
            else_block,
            location: start.merge(&end_location),
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Statement> {
        let start = self.loc();
        self.expect(TokenKind::While, "'while'")?;
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        let location = start.merge(&body.location);
        Ok(Statement::While(WhileStmt { condition, body, location }))
    }

    fn parse_for(&mut self) -> ParseResult<Statement> {
        let start = self.loc();
        self.expect(TokenKind::For, "'for'")?;
        self.expect(TokenKind::LParen, "'('")?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        let post = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_block()?;
        let location = start.merge(&body.location);
        Ok(Statement::For(ForStmt { init, condition, post, body, location }))
    }

    fn parse_return(&mut self) -> ParseResult<Statement> {
        let start = self.loc();
        self.expect(TokenKind::Return, "'return'")?;

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        let end = self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Statement::Return(ReturnStmt { value, location: start.merge(&end.location) }))
    }

    fn parse_expr_statement(&mut self) -> ParseResult<Statement> {
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Statement::Expr(expr))
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<Expression> {
        let target = self.parse_or()?;

        if self.check(&TokenKind::Assign) {
            self.advance();
            let value = self.parse_assignment()?;
            let location = target.location().merge(value.location());
            return Ok(Expression::Assign(Assign {
                target: Box::new(target),
                value: Box::new(value),
                location,
            }));
        }

        Ok(target)
    }

    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_and()?;
        while self.check(&TokenKind::OrOr) {
            self.advance();
            let rhs = self.parse_and()?;
            let location = lhs.location().merge(rhs.location());
            lhs = Expression::Binary(BinaryOp {
                verb: BinaryVerb::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                location,
            });
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_equality()?;
        while self.check(&TokenKind::AndAnd) {
            self.advance();
            let rhs = self.parse_equality()?;
            let location = lhs.location().merge(rhs.location());
            lhs = Expression::Binary(BinaryOp {
                verb: BinaryVerb::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                location,
            });
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_comparison()?;
        loop {
            let verb = match self.current().kind {
                TokenKind::EqEq => BinaryVerb::Eq,
                TokenKind::NotEq => BinaryVerb::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_comparison()?;
            let location = lhs.location().merge(rhs.location());
            lhs = Expression::Binary(BinaryOp { verb, lhs: Box::new(lhs), rhs: Box::new(rhs), location });
        }
        Ok(lhs)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_term()?;
        loop {
            let verb = match self.current().kind {
                TokenKind::Gt => BinaryVerb::Gt,
                TokenKind::GtEq => BinaryVerb::Ge,
                TokenKind::Lt => BinaryVerb::Lt,
                TokenKind::LtEq => BinaryVerb::Le,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            let location = lhs.location().merge(rhs.location());
            lhs = Expression::Binary(BinaryOp { verb, lhs: Box::new(lhs), rhs: Box::new(rhs), location });
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_factor()?;
        loop {
            let verb = match self.current().kind {
                TokenKind::Plus => BinaryVerb::Add,
                TokenKind::Minus => BinaryVerb::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            let location = lhs.location().merge(rhs.location());
            lhs = Expression::Binary(BinaryOp { verb, lhs: Box::new(lhs), rhs: Box::new(rhs), location });
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.parse_unary()?;
        loop {
            let verb = match self.current().kind {
                TokenKind::Star => BinaryVerb::Mul,
                TokenKind::Slash => BinaryVerb::Div,
                TokenKind::Percent => BinaryVerb::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            let location = lhs.location().merge(rhs.location());
            lhs = Expression::Binary(BinaryOp { verb, lhs: Box::new(lhs), rhs: Box::new(rhs), location });
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let verb = match self.current().kind {
            TokenKind::Minus => Some(UnaryVerb::Minus),
            TokenKind::Bang => Some(UnaryVerb::Not),
            _ => None,
        };

        if let Some(verb) = verb {
            let start = self.advance().location;
            let operand = self.parse_unary()?;
            let location = start.merge(operand.location());
            return Ok(Expression::Unary(UnaryOp { verb, operand: Box::new(operand), location }));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let location = self.loc();
        match self.advance().kind {
            TokenKind::Int(value) => Ok(Expression::IntLit(IntLit { value, location })),
            TokenKind::Double(value) => Ok(Expression::DoubleLit(DoubleLit { value, location })),
            TokenKind::Str(value) => Ok(Expression::StringLit(StringLit { value: Rc::from(value.as_str()), location })),
            TokenKind::True => Ok(Expression::BoolLit(BoolLit { value: true, location })),
            TokenKind::False => Ok(Expression::BoolLit(BoolLit { value: false, location })),
            TokenKind::Null => Ok(Expression::NullLit(NullLit { location })),
            TokenKind::Ident(name) => {
                if self.check(&TokenKind::LParen) {
                    self.parse_call(Rc::from(name.as_str()), location)
                } else {
                    Ok(Expression::Ident(Ident { name: Rc::from(name.as_str()), location }))
                }
            }
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            other => Err(ParseError {
                message: format!("unexpected token {other} in expression"),
                location,
            }),
        }
    }

    fn parse_call(&mut self, name: Rc<str>, start: Location) -> ParseResult<Expression> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = vec![];
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let end = self.expect(TokenKind::RParen, "')'")?;
        Ok(Expression::Call(Call { name, args, location: start.merge(&end.location) }))
    }
}
