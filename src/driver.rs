//! Ties the lexer, parser, and interpreter together: reads a file, builds
//! the function table and top-level statement list, and runs them against
//! a persistent `Environment`.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::ast::{Block, Expression, FunctionDefinition, Statement};
use crate::context::Context;
use crate::environment::Environment;
use crate::eval_error::EvalError;
use crate::interpreter::{exec_stmt, StatementResult};
use crate::lexer::{LexError, Lexer};
use crate::parser::{ParseError, Parser};
use crate::value::Value;

#[derive(Debug)]
pub enum DriverError {
    Io(Rc<str>, std::io::Error),
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
}

impl Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Io(file, err) => write!(f, "{file}: {err}"),
            DriverError::Lex(err) => write!(f, "{err}"),
            DriverError::Parse(err) => write!(f, "{err}"),
            DriverError::Eval(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DriverError {}

impl From<EvalError> for DriverError {
    fn from(err: EvalError) -> Self {
        DriverError::Eval(err)
    }
}

#[derive(Default)]
pub struct Driver {
    functions: HashMap<Rc<str>, FunctionDefinition>,
    statements: Vec<Statement>,
    env: Environment,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, path: &Path) -> Result<(), DriverError> {
        let file: Rc<str> = Rc::from(path.to_string_lossy().as_ref());
        let content = fs::read_to_string(path).map_err(|err| DriverError::Io(file.clone(), err))?;
        self.parse_str(file, &content)
    }

    pub fn parse_str(&mut self, file: Rc<str>, content: &str) -> Result<(), DriverError> {
        log::debug!("lexing {file}");
        let tokens = Lexer::new(file.clone(), content).lex().map_err(DriverError::Lex)?;

        log::debug!("parsing {file}");
        let program = Parser::new(file, tokens).parse_program().map_err(DriverError::Parse)?;

        for def in program.functions {
            self.add_function(def);
        }
        self.statements.extend(program.statements);
        Ok(())
    }

    /// First definition of a name wins; later ones are parsed but discarded.
    pub fn add_function(&mut self, def: FunctionDefinition) {
        self.functions.entry(def.name.clone()).or_insert(def);
    }

    /// Indented tree dump of the parsed program (`-d`/`--dump`), written
    /// directly to stdout rather than collected into a string.
    pub fn dump(&self) {
        let mut names: Vec<&Rc<str>> = self.functions.keys().collect();
        names.sort();
        for name in names {
            let def = &self.functions[name];
            let params: Vec<&str> = def.params.iter().map(|p| p.as_ref()).collect();
            println!("function {}({})", def.name, params.join(", "));
            dump_block(&def.body, 1);
        }

        for stmt in &self.statements {
            dump_stmt(stmt, 0);
        }
    }

    pub fn run(&mut self) -> Result<(), DriverError> {
        let mut ctx = Context::new(&self.functions, &mut self.env);

        for stmt in &self.statements {
            match exec_stmt(&mut ctx, stmt)? {
                StatementResult::Normal => {}
                StatementResult::Return(_) => {
                    return Err(EvalError::new(
                        stmt.location().clone(),
                        "'return' is only legal inside a function body",
                    )
                    .into());
                }
                StatementResult::Break | StatementResult::Continue => {
                    return Err(EvalError::new(
                        stmt.location().clone(),
                        "'break'/'continue' is only legal inside a loop",
                    )
                    .into());
                }
            }
        }

        Ok(())
    }

    /// Test and REPL-ish helper: read a global by name after `run` returns.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.get(name)
    }
}

fn dump_block(block: &Block, indent: usize) {
    for stmt in &block.statements {
        dump_stmt(stmt, indent);
    }
}

fn dump_expr(expr: &Expression, indent: usize) {
    let pad = "  ".repeat(indent);
    println!("{pad}{}", expr.kind_label());
    match expr {
        Expression::Unary(unary) => dump_expr(&unary.operand, indent + 1),
        Expression::Binary(binary) => {
            dump_expr(&binary.lhs, indent + 1);
            dump_expr(&binary.rhs, indent + 1);
        }
        Expression::Assign(assign) => {
            dump_expr(&assign.target, indent + 1);
            dump_expr(&assign.value, indent + 1);
        }
        Expression::Call(call) => {
            for arg in &call.args {
                dump_expr(arg, indent + 1);
            }
        }
        Expression::BoolLit(_)
        | Expression::IntLit(_)
        | Expression::DoubleLit(_)
        | Expression::StringLit(_)
        | Expression::NullLit(_)
        | Expression::Ident(_) => {}
    }
}

fn dump_stmt(stmt: &Statement, indent: usize) {
    let pad = "  ".repeat(indent);
    match stmt {
        Statement::Expr(expr) => dump_expr(expr, indent),
        Statement::Global(global) => println!("{pad}GlobalStmt({})", global.names.join(", ")),
        Statement::If(if_stmt) => {
            println!("{pad}IfStmt");
            dump_expr(&if_stmt.condition, indent + 1);
            dump_block(&if_stmt.then_block, indent + 1);
            for elseif in &if_stmt.elseifs {
                println!("{pad}ElseIf");
                dump_expr(&elseif.condition, indent + 1);
                dump_block(&elseif.block, indent + 1);
            }
            if let Some(else_block) = &if_stmt.else_block {
                println!("{pad}Else");
                dump_block(else_block, indent + 1);
            }
        }
        Statement::While(while_stmt) => {
            println!("{pad}WhileStmt");
            dump_expr(&while_stmt.condition, indent + 1);
            dump_block(&while_stmt.body, indent + 1);
        }
        Statement::For(for_stmt) => {
            println!("{pad}ForStmt");
            if let Some(init) = &for_stmt.init {
                dump_expr(init, indent + 1);
            }
            if let Some(condition) = &for_stmt.condition {
                dump_expr(condition, indent + 1);
            }
            dump_block(&for_stmt.body, indent + 1);
            if let Some(post) = &for_stmt.post {
                dump_expr(post, indent + 1);
            }
        }
        Statement::Return(return_stmt) => {
            println!("{pad}ReturnStmt");
            if let Some(value) = &return_stmt.value {
                dump_expr(value, indent + 1);
            }
        }
        Statement::Break(_) | Statement::Continue(_) => {
            println!("{pad}{}", stmt.kind_label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_function_definition_wins() {
        let mut driver = Driver::new();
        driver
            .parse_str(
                Rc::from("test"),
                "function f() { return 1; } function f() { return 2; } r = f();",
            )
            .unwrap();
        driver.run().unwrap();
        assert_eq!(driver.global("r"), Some(Value::Int64(1)));
    }

    #[test]
    fn parse_str_accumulates_across_calls() {
        let mut driver = Driver::new();
        driver.parse_str(Rc::from("a"), "x = 1;").unwrap();
        driver.parse_str(Rc::from("b"), "y = x + 1;").unwrap();
        driver.run().unwrap();
        assert_eq!(driver.global("y"), Some(Value::Int64(2)));
    }

    #[test]
    fn lex_error_is_reported() {
        let mut driver = Driver::new();
        assert!(driver.parse_str(Rc::from("test"), "\"unterminated").is_err());
    }

    #[test]
    fn parse_error_is_reported() {
        let mut driver = Driver::new();
        assert!(driver.parse_str(Rc::from("test"), "x = ;").is_err());
    }
}
