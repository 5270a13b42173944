//! The statement interpreter.
//!
//! `exec_stmt` returns a `StatementResult` that every enclosing block
//! propagates unchanged until a loop absorbs `Break`/`Continue` or a call
//! absorbs `Return`.

use crate::ast::*;
use crate::context::Context;
use crate::eval_error::{EvalError, EvalResult};
use crate::evaluator::eval;
use crate::value::Value;

#[derive(Debug, Clone)]
pub enum StatementResult {
    Normal,
    Return(Value),
    Break,
    Continue,
}

/// Execute a block's statements in order, stopping at the first non-`Normal`
/// result and propagating it upward.
pub fn exec_block(ctx: &mut Context, block: &Block) -> EvalResult<StatementResult> {
    exec_statements(ctx, &block.statements)
}

/// Same as `exec_block` but over a bare statement list, since a `Block`
/// only exists once a parser has wrapped `{ ... }` around statements.
pub fn exec_statements(ctx: &mut Context, statements: &[Statement]) -> EvalResult<StatementResult> {
    for statement in statements {
        let result = exec_stmt(ctx, statement)?;
        if !matches!(result, StatementResult::Normal) {
            return Ok(result);
        }
    }
    Ok(StatementResult::Normal)
}

pub fn exec_stmt(ctx: &mut Context, stmt: &Statement) -> EvalResult<StatementResult> {
    match stmt {
        Statement::Expr(expr) => {
            eval(ctx, expr)?;
            Ok(StatementResult::Normal)
        }
        Statement::Global(global) => exec_global(ctx, global),
        Statement::If(if_stmt) => exec_if(ctx, if_stmt),
        Statement::While(while_stmt) => exec_while(ctx, while_stmt),
        Statement::For(for_stmt) => exec_for(ctx, for_stmt),
        Statement::Return(return_stmt) => {
            let value = match &return_stmt.value {
                Some(expr) => eval(ctx, expr)?,
                None => Value::Null,
            };
            Ok(StatementResult::Return(value))
        }
        Statement::Break(_) => Ok(StatementResult::Break),
        Statement::Continue(_) => Ok(StatementResult::Continue),
    }
}

fn exec_global(ctx: &mut Context, global: &GlobalStmt) -> EvalResult<StatementResult> {
    if ctx.env.frame_depth() == 0 {
        return Err(EvalError::new(
            global.location.clone(),
            "'global' is only legal inside a function body".to_owned(),
        ));
    }

    for name in &global.names {
        if !ctx.env.declare_global(name) {
            return Err(EvalError::new(
                global.location.clone(),
                format!("'global {name}' refers to an identifier not present in the global environment"),
            ));
        }
    }

    Ok(StatementResult::Normal)
}

fn expect_bool(ctx: &mut Context, expr: &Expression, what: &str) -> EvalResult<bool> {
    match eval(ctx, expr)? {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::new(
            expr.location().clone(),
            format!("{what} must be bool, found {}", other.type_name()),
        )),
    }
}

fn exec_if(ctx: &mut Context, if_stmt: &IfStmt) -> EvalResult<StatementResult> {
    if expect_bool(ctx, &if_stmt.condition, "if condition")? {
        return exec_block(ctx, &if_stmt.then_block);
    }

    for elseif in &if_stmt.elseifs {
        if expect_bool(ctx, &elseif.condition, "elseif condition")? {
            return exec_block(ctx, &elseif.block);
        }
    }

    if let Some(else_block) = &if_stmt.else_block {
        return exec_block(ctx, else_block);
    }

    Ok(StatementResult::Normal)
}

fn exec_while(ctx: &mut Context, while_stmt: &WhileStmt) -> EvalResult<StatementResult> {
    while expect_bool(ctx, &while_stmt.condition, "while condition")? {
        match exec_block(ctx, &while_stmt.body)? {
            StatementResult::Normal | StatementResult::Continue => {}
            StatementResult::Break => break,
            ret @ StatementResult::Return(_) => return Ok(ret),
        }
    }
    Ok(StatementResult::Normal)
}

fn exec_for(ctx: &mut Context, for_stmt: &ForStmt) -> EvalResult<StatementResult> {
    if let Some(init) = &for_stmt.init {
        eval(ctx, init)?;
    }

    loop {
        if let Some(condition) = &for_stmt.condition {
            if !expect_bool(ctx, condition, "for condition")? {
                break;
            }
        }

        match exec_block(ctx, &for_stmt.body)? {
            StatementResult::Normal | StatementResult::Continue => {}
            StatementResult::Break => break,
            ret @ StatementResult::Return(_) => return Ok(ret),
        }

        if let Some(post) = &for_stmt.post {
            eval(ctx, post)?;
        }
    }

    Ok(StatementResult::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use std::rc::Rc;

    #[test]
    fn while_break_stops_the_loop() {
        let mut driver = Driver::new();
        driver
            .parse_str(Rc::from("test"), "i = 0; while (true) { if (i == 3) { break; } i = i + 1; }")
            .unwrap();
        driver.run().unwrap();
        assert_eq!(driver.global("i"), Some(Value::Int64(3)));
    }

    #[test]
    fn for_continue_still_runs_post() {
        let mut driver = Driver::new();
        driver
            .parse_str(
                Rc::from("test"),
                "sum = 0; for (i = 0; i < 5; i = i + 1) { if (i == 2) { continue; } sum = sum + i; }",
            )
            .unwrap();
        driver.run().unwrap();
        assert_eq!(driver.global("sum"), Some(Value::Int64(8)));
    }

    #[test]
    fn top_level_break_is_misplaced() {
        let mut driver = Driver::new();
        driver.parse_str(Rc::from("test"), "break;").unwrap();
        assert!(driver.run().is_err());
    }

    #[test]
    fn top_level_global_is_fatal() {
        let mut driver = Driver::new();
        driver.parse_str(Rc::from("test"), "global g;").unwrap();
        assert!(driver.run().is_err());
    }

    #[test]
    fn elseif_chain_picks_first_match() {
        let mut driver = Driver::new();
        driver
            .parse_str(
                Rc::from("test"),
                "x = 2; if (x == 1) { r = 1; } elseif (x == 2) { r = 2; } elseif (x == 2) { r = 3; } else { r = 4; }",
            )
            .unwrap();
        driver.run().unwrap();
        assert_eq!(driver.global("r"), Some(Value::Int64(2)));
    }
}
