//! The expression evaluator.
//!
//! `eval` has the contract: produce exactly one `Value`, or fail fatally
//! with a located `EvalError`. Rather than threading an explicit
//! `Vec<Value>` work stack through every call, each `eval` call hands
//! exactly one `Value` back to its caller and nothing survives on any
//! stack between statements — an equivalent, and more idiomatic, ownership
//! strategy.

use crate::ast::*;
use crate::context::Context;
use crate::eval_error::{EvalError, EvalResult};
use crate::interpreter::{exec_block, StatementResult};
use crate::value::Value;

pub fn eval(ctx: &mut Context, expr: &Expression) -> EvalResult<Value> {
    match expr {
        Expression::BoolLit(lit) => Ok(Value::Bool(lit.value)),
        Expression::IntLit(lit) => Ok(Value::Int64(lit.value)),
        Expression::DoubleLit(lit) => Ok(Value::Double(lit.value)),
        Expression::StringLit(lit) => Ok(Value::String(lit.value.clone())),
        Expression::NullLit(_) => Ok(Value::Null),
        Expression::Ident(ident) => ctx.env.get(&ident.name).ok_or_else(|| {
            EvalError::new(ident.location.clone(), format!("undefined identifier '{}'", ident.name))
        }),
        Expression::Unary(unary) => eval_unary(ctx, unary),
        Expression::Binary(binary) => eval_binary(ctx, binary),
        Expression::Assign(assign) => eval_assign(ctx, assign),
        Expression::Call(call) => eval_call(ctx, call),
    }
}

fn eval_unary(ctx: &mut Context, unary: &UnaryOp) -> EvalResult<Value> {
    let operand = eval(ctx, &unary.operand)?;

    match (unary.verb, &operand) {
        (UnaryVerb::Minus, Value::Int64(i)) => Ok(Value::Int64(-i)),
        (UnaryVerb::Minus, Value::Double(d)) => Ok(Value::Double(-d)),
        (UnaryVerb::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(EvalError::new(
            unary.location.clone(),
            format!("operator '{:?}' is not defined for {}", unary.verb, operand.type_name()),
        )),
    }
}

/// `And`/`Or` short-circuit: the right operand is only evaluated when the
/// left does not already determine the result.
fn eval_binary(ctx: &mut Context, binary: &BinaryOp) -> EvalResult<Value> {
    if matches!(binary.verb, BinaryVerb::And | BinaryVerb::Or) {
        return eval_logical(ctx, binary);
    }

    let lhs = eval(ctx, &binary.lhs)?;
    let rhs = eval(ctx, &binary.rhs)?;
    apply_binary(binary.verb, lhs, rhs, &binary.location)
}

fn eval_logical(ctx: &mut Context, binary: &BinaryOp) -> EvalResult<Value> {
    let lhs = eval(ctx, &binary.lhs)?;
    let Value::Bool(lhs) = lhs else {
        return Err(EvalError::new(
            binary.lhs.location().clone(),
            format!("operand of '{:?}' must be bool, found {}", binary.verb, lhs.type_name()),
        ));
    };

    let short_circuits = match binary.verb {
        BinaryVerb::And => !lhs,
        BinaryVerb::Or => lhs,
        _ => unreachable!("only called for And/Or"),
    };
    if short_circuits {
        return Ok(Value::Bool(lhs));
    }

    let rhs = eval(ctx, &binary.rhs)?;
    let Value::Bool(rhs) = rhs else {
        return Err(EvalError::new(
            binary.rhs.location().clone(),
            format!("operand of '{:?}' must be bool, found {}", binary.verb, rhs.type_name()),
        ));
    };
    Ok(Value::Bool(rhs))
}

/// Type-directed promotion and dispatch table.
fn apply_binary(verb: BinaryVerb, lhs: Value, rhs: Value, location: &crate::location::Location) -> EvalResult<Value> {
    use BinaryVerb::*;
    use Value::*;

    let type_error = || {
        Err(EvalError::new(
            location.clone(),
            format!("operator '{:?}' is not defined for {} and {}", verb, lhs.type_name(), rhs.type_name()),
        ))
    };

    match (&lhs, &rhs) {
        (Null, _) | (_, Null) => match verb {
            Eq => Ok(Bool(matches!((&lhs, &rhs), (Null, Null)))),
            Ne => Ok(Bool(!matches!((&lhs, &rhs), (Null, Null)))),
            _ => type_error(),
        },
        (Bool(a), Bool(b)) => match verb {
            Eq => Ok(Bool(a == b)),
            Ne => Ok(Bool(a != b)),
            _ => type_error(),
        },
        (String(a), String(b)) => match verb {
            Add => Ok(String(std::rc::Rc::from(format!("{a}{b}").as_str()))),
            Eq => Ok(Bool(a == b)),
            Ne => Ok(Bool(a != b)),
            Gt => Ok(Bool(a > b)),
            Ge => Ok(Bool(a >= b)),
            Lt => Ok(Bool(a < b)),
            Le => Ok(Bool(a <= b)),
            _ => type_error(),
        },
        (Int64(a), Int64(b)) => match verb {
            Add => Ok(Int64(a + b)),
            Sub => Ok(Int64(a - b)),
            Mul => Ok(Int64(a * b)),
            Div => {
                if *b == 0 {
                    Err(EvalError::new(location.clone(), "integer division by zero"))
                } else {
                    Ok(Int64(a / b))
                }
            }
            Mod => {
                if *b == 0 {
                    Err(EvalError::new(location.clone(), "integer modulo by zero"))
                } else {
                    Ok(Int64(a % b))
                }
            }
            Eq => Ok(Bool(a == b)),
            Ne => Ok(Bool(a != b)),
            Gt => Ok(Bool(a > b)),
            Ge => Ok(Bool(a >= b)),
            Lt => Ok(Bool(a < b)),
            Le => Ok(Bool(a <= b)),
            _ => type_error(),
        },
        (Int64(_), Double(_)) | (Double(_), Int64(_)) | (Double(_), Double(_)) => {
            let a = as_double(&lhs);
            let b = as_double(&rhs);
            match verb {
                Add => Ok(Double(a + b)),
                Sub => Ok(Double(a - b)),
                Mul => Ok(Double(a * b)),
                Div => Ok(Double(a / b)),
                Mod => Ok(Double(a % b)),
                Eq => Ok(Bool(a == b)),
                Ne => Ok(Bool(a != b)),
                Gt => Ok(Bool(a > b)),
                Ge => Ok(Bool(a >= b)),
                Lt => Ok(Bool(a < b)),
                Le => Ok(Bool(a <= b)),
                _ => type_error(),
            }
        }
        _ => type_error(),
    }
}

fn as_double(value: &Value) -> f64 {
    match value {
        Value::Int64(i) => *i as f64,
        Value::Double(d) => *d,
        _ => unreachable!("as_double only called on numeric operands"),
    }
}

fn eval_assign(ctx: &mut Context, assign: &Assign) -> EvalResult<Value> {
    let value = eval(ctx, &assign.value)?;

    let Expression::Ident(ident) = assign.target.as_ref() else {
        return Err(EvalError::new(
            assign.location.clone(),
            "invalid assignment target: left-hand side of '=' must be an identifier".to_owned(),
        ));
    };

    ctx.env.assign(ident.name.clone(), value.clone());
    Ok(value)
}

/// Function call. Argument expressions are evaluated against the
/// *calling* environment before the new frame is pushed and bound — the
/// caller's locals (e.g. a recursive call's own parameter) must still be
/// visible while its arguments are computed, so the new frame can't go up
/// until after that evaluation finishes. See `DESIGN.md` for the full
/// rationale.
fn eval_call(ctx: &mut Context, call: &Call) -> EvalResult<Value> {
    if &*call.name == "print" {
        return eval_print(ctx, call);
    }

    let Some(def) = ctx.functions.get(&call.name) else {
        return Err(EvalError::new(call.location.clone(), format!("call to undefined function '{}'", call.name)));
    };

    if call.args.len() != def.params.len() {
        return Err(EvalError::new(
            call.location.clone(),
            format!(
                "function '{}' expects {} argument(s), found {}",
                call.name,
                def.params.len(),
                call.args.len()
            ),
        ));
    }

    let mut values = Vec::with_capacity(call.args.len());
    for arg in &call.args {
        values.push(eval(ctx, arg)?);
    }

    let params = def.params.clone();
    let body = def.body.clone();

    ctx.env.push_frame();
    for (param, value) in params.into_iter().zip(values) {
        ctx.env.bind_param(param, value);
    }

    let result = exec_block(ctx, &body);
    ctx.env.pop_frame();

    match result? {
        StatementResult::Normal => Ok(Value::Null),
        StatementResult::Return(value) => Ok(value),
        StatementResult::Break | StatementResult::Continue => Err(EvalError::new(
            call.location.clone(),
            "'break'/'continue' escaped a function body".to_owned(),
        )),
    }
}

/// The single builtin: writes its arguments' textual form to stdout,
/// space-joined, with no trailing newline, and evaluates to `Null`.
fn eval_print(ctx: &mut Context, call: &Call) -> EvalResult<Value> {
    let mut parts = Vec::with_capacity(call.args.len());
    for arg in &call.args {
        parts.push(eval(ctx, arg)?.to_string());
    }
    print!("{}", parts.join(" "));
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use std::rc::Rc;

    fn run_and_get(src: &str, name: &str) -> Value {
        let mut driver = Driver::new();
        driver.parse_str(Rc::from("test"), src).expect("parse");
        driver.run().expect("run");
        driver.global(name).expect("global is set")
    }

    #[test]
    fn arithmetic_and_precedence() {
        assert_eq!(run_and_get("x = 1 + 2 * 3;", "x"), Value::Int64(7));
    }

    #[test]
    fn int_double_promotion() {
        assert_eq!(run_and_get("y = 1 + 2.5;", "y"), Value::Double(3.5));
    }

    #[test]
    fn short_circuit_and_avoids_rhs() {
        assert_eq!(
            run_and_get("function boom() { return undefined_name; } z = false && boom();", "z"),
            Value::Bool(false)
        );
    }

    #[test]
    fn short_circuit_or_avoids_rhs() {
        assert_eq!(
            run_and_get("function boom() { return undefined_name; } z2 = true || boom();", "z2"),
            Value::Bool(true)
        );
    }

    #[test]
    fn non_short_circuit_and_propagates_error() {
        let mut driver = Driver::new();
        driver
            .parse_str(
                Rc::from("test"),
                "function boom() { return undefined_name; } true && boom();",
            )
            .unwrap();
        assert!(driver.run().is_err());
    }

    #[test]
    fn recursion() {
        assert_eq!(
            run_and_get(
                "function fact(n) { if (n <= 1) { return 1; } return n * fact(n - 1); } r = fact(10);",
                "r"
            ),
            Value::Int64(3628800)
        );
    }

    #[test]
    fn control_flow_propagation_through_for_loop() {
        assert_eq!(
            run_and_get(
                "function f() { for (i = 0; i < 10; i = i + 1) { if (i == 3) { return i; } } return -1; } r = f();",
                "r"
            ),
            Value::Int64(3)
        );
    }

    #[test]
    fn global_declaration_across_calls() {
        assert_eq!(
            run_and_get("g = 0; function bump() { global g; g = g + 1; } bump(); bump();", "g"),
            Value::Int64(2)
        );
    }

    #[test]
    fn string_plus_string_concatenates() {
        assert_eq!(run_and_get(r#"s = "foo" + "bar";"#, "s"), Value::String(Rc::from("foobar")));
    }

    #[test]
    fn string_plus_non_string_is_type_error() {
        let mut driver = Driver::new();
        driver.parse_str(Rc::from("test"), r#"r = 1 + "a";"#).unwrap();
        assert!(driver.run().is_err());
    }

    #[test]
    fn integer_division_by_zero_is_fatal() {
        let mut driver = Driver::new();
        driver.parse_str(Rc::from("test"), "x = 1 / 0;").unwrap();
        assert!(driver.run().is_err());
    }

    #[test]
    fn double_division_by_zero_is_not_fatal() {
        assert_eq!(run_and_get("x = 1.0 / 0.0;", "x"), Value::Double(f64::INFINITY));
    }
}
