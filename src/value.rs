//! The runtime value model.
//!
//! A `Value` is a tagged datum: the tag uniquely determines the payload, and
//! values are immutable once constructed. Cloning a `Value` is cheap (the
//! `String` variant shares its backing buffer via `Rc`), so the evaluator
//! passes values by clone rather than threading references through the
//! environment and the statement-result machinery.

use std::fmt::{self, Display};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int64(i64),
    Double(f64),
    String(Rc<str>),
    Null,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Null => "null",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Used by `print` and `dump`: the textual form a script sees, not `Debug`.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int64(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
        }
    }
}
