//! Shared state the evaluator and interpreter both operate on: the
//! process-wide function table and the environment. Kept as a single struct
//! so `eval` and `exec_*` can call back into each other (a function call
//! evaluates an expression but runs a statement list) without an awkward
//! split of ownership.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::FunctionDefinition;
use crate::environment::Environment;

pub struct Context<'a> {
    pub functions: &'a HashMap<Rc<str>, FunctionDefinition>,
    pub env: &'a mut Environment,
}

impl<'a> Context<'a> {
    pub fn new(functions: &'a HashMap<Rc<str>, FunctionDefinition>, env: &'a mut Environment) -> Self {
        Self { functions, env }
    }
}
