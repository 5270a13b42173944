//! Function definitions.

use std::rc::Rc;

use crate::location::Location;

use super::statement::Block;

#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    pub name: Rc<str>,
    pub params: Vec<Rc<str>>,
    pub body: Block,
    pub location: Location,
}
