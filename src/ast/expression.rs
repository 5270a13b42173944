//! Expression nodes.

use std::rc::Rc;

use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryVerb {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryVerb {
    Minus,
    Not,
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub name: Rc<str>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct BoolLit {
    pub value: bool,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct IntLit {
    pub value: i64,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct DoubleLit {
    pub value: f64,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct StringLit {
    pub value: Rc<str>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct NullLit {
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct UnaryOp {
    pub verb: UnaryVerb,
    pub operand: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct BinaryOp {
    pub verb: BinaryVerb,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct Assign {
    pub target: Box<Expression>,
    pub value: Box<Expression>,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub name: Rc<str>,
    pub args: Vec<Expression>,
    pub location: Location,
}

/// `true`/`false` literals share a single `BoolLit(bool)` variant rather
/// than two separate empty variants.
#[derive(Debug, Clone)]
pub enum Expression {
    BoolLit(BoolLit),
    IntLit(IntLit),
    DoubleLit(DoubleLit),
    StringLit(StringLit),
    NullLit(NullLit),
    Ident(Ident),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Assign(Assign),
    Call(Call),
}

impl Expression {
    pub fn location(&self) -> &Location {
        match self {
            Expression::BoolLit(BoolLit { location, .. })
            | Expression::IntLit(IntLit { location, .. })
            | Expression::DoubleLit(DoubleLit { location, .. })
            | Expression::StringLit(StringLit { location, .. })
            | Expression::NullLit(NullLit { location, .. })
            | Expression::Ident(Ident { location, .. })
            | Expression::Unary(UnaryOp { location, .. })
            | Expression::Binary(BinaryOp { location, .. })
            | Expression::Assign(Assign { location, .. })
            | Expression::Call(Call { location, .. }) => location,
        }
    }

    /// One-line tag used by `Driver::dump` (kind plus literal value, if any).
    pub fn kind_label(&self) -> String {
        match self {
            Expression::BoolLit(lit) => format!("BoolLit({})", lit.value),
            Expression::IntLit(lit) => format!("IntLit({})", lit.value),
            Expression::DoubleLit(lit) => format!("DoubleLit({})", lit.value),
            Expression::StringLit(lit) => format!("StringLit({:?})", lit.value),
            Expression::NullLit(_) => "NullLit".to_owned(),
            Expression::Ident(ident) => format!("Ident({})", ident.name),
            Expression::Unary(unary) => format!("Unary({:?})", unary.verb),
            Expression::Binary(binary) => format!("Binary({:?})", binary.verb),
            Expression::Assign(_) => "Assign".to_owned(),
            Expression::Call(call) => format!("Call({})", call.name),
        }
    }
}
