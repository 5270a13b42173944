//! `lj`: a tree-walking interpreter for a small dynamically-typed imperative
//! scripting language. Organized scanner → parser → AST →
//! evaluator/interpreter → driver, each stage handing the next a plain data
//! structure.

pub mod ast;
pub mod context;
pub mod driver;
pub mod environment;
pub mod eval_error;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod location;
pub mod parser;
pub mod value;
