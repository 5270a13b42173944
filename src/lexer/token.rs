//! Token types produced by the `Lexer`.

use std::fmt::{self, Display};

use crate::location::Location;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Double(f64),
    Str(String),

    // keywords
    If,
    Else,
    ElseIf,
    While,
    For,
    Return,
    Break,
    Continue,
    Global,
    Function,
    True,
    False,
    Null,

    // single-character operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,
    Bang,

    // two-character operators
    EqEq,
    NotEq,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,

    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Int(value) => write!(f, "integer literal '{value}'"),
            TokenKind::Double(value) => write!(f, "double literal '{value}'"),
            TokenKind::Str(value) => write!(f, "string literal {value:?}"),
            TokenKind::Eof => write!(f, "end of file"),
            other => write!(f, "'{}'", format!("{other:?}").to_lowercase()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}
