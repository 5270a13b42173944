//! Hand-written scanner for LJ source text.
//!
//! Token tracing (`-s`) is emitted via `log::trace!` as each token is
//! produced; its only contract with the parser is handing it a
//! `Vec<Token>`.

mod token;

pub use token::*;

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Display};
use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

use once_cell::sync::Lazy;

use crate::location::Location;

/// Multi-character keywords and operators, longest-match-first at each
/// lexing site (see `Lexer::lex_special`).
static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("elseif", TokenKind::ElseIf);
    m.insert("while", TokenKind::While);
    m.insert("for", TokenKind::For);
    m.insert("return", TokenKind::Return);
    m.insert("break", TokenKind::Break);
    m.insert("continue", TokenKind::Continue);
    m.insert("global", TokenKind::Global);
    m.insert("function", TokenKind::Function);
    m.insert("true", TokenKind::True);
    m.insert("false", TokenKind::False);
    m.insert("null", TokenKind::Null);
    m
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: Location,
}

impl Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl Error for LexError {}

pub type LexResult<T> = Result<T, LexError>;

pub struct Lexer<'a> {
    file: Rc<str>,
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: Rc<str>, input: &'a str) -> Self {
        Self {
            file,
            tokens: vec![],
            iterator: input.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn here(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    fn loc(&self, start: (usize, usize)) -> Location {
        Location::new(self.file.clone(), start, self.here())
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn peek2(&self) -> Option<char> {
        let mut clone = self.iterator.clone();
        clone.next();
        clone.next()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.iterator.next();
        match next {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
        next
    }

    fn push(&mut self, kind: TokenKind, start: (usize, usize)) {
        let location = self.loc(start);
        log::trace!("scanned {kind:?} at {location}");
        self.tokens.push(Token::new(kind, location));
    }

    fn eat_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    /// Tokenize the whole input, ending with a single `Eof` token.
    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        loop {
            self.eat_whitespace_and_comments();
            let Some(next) = self.peek() else {
                let here = self.here();
                self.push(TokenKind::Eof, here);
                break;
            };

            match next {
                'a'..='z' | 'A'..='Z' | '_' => self.lex_ident()?,
                '0'..='9' => self.lex_number()?,
                '"' => self.lex_string()?,
                _ => self.lex_operator()?,
            }
        }

        Ok(self.tokens)
    }

    fn lex_ident(&mut self) -> LexResult<()> {
        let start = self.here();
        let mut text = String::new();

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let kind = KEYWORDS.get(text.as_str()).cloned().unwrap_or(TokenKind::Ident(text));
        self.push(kind, start);
        Ok(())
    }

    fn lex_number(&mut self) -> LexResult<()> {
        let start = self.here();
        let mut text = String::new();
        let mut is_double = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') && self.peek2().is_some_and(|c| c.is_ascii_digit()) {
            is_double = true;
            text.push('.');
            self.bump();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
        }

        if is_double {
            let value: f64 = text.parse().map_err(|_| LexError {
                message: format!("invalid floating literal '{text}'"),
                location: self.loc(start),
            })?;
            self.push(TokenKind::Double(value), start);
        } else {
            let value: i64 = text.parse().map_err(|_| LexError {
                message: format!("invalid integer literal '{text}'"),
                location: self.loc(start),
            })?;
            self.push(TokenKind::Int(value), start);
        }

        Ok(())
    }

    fn lex_string(&mut self) -> LexResult<()> {
        let start = self.here();
        self.bump(); // opening quote
        let mut text = String::new();

        loop {
            match self.bump() {
                None => {
                    return Err(LexError {
                        message: "unterminated string literal".to_owned(),
                        location: self.loc(start),
                    })
                }
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some(other) => {
                        return Err(LexError {
                            message: format!("unknown escape sequence '\\{other}'"),
                            location: self.loc(start),
                        })
                    }
                    None => {
                        return Err(LexError {
                            message: "unterminated string literal".to_owned(),
                            location: self.loc(start),
                        })
                    }
                },
                Some(c) => text.push(c),
            }
        }

        self.push(TokenKind::Str(text), start);
        Ok(())
    }

    fn lex_operator(&mut self) -> LexResult<()> {
        let start = self.here();
        let first = self.bump().expect("checked by caller");

        let kind = match (first, self.peek()) {
            ('=', Some('=')) => {
                self.bump();
                TokenKind::EqEq
            }
            ('!', Some('=')) => {
                self.bump();
                TokenKind::NotEq
            }
            ('<', Some('=')) => {
                self.bump();
                TokenKind::LtEq
            }
            ('>', Some('=')) => {
                self.bump();
                TokenKind::GtEq
            }
            ('&', Some('&')) => {
                self.bump();
                TokenKind::AndAnd
            }
            ('|', Some('|')) => {
                self.bump();
                TokenKind::OrOr
            }
            ('=', _) => TokenKind::Assign,
            ('!', _) => TokenKind::Bang,
            ('<', _) => TokenKind::Lt,
            ('>', _) => TokenKind::Gt,
            ('+', _) => TokenKind::Plus,
            ('-', _) => TokenKind::Minus,
            ('*', _) => TokenKind::Star,
            ('/', _) => TokenKind::Slash,
            ('%', _) => TokenKind::Percent,
            ('(', _) => TokenKind::LParen,
            (')', _) => TokenKind::RParen,
            ('{', _) => TokenKind::LBrace,
            ('}', _) => TokenKind::RBrace,
            (';', _) => TokenKind::Semicolon,
            (',', _) => TokenKind::Comma,
            (other, _) => {
                return Err(LexError {
                    message: format!("unexpected character '{other}'"),
                    location: self.loc(start),
                })
            }
        };

        self.push(kind, start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<TokenKind> {
        Lexer::new(Rc::from("test"), src)
            .lex()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_arithmetic_and_precedence() {
        assert_eq!(
            lex("x = 1 + 2 * 3;"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Int(2),
                TokenKind::Star,
                TokenKind::Int(3),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_double_literal() {
        assert_eq!(
            lex("1 + 2.5;"),
            vec![
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Double(2.5),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_string_escapes() {
        assert_eq!(
            lex(r#""a\n\t\"\\b""#),
            vec![TokenKind::Str("a\n\t\"\\b".into()), TokenKind::Eof],
        );
    }

    #[test]
    fn lexes_two_char_operators() {
        assert_eq!(
            lex("a == b && c != d"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::EqEq,
                TokenKind::Ident("b".into()),
                TokenKind::AndAnd,
                TokenKind::Ident("c".into()),
                TokenKind::NotEq,
                TokenKind::Ident("d".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            lex("x = 1; # trailing comment\ny = 2;"),
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Assign,
                TokenKind::Int(1),
                TokenKind::Semicolon,
                TokenKind::Ident("y".into()),
                TokenKind::Assign,
                TokenKind::Int(2),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(Lexer::new(Rc::from("test"), "\"abc").lex().is_err());
    }
}
