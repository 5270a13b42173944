//! Source positions attached to every AST node and token.
//!
//! `Location` is the only thing the evaluator ever needs from the scanner or
//! parser: a place to point a diagnostic at. It carries no other meaning.

use std::fmt::{self, Display};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Rc<str>,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Location {
    pub fn new(file: Rc<str>, start: (usize, usize), end: (usize, usize)) -> Self {
        Self {
            file,
            start_line: start.0,
            start_col: start.1,
            end_line: end.0,
            end_col: end.1,
        }
    }

    /// A zero-width location, used for a single token.
    pub fn point(file: Rc<str>, line: usize, col: usize) -> Self {
        Self::new(file, (line, col), (line, col))
    }

    /// The smallest location spanning both `self` and `other`.
    pub fn merge(&self, other: &Location) -> Location {
        Location {
            file: self.file.clone(),
            start_line: self.start_line,
            start_col: self.start_col,
            end_line: other.end_line,
            end_col: other.end_col,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}-{}.{}",
            self.file, self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}
