//! The evaluator's single error type. Every evaluation error is fatal: the
//! driver logs it and exits non-zero, there is no recovery.

use std::error::Error;
use std::fmt::{self, Display};

use crate::location::Location;

#[derive(Debug, Clone)]
pub struct EvalError {
    pub message: String,
    pub location: Location,
}

impl EvalError {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self { location, message: message.into() }
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl Error for EvalError {}

pub type EvalResult<T> = Result<T, EvalError>;
