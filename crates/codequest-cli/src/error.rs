use codequest_parse::ParseError;
use serde::Serialize;
use thiserror::Error;

pub type RunResult<T> = Result<T, RunError>;

/// Anything that ends a run. Messages carry their Python-style kind prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("NameError: name '{name}' is not defined")]
    Name { name: String },
    #[error("TypeError: unsupported operand type(s) for {op}")]
    Type { op: char },
    #[error("ZeroDivisionError: division by zero")]
    ZeroDivision,
    #[error("SyntaxError: {0}")]
    Syntax(#[from] ParseError),
    #[error("SyntaxError: Unsupported syntax on line: \"{line}\"")]
    UnsupportedSyntax { line: String },
    #[error("RuntimeError: step limit of {limit} exceeded")]
    StepLimit { limit: u64 },
}

/// Error class, as reported alongside the message in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    NameError,
    SyntaxError,
    TypeError,
    ZeroDivisionError,
    RuntimeError,
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Name { .. } => ErrorKind::NameError,
            RunError::Type { .. } => ErrorKind::TypeError,
            RunError::ZeroDivision => ErrorKind::ZeroDivisionError,
            RunError::Syntax(_) | RunError::UnsupportedSyntax { .. } => ErrorKind::SyntaxError,
            RunError::StepLimit { .. } => ErrorKind::RuntimeError,
        }
    }
}
