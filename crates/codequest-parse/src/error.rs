use thiserror::Error;

/// A line had a recognised shape but malformed contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `range(...)` with no arguments or more than two
    #[error("Invalid range() arguments")]
    InvalidRange,
    /// `if` condition without a comparison operator
    #[error("Invalid if condition")]
    InvalidCondition,
}
