#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

//! Interpreter for the CodeQuest lesson language: a small, line-oriented
//! subset of Python with `print`, assignment, `for ... in range(...)` and
//! `if`/`else`.

pub mod error;
pub mod eval;
pub mod exec;
pub mod grade;
pub mod scope;
pub mod value;

pub use error::{ErrorKind, RunError};
pub use exec::{execute, run, run_with_config, ExecutionResult, RunConfig};
pub use value::Value;
