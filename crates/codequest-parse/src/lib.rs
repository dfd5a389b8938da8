#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod block;
mod error;
mod lexer;
mod parser;

pub use block::extract_block;
pub use error::ParseError;
pub use lexer::{split_lines, SourceLine};
pub use parser::{classify, parse_range, parse_str, split_condition, ParsedLine};
