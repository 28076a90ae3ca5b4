//! Prefix pattern matching: a pattern is compiled once into a token tree and
//! then matched against the start of any number of inputs.
//!
//! ```
//! let number = rsp::compile(r"$d+$d~\.?$d*$d~[fF]?");
//! assert_eq!(number.match_prefix("51.23 + x"), Some(5));
//! assert_eq!(rsp::compile_and_match("abbbb", "ab*c"), None);
//! ```

pub mod app;
pub mod cli;
pub mod fs_walk;
pub mod output;
pub mod pattern;
pub mod search;

pub use pattern::{
    ClassKind, CompileOptions, MatchError, Pattern, Token, compile, compile_and_match, compile_with,
};
