//! The pattern language.
//!
//! | Syntax        | Meaning                                               |
//! |---------------|-------------------------------------------------------|
//! | `.`           | Any one character                                     |
//! | `*` `+` `?`   | Zero or more / one or more / zero or one of the atom  |
//! | `!`           | Positive lookahead on the atom                        |
//! | `~`           | Negative lookahead on the atom                        |
//! | `$x`          | Class: `a` alpha, `d` digit, `w` word, `_`, else `x`  |
//! | `\x`          | Literal `x`                                           |
//! | `[...]`       | Set of literals, `$x` classes and `a-z` ranges        |
//! | `[^...]`      | Negated set                                           |
//! | `(...)`       | Group                                                 |
//!
//! Postfix operators apply to the single atom in front of them. Patterns only
//! match at the start of the input; put `.*` in front to scan.

pub mod ast;
pub mod char_class;
pub mod error;
mod lexer;
mod matcher;
pub mod parser;


use std::convert::Infallible;
use std::str::FromStr;

pub use ast::{Pattern, Token};
pub use char_class::ClassKind;
pub use error::MatchError;
pub use parser::{CompileOptions, DEFAULT_MAX_DEPTH, compile, compile_with};

/// Compiles `pattern`, matches it against `input` and releases it.
pub fn compile_and_match(input: &str, pattern: &str) -> Option<usize> {
    let compiled = compile(pattern);
    let end = compiled.match_prefix(input);
    compiled.release();
    end
}

impl FromStr for Pattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(compile(s))
    }
}
