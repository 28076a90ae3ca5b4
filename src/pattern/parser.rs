//! Tree builder: resolves escapes and folds postfix operators onto the
//! node in front of them.

use crate::pattern::ast::{Pattern, Token};
use crate::pattern::lexer::{Lexeme, Lexer, Postfix};

pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// How deep the token tree may grow. Bracket, group and postfix nodes
    /// each count one level. Openers past the limit are compiled as
    /// literals and postfix operators past it are dropped.
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Compiles `pattern`. Never fails: malformed syntax is tolerated.
#[tracing::instrument(level = "trace", skip(options), fields(max_depth = options.max_depth))]
pub fn compile_with(pattern: &str, options: &CompileOptions) -> Pattern {
    let mut lexer = Lexer::new(pattern, options);
    let lexemes = lexer.sequence();
    build(lexemes, lexer.remaining_depth())
}

pub fn compile(pattern: &str) -> Pattern {
    compile_with(pattern, &CompileOptions::default())
}

/// Runs both tree-builder passes over one compilation unit. No token of the
/// unit ends up deeper than `max_depth`.
pub(crate) fn build(lexemes: Vec<Lexeme>, max_depth: usize) -> Pattern {
    Pattern::from_tokens(fold_postfix(resolve_escapes(lexemes), max_depth))
}

enum Item {
    Atom(Token),
    Postfix(Postfix),
}

fn resolve_escapes(lexemes: Vec<Lexeme>) -> Vec<Item> {
    lexemes
        .into_iter()
        .map(|lexeme| match lexeme {
            Lexeme::Atom(token) => Item::Atom(token),
            Lexeme::Escape(c) => Item::Atom(Token::Literal(c)),
            Lexeme::Postfix(op) => Item::Postfix(op),
        })
        .collect()
}

// Each operator wraps whatever node precedes it once earlier operators have
// been folded, so `a*?` is ZeroOrOne(ZeroOrMore(a)). A wrap that would take
// the node past `max_depth` is skipped.
fn fold_postfix(items: Vec<Item>, max_depth: usize) -> Vec<Token> {
    // (token, its depth)
    let mut tokens: Vec<(Token, usize)> = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in items {
        match item {
            Item::Atom(token) => {
                let depth = token.depth();
                tokens.push((token, depth));
            }
            Item::Postfix(op) => match tokens.pop() {
                Some((atom, depth)) if depth < max_depth => {
                    tokens.push((wrap(op, atom), depth + 1));
                }
                Some(full) => {
                    dropped += 1;
                    tokens.push(full);
                }
                None => {
                    tracing::trace!(operator = ?op, "postfix operator without an atom dropped");
                }
            },
        }
    }
    if dropped > 0 {
        tracing::warn!(
            dropped,
            max_depth,
            "nesting limit reached, postfix operators dropped"
        );
    }
    tokens.into_iter().map(|(token, _)| token).collect()
}

fn wrap(op: Postfix, atom: Token) -> Token {
    let atom = Box::new(atom);
    match op {
        Postfix::ZeroOrMore => Token::ZeroOrMore(atom),
        Postfix::OneOrMore => Token::OneOrMore(atom),
        Postfix::ZeroOrOne => Token::ZeroOrOne(atom),
        Postfix::Lookahead => Token::PositiveLookahead(atom),
        Postfix::NegativeLookahead => Token::NegativeLookahead(atom),
    }
}
