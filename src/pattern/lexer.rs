//! Tokenizer: turns pattern text into a flat sequence of lexemes.
//!
//! Bracket and group bodies are compiled recursively as they are met, so the
//! only flat parts left for the tree builder are escapes and postfix operators.

use std::iter::Peekable;
use std::str::Chars;

use crate::pattern::ast::{Pattern, Token};
use crate::pattern::char_class::ClassKind;
use crate::pattern::parser::{self, CompileOptions};

/// Postfix operators, folded onto the preceding node by the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Postfix {
    ZeroOrMore,        // *
    OneOrMore,         // +
    ZeroOrOne,         // ?
    Lookahead,         // !
    NegativeLookahead, // ~
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexeme {
    Atom(Token),
    Escape(char),
    Postfix(Postfix),
}

pub(crate) struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(pattern: &'a str, options: &CompileOptions) -> Self {
        Lexer {
            chars: pattern.chars().peekable(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Lexes the rest of the pattern. Closers at this level are literals.
    pub(crate) fn sequence(&mut self) -> Vec<Lexeme> {
        self.unit(false).0
    }

    /// Depth still available below the unit being lexed.
    pub(crate) fn remaining_depth(&self) -> usize {
        self.max_depth.saturating_sub(self.depth)
    }

    // Inside a body either closer ends the unit; it is consumed and returned.
    fn unit(&mut self, in_body: bool) -> (Vec<Lexeme>, Option<char>) {
        let mut lexemes = Vec::new();
        while let Some(c) = self.chars.next() {
            if in_body && matches!(c, ']' | ')') {
                return (lexemes, Some(c));
            }
            lexemes.push(self.lex(c));
        }
        (lexemes, None)
    }

    fn lex(&mut self, c: char) -> Lexeme {
        match c {
            '?' => Lexeme::Postfix(Postfix::ZeroOrOne),
            '!' => Lexeme::Postfix(Postfix::Lookahead),
            '~' => Lexeme::Postfix(Postfix::NegativeLookahead),
            '*' => Lexeme::Postfix(Postfix::ZeroOrMore),
            '+' => Lexeme::Postfix(Postfix::OneOrMore),
            '.' => Lexeme::Atom(Token::Wildcard),
            '$' => match self.chars.next() {
                Some(selector) => {
                    Lexeme::Atom(Token::CharClass(ClassKind::from_selector(selector)))
                }
                None => Lexeme::Atom(Token::Literal('$')),
            },
            '\\' => match self.chars.next() {
                Some(escaped) => Lexeme::Escape(escaped),
                None => Lexeme::Atom(Token::Literal('\\')),
            },
            '[' => self.bracket(),
            '(' => self.group(),
            _ => Lexeme::Atom(Token::Literal(c)),
        }
    }

    fn bracket(&mut self) -> Lexeme {
        if !self.can_nest('[') {
            return Lexeme::Atom(Token::Literal('['));
        }
        let negated = self.chars.next_if_eq(&'^').is_some();
        let body = self.body('[', ']');
        if negated {
            Lexeme::Atom(Token::NegRange(body))
        } else {
            Lexeme::Atom(Token::Range(body))
        }
    }

    fn group(&mut self) -> Lexeme {
        if !self.can_nest('(') {
            return Lexeme::Atom(Token::Literal('('));
        }
        Lexeme::Atom(Token::Group(self.body('(', ')')))
    }

    fn body(&mut self, opener: char, closer: char) -> Pattern {
        self.depth += 1;
        let (lexemes, ended_at) = self.unit(true);
        let body = parser::build(lexemes, self.remaining_depth());
        self.depth -= 1;
        if ended_at.is_some_and(|c| c != closer) {
            self.skip_to_closer(opener, closer);
        }
        body
    }

    // A body cut short by the other kind of closer still owns the text up to
    // the closer matching its opener. `(a]b)c` is `GROUP(a)` then `c`.
    fn skip_to_closer(&mut self, opener: char, closer: char) {
        let mut depth = 1;
        while let Some(c) = self.chars.next() {
            match c {
                '\\' => {
                    self.chars.next();
                }
                c if c == opener => depth += 1,
                c if c == closer => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn can_nest(&self, opener: char) -> bool {
        if self.depth < self.max_depth {
            return true;
        }
        tracing::warn!(
            opener = %opener,
            max_depth = self.max_depth,
            "nesting limit reached, opener compiled as a literal"
        );
        false
    }
}
