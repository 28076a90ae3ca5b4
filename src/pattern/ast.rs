use std::fmt;

use crate::pattern::char_class::ClassKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    Wildcard,                     // .
    CharClass(ClassKind),         // $a, $d, $w, $_, $x
    Range(Pattern),               // [abc], [a-z]
    NegRange(Pattern),            // [^abc]
    Group(Pattern),               // (...)
    ZeroOrMore(Box<Token>),       // *
    OneOrMore(Box<Token>),        // +
    ZeroOrOne(Box<Token>),        // ?
    PositiveLookahead(Box<Token>), // !
    NegativeLookahead(Box<Token>), // ~
}

impl Token {
    /// The atom wrapped by a postfix node, if this is one.
    pub fn atom(&self) -> Option<&Token> {
        match self {
            Token::ZeroOrMore(atom)
            | Token::OneOrMore(atom)
            | Token::ZeroOrOne(atom)
            | Token::PositiveLookahead(atom)
            | Token::NegativeLookahead(atom) => Some(atom),
            _ => None,
        }
    }

    /// The nested sequence owned by a range or group.
    pub fn body(&self) -> Option<&Pattern> {
        match self {
            Token::Range(body) | Token::NegRange(body) | Token::Group(body) => Some(body),
            _ => None,
        }
    }

    /// Nesting of ranges, groups and postfix nodes at and below this token.
    pub fn depth(&self) -> usize {
        if let Some(atom) = self.atom() {
            1 + atom.depth()
        } else if let Some(body) = self.body() {
            1 + body.depth()
        } else {
            0
        }
    }

    pub(crate) fn is_repetition(&self) -> bool {
        matches!(
            self,
            Token::ZeroOrMore(_) | Token::OneOrMore(_) | Token::ZeroOrOne(_)
        )
    }
}

/// A compiled pattern: an ordered sequence of tokens.
///
/// The tree is read-only once built and owns every nested sequence, so
/// dropping it releases the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
}

impl Pattern {
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Pattern { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Deepest nesting of ranges, groups and postfix nodes below this sequence.
    pub fn depth(&self) -> usize {
        self.tokens.iter().map(Token::depth).max().unwrap_or(0)
    }

    /// Ends the pattern's lifetime. Equivalent to dropping it.
    pub fn release(self) {
        drop(self);
    }

    /// Renders the token tree for diagnostics. The format is not stable.
    pub fn dump(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(c) => write!(f, "CHAR({c:?})"),
            Token::Wildcard => write!(f, "WILDCARD"),
            Token::CharClass(kind) => write!(f, "CHAR_CLASS({})", kind.selector()),
            Token::Range(body) => write!(f, "RANGE[{body}]"),
            Token::NegRange(body) => write!(f, "NEG_RANGE[{body}]"),
            Token::Group(body) => write!(f, "GROUP({body})"),
            Token::ZeroOrMore(atom) => write!(f, "ZERO_PLUS({atom})"),
            Token::OneOrMore(atom) => write!(f, "ONE_PLUS({atom})"),
            Token::ZeroOrOne(atom) => write!(f, "ONE_ZERO({atom})"),
            Token::PositiveLookahead(atom) => write!(f, "POSITIVE_LOOKAHEAD({atom})"),
            Token::NegativeLookahead(atom) => write!(f, "NEGATIVE_LOOKAHEAD({atom})"),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
