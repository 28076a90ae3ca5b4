//! `$x` character classes.

/// Class selected by the character after `$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Alpha,       // $a
    Digit,       // $d
    Word,        // $w: alphanumeric or '_'
    Underscore,  // $_
    Other(char), // any other selector matches itself
}

impl ClassKind {
    pub fn from_selector(selector: char) -> Self {
        match selector {
            'a' => ClassKind::Alpha,
            'd' => ClassKind::Digit,
            'w' => ClassKind::Word,
            '_' => ClassKind::Underscore,
            other => ClassKind::Other(other),
        }
    }

    pub fn selector(&self) -> char {
        match self {
            ClassKind::Alpha => 'a',
            ClassKind::Digit => 'd',
            ClassKind::Word => 'w',
            ClassKind::Underscore => '_',
            ClassKind::Other(c) => *c,
        }
    }

    /// ASCII-only membership test.
    pub fn matches(&self, c: char) -> bool {
        match self {
            ClassKind::Alpha => c.is_ascii_alphabetic(),
            ClassKind::Digit => c.is_ascii_digit(),
            ClassKind::Word => c.is_ascii_alphanumeric() || c == '_',
            ClassKind::Underscore => c == '_',
            ClassKind::Other(l) => c == *l,
        }
    }
}
