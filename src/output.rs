use std::borrow::Cow;
use std::ops::Range;

const COLOR_START: &str = "\x1b[01;31m";
const COLOR_RESET: &str = "\x1b[m";

pub fn paint(s: &str, use_color: bool) -> Cow<'_, str> {
    if use_color && !s.is_empty() {
        Cow::Owned(format!("{COLOR_START}{s}{COLOR_RESET}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// The whole line with `segment` painted.
pub fn highlight(line: &str, segment: Range<usize>, use_color: bool) -> Cow<'_, str> {
    if !use_color || segment.is_empty() {
        return Cow::Borrowed(line);
    }
    let (head, rest) = line.split_at(segment.start);
    let (hit, tail) = rest.split_at(segment.len());
    Cow::Owned(format!("{head}{}{tail}", paint(hit, true)))
}
