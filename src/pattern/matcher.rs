//! Prefix matcher over a compiled [`Pattern`].
//!
//! Every token is evaluated to an [`Outcome`]. A single driving loop, [`run`],
//! walks a token sequence: it advances on `Matched`, stops on `Failed` and
//! re-evaluates the same token on `Repeat`, which is how `*` and `+` loop.
//! Matching is anchored at the start of the input and never scans forward.

use crate::pattern::ast::{Pattern, Token};
use crate::pattern::error::MatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The token is done; move to the next one.
    Matched,
    Failed,
    /// Evaluate the same token again with the repeat count bumped.
    Repeat,
}

/// Position in the input. Copied freely so lookaheads and trial matches never
/// disturb the caller's position.
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }
}

struct Failure {
    token: usize,
    offset: usize,
    at_end: bool,
}

impl Failure {
    fn into_error(self) -> MatchError {
        let Failure {
            token,
            offset,
            at_end,
        } = self;
        if at_end {
            MatchError::UnexpectedEnd { token, offset }
        } else {
            MatchError::Mismatch { token, offset }
        }
    }
}

impl Pattern {
    /// Matches a prefix of `input`, returning the byte offset just past it.
    pub fn match_prefix(&self, input: &str) -> Option<usize> {
        self.try_match(input).ok()
    }

    /// Like [`Pattern::match_prefix`], but says where the match broke down.
    #[tracing::instrument(
        level = "trace",
        skip(self, input),
        fields(tokens = self.len(), input_len = input.len())
    )]
    pub fn try_match(&self, input: &str) -> Result<usize, MatchError> {
        run(self.tokens(), Cursor::new(input))
            .map(|end| end.pos)
            .map_err(Failure::into_error)
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.match_prefix(input).is_some()
    }

    /// Splits `input` into the consumed prefix and the remainder, so the
    /// remainder can be fed to another pattern.
    pub fn split<'a>(&self, input: &'a str) -> Option<(&'a str, &'a str)> {
        self.match_prefix(input).map(|end| input.split_at(end))
    }
}

fn run<'a>(tokens: &[Token], start: Cursor<'a>) -> Result<Cursor<'a>, Failure> {
    let mut cursor = start;
    let mut repeat = 0;
    let mut index = 0;
    while index < tokens.len() {
        match eval(tokens, index, &mut cursor, repeat) {
            Outcome::Matched => {
                index += 1;
                repeat = 0;
            }
            Outcome::Repeat => repeat += 1,
            Outcome::Failed => {
                return Err(Failure {
                    token: index,
                    offset: cursor.pos,
                    at_end: cursor.at_end(),
                });
            }
        }
    }
    Ok(cursor)
}

// Evaluates `tokens[index]`. The cursor only moves when the outcome is not
// `Failed`.
fn eval(tokens: &[Token], index: usize, cursor: &mut Cursor<'_>, repeat: usize) -> Outcome {
    let following = &tokens[index + 1..];
    match &tokens[index] {
        Token::Literal(l) => step(cursor, |c| c == *l),
        Token::Wildcard => step(cursor, |_| true),
        Token::CharClass(kind) => step(cursor, |c| kind.matches(c)),
        Token::Range(members) => {
            let at = *cursor;
            step(cursor, |c| in_set(members, at, c))
        }
        Token::NegRange(members) => {
            let at = *cursor;
            step(cursor, |c| !in_set(members, at, c))
        }
        Token::Group(body) => match run(body.tokens(), *cursor) {
            Ok(end) => {
                *cursor = end;
                Outcome::Matched
            }
            Err(_) => Outcome::Failed,
        },
        Token::ZeroOrMore(atom) => repeat_step(atom, following, cursor, true),
        Token::OneOrMore(atom) => repeat_step(atom, following, cursor, repeat >= 1),
        Token::ZeroOrOne(atom) => {
            if let Some(end) = attempt(atom, *cursor) {
                *cursor = end;
            }
            Outcome::Matched
        }
        Token::PositiveLookahead(atom) => match attempt(atom, *cursor) {
            Some(_) => Outcome::Matched,
            None => Outcome::Failed,
        },
        Token::NegativeLookahead(atom) => match attempt(atom, *cursor) {
            Some(_) => Outcome::Failed,
            None => Outcome::Matched,
        },
    }
}

fn step(cursor: &mut Cursor<'_>, accept: impl Fn(char) -> bool) -> Outcome {
    match cursor.peek() {
        Some(c) if accept(c) => {
            cursor.bump(c);
            Outcome::Matched
        }
        _ => Outcome::Failed,
    }
}

/// Runs a wrapped atom once from `at` through the driving loop.
fn attempt<'a>(atom: &Token, at: Cursor<'a>) -> Option<Cursor<'a>> {
    run(std::slice::from_ref(atom), at).ok()
}

fn repeat_step(
    atom: &Token,
    following: &[Token],
    cursor: &mut Cursor<'_>,
    min_met: bool,
) -> Outcome {
    if min_met && (cursor.at_end() || follower_matches(following, *cursor)) {
        return Outcome::Matched;
    }
    match attempt(atom, *cursor) {
        Some(end) if end.pos > cursor.pos => {
            *cursor = end;
            Outcome::Repeat
        }
        // zero-width atom: repeating cannot make progress
        Some(_) => Outcome::Matched,
        None if min_met => Outcome::Matched,
        None => Outcome::Failed,
    }
}

// Whether the token after a repetition can already match at `at`. Optional
// and repeated followers count only when their atom matches, otherwise they
// would always let the repetition stop empty: `a*b?c` on `aac` would stop
// `a*` before the first `a`, because `b?` succeeds anywhere, and then fail
// on `c`. Trying `b` alone lets `a*` take both `a`s.
fn follower_matches(following: &[Token], at: Cursor<'_>) -> bool {
    let Some(next) = following.first() else {
        return false;
    };
    if next.is_repetition() {
        return next.atom().is_some_and(|atom| attempt(atom, at).is_some());
    }
    let mut scratch = at;
    eval(following, 0, &mut scratch, 0) != Outcome::Failed
}

fn in_set(members: &Pattern, at: Cursor<'_>, c: char) -> bool {
    let tokens = members.tokens();
    let mut index = 0;
    while index < tokens.len() {
        if let [Token::Literal(lo), Token::Literal('-'), Token::Literal(hi), ..] =
            &tokens[index..]
        {
            if (*lo..=*hi).contains(&c) {
                return true;
            }
            index += 3;
            continue;
        }
        let mut scratch = at;
        if eval(std::slice::from_ref(&tokens[index]), 0, &mut scratch, 0) == Outcome::Matched {
            return true;
        }
        index += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::pattern::{MatchError, compile};

    fn m(pattern: &str, text: &str) -> Option<String> {
        compile(pattern).split(text).map(|(head, _)| head.to_string())
    }

    #[test]
    fn matches_simple_prefix() {
        assert_eq!(m("abc", "abcdef"), Some("abc".into()));
        assert_eq!(m("abc", "ab"), None);
        assert_eq!(m("abc", "abd"), None);
    }

    #[test]
    fn matching_is_anchored_at_start() {
        assert_eq!(m("b", "ab"), None);
        assert_eq!(m(".*b", "ab"), Some("ab".into()));
    }

    #[test]
    fn empty_pattern_consumes_nothing() {
        assert_eq!(m("", ""), Some("".into()));
        assert_eq!(m("", "anything"), Some("".into()));
    }

    #[test]
    fn matches_wildcard() {
        assert_eq!(m("a.c", "abc"), Some("abc".into()));
        assert_eq!(m("a.c", "ac"), None);
        assert_eq!(m(".", ""), None);
    }

    #[test]
    fn wildcard_steps_over_whole_chars() {
        assert_eq!(m("..", "héllo"), Some("hé".into()));
    }

    #[test]
    fn matches_char_classes() {
        assert_eq!(m("$d$d", "42xx"), Some("42".into()));
        assert_eq!(m("$d$d", "4axx"), None);
        assert_eq!(m("$w$w", "a_"), Some("a_".into()));
        assert_eq!(m("$w$w", "a-"), None);
        assert_eq!(m("$a", "1"), None);
        assert_eq!(m("$.", "."), Some(".".into()));
    }

    #[test]
    fn matches_ranges() {
        assert_eq!(m("[abc]", "a"), Some("a".into()));
        assert_eq!(m("[abc]", "z"), None);
        assert_eq!(m("[a-z]", "x"), Some("x".into()));
        assert_eq!(m("[a-z]", "A"), None);
        assert_eq!(m("[a-z0-9]", "5"), Some("5".into()));
        assert_eq!(m("[$d]", "5"), Some("5".into()));
        assert_eq!(m("[a-]", "-"), Some("-".into()));
        assert_eq!(m("[a-z]", ""), None);
    }

    #[test]
    fn matches_negated_ranges() {
        assert_eq!(m("[^abc]", "z"), Some("z".into()));
        assert_eq!(m("[^abc]", "a"), None);
        assert_eq!(m("[^abc]", ""), None);
        assert_eq!(m("[^$d]", "5"), None);
        assert_eq!(m("[^a-c]x", "dx"), Some("dx".into()));
    }

    #[test]
    fn matches_star() {
        assert_eq!(m("ab*", "abbbb"), Some("abbbb".into()));
        assert_eq!(m("ab*c", "abbbb"), None);
        assert_eq!(m("ab*c", "ac"), Some("ac".into()));
        assert_eq!(m("ab*c", "abbbc"), Some("abbbc".into()));
    }

    #[test]
    fn star_stops_when_atom_no_longer_matches() {
        assert_eq!(m("a*", "aab"), Some("aa".into()));
        assert_eq!(m("a*", "b"), Some("".into()));
    }

    #[test]
    fn star_is_idempotent_on_remainder() {
        let pattern = compile("a*");
        let (head, rest) = pattern.split("aaab").unwrap();
        assert_eq!(head, "aaa");
        assert_eq!(pattern.match_prefix(rest), Some(0));
    }

    #[test]
    fn matches_plus() {
        assert_eq!(m("a+", ""), None);
        assert_eq!(m("a+", "b"), None);
        assert_eq!(m("a+", "aaab"), Some("aaa".into()));
        assert_eq!(m("ab+", "a"), None);
    }

    #[test]
    fn matches_question_mark() {
        assert_eq!(m("a?b", "ab"), Some("ab".into()));
        assert_eq!(m("a?b", "b"), Some("b".into()));
        assert_eq!(m("a?", ""), Some("".into()));
    }

    #[test]
    fn repetition_stops_where_the_next_token_fits() {
        assert_eq!(
            m("\".*\"", "\"This is a string\" tail"),
            Some("\"This is a string\"".into())
        );
        assert_eq!(m("a.*c", "abc"), Some("abc".into()));
        assert_eq!(m("a.*c", "ac"), Some("ac".into()));
    }

    #[test]
    fn repeated_followers_do_not_stop_a_repetition_early() {
        assert_eq!(m("x*y*z*", "xyz"), Some("xyz".into()));
        assert_eq!(m("a*b?c", "aac"), Some("aac".into()));
    }

    #[test]
    fn lookahead_is_zero_width() {
        assert_eq!(m("test!", "test"), Some("tes".into()));
        assert_eq!(m("test!", "tes"), None);
        assert_eq!(m("a$d~", "ab"), Some("a".into()));
        assert_eq!(m("a$d~", "a1"), None);
    }

    #[test]
    fn lookahead_stops_a_scan() {
        assert_eq!(m(".*($d+)!", "abc 123"), Some("abc ".into()));
    }

    #[test]
    fn group_matches_as_a_unit() {
        assert_eq!(m("(ab)+", "ababx"), Some("abab".into()));
        assert_eq!(m("(ab)+", "ax"), None);
        assert_eq!(m("(ab)?a", "ac"), Some("a".into()));
    }

    #[test]
    fn chained_operators() {
        assert_eq!(m("a**", "aaab"), Some("aaa".into()));
        assert_eq!(m("a+?b", "b"), Some("b".into()));
        assert_eq!(m("(a?)*b", "aab"), Some("aab".into()));
    }

    #[test]
    fn zero_width_repetition_terminates() {
        assert_eq!(m("(a?)*", "b"), Some("".into()));
        assert_eq!(m("(b!)+", "b"), Some("".into()));
    }

    #[test]
    fn try_match_reports_where_it_failed() {
        let pattern = compile("ab");
        assert_eq!(pattern.try_match("ab"), Ok(2));
        assert_eq!(
            pattern.try_match("ax"),
            Err(MatchError::Mismatch { token: 1, offset: 1 })
        );
        assert_eq!(
            pattern.try_match("a"),
            Err(MatchError::UnexpectedEnd { token: 1, offset: 1 })
        );
    }

    #[test]
    fn failed_group_does_not_move_the_cursor() {
        let err = compile("x(ab)").try_match("xac").unwrap_err();
        assert_eq!(err, MatchError::Mismatch { token: 1, offset: 1 });
    }

    #[test]
    fn split_returns_prefix_and_remainder() {
        assert_eq!(compile("$d+").split("123abc"), Some(("123", "abc")));
        assert_eq!(compile("$d+").split("abc"), None);
    }

    #[test]
    fn compiled_pattern_is_shared_across_threads() {
        let pattern = &compile("[$a_][$w_]*");
        let inputs = ["foo bar", "_x1 = 2", "9lives"];
        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .into_iter()
                .map(|input| scope.spawn(move || pattern.match_prefix(input)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results, vec![Some(3), Some(3), None]);
    }
}
