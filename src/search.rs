use std::io::{self, Write};
use std::ops::Range;

use thiserror::Error;

use crate::output::{highlight, paint};
use crate::pattern::{MatchError, Pattern};

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    pub only_matching: bool,
    pub use_color: bool,
    pub explain: bool,
}

/// A pattern in a chain that did not match what the earlier ones left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pattern {pattern} failed on the text from byte {start}: {source}")]
pub struct ChainError {
    pub pattern: usize,
    pub start: usize,
    #[source]
    pub source: MatchError,
}

/// Matches each pattern on the remainder left by the previous one and
/// returns the span consumed by the last pattern.
pub fn match_chain(line: &str, chain: &[Pattern]) -> Result<Range<usize>, ChainError> {
    let mut start = 0;
    let mut segment = 0..0;
    for (index, pattern) in chain.iter().enumerate() {
        let len = pattern
            .try_match(&line[start..])
            .map_err(|source| ChainError {
                pattern: index,
                start,
                source,
            })?;
        segment = start..start + len;
        start += len;
    }
    Ok(segment)
}

/// Searches every line of `content`, writing hits to `out` and, with
/// `explain`, failures to `diag`. Returns whether any line matched.
pub fn search_input(
    content: &str,
    chain: &[Pattern],
    filename: Option<&str>,
    opts: &SearchOptions,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> io::Result<bool> {
    let prefix = filename.map(|f| format!("{f}:")).unwrap_or_default();
    let mut matched = false;

    for (number, line) in content.lines().enumerate() {
        match match_chain(line, chain) {
            Ok(segment) => {
                matched = true;
                if !opts.only_matching {
                    writeln!(out, "{prefix}{}", highlight(line, segment, opts.use_color))?;
                } else if !segment.is_empty() {
                    writeln!(out, "{prefix}{}", paint(&line[segment], opts.use_color))?;
                }
            }
            Err(err) if opts.explain => writeln!(diag, "{prefix}{}: {err}", number + 1)?,
            Err(_) => {}
        }
    }
    Ok(matched)
}
