use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::pattern::{CompileOptions, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Always,
    Never,
    Auto,
}

/// Match the start of each input line against prefix patterns.
#[derive(Parser, Debug)]
#[command(name = "rsp", author, version, about, long_about = None)]
struct Args {
    /// Pattern to match; repeat it to match each pattern on what the previous one left
    #[arg(
        short = 'E',
        long = "pattern",
        value_name = "PATTERN",
        required = true,
        allow_hyphen_values = true
    )]
    patterns: Vec<String>,

    /// Print only the part matched by the last pattern
    #[arg(short = 'o', long)]
    only_matching: bool,

    /// Search directories recursively
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Highlight the part matched by the last pattern
    #[arg(long, value_enum, default_value_t = ColorWhen::Never, value_name = "WHEN")]
    color: ColorWhen,

    /// Print the compiled patterns and exit
    #[arg(long)]
    dump: bool,

    /// Explain on stderr why lines did not match
    #[arg(long)]
    explain: bool,

    /// Maximum depth of the compiled pattern tree
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Files or directories to search; standard input when omitted
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub patterns: Vec<String>,
    pub only_matching: bool,
    pub recursive: bool,
    pub color: ColorWhen,
    pub dump: bool,
    pub explain: bool,
    pub compile: CompileOptions,
    pub paths: Vec<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            patterns: args.patterns,
            only_matching: args.only_matching,
            recursive: args.recursive,
            color: args.color,
            dump: args.dump,
            explain: args.explain,
            compile: CompileOptions::default().with_max_depth(args.max_depth),
            paths: args.paths,
        }
    }
}

pub fn parse_args<I, T>(args: I) -> Result<Config, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args).map(Config::from)
}

pub fn resolve_use_color(color: ColorWhen) -> bool {
    match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => io::stdout().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pattern_reads_stdin() {
        let cfg = parse_args(["rsp", "-E", "$d+"]).unwrap();
        assert_eq!(cfg.patterns, vec!["$d+".to_string()]);
        assert!(cfg.paths.is_empty());
        assert_eq!(cfg.color, ColorWhen::Never);
        assert_eq!(cfg.compile, CompileOptions::default());
        assert!(!cfg.only_matching && !cfg.recursive && !cfg.dump && !cfg.explain);
    }

    #[test]
    fn patterns_chain_in_order() {
        let cfg =
            parse_args(["rsp", "-E", ".*($d)!", "--pattern", "$d+", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cfg.patterns, vec![".*($d)!".to_string(), "$d+".to_string()]);
        assert_eq!(cfg.paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn flags_and_options() {
        let cfg = parse_args([
            "rsp", "-o", "-r", "--color", "always", "--dump", "--explain", "--max-depth", "4",
            "-E", "a",
        ])
        .unwrap();
        assert!(cfg.only_matching && cfg.recursive && cfg.dump && cfg.explain);
        assert_eq!(cfg.color, ColorWhen::Always);
        assert_eq!(cfg.compile.max_depth, 4);
        assert!(resolve_use_color(cfg.color));
    }

    #[test]
    fn pattern_is_required() {
        assert!(parse_args(["rsp", "file.txt"]).is_err());
    }

    #[test]
    fn unknown_color_is_rejected() {
        assert!(parse_args(["rsp", "-E", "a", "--color", "sometimes"]).is_err());
    }
}
