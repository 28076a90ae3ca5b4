use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};

use crate::cli::{Config, resolve_use_color};
use crate::fs_walk::collect_files;
use crate::pattern::{Pattern, compile_with};
use crate::search::{SearchOptions, search_input};

/// Runs one invocation. `Ok(true)` when some line matched.
pub fn run(cfg: &Config) -> Result<bool> {
    let chain: Vec<Pattern> = cfg
        .patterns
        .iter()
        .map(|p| compile_with(p, &cfg.compile))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cfg.dump {
        dump(&cfg.patterns, &chain, &mut out)?;
        return Ok(true);
    }

    let opts = SearchOptions {
        only_matching: cfg.only_matching,
        use_color: resolve_use_color(cfg.color),
        explain: cfg.explain,
    };
    let stderr = io::stderr();
    let mut diag = stderr.lock();

    if cfg.paths.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read standard input")?;
        return search_input(&buffer, &chain, None, &opts, &mut out, &mut diag)
            .context("failed to write results");
    }

    let mut files = Vec::new();
    for path in &cfg.paths {
        match collect_files(path, cfg.recursive) {
            Ok(found) => files.extend(found),
            Err(err) => writeln!(diag, "rsp: {}: {err}", path.display())?,
        }
    }
    tracing::debug!(patterns = chain.len(), files = files.len(), "searching");

    let show_filename = cfg.recursive || files.len() > 1;
    let mut matched = false;
    for path in files {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                writeln!(diag, "rsp: {}: {err}", path.display())?;
                continue;
            }
        };
        let name = path.to_string_lossy();
        let filename = show_filename.then_some(&*name);
        matched |= search_input(&content, &chain, filename, &opts, &mut out, &mut diag)
            .with_context(|| format!("failed to write results for {}", path.display()))?;
    }
    Ok(matched)
}

pub fn dump(sources: &[String], chain: &[Pattern], out: &mut impl Write) -> Result<()> {
    for (source, pattern) in sources.iter().zip(chain) {
        writeln!(out, "{source}\t{pattern}")?;
    }
    Ok(())
}
