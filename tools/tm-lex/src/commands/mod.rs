//! Command handlers for the `tm-lex` CLI.
//!
//! Each handler returns the text to print. Shared helpers like
//! [`read_source`] and [`parse_range`] live here as well.

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tm_editor::{fold_regions, highlight, match_braces, Settings};
use tm_lexer_core::{KeywordSet, Scanner, Token};
use tracing::debug;

use crate::ToolError;

/// Read a source file into memory.
pub fn read_source(path: &Path) -> Result<String, ToolError> {
    fs::read_to_string(path).map_err(|source| ToolError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a `START..END` byte range.
pub fn parse_range(text: &str) -> Result<Range<u32>, ToolError> {
    let bad = || ToolError::BadRange(text.to_owned());
    let (start, end) = text.split_once("..").ok_or_else(bad)?;
    let start = start.trim().parse().map_err(|_| bad())?;
    let end = end.trim().parse().map_err(|_| bad())?;
    Ok(start..end)
}

/// Arguments of the `lex` command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LexArgs {
    pub range: Option<Range<u32>>,
    pub files: Vec<PathBuf>,
}

/// Parse `lex` arguments: an optional `--range=START..END` and file paths.
///
/// Any other argument starting with `-` is rejected.
pub fn parse_lex_args(args: &[String]) -> Result<LexArgs, ToolError> {
    let mut parsed = LexArgs::default();
    for arg in args {
        if let Some(text) = arg.strip_prefix("--range=") {
            parsed.range = Some(parse_range(text)?);
        } else if arg.starts_with('-') {
            return Err(ToolError::UnknownOption(arg.clone()));
        } else {
            parsed.files.push(PathBuf::from(arg));
        }
    }
    Ok(parsed)
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ToolError> {
    match path {
        Some(path) => Ok(Settings::load(path)?),
        None => Ok(Settings::default()),
    }
}

/// One line per token: `TAG start..end "text"`.
pub fn render_tokens(
    source: &str,
    range: Option<Range<u32>>,
    keywords: &KeywordSet,
) -> Result<String, ToolError> {
    let scanner = match range {
        Some(range) => Scanner::with_range(source, range, keywords)?,
        None => Scanner::new(source, keywords),
    };
    let mut out = String::new();
    for tok in scanner {
        let _ = writeln!(out, "{}", format_token(source, tok));
    }
    Ok(out)
}

fn format_token(source: &str, tok: Token) -> String {
    format!("{} {}..{} {:?}", tok.tag, tok.start, tok.end, tok.text(source))
}

/// Tokenize every file, in parallel. Reports come back in input order.
pub fn lex_files(
    paths: &[PathBuf],
    range: Option<Range<u32>>,
    keywords: &KeywordSet,
) -> Vec<Result<String, ToolError>> {
    debug!(files = paths.len(), "lexing files");
    paths
        .par_iter()
        .map(|path| {
            let source = read_source(path)?;
            let body = render_tokens(&source, range.clone(), keywords)?;
            Ok(format!("Tokens for '{}':\n{body}", path.display()))
        })
        .collect()
}

/// One line per highlighted run: `KEY start..end "text"`.
pub fn render_highlight(source: &str, keywords: &KeywordSet) -> String {
    let mut out = String::new();
    for run in highlight(source, keywords) {
        let text = source
            .get(run.span.start as usize..run.span.end as usize)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {}..{} {:?}",
            run.key, run.span.start, run.span.end, text
        );
    }
    out
}

/// Matched delimiter pairs, then anything left unmatched.
pub fn render_braces(source: &str, keywords: &KeywordSet) -> String {
    let tokens: Vec<Token> = Scanner::new(source, keywords).collect();
    let result = match_braces(&tokens);
    let mut out = String::new();
    for &(open, close) in &result.pairs {
        let (open, close) = (tokens[open], tokens[close]);
        let _ = writeln!(
            out,
            "{} {}..{} <-> {} {}..{}",
            open.tag, open.start, open.end, close.tag, close.start, close.end
        );
    }
    for &index in result.unmatched_open.iter().chain(&result.unmatched_close) {
        let tok = tokens[index];
        let _ = writeln!(out, "unmatched {} {}..{}", tok.tag, tok.start, tok.end);
    }
    out
}

/// Fold regions with their 1-based line range and placeholder.
pub fn render_folds(source: &str, keywords: &KeywordSet) -> String {
    let line_of = |offset: u32| {
        source
            .get(..offset as usize)
            .map_or(0, |prefix| prefix.matches('\n').count())
            + 1
    };
    let mut out = String::new();
    for region in fold_regions(source, keywords) {
        let _ = writeln!(
            out,
            "{}..{} lines {}-{} {}",
            region.span.start,
            region.span.end,
            line_of(region.span.start),
            line_of(region.span.end),
            region.placeholder
        );
    }
    out
}

/// The language server command line and trace level, without launching it.
pub fn render_server(settings: &Settings, path_env: Option<&OsStr>) -> Result<String, ToolError> {
    let command = settings.language_server.command(path_env)?;
    Ok(format!("{command}\ntrace: {}\n", command.trace))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
