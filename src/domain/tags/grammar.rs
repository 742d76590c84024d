//! Equation tag grammar
//!
//! A tag is a sentinel-prefixed group `$(VERSION - EQ [\ EQ]*)`. The grammar
//! works on comment text that has already been isolated by the extractor, so
//! it knows nothing about comment delimiters.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Character that introduces a tag group
pub const TAG_SENTINEL: char = '$';

/// Separator between the version and the equation list
pub const VERSION_SEPARATOR: char = '-';

/// Separator between equations of a multi-equation tag
pub const EQUATION_SEPARATOR: char = '\\';

/// Regex for a sentinel-prefixed parenthesized group: `$(...)`, `$ ( ... )`
fn group_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\$[ \t]*\(([^()]*)\)").unwrap())
}

/// Why a tag-shaped group could not be turned into a tag
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum TagSyntaxError {
    #[error("empty version")]
    EmptyVersion,

    #[error("no equations listed")]
    MissingEquations,

    #[error("empty equation at position {position}")]
    EmptyEquation { position: usize },

    #[error("unexpected '-' in equation list")]
    ExtraSeparator,

    #[error("{count} tags on one line (at most one is allowed)")]
    MultipleTags { count: usize },
}

/// A tag recognized in a piece of comment text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTag {
    pub version: String,
    pub equations: Vec<String>,
    /// 1-based byte column of the sentinel in the physical line
    pub column: usize,
}

/// A tag-shaped group found in text, before its body is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCandidate<'a> {
    /// Byte offset of the sentinel within the searched text
    pub offset: usize,
    /// Text between the parentheses
    pub body: &'a str,
}

/// Find every tag-shaped group in `text`
///
/// A group is tag-shaped when its body contains the version separator;
/// shell-style `$(cmd)` groups without one are not candidates.
pub fn find_candidates(text: &str) -> Vec<TagCandidate<'_>> {
    group_regex()
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let body = cap.get(1)?.as_str();
            body.contains(VERSION_SEPARATOR).then_some(TagCandidate {
                offset: whole.start(),
                body,
            })
        })
        .collect()
}

/// Split a candidate body into a trimmed version and equation list
pub fn parse_body(body: &str) -> Result<(String, Vec<String>), TagSyntaxError> {
    let (version, rest) = body
        .split_once(VERSION_SEPARATOR)
        .ok_or(TagSyntaxError::MissingEquations)?;

    let version = version.trim();
    if version.is_empty() {
        return Err(TagSyntaxError::EmptyVersion);
    }
    if rest.contains(VERSION_SEPARATOR) {
        return Err(TagSyntaxError::ExtraSeparator);
    }
    if rest.trim().is_empty() {
        return Err(TagSyntaxError::MissingEquations);
    }

    let mut equations = Vec::new();
    for (idx, token) in rest.split(EQUATION_SEPARATOR).enumerate() {
        let token = token.trim();
        if token.is_empty() {
            return Err(TagSyntaxError::EmptyEquation { position: idx + 1 });
        }
        equations.push(token.to_string());
    }

    Ok((version.to_string(), equations))
}

/// Parse the tag carried by one physical line, given as comment spans
///
/// Each span is `(column, text)` where `column` is the 1-based byte column of
/// the span start in the line. All spans of a line count toward the
/// one-tag-per-line rule.
pub fn parse_spans<'a, I>(spans: I) -> Result<Option<ParsedTag>, TagSyntaxError>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut found: Vec<(usize, &str)> = Vec::new();
    for (column, text) in spans {
        for candidate in find_candidates(text) {
            found.push((column + candidate.offset, candidate.body));
        }
    }

    match found.as_slice() {
        [] => Ok(None),
        [(column, body)] => {
            let (version, equations) = parse_body(body)?;
            Ok(Some(ParsedTag {
                version,
                equations,
                column: *column,
            }))
        }
        _ => Err(TagSyntaxError::MultipleTags { count: found.len() }),
    }
}

/// Parse a single piece of text that starts at column 1
pub fn parse_tag(text: &str) -> Result<Option<ParsedTag>, TagSyntaxError> {
    parse_spans([(1, text)])
}
