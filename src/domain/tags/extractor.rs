//! Comment extraction
//!
//! Turns raw file text into a lazy sequence of comment lines. The extractor
//! only looks for delimiter tokens: it does not understand string literals,
//! so a comment opener inside a string starts a comment. That trade keeps it
//! usable for any language with a known delimiter set.
//!
//! Files without a declared delimiter set use [`ExtractionMode::PermissiveSentinelScan`],
//! which treats every line containing the tag sentinel as a comment line.
//! Known limitation: in that mode a tag inside code or a string literal is
//! reported exactly like a tag inside a comment.

use super::grammar::TAG_SENTINEL;
use super::syntax::CommentSyntax;
use std::iter::Enumerate;
use std::str::Lines;

/// How comment text is located in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode<'a> {
    /// Only text inside the given delimiters is considered
    StrictByDelimiterSet(&'a CommentSyntax),
    /// Any line containing the sentinel is a candidate
    PermissiveSentinelScan,
}

/// A contiguous piece of comment text within one physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan<'a> {
    /// 1-based byte column where the text starts
    pub column: usize,
    pub text: &'a str,
}

/// All comment text found on one physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine<'a> {
    /// 1-based line number
    pub line: usize,
    /// Line where the comment holding the first span started; differs from
    /// `line` inside multi-line block comments
    pub anchor: usize,
    pub spans: Vec<CommentSpan<'a>>,
}

impl<'a> CommentLine<'a> {
    /// Spans as `(column, text)` pairs, the shape the grammar consumes
    pub fn span_pairs(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.spans.iter().map(|span| (span.column, span.text))
    }
}

/// Extract comment lines from `text`
pub fn extract_comments<'a>(text: &'a str, mode: ExtractionMode<'a>) -> CommentLines<'a> {
    CommentLines {
        lines: text.lines().enumerate(),
        mode,
        open_block: None,
    }
}

/// Lazy iterator over the comment lines of a file
#[derive(Debug)]
pub struct CommentLines<'a> {
    lines: Enumerate<Lines<'a>>,
    mode: ExtractionMode<'a>,
    /// Close delimiter and start line of a block comment still open
    open_block: Option<(&'a str, usize)>,
}

enum Opener<'a> {
    Line(&'a str),
    Block(&'a str, &'a str),
}

impl<'a> CommentLines<'a> {
    fn strict_line(
        &mut self,
        syntax: &'a CommentSyntax,
        line_no: usize,
        line: &'a str,
    ) -> Option<CommentLine<'a>> {
        let mut spans = Vec::new();
        let mut anchor = None;
        let mut pos = 0;

        while pos <= line.len() {
            let rest = &line[pos..];

            if let Some((close, start)) = self.open_block {
                anchor.get_or_insert(start);
                match rest.find(close) {
                    Some(end) => {
                        push_span(&mut spans, pos, &rest[..end]);
                        pos += end + close.len();
                        self.open_block = None;
                        continue;
                    }
                    None => {
                        push_span(&mut spans, pos, rest);
                        break;
                    }
                }
            }

            let Some((offset, opener)) = next_opener(syntax, rest) else {
                break;
            };
            anchor.get_or_insert(line_no);
            match opener {
                Opener::Line(open) => {
                    let start = pos + offset + open.len();
                    push_span(&mut spans, start, &line[start..]);
                    break;
                }
                Opener::Block(open, close) => {
                    pos += offset + open.len();
                    self.open_block = Some((close, line_no));
                }
            }
        }

        if spans.is_empty() {
            return None;
        }
        Some(CommentLine {
            line: line_no,
            anchor: anchor.unwrap_or(line_no),
            spans,
        })
    }
}

impl<'a> Iterator for CommentLines<'a> {
    type Item = CommentLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, line)) = self.lines.next() {
            let line_no = idx + 1;
            let found = match self.mode {
                ExtractionMode::PermissiveSentinelScan => {
                    line.contains(TAG_SENTINEL).then(|| CommentLine {
                        line: line_no,
                        anchor: line_no,
                        spans: vec![CommentSpan {
                            column: 1,
                            text: line,
                        }],
                    })
                }
                ExtractionMode::StrictByDelimiterSet(syntax) => {
                    self.strict_line(syntax, line_no, line)
                }
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

/// Keep non-blank spans; `byte_start` is a 0-based offset in the line
fn push_span<'a>(spans: &mut Vec<CommentSpan<'a>>, byte_start: usize, text: &'a str) {
    if !text.trim().is_empty() {
        spans.push(CommentSpan {
            column: byte_start + 1,
            text,
        });
    }
}

/// Earliest comment opener in `rest`; on a tie the longer opener wins
fn next_opener<'a>(syntax: &'a CommentSyntax, rest: &str) -> Option<(usize, Opener<'a>)> {
    let line_openers = syntax
        .line
        .iter()
        .filter(|open| !open.is_empty())
        .map(|open| (open.as_str(), Opener::Line(open.as_str())));
    let block_openers = syntax
        .block
        .iter()
        .filter(|(open, close)| !open.is_empty() && !close.is_empty())
        .map(|(open, close)| (open.as_str(), Opener::Block(open.as_str(), close.as_str())));

    line_openers
        .chain(block_openers)
        .filter_map(|(token, opener)| rest.find(token).map(|at| (at, token.len(), opener)))
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
        .map(|(at, _, opener)| (at, opener))
}
