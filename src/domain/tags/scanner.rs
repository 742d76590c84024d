//! Per-file tag scanning: comment extraction followed by tag parsing

use super::extractor::{extract_comments, ExtractionMode};
use super::grammar::{parse_spans, TagSyntaxError};
use crate::domain::index::{SourceLocation, Tag};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A malformed tag, recorded instead of aborting the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagParseError {
    pub location: SourceLocation,
    /// Comment text of the offending line, trimmed
    pub text: String,
    pub error: TagSyntaxError,
}

impl fmt::Display for TagParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} in '{}'", self.location, self.error, self.text)
    }
}

/// Tags and parse errors of one file, both in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    pub tags: Vec<Tag>,
    pub errors: Vec<TagParseError>,
}

/// Scan the text of one file
///
/// `file` is the path recorded in locations, usually relative to the root.
pub fn scan_source(file: &Path, text: &str, mode: ExtractionMode<'_>) -> FileScan {
    let mut scan = FileScan::default();

    for comment in extract_comments(text, mode) {
        let location = SourceLocation::new(file, comment.line);
        match parse_spans(comment.span_pairs()) {
            Ok(Some(parsed)) => scan.tags.push(Tag {
                version: parsed.version,
                equations: parsed.equations,
                location,
                column: parsed.column,
            }),
            Ok(None) => {}
            Err(error) => {
                let text = comment
                    .spans
                    .iter()
                    .map(|span| span.text.trim())
                    .collect::<Vec<_>>()
                    .join(" ");
                log::warn!("Malformed tag at {}: {}", location, error);
                scan.errors.push(TagParseError {
                    location,
                    text,
                    error,
                });
            }
        }
    }

    scan
}
