//! Tag system

pub mod extractor;
pub mod grammar;
pub mod scanner;
pub mod syntax;

// Re-export main types
pub use extractor::{extract_comments, CommentLine, CommentLines, CommentSpan, ExtractionMode};
pub use grammar::{parse_tag, ParsedTag, TagSyntaxError, TAG_SENTINEL};
pub use scanner::{scan_source, FileScan, TagParseError};
pub use syntax::{CommentSyntax, CommentSyntaxMap};
