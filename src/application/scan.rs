//! Scan use case
//!
//! Walks the source tree in lexical path order and builds the equation index.

use crate::domain::tags::{scan_source, CommentSyntaxMap, TagParseError};
use crate::domain::{EquationIndex, IndexBuilder};
use crate::error::Result;
use crate::infrastructure::{Config, FileReadError, SourceRepository};
use std::io;
use std::path::Path;

/// Options for scanning
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Comment delimiters per extension
    pub comments: CommentSyntaxMap,

    /// Only scan files with these extensions (None = all files)
    pub extensions: Option<Vec<String>>,
}

impl ScanOptions {
    pub fn from_config(config: &Config) -> Self {
        ScanOptions {
            comments: config.comment_syntax_map(),
            extensions: config.extensions.clone(),
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        let Some(allowed) = &self.extensions else {
            return true;
        };
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                allowed
                    .iter()
                    .any(|a| a.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            comments: CommentSyntaxMap::builtin(),
            extensions: None,
        }
    }
}

/// Everything one scan produced
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub index: EquationIndex,
    pub parse_errors: Vec<TagParseError>,
    pub read_errors: Vec<FileReadError>,
    pub files_scanned: usize,
    /// Files skipped as binary (not valid UTF-8)
    pub files_skipped: usize,
}

/// Service for scanning a source tree
pub struct ScanService<R: SourceRepository> {
    repository: R,
    options: ScanOptions,
}

impl<R: SourceRepository> ScanService<R> {
    /// Create new scan service
    pub fn new(repository: R, options: ScanOptions) -> Self {
        ScanService {
            repository,
            options,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Execute the scan
    ///
    /// Malformed tags and unreadable files are recorded in the outcome; only
    /// a failure to list the tree at all is returned as an error.
    pub fn execute(&self) -> Result<ScanOutcome> {
        let listing = self.repository.list_files()?;
        let mut outcome = ScanOutcome {
            read_errors: listing.errors,
            ..ScanOutcome::default()
        };
        let mut builder = IndexBuilder::new();

        for file in listing.files {
            if !self.options.accepts(&file) {
                continue;
            }

            let content = match self.repository.read_file(&file) {
                Ok(content) => content,
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    log::debug!("Skipping binary file {}", file.display());
                    outcome.files_skipped += 1;
                    continue;
                }
                Err(err) => {
                    log::warn!("Cannot read {}: {}", file.display(), err);
                    outcome.read_errors.push(FileReadError {
                        path: file,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let mode = self.options.comments.mode_for(&file);
            let scan = scan_source(&file, &content, mode);
            log::debug!(
                "Scanned {}: {} tag(s), {} malformed",
                file.display(),
                scan.tags.len(),
                scan.errors.len()
            );

            builder.extend(scan.tags);
            outcome.parse_errors.extend(scan.errors);
            outcome.files_scanned += 1;
        }

        outcome.index = builder.finish();
        log::info!(
            "Scanned {} file(s) under {}: {} tag(s), {} malformed, {} unreadable",
            outcome.files_scanned,
            self.repository.root().display(),
            outcome.index.tag_count(),
            outcome.parse_errors.len(),
            outcome.read_errors.len()
        );

        Ok(outcome)
    }
}
