//! Error types for jambiato

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jambiato
///
/// Only run-level failures live here. Malformed tags and unreadable files are
/// recorded in the scan outcome and never abort a run.
#[derive(Debug, Error)]
pub enum JambiatoError {
    #[error("Root path not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Equation not found: {0}")]
    EquationNotFound(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Checks failed: {0} blocking issue(s)")]
    ChecksFailed(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JambiatoError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JambiatoError::RootNotFound(_) | JambiatoError::NotADirectory(_) => 2,
            JambiatoError::ChecksFailed(_) => 3,
            JambiatoError::EquationNotFound(_) | JambiatoError::VersionNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JambiatoError::RootNotFound(_) | JambiatoError::NotADirectory(_) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Pass the root directory of your source tree (e.g., jambiato report ./src)\n\
                    • Omit the path to scan the current directory",
                    self
                )
            }
            JambiatoError::EquationNotFound(eq) => {
                format!(
                    "No tag references equation '{}'\n\n\
                    Suggestions:\n\
                    • Use 'jambiato equations' to list tagged equation ids\n\
                    • Tags look like $(0.4.5 - 123) or $(0.4.5 - 123 \\ 124)\n\
                    • Restrict or widen the search with --spec-version",
                    eq
                )
            }
            JambiatoError::VersionNotFound(version) => {
                format!(
                    "No tags found for version '{}'\n\n\
                    Suggestions:\n\
                    • Use 'jambiato equations' without --spec-version to see all versions",
                    version
                )
            }
            JambiatoError::ChecksFailed(count) => {
                format!(
                    "Checks failed: {} blocking issue(s)\n\n\
                    Blocking issues are multi-version equations, duplicate equations in one tag,\n\
                    malformed tags and tags referencing a version other than the target.\n\
                    Run without --strict to report them without failing.",
                    count
                )
            }
            JambiatoError::Config(msg) => {
                if msg.contains("delimiter") {
                    format!(
                        "{}\n\n\
                        Example:\n\
                        [comments.rs]\n\
                        line = [\"//\"]\n\
                        block = [[\"/*\", \"*/\"]]",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JambiatoError
pub type Result<T> = std::result::Result<T, JambiatoError>;
