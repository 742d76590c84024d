//! jambiato - Specification equation cross-referencing
//!
//! Scans a source tree for comment tags such as `$(0.4.5 - 123 \ 124)` that
//! link code to numbered equations of a versioned specification, builds an
//! index from (version, equation) to code locations and reports
//! inconsistencies between tags.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::JambiatoError;
