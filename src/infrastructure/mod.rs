//! Infrastructure layer - File system access and configuration

pub mod config;
pub mod source;

pub use config::Config;
pub use source::{FileReadError, FileSystemSource, SourceListing, SourceRepository};
