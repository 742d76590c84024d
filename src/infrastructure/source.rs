//! Source tree access

use crate::error::{JambiatoError, Result};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file or directory that could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReadError {
    /// Path relative to the scanned root
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for FileReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Files found under a root, plus the entries that could not be visited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceListing {
    /// Relative paths in lexical path order
    pub files: Vec<PathBuf>,
    pub errors: Vec<FileReadError>,
}

/// Abstract access to a tree of source files
pub trait SourceRepository {
    /// Get the root directory of this tree
    fn root(&self) -> &Path;

    /// List every candidate file, relative to the root, in lexical path order
    fn list_files(&self) -> Result<SourceListing>;

    /// Read one file given its path relative to the root
    fn read_file(&self, relative: &Path) -> io::Result<String>;
}

/// File system implementation of SourceRepository
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
    exclude: Vec<String>,
}

impl FileSystemSource {
    /// Open a source tree; the root must be an existing directory
    pub fn open(root: PathBuf, exclude: Vec<String>) -> Result<Self> {
        Self::ensure_root(&root)?;
        Ok(FileSystemSource { root, exclude })
    }

    /// Check that `root` exists and is a directory
    pub fn ensure_root(root: &Path) -> Result<()> {
        if !root.exists() {
            return Err(JambiatoError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(JambiatoError::NotADirectory(root.to_path_buf()));
        }
        Ok(())
    }

    fn is_skipped(&self, name: &str, is_dir: bool) -> bool {
        (is_dir && name.starts_with('.')) || self.exclude.iter().any(|e| e == name)
    }
}

impl SourceRepository for FileSystemSource {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list_files(&self) -> Result<SourceListing> {
        let mut listing = SourceListing::default();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !self.is_skipped(name, entry.file_type().is_dir()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .and_then(|p| p.strip_prefix(&self.root).ok())
                        .map(Path::to_path_buf)
                        .unwrap_or_default();
                    log::warn!("Cannot visit {}: {}", path.display(), err);
                    listing.errors.push(FileReadError {
                        path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            listing.files.push(rel.to_path_buf());
        }

        Ok(listing)
    }

    fn read_file(&self, relative: &Path) -> io::Result<String> {
        fs::read_to_string(self.root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn default_excludes() -> Vec<String> {
        vec!["target".to_string()]
    }

    #[test]
    fn test_open_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        match FileSystemSource::open(missing, vec![]) {
            Err(JambiatoError::RootNotFound(_)) => {}
            other => panic!("Expected RootNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_open_file_root() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.rs", "");
        match FileSystemSource::open(temp.path().join("a.rs"), vec![]) {
            Err(JambiatoError::NotADirectory(_)) => {}
            other => panic!("Expected NotADirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_list_files_in_lexical_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b.txt", "");
        write(temp.path(), "a/z.rs", "");
        write(temp.path(), "a/b/c.rs", "");
        write(temp.path(), "a.txt", "");

        let source = FileSystemSource::open(temp.path().to_path_buf(), default_excludes()).unwrap();
        let listing = source.list_files().unwrap();

        let files: Vec<PathBuf> = listing.files;
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        assert_eq!(
            files,
            vec![
                PathBuf::from("a/b/c.rs"),
                PathBuf::from("a/z.rs"),
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
            ]
        );
        assert!(listing.errors.is_empty());
    }

    #[test]
    fn test_list_files_skips_hidden_and_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".git/config", "");
        write(temp.path(), "target/debug/out.rs", "");
        write(temp.path(), "src/lib.rs", "");
        write(temp.path(), ".env", "");

        let source = FileSystemSource::open(temp.path().to_path_buf(), default_excludes()).unwrap();
        let files = source.list_files().unwrap().files;

        assert_eq!(files, vec![PathBuf::from(".env"), PathBuf::from("src/lib.rs")]);
    }

    #[test]
    fn test_read_file_relative_to_root() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/lib.rs", "// $(1.0 - 1)");

        let source = FileSystemSource::open(temp.path().to_path_buf(), vec![]).unwrap();
        let content = source.read_file(Path::new("src/lib.rs")).unwrap();
        assert_eq!(content, "// $(1.0 - 1)");
    }
}
