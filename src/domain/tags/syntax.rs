//! Comment delimiter sets per file extension

use super::extractor::ExtractionMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Comment delimiters of one language
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentSyntax {
    /// Line comment openers, e.g. `//` or `#`
    #[serde(default)]
    pub line: Vec<String>,

    /// Block comment `(open, close)` pairs, e.g. `("/*", "*/")`
    #[serde(default)]
    pub block: Vec<(String, String)>,
}

impl CommentSyntax {
    pub fn new(line: &[&str], block: &[(&str, &str)]) -> Self {
        CommentSyntax {
            line: line.iter().map(|s| s.to_string()).collect(),
            block: block
                .iter()
                .map(|(open, close)| (open.to_string(), close.to_string()))
                .collect(),
        }
    }

    /// Returns the first empty delimiter, if any
    pub fn empty_delimiter(&self) -> Option<&'static str> {
        if self.line.iter().any(|d| d.is_empty()) {
            return Some("line");
        }
        if self
            .block
            .iter()
            .any(|(open, close)| open.is_empty() || close.is_empty())
        {
            return Some("block");
        }
        None
    }
}

/// Mapping from lowercase file extension to its comment delimiters
///
/// Passed explicitly into scanning so extraction stays a pure function of
/// text and configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentSyntaxMap {
    by_extension: BTreeMap<String, CommentSyntax>,
    permissive: bool,
}

impl CommentSyntaxMap {
    /// An empty map: every file is scanned permissively
    pub fn empty() -> Self {
        Self::default()
    }

    /// Delimiter sets for common languages
    pub fn builtin() -> Self {
        let mut map = Self::empty();

        let c_family = CommentSyntax::new(&["//"], &[("/*", "*/")]);
        for ext in [
            "rs", "c", "h", "cpp", "hpp", "cc", "java", "js", "jsx", "ts", "tsx", "go", "swift",
            "kt", "scala", "cs", "zig", "dart", "sol", "proto",
        ] {
            map.insert(ext, c_family.clone());
        }

        let hash = CommentSyntax::new(&["#"], &[]);
        for ext in [
            "sh", "bash", "rb", "toml", "yaml", "yml", "pl", "r", "nim", "cmake", "ex", "exs",
        ] {
            map.insert(ext, hash.clone());
        }
        map.insert("py", CommentSyntax::new(&["#"], &[("\"\"\"", "\"\"\"")]));

        map.insert("hs", CommentSyntax::new(&["--"], &[("{-", "-}")]));
        map.insert("lua", CommentSyntax::new(&["--"], &[("--[[", "]]")]));
        map.insert("sql", CommentSyntax::new(&["--"], &[("/*", "*/")]));
        map.insert("ml", CommentSyntax::new(&[], &[("(*", "*)")]));

        let percent = CommentSyntax::new(&["%"], &[]);
        for ext in ["tex", "erl", "m"] {
            map.insert(ext, percent.clone());
        }

        let markup = CommentSyntax::new(&[], &[("<!--", "-->")]);
        for ext in ["html", "md", "xml"] {
            map.insert(ext, markup.clone());
        }

        let semicolon = CommentSyntax::new(&[";"], &[]);
        for ext in ["lisp", "clj", "scm", "el", "asm"] {
            map.insert(ext, semicolon.clone());
        }

        map
    }

    /// Register or replace the delimiters of one extension
    pub fn insert(&mut self, extension: &str, syntax: CommentSyntax) {
        self.by_extension
            .insert(extension.trim_start_matches('.').to_lowercase(), syntax);
    }

    /// Scan every file permissively regardless of its extension
    pub fn force_permissive(mut self, permissive: bool) -> Self {
        self.permissive = permissive;
        self
    }

    pub fn get(&self, extension: &str) -> Option<&CommentSyntax> {
        self.by_extension.get(&extension.to_lowercase())
    }

    /// Pick the extraction mode for a file
    pub fn mode_for(&self, path: &Path) -> ExtractionMode<'_> {
        if self.permissive {
            return ExtractionMode::PermissiveSentinelScan;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.get(ext))
            .map_or(
                ExtractionMode::PermissiveSentinelScan,
                ExtractionMode::StrictByDelimiterSet,
            )
    }
}
