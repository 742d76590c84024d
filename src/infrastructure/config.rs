//! Configuration management

use crate::domain::tags::{CommentSyntax, CommentSyntaxMap};
use crate::error::{JambiatoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up at the scanned root
pub const CONFIG_FILE_NAME: &str = "jambiato.toml";

/// Environment variable pointing at a config file
pub const CONFIG_ENV_VAR: &str = "JAMBIATO_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Version tags are expected to reference (default: highest found)
    pub target_version: Option<String>,

    /// Directory or file names skipped during the walk
    pub exclude: Vec<String>,

    /// Only scan files with these extensions (default: all files)
    pub extensions: Option<Vec<String>>,

    /// Scan every file permissively, ignoring comment delimiters
    pub permissive: bool,

    /// Comment delimiters per extension, added to the built-in table
    pub comments: BTreeMap<String, CommentSyntax>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_version: None,
            exclude: vec![
                ".git".to_string(),
                "target".to_string(),
                "node_modules".to_string(),
            ],
            extensions: None,
            permissive: false,
            comments: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Resolve the config for a scan of `root`
    ///
    /// Precedence: explicit path, then `JAMBIATO_CONFIG`, then
    /// `jambiato.toml` at the root, then defaults.
    pub fn resolve(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load_from_file(&PathBuf::from(path));
            }
        }
        Self::load_from_dir(root)
    }

    /// Load `jambiato.toml` from `dir`, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Ok(Config::default());
        }
        Self::load_from_file(&config_path)
    }

    /// Load a config file that must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                JambiatoError::Config(format!("Config file not found: {}", path.display()))
            } else {
                JambiatoError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            JambiatoError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (ext, syntax) in &self.comments {
            if let Some(kind) = syntax.empty_delimiter() {
                return Err(JambiatoError::Config(format!(
                    "Empty {} comment delimiter for extension '{}'",
                    kind, ext
                )));
            }
        }
        if let Some(version) = &self.target_version {
            if version.trim().is_empty() {
                return Err(JambiatoError::Config(
                    "target_version must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Built-in delimiter table with this config's overrides applied
    pub fn comment_syntax_map(&self) -> CommentSyntaxMap {
        let mut map = CommentSyntaxMap::builtin();
        for (ext, syntax) in &self.comments {
            map.insert(ext, syntax.clone());
        }
        map.force_permissive(self.permissive)
    }
}
