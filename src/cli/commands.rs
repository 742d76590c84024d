//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jambiato")]
#[command(
    about = "Cross-reference specification equation tags in a source tree",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Root of the source tree to scan (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file (default: $JAMBIATO_CONFIG, then <PATH>/jambiato.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Treat every line containing '$' as a comment line, in every file
    #[arg(long, global = true)]
    pub permissive: bool,

    /// Log each scanned file to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the full cross-reference report
    Report {
        /// Root of the source tree to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print conflicts, malformed tags and unreadable files only
    Check {
        /// Root of the source tree to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Exit with status 3 on warnings, malformed or outdated tags
        #[arg(long)]
        strict: bool,
    },

    /// Show where one equation is implemented
    Locate {
        /// Equation id (e.g., 123 or 4.5)
        equation: String,

        /// Root of the source tree to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only consider tags for this specification version
        #[arg(long, value_name = "VERSION")]
        spec_version: Option<String>,
    },

    /// List tagged equation ids per version
    Equations {
        /// Root of the source tree to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only list this specification version
        #[arg(long, value_name = "VERSION")]
        spec_version: Option<String>,
    },
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}
