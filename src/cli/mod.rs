//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::{
    format_check, format_equation_list, format_locations, format_report, EquationLocations,
    VersionEquations,
};
