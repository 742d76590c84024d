//! Application layer - Use cases and orchestration

pub mod report;
pub mod scan;

pub use report::{EquationReport, Report, ReportService, VersionReport};
pub use scan::{ScanOptions, ScanOutcome, ScanService};
