//! Output formatting utilities

use crate::application::Report;
use crate::domain::{Severity, SourceLocation};
use serde::Serialize;
use std::fmt::Write;

/// Equation ids of one version, as printed by `equations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEquations {
    pub version: String,
    pub equations: Vec<String>,
}

/// Locations of one equation under one version, as printed by `locate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationLocations {
    pub equation: String,
    pub version: String,
    pub locations: Vec<SourceLocation>,
}

fn join_locations(locations: &[SourceLocation]) -> String {
    locations
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("  ")
}

fn version_label(version: &str, target: Option<&str>) -> String {
    if target == Some(version) {
        format!("{} (target)", version)
    } else {
        version.to_string()
    }
}

/// Format the full cross-reference report
pub fn format_report(report: &Report) -> String {
    let mut output = String::new();

    if !report.has_tags() {
        output.push_str("No tags found\n");
    }

    for version in &report.versions {
        let _ = writeln!(
            output,
            "Version {}: {} equation(s)",
            version_label(&version.version, report.target_version.as_deref()),
            version.equations.len()
        );
        let width = version
            .equations
            .iter()
            .map(|e| e.id.len())
            .max()
            .unwrap_or(0);
        for equation in &version.equations {
            let _ = writeln!(
                output,
                "  {:<width$}  {}",
                equation.id,
                join_locations(&equation.locations),
                width = width
            );
        }
        output.push('\n');
    }

    output.push_str(&format_issues(report));

    let equation_count: usize = report.versions.iter().map(|v| v.equations.len()).sum();
    let _ = writeln!(
        output,
        "{} file(s) scanned, {} version(s), {} equation(s), {} warning(s)",
        report.files_scanned,
        report.versions.len(),
        equation_count,
        report.warning_count()
    );

    output
}

/// Format only the problems found by a run
pub fn format_check(report: &Report) -> String {
    let issues = format_issues(report);
    if issues.is_empty() {
        return "No issues found\n".to_string();
    }
    issues
}

fn format_issues(report: &Report) -> String {
    let mut output = String::new();

    if !report.conflicts.is_empty() {
        let _ = writeln!(output, "Conflicts ({}):", report.conflicts.len());
        for conflict in &report.conflicts {
            let level = match conflict.severity {
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            let _ = writeln!(
                output,
                "  [{}] {}: {}",
                level, conflict.kind, conflict.detail
            );
        }
        output.push('\n');
    }

    if !report.outdated.is_empty() {
        let _ = writeln!(
            output,
            "Outdated tags ({}, target {}):",
            report.outdated.len(),
            report.target_version.as_deref().unwrap_or("-")
        );
        for tag in &report.outdated {
            let _ = writeln!(
                output,
                "  {} ({})  {}",
                tag.equation, tag.version, tag.location
            );
        }
        output.push('\n');
    }

    if !report.parse_errors.is_empty() {
        let _ = writeln!(output, "Malformed tags ({}):", report.parse_errors.len());
        for error in &report.parse_errors {
            let _ = writeln!(output, "  {}", error);
        }
        output.push('\n');
    }

    if !report.read_errors.is_empty() {
        let _ = writeln!(output, "Unreadable files ({}):", report.read_errors.len());
        for error in &report.read_errors {
            let _ = writeln!(output, "  {}", error);
        }
        output.push('\n');
    }

    output
}

/// Format equation ids per version
pub fn format_equation_list(versions: &[VersionEquations]) -> String {
    if versions.is_empty() {
        return "No tags found\n".to_string();
    }

    let mut output = String::new();
    for version in versions {
        let _ = writeln!(output, "{}: {}", version.version, version.equations.join(", "));
    }
    output
}

/// Format the locations of one equation
pub fn format_locations(hits: &[EquationLocations]) -> String {
    let mut output = String::new();
    for hit in hits {
        let _ = writeln!(
            output,
            "{} ({})  {}",
            hit.equation,
            hit.version,
            join_locations(&hit.locations)
        );
    }
    output
}
