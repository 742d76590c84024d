//! Report use case
//!
//! Runs the scan, the consistency checks and the outdated-tag analysis and
//! gathers everything a renderer needs.

use super::scan::{ScanOptions, ScanOutcome, ScanService};
use crate::domain::tags::TagParseError;
use crate::domain::{
    outdated_tags, Conflict, ConflictKind, ConflictReport, ConsistencyChecker, OutdatedTag,
    Severity, SourceLocation,
};
use crate::error::Result;
use crate::infrastructure::{FileReadError, SourceRepository};
use serde::Serialize;
use std::path::PathBuf;

/// Locations of one equation id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquationReport {
    pub id: String,
    pub locations: Vec<SourceLocation>,
}

/// All equations tagged under one version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionReport {
    pub version: String,
    pub equations: Vec<EquationReport>,
}

/// Full cross-reference report of one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub root: PathBuf,
    pub files_scanned: usize,
    pub target_version: Option<String>,
    pub versions: Vec<VersionReport>,
    pub conflicts: Vec<Conflict>,
    pub outdated: Vec<OutdatedTag>,
    pub parse_errors: Vec<TagParseError>,
    pub read_errors: Vec<FileReadError>,
}

impl Report {
    /// Assemble a report from a finished scan
    ///
    /// `target_version` defaults to the highest version found.
    pub fn from_outcome(root: PathBuf, outcome: ScanOutcome, target_version: Option<String>) -> Self {
        let index = &outcome.index;
        let conflicts: ConflictReport = ConsistencyChecker::check(index);

        let target_version =
            target_version.or_else(|| index.latest_version().map(str::to_string));
        let outdated = target_version
            .as_deref()
            .map(|target| outdated_tags(index, target))
            .unwrap_or_default();

        let versions = index
            .versions()
            .into_iter()
            .map(|version| VersionReport {
                version: version.to_string(),
                equations: index
                    .equations(version)
                    .into_iter()
                    .map(|id| EquationReport {
                        id: id.to_string(),
                        locations: index
                            .locations(version, id)
                            .map(|set| set.iter().cloned().collect())
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        Report {
            root,
            files_scanned: outcome.files_scanned,
            target_version,
            versions,
            conflicts: conflicts.into_vec(),
            outdated,
            parse_errors: outcome.parse_errors,
            read_errors: outcome.read_errors,
        }
    }

    pub fn has_tags(&self) -> bool {
        !self.versions.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|c| c.severity >= Severity::Warning)
            .count()
    }

    /// Issues that fail a strict check: warning-level conflicts, malformed
    /// tags and outdated tags
    pub fn blocking_issue_count(&self) -> usize {
        self.warning_count() + self.parse_errors.len() + self.outdated.len()
    }

    pub fn conflicts_of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }
}

/// Service producing a full report
pub struct ReportService<R: SourceRepository> {
    scanner: ScanService<R>,
    target_version: Option<String>,
}

impl<R: SourceRepository> ReportService<R> {
    pub fn new(repository: R, options: ScanOptions, target_version: Option<String>) -> Self {
        ReportService {
            scanner: ScanService::new(repository, options),
            target_version,
        }
    }

    pub fn execute(&self) -> Result<Report> {
        let outcome = self.scanner.execute()?;
        let root = self.scanner.repository().root().to_path_buf();
        Ok(Report::from_outcome(
            root,
            outcome,
            self.target_version.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::scan::tests::MemorySource;

    fn report_for(files: &[(&str, Option<&str>)], target: Option<&str>) -> Report {
        ReportService::new(
            MemorySource::new(files),
            ScanOptions::default(),
            target.map(str::to_string),
        )
        .execute()
        .unwrap()
    }

    #[test]
    fn test_report_groups_by_version_and_equation() {
        let report = report_for(
            &[
                ("a.rs", Some("// $(0.5.0 - 10 \\ 2)\n")),
                ("b.rs", Some("// $(0.5.0 - 2)\n")),
            ],
            None,
        );

        assert_eq!(report.versions.len(), 1);
        let version = &report.versions[0];
        assert_eq!(version.version, "0.5.0");
        let ids: Vec<&str> = version.equations.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "10"]);
        assert_eq!(
            version.equations[0].locations,
            vec![SourceLocation::new("a.rs", 1), SourceLocation::new("b.rs", 1)]
        );
        assert_eq!(report.target_version.as_deref(), Some("0.5.0"));
    }

    #[test]
    fn test_report_lists_outdated_against_latest() {
        let report = report_for(
            &[
                ("a.rs", Some("// $(0.4.0 - 1)\n")),
                ("b.rs", Some("// $(0.5.0 - 2)\n")),
            ],
            None,
        );
        assert_eq!(report.outdated.len(), 1);
        assert_eq!(report.outdated[0].version, "0.4.0");
        assert_eq!(report.blocking_issue_count(), 1);
    }

    #[test]
    fn test_report_uses_configured_target() {
        let report = report_for(&[("b.rs", Some("// $(0.5.0 - 2)\n"))], Some("0.6.0"));
        assert_eq!(report.target_version.as_deref(), Some("0.6.0"));
        assert_eq!(report.outdated.len(), 1);
    }

    #[test]
    fn test_multi_version_conflict_in_report() {
        let report = report_for(
            &[
                ("a.rs", Some("// $(0.4.0 - 7)\n")),
                ("b.rs", Some("// $(0.5.0 - 7)\n")),
            ],
            None,
        );
        assert_eq!(
            report
                .conflicts_of_kind(ConflictKind::MultiVersionEquation)
                .count(),
            1
        );
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = report_for(&[], None);
        assert!(!report.has_tags());
        assert!(report.conflicts.is_empty());
        assert_eq!(report.target_version, None);
        assert_eq!(report.blocking_issue_count(), 0);
    }
}
