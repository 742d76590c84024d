//! Consistency checks over a completed index
//!
//! The checker never fails: every finding becomes a [`Conflict`] record.

use super::dotted::{compare_identifiers, DottedNumber};
use super::index::{EquationIndex, SourceLocation};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Category of a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// One equation id tagged under several versions
    MultiVersionEquation,
    /// One tag lists the same equation id more than once
    DuplicateLocation,
    /// Numeric equation ids out of order or with gaps (advisory)
    NonMonotonicSequence,
}

/// How much attention a conflict deserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl ConflictKind {
    pub fn severity(&self) -> Severity {
        match self {
            ConflictKind::MultiVersionEquation | ConflictKind::DuplicateLocation => {
                Severity::Warning
            }
            ConflictKind::NonMonotonicSequence => Severity::Info,
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictKind::MultiVersionEquation => "multi-version equation",
            ConflictKind::DuplicateLocation => "duplicate location",
            ConflictKind::NonMonotonicSequence => "non-monotonic sequence",
        };
        f.write_str(name)
    }
}

/// What exactly was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConflictDetail {
    MultiVersion {
        equation: String,
        versions: Vec<String>,
        locations: Vec<SourceLocation>,
    },
    RepeatedInTag {
        version: String,
        equation: String,
        location: SourceLocation,
        occurrences: usize,
    },
    OutOfOrder {
        version: String,
        equation: String,
        location: SourceLocation,
        after_equation: String,
        after_location: SourceLocation,
    },
    Gap {
        version: String,
        after: String,
        before: String,
        first_missing: String,
        last_missing: String,
        missing_count: u64,
    },
}

impl fmt::Display for ConflictDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictDetail::MultiVersion {
                equation,
                versions,
                locations,
            } => {
                let locations: Vec<String> = locations.iter().map(|l| l.to_string()).collect();
                write!(
                    f,
                    "equation {} is tagged under versions {} ({})",
                    equation,
                    versions.join(", "),
                    locations.join(", ")
                )
            }
            ConflictDetail::RepeatedInTag {
                version,
                equation,
                location,
                occurrences,
            } => write!(
                f,
                "{}: tag for version {} lists equation {} {} times",
                location, version, equation, occurrences
            ),
            ConflictDetail::OutOfOrder {
                version,
                equation,
                location,
                after_equation,
                after_location,
            } => write!(
                f,
                "{}: equation {} (version {}) appears after equation {} at {}",
                location, equation, version, after_equation, after_location
            ),
            ConflictDetail::Gap {
                version,
                after,
                before,
                first_missing,
                last_missing,
                missing_count,
            } => {
                if missing_count == &1 {
                    write!(
                        f,
                        "version {}: equation {} is untagged (between {} and {})",
                        version, first_missing, after, before
                    )
                } else {
                    write!(
                        f,
                        "version {}: equations {}..{} are untagged ({} between {} and {})",
                        version, first_missing, last_missing, missing_count, after, before
                    )
                }
            }
        }
    }
}

/// One detected inconsistency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub severity: Severity,
    pub detail: ConflictDetail,
}

impl Conflict {
    fn new(kind: ConflictKind, detail: ConflictDetail) -> Self {
        Conflict {
            kind,
            severity: kind.severity(),
            detail,
        }
    }
}

/// All conflicts found in one index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictReport {
    conflicts: Vec<Conflict>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Conflict> {
        self.conflicts.iter()
    }

    pub fn of_kind(&self, kind: ConflictKind) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(move |c| c.kind == kind)
    }

    pub fn count_at_least(&self, severity: Severity) -> usize {
        self.conflicts
            .iter()
            .filter(|c| c.severity >= severity)
            .count()
    }

    pub fn into_vec(self) -> Vec<Conflict> {
        self.conflicts
    }
}

impl<'a> IntoIterator for &'a ConflictReport {
    type Item = &'a Conflict;
    type IntoIter = std::slice::Iter<'a, Conflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.conflicts.iter()
    }
}

/// Runs every consistency check over an index
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    pub fn check(index: &EquationIndex) -> ConflictReport {
        let mut conflicts = Vec::new();
        conflicts.extend(Self::multi_version_equations(index));
        conflicts.extend(Self::duplicate_locations(index));
        for version in index.versions() {
            conflicts.extend(Self::non_monotonic_sequence(index, version));
        }
        log::debug!("Consistency check found {} conflict(s)", conflicts.len());
        ConflictReport { conflicts }
    }

    fn multi_version_equations(index: &EquationIndex) -> Vec<Conflict> {
        let mut by_equation: BTreeMap<&str, (BTreeSet<&str>, BTreeSet<&SourceLocation>)> =
            BTreeMap::new();
        for (version, equation, locations) in index.entries() {
            let (versions, all_locations) = by_equation.entry(equation).or_default();
            versions.insert(version);
            all_locations.extend(locations.iter());
        }

        let mut equations: Vec<_> = by_equation
            .into_iter()
            .filter(|(_, (versions, _))| versions.len() > 1)
            .collect();
        equations.sort_by(|a, b| compare_identifiers(a.0, b.0));

        equations
            .into_iter()
            .map(|(equation, (versions, locations))| {
                let mut versions: Vec<&str> = versions.into_iter().collect();
                versions.sort_by(|a, b| compare_identifiers(a, b));
                Conflict::new(
                    ConflictKind::MultiVersionEquation,
                    ConflictDetail::MultiVersion {
                        equation: equation.to_string(),
                        versions: versions.into_iter().map(str::to_string).collect(),
                        locations: locations.into_iter().cloned().collect(),
                    },
                )
            })
            .collect()
    }

    fn duplicate_locations(index: &EquationIndex) -> Vec<Conflict> {
        index
            .repeated_equations()
            .iter()
            .map(|r| {
                Conflict::new(
                    ConflictKind::DuplicateLocation,
                    ConflictDetail::RepeatedInTag {
                        version: r.version.clone(),
                        equation: r.equation.clone(),
                        location: r.location.clone(),
                        occurrences: r.occurrences,
                    },
                )
            })
            .collect()
    }

    /// First appearances of numeric ids in scan order must not go backwards,
    /// and consecutive ids sharing a prefix must not skip numbers
    fn non_monotonic_sequence(index: &EquationIndex, version: &str) -> Vec<Conflict> {
        let mut tags: Vec<_> = index.tags().iter().filter(|t| t.version == version).collect();
        tags.sort_by(|a, b| a.location.cmp(&b.location));

        let mut conflicts = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut highest: Option<(DottedNumber, &str, &SourceLocation)> = None;
        let mut numeric: BTreeMap<DottedNumber, &str> = BTreeMap::new();

        for tag in tags {
            for equation in &tag.equations {
                if !seen.insert(equation.as_str()) {
                    continue;
                }
                let Some(number) = DottedNumber::parse(equation) else {
                    continue;
                };
                numeric.insert(number.clone(), equation.as_str());

                let regressed = match &highest {
                    Some((max, max_id, max_location)) if number < *max => {
                        Some((max_id.to_string(), (*max_location).clone()))
                    }
                    _ => None,
                };
                match regressed {
                    Some((after_equation, after_location)) => {
                        conflicts.push(Conflict::new(
                            ConflictKind::NonMonotonicSequence,
                            ConflictDetail::OutOfOrder {
                                version: version.to_string(),
                                equation: equation.clone(),
                                location: tag.location.clone(),
                                after_equation,
                                after_location,
                            },
                        ));
                    }
                    None => highest = Some((number, equation.as_str(), &tag.location)),
                }
            }
        }

        let ordered: Vec<(&DottedNumber, &&str)> = numeric.iter().collect();
        for pair in ordered.windows(2) {
            let (a, a_id) = pair[0];
            let (b, b_id) = pair[1];
            if a.prefix() != b.prefix() || b.last() <= a.last() + 1 {
                continue;
            }
            conflicts.push(Conflict::new(
                ConflictKind::NonMonotonicSequence,
                ConflictDetail::Gap {
                    version: version.to_string(),
                    after: a_id.to_string(),
                    before: b_id.to_string(),
                    first_missing: a.with_last(a.last() + 1),
                    last_missing: a.with_last(b.last() - 1),
                    missing_count: b.last() - a.last() - 1,
                },
            ));
        }

        conflicts
    }
}
