//! Cross-reference index from (version, equation) to tagged locations

use super::dotted::compare_identifiers;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Where a tag was found
///
/// Ordering is lexical path order, then line, which is also scan order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceLocation {
    /// Path relative to the scanned root
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        SourceLocation {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A recognized tag at a source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub version: String,
    /// Never empty; order as written in the tag
    pub equations: Vec<String>,
    pub location: SourceLocation,
    /// 1-based byte column of the sentinel
    pub column: usize,
}

/// A tag that lists the same equation more than once, e.g. `$(0.1 - 5 \ 5)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepeatedEquation {
    pub version: String,
    pub equation: String,
    pub location: SourceLocation,
    pub occurrences: usize,
}

/// Immutable index built by [`IndexBuilder`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationIndex {
    entries: BTreeMap<String, BTreeMap<String, BTreeSet<SourceLocation>>>,
    tags: Vec<Tag>,
    repeated: Vec<RepeatedEquation>,
}

impl EquationIndex {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of distinct tagged locations
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Tags in insertion order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags listing an equation more than once, in insertion order
    pub fn repeated_equations(&self) -> &[RepeatedEquation] {
        &self.repeated
    }

    /// All versions, lowest first
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        versions.sort_by(|a, b| compare_identifiers(a, b));
        versions
    }

    /// Highest version present, if any
    pub fn latest_version(&self) -> Option<&str> {
        self.versions().pop()
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.entries.contains_key(version)
    }

    /// Equation ids tagged under `version`, numeric ids in numeric order
    pub fn equations(&self, version: &str) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .entries
            .get(version)
            .map(|eqs| eqs.keys().map(String::as_str).collect())
            .unwrap_or_default();
        ids.sort_by(|a, b| compare_identifiers(a, b));
        ids
    }

    /// Locations of one (version, equation) pair in lexical path then line order
    pub fn locations(&self, version: &str, equation: &str) -> Option<&BTreeSet<SourceLocation>> {
        self.entries.get(version)?.get(equation)
    }

    /// Every version tagging `equation`, lowest version first
    pub fn find_equation(&self, equation: &str) -> Vec<(&str, &BTreeSet<SourceLocation>)> {
        self.versions()
            .into_iter()
            .filter_map(|version| {
                self.locations(version, equation)
                    .map(|locations| (version, locations))
            })
            .collect()
    }

    /// Iterate `(version, equation, locations)` in storage order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &BTreeSet<SourceLocation>)> {
        self.entries.iter().flat_map(|(version, eqs)| {
            eqs.iter()
                .map(move |(eq, locations)| (version.as_str(), eq.as_str(), locations))
        })
    }
}

/// Accumulates tags into an [`EquationIndex`]
///
/// Insertion is idempotent: a (version, equation, location) triple is stored
/// at most once no matter how often it is inserted.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: EquationIndex,
    tagged_locations: BTreeSet<SourceLocation>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one tag, returning how many new (version, equation, location)
    /// triples were added
    pub fn insert(&mut self, tag: Tag) -> usize {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for eq in &tag.equations {
            *counts.entry(eq.as_str()).or_default() += 1;
        }

        let first_time = self.tagged_locations.insert(tag.location.clone());

        if first_time {
            for eq in &tag.equations {
                let occurrences = counts.get(eq.as_str()).copied().unwrap_or(0);
                let already = self
                    .index
                    .repeated
                    .iter()
                    .any(|r| r.equation == *eq && r.location == tag.location);
                if occurrences > 1 && !already {
                    self.index.repeated.push(RepeatedEquation {
                        version: tag.version.clone(),
                        equation: eq.clone(),
                        location: tag.location.clone(),
                        occurrences,
                    });
                }
            }
        }

        let per_version = self.index.entries.entry(tag.version.clone()).or_default();
        let mut inserted = 0;
        for eq in &tag.equations {
            if per_version
                .entry(eq.clone())
                .or_default()
                .insert(tag.location.clone())
            {
                inserted += 1;
            }
        }

        if first_time {
            self.index.tags.push(tag);
        }
        inserted
    }

    pub fn extend<I: IntoIterator<Item = Tag>>(&mut self, tags: I) -> usize {
        tags.into_iter().map(|tag| self.insert(tag)).sum()
    }

    pub fn finish(self) -> EquationIndex {
        self.index
    }
}
