//! Tags referencing a version other than the target one

use super::dotted::compare_identifiers;
use super::index::{EquationIndex, SourceLocation};
use serde::Serialize;

/// One (equation, location) pair tagged under a non-target version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedTag {
    pub version: String,
    pub equation: String,
    pub location: SourceLocation,
}

/// List every tagged equation whose version differs from `target`,
/// sorted by equation id, then location
pub fn outdated_tags(index: &EquationIndex, target: &str) -> Vec<OutdatedTag> {
    let mut outdated: Vec<OutdatedTag> = index
        .entries()
        .filter(|(version, _, _)| *version != target)
        .flat_map(|(version, equation, locations)| {
            locations.iter().map(move |location| OutdatedTag {
                version: version.to_string(),
                equation: equation.to_string(),
                location: location.clone(),
            })
        })
        .collect();

    outdated.sort_by(|a, b| {
        compare_identifiers(&a.equation, &b.equation)
            .then_with(|| a.location.cmp(&b.location))
            .then_with(|| compare_identifiers(&a.version, &b.version))
    });
    outdated
}
