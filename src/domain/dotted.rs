//! Ordering of dotted identifiers (versions and equation ids)

use std::cmp::Ordering;

/// A fully numeric dotted identifier such as `0.4.5` or `12`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DottedNumber(Vec<u64>);

impl DottedNumber {
    /// Parse an identifier made only of `.`-separated decimal components
    pub fn parse(text: &str) -> Option<Self> {
        let components = text
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u64>().ok()
                }
            })
            .collect::<Option<Vec<u64>>>()?;
        Some(DottedNumber(components))
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Everything but the last component
    pub fn prefix(&self) -> &[u64] {
        &self.0[..self.0.len() - 1]
    }

    pub fn last(&self) -> u64 {
        self.0[self.0.len() - 1]
    }

    /// Build the identifier sharing this prefix with a different last component
    pub fn with_last(&self, last: u64) -> String {
        let mut parts: Vec<String> = self.prefix().iter().map(|c| c.to_string()).collect();
        parts.push(last.to_string());
        parts.join(".")
    }
}

/// Compare two identifiers: numeric ones by component, numeric before
/// non-numeric, everything else lexically
pub fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (DottedNumber::parse(a), DottedNumber::parse(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
