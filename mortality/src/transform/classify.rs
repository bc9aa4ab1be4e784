//! Granularity detection from file names.

use crate::models::Granularity;

/// Substrings checked in order; the first hit wins.
const PATTERNS: [(&str, Granularity); 5] = [
    ("nuts3", Granularity::Nuts3),
    ("nuts2", Granularity::Nuts2),
    ("nuts1", Granularity::Nuts1),
    ("nuts0", Granularity::Nuts0),
    ("countries", Granularity::Country),
];

/// Classify a file name by case-insensitive substring match.
///
/// Never fails: names matching nothing are [`Granularity::Unknown`].
pub fn detect_granularity(file_name: &str) -> Granularity {
    let name = file_name.to_lowercase();
    PATTERNS
        .iter()
        .find(|(pattern, _)| name.contains(pattern))
        .map(|(_, granularity)| *granularity)
        .unwrap_or(Granularity::Unknown)
}
