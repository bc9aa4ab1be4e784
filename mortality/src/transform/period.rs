//! Reporting period labels.

use once_cell::sync::Lazy;
use regex::Regex;

static PERIOD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-W(\d{2})").expect("valid period regex"));

/// Year and week of a period label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub year: String,
    pub week: String,
}

/// Extract year and week from a label such as `2021-W05`.
///
/// The first match anywhere in the label is used. Labels without a match
/// (`Total`, `Unnamed: 7`) give `None`.
pub fn parse_period(label: &str) -> Option<Period> {
    PERIOD_RE.captures(label).map(|caps| Period {
        year: caps[1].to_string(),
        week: caps[2].to_string(),
    })
}
