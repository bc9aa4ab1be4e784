//! Domain models for the mortality combiner.
//!
//! - [`Granularity`] - Geographic level a file (and all its rows) belongs to
//! - [`LongRecord`] - One observation: geographic unit x reporting week

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Granularity
// =============================================================================

/// Geographic level of an input file.
///
/// Serialized in lowercase, which is also the value written to the
/// `nuts_type` output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Whole countries (`countries_*` files).
    Country,
    /// NUTS level 0.
    Nuts0,
    /// NUTS level 1.
    Nuts1,
    /// NUTS level 2.
    Nuts2,
    /// NUTS level 3.
    Nuts3,
    /// File name matched none of the known levels.
    Unknown,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Country => "country",
            Granularity::Nuts0 => "nuts0",
            Granularity::Nuts1 => "nuts1",
            Granularity::Nuts2 => "nuts2",
            Granularity::Nuts3 => "nuts3",
            Granularity::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Long Record
// =============================================================================

/// Column names of the combined output, in order.
pub const OUTPUT_HEADERS: [&str; 6] = [
    "nuts_type",
    "nuts",
    "country",
    "year",
    "week",
    "number_of_death",
];

/// One row of the combined table.
///
/// Field order matters: it is the column order of the output CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRecord {
    #[serde(rename = "nuts_type")]
    pub granularity: Granularity,

    #[serde(rename = "nuts")]
    pub geo_code: String,

    #[serde(rename = "country")]
    pub geo_label: String,

    /// Four digits, absent when the period label is not `YYYY-Wnn`.
    pub year: Option<String>,

    /// Two digits, absent together with `year`.
    pub week: Option<String>,

    /// Cell text of the count; never empty.
    #[serde(rename = "number_of_death")]
    pub death_count: String,
}
