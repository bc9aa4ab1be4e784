//! Wide to long reshaping.
//!
//! A Eurostat sheet has one row per geographic unit and one column per
//! reporting week:
//!
//! ```text
//! GEO (Codes) | GEO (Labels) | 2020-W01 | 2020-W02      nuts | country | year | week | number_of_death
//! FR          | France       | 10       |          →    FR   | France  | 2020 | 01   | 10
//! ```
//!
//! Every non-identifier column is unpivoted; blank counts are dropped.

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::{Granularity, LongRecord};
use crate::parser::{cell_text, is_missing, value_text, SourceTable};
use crate::transform::period::parse_period;

/// Positions of the identifier columns in a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdColumns {
    pub code: usize,
    pub label: usize,
}

impl IdColumns {
    fn contains(&self, col: usize) -> bool {
        col == self.code || col == self.label
    }
}

fn find_column(headers: &[String], needle: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().to_lowercase().contains(needle))
}

/// Find the geographic code and label columns (`code` / `label`, any case).
///
/// A single column matching both is taken as the label only, which leaves
/// the code column missing.
pub fn find_id_columns(headers: &[String], file: &str) -> ReshapeResult<IdColumns> {
    let code = find_column(headers, "code").ok_or_else(|| ReshapeError::MissingColumn {
        file: file.to_string(),
        column: "geographic code",
    })?;
    let label = find_column(headers, "label").ok_or_else(|| ReshapeError::MissingColumn {
        file: file.to_string(),
        column: "geographic label",
    })?;
    if code == label {
        return Err(ReshapeError::MissingColumn {
            file: file.to_string(),
            column: "geographic code",
        });
    }
    Ok(IdColumns { code, label })
}

/// Indexes of all columns that get unpivoted.
pub fn period_columns(headers: &[String], ids: IdColumns) -> Vec<usize> {
    (0..headers.len()).filter(|&col| !ids.contains(col)).collect()
}

/// Turn a source table into long records tagged with `granularity`.
///
/// Records come out column-major: all units for the first period column,
/// then all units for the next one.
pub fn reshape(
    table: &SourceTable,
    granularity: Granularity,
    file: &str,
) -> ReshapeResult<Vec<LongRecord>> {
    let ids = find_id_columns(&table.headers, file)?;
    let mut records = Vec::new();

    for col in period_columns(&table.headers, ids) {
        let period = parse_period(&table.headers[col]);

        for row in &table.rows {
            let count = &row[col];
            if is_missing(count) {
                continue;
            }

            records.push(LongRecord {
                granularity,
                geo_code: value_text(&row[ids.code]),
                geo_label: value_text(&row[ids.label]),
                year: period.as_ref().map(|p| p.year.clone()),
                week: period.as_ref().map(|p| p.week.clone()),
                death_count: cell_text(count),
            });
        }
    }

    Ok(records)
}
