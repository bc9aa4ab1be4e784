//! # Mortality - Eurostat weekly deaths, all geographic levels in one table
//!
//! Eurostat publishes weekly death counts as wide spreadsheets, one file per
//! geographic level (countries, NUTS 1, NUTS 2, NUTS 3 split by period). This
//! crate reshapes each file into long records and concatenates them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ XLSX files  │────▶│   Parser    │────▶│  Transform  │────▶│  CSV table  │
//! │ (8, ordered)│     │ (GEO header)│     │ (unpivot)   │     │ (combined)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`models`] - Granularity tag and long record
//! - [`parser`] - Workbook reading and header detection
//! - [`transform`] - Classification, period parsing, reshaping, the run itself
//! - [`export`] - CSV writing
//! - [`logs`] - Leveled run log

// Core modules
pub mod error;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod export;
pub mod logs;

#[cfg(test)]
mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{FileError, PipelineError, ReshapeError, SheetError};

pub use models::{Granularity, LongRecord, OUTPUT_HEADERS};

pub use parser::{cell_text, load_table, locate_header_row, read_grid, LoadedTable, SourceTable};

pub use transform::{
    classify::detect_granularity,
    period::{parse_period, Period},
    reshape::{find_id_columns, period_columns, reshape, IdColumns},
};

pub use transform::pipeline::{
    collect_files, combine, process_file, CombineOptions, FileReport, FileStatus, RunReport,
    DEFAULT_DATA_DIR, DEFAULT_OUTPUT, EXPECTED_FILES,
};

pub use export::{write_csv, write_records};

pub use logs::{LogEntry, LogLevel, RunLog};
