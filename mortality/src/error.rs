//! Error types for the mortality combiner.
//!
//! Errors are layered by stage:
//!
//! - [`SheetError`] - Workbook opening and worksheet reading
//! - [`ReshapeError`] - Wide to long reshaping
//! - [`FileError`] - Everything that can make one input file contribute nothing
//! - [`PipelineError`] - Top-level run errors (no data, output writing)
//!
//! Per-file errors never escape the driver: they are turned into a skip
//! reason. Only [`PipelineError`] reaches the caller.

use thiserror::Error;

// =============================================================================
// Spreadsheet Errors
// =============================================================================

/// Errors while reading a workbook into a grid.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The workbook could not be opened or a worksheet could not be read.
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// The workbook contains no worksheet at all.
    #[error("Workbook has no sheets")]
    NoSheets,
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors while turning a source table into long records.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// Neither a geographic code column nor a label column could be found.
    #[error("Could not find {column} column in {file}")]
    MissingColumn {
        file: String,
        column: &'static str,
    },
}

// =============================================================================
// Per-file Errors
// =============================================================================

/// Any failure that makes a single file contribute zero rows.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Reshape(#[from] ReshapeError),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level run errors returned by [`crate::transform::pipeline::combine`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every expected file was missing or skipped.
    #[error("No valid tables were created, check the source files in {0}")]
    NoData(String),

    /// Output file or directory could not be created.
    #[error("Failed to write output '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV write error for '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook reading.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for reshaping.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for processing one file.
pub type FileResult<T> = Result<T, FileError>;

/// Result type for a whole run.
pub type PipelineResult<T> = Result<T, PipelineError>;
