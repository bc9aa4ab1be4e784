//! CSV output of the combined table.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{LongRecord, OUTPUT_HEADERS};

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> PipelineResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| PipelineError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Write records as comma-separated rows preceded by the header line.
///
/// The header is written even when `records` is empty.
pub fn write_records<W: Write>(writer: W, records: &[LongRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(OUTPUT_HEADERS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the combined table to `path`, replacing any existing file.
pub fn write_csv(path: &Path, records: &[LongRecord]) -> PipelineResult<()> {
    ensure_parent_dirs(path)?;

    let file = File::create(path).map_err(|e| PipelineError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    write_records(BufWriter::new(file), records).map_err(|e| PipelineError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}
