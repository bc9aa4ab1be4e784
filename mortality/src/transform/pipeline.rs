//! The combine run: every expected file, in order, into one CSV.
//!
//! # Example
//!
//! ```rust,ignore
//! use mortality::{combine, CombineOptions};
//!
//! let report = combine(&CombineOptions::default())?;
//! println!("{} rows written to {}", report.total_rows, report.output.display());
//! ```
//!
//! Per-file problems (missing file, unreadable workbook, missing columns)
//! only skip that file. The run fails only when no file could be processed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FileResult, PipelineError, PipelineResult};
use crate::export::write_csv;
use crate::logs::{LogEntry, RunLog};
use crate::models::{Granularity, LongRecord};
use crate::parser::load_table;
use crate::transform::classify::detect_granularity;
use crate::transform::reshape::reshape;

/// Input files, in processing order. Output rows follow this order.
pub const EXPECTED_FILES: [&str; 8] = [
    "countries_2000_W1-to_latest_available_dataset.xlsx",
    "NUTS1_2000_W1-to_latest_available_dataset.xlsx",
    "NUTS2_2000_W1-to_latest_available_dataset.xlsx",
    "NUTS3_2000_W1-2004_W53.xlsx",
    "NUTS3_2005_W1-2009_W53.xlsx",
    "NUTS3_2010_W1-2014_W52.xlsx",
    "NUTS3_2015_W1-2019_W52.xlsx",
    "NUTS3_2020_W1-to_latest_available_dataset.xlsx",
];

pub const DEFAULT_DATA_DIR: &str = "data";

pub const DEFAULT_OUTPUT: &str = "eurostat_mortality_all_levels.csv";

/// Where to read from and write to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineOptions {
    /// Directory holding the expected files
    pub data_dir: PathBuf,

    /// Combined CSV path
    pub output: PathBuf,

    /// Record log entries without echoing them
    pub quiet: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            quiet: false,
        }
    }
}

/// A successfully reshaped file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub granularity: Granularity,
    pub header_row: usize,
    pub records: Vec<LongRecord>,
}

/// What happened to one expected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Processed { header_row: usize, rows: usize },
    Missing,
    Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub granularity: Granularity,
    #[serde(flatten)]
    pub status: FileStatus,
}

/// Records of all files plus one report per expected file.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub records: Vec<LongRecord>,
    pub files: Vec<FileReport>,
}

impl Collected {
    /// Number of files that produced a table (possibly with zero rows).
    pub fn processed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Processed { .. }))
            .count()
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub files: Vec<FileReport>,
    pub total_rows: usize,
    pub log: Vec<LogEntry>,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read, reshape and tag one workbook.
pub fn process_file(path: &Path) -> FileResult<ProcessedFile> {
    let name = file_label(path);
    let granularity = detect_granularity(&name);

    let loaded = load_table(path)?;
    let records = reshape(&loaded.table, granularity, &name)?;

    Ok(ProcessedFile {
        granularity,
        header_row: loaded.header_row,
        records,
    })
}

/// Process `files` from `data_dir` in order, skipping what cannot be used.
pub fn collect_files(data_dir: &Path, files: &[&str], log: &mut RunLog) -> Collected {
    let mut collected = Collected::default();

    for &name in files {
        let path = data_dir.join(name);
        let granularity = detect_granularity(name);

        let status = if !path.is_file() {
            log.warning(format!("File not found: {}, skipped.", name));
            FileStatus::Missing
        } else {
            match process_file(&path) {
                Ok(processed) => {
                    let rows = processed.records.len();
                    log.success(format!("Processed {} ({} rows)", name, rows));
                    collected.records.extend(processed.records);
                    FileStatus::Processed {
                        header_row: processed.header_row,
                        rows,
                    }
                }
                Err(e) => {
                    log.error(format!("Skipped {} due to error: {}", name, e));
                    FileStatus::Skipped {
                        reason: e.to_string(),
                    }
                }
            }
        };

        collected.files.push(FileReport {
            file: name.to_string(),
            granularity,
            status,
        });
    }

    collected
}

/// Run the whole combine over [`EXPECTED_FILES`].
///
/// Writes `options.output` unless no file could be processed, in which case
/// nothing is written and [`PipelineError::NoData`] is returned.
pub fn combine(options: &CombineOptions) -> PipelineResult<RunReport> {
    let started_at = Utc::now();
    let mut log = if options.quiet { RunLog::quiet() } else { RunLog::new() };

    log.info(format!("Reading Eurostat files from {}", options.data_dir.display()));
    let collected = collect_files(&options.data_dir, &EXPECTED_FILES, &mut log);

    if collected.processed_count() == 0 {
        log.error("No valid tables were created, check your source files.");
        return Err(PipelineError::NoData(options.data_dir.display().to_string()));
    }

    write_csv(&options.output, &collected.records)?;

    let total_rows = collected.records.len();
    log.success(format!("All done! Combined file saved as: {}", options.output.display()));
    log.info(format!("Total rows: {}", total_rows));

    Ok(RunReport {
        started_at,
        finished_at: Utc::now(),
        data_dir: options.data_dir.clone(),
        output: options.output.clone(),
        files: collected.files,
        total_rows,
        log: log.into_entries(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{write_workbook, Fixture};
    use tempfile::{tempdir, TempDir};

    const COUNTRIES: &str = EXPECTED_FILES[0];
    const NUTS1: &str = EXPECTED_FILES[1];
    const NUTS2: &str = EXPECTED_FILES[2];

    fn options(dir: &TempDir) -> CombineOptions {
        CombineOptions {
            data_dir: dir.path().join("data"),
            output: dir.path().join("combined.csv"),
            quiet: true,
        }
    }

    fn write(dir: &TempDir, name: &str, fixture: Fixture) {
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        write_workbook(&data.join(name), &fixture);
    }

    #[test]
    fn test_default_options() {
        let opts = CombineOptions::default();
        assert_eq!(opts.data_dir, PathBuf::from("data"));
        assert_eq!(opts.output, PathBuf::from("eurostat_mortality_all_levels.csv"));
        assert!(!opts.quiet);
    }

    #[test]
    fn test_end_to_end_two_levels() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            COUNTRIES,
            Fixture::new()
                .title("Deaths by week and sex")
                .title("Sex: Total")
                .header(&["GEO (Codes)", "GEO (Labels)", "2020-W01", "2020-W02"])
                .row("FR", "France", &[Some(10.0), None]),
        );
        write(
            &dir,
            NUTS1,
            Fixture::new()
                .header(&["GEO (Codes)", "GEO (Labels)", "2020-W01"])
                .row("FR1", "Region", &[Some(5.0)]),
        );

        let opts = options(&dir);
        let report = combine(&opts).unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(
            report.files[0].status,
            FileStatus::Processed { header_row: 2, rows: 1 }
        );
        assert_eq!(report.files[2].status, FileStatus::Missing);

        let content = std::fs::read_to_string(&opts.output).unwrap();
        assert_eq!(
            content,
            "nuts_type,nuts,country,year,week,number_of_death\n\
             country,FR,France,2020,01,10\n\
             nuts1,FR1,Region,2020,01,5\n"
        );
    }

    #[test]
    fn test_no_files_writes_nothing() {
        let dir = tempdir().unwrap();
        let opts = options(&dir);

        let err = combine(&opts).unwrap_err();
        assert!(matches!(err, PipelineError::NoData(_)));
        assert!(!opts.output.exists());
    }

    #[test]
    fn test_missing_columns_skip_only_that_file() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            COUNTRIES,
            Fixture::new()
                .header(&["Region", "Name", "2020-W01"])
                .row("FR", "France", &[Some(10.0)]),
        );
        write(
            &dir,
            NUTS2,
            Fixture::new()
                .header(&["GEO (Codes)", "GEO (Labels)", "2020-W01", "2020-W02"])
                .row("FR10", "Ile de France", &[Some(90.0), Some(95.0)]),
        );

        let mut log = RunLog::quiet();
        let collected = collect_files(&dir.path().join("data"), &EXPECTED_FILES, &mut log);

        match &collected.files[0].status {
            FileStatus::Skipped { reason } => assert!(reason.contains(COUNTRIES)),
            other => panic!("unexpected status {:?}", other),
        }
        assert_eq!(collected.records.len(), 2);
        assert!(collected.records.iter().all(|r| r.granularity == Granularity::Nuts2));
        assert!(log
            .entries()
            .iter()
            .any(|e| e.message.starts_with("Skipped") && e.message.contains(COUNTRIES)));
    }

    #[test]
    fn test_only_failed_files_is_no_data() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            NUTS1,
            Fixture::new().header(&["nothing", "useful"]),
        );
        std::fs::write(dir.path().join("data").join(NUTS2), b"not a workbook").unwrap();

        let opts = options(&dir);
        assert!(matches!(combine(&opts), Err(PipelineError::NoData(_))));
        assert!(!opts.output.exists());
    }

    #[test]
    fn test_processed_file_without_counts_still_writes_header() {
        let dir = tempdir().unwrap();
        write(
            &dir,
            NUTS1,
            Fixture::new()
                .header(&["GEO (Codes)", "GEO (Labels)", "2020-W01"])
                .row("FR1", "Region", &[None]),
        );

        let opts = options(&dir);
        let report = combine(&opts).unwrap();
        assert_eq!(report.total_rows, 0);

        let content = std::fs::read_to_string(&opts.output).unwrap();
        assert_eq!(content, "nuts_type,nuts,country,year,week,number_of_death\n");
    }

    #[test]
    fn test_rows_follow_file_order() {
        let dir = tempdir().unwrap();
        // Written in reverse order on purpose
        write(
            &dir,
            EXPECTED_FILES[7],
            Fixture::new()
                .header(&["GEO (Codes)", "GEO (Labels)", "2021-W10"])
                .row("FR101", "Paris", &[Some(30.0)]),
        );
        write(
            &dir,
            COUNTRIES,
            Fixture::new()
                .header(&["GEO (Codes)", "GEO (Labels)", "2021-W10"])
                .row("FR", "France", &[Some(1200.0)]),
        );

        let mut log = RunLog::quiet();
        let collected = collect_files(&dir.path().join("data"), &EXPECTED_FILES, &mut log);

        let tags: Vec<Granularity> = collected.records.iter().map(|r| r.granularity).collect();
        assert_eq!(tags, vec![Granularity::Country, Granularity::Nuts3]);
        assert_eq!(collected.files.len(), 8);
        assert_eq!(collected.processed_count(), 2);
    }

    #[test]
    fn test_report_serializes_status_inline() {
        let report = FileReport {
            file: NUTS1.to_string(),
            granularity: Granularity::Nuts1,
            status: FileStatus::Processed { header_row: 0, rows: 4 },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "processed");
        assert_eq!(value["rows"], 4);
        assert_eq!(value["granularity"], "nuts1");
    }
}
