//! Spreadsheet reading and header detection.
//!
//! Reads the first worksheet of an `.xlsx` workbook into a [`Grid`] of raw
//! cells, locates the header row and slices the grid into a [`SourceTable`].
//! Nothing Eurostat-specific happens here apart from the `GEO` header marker.

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;

use crate::error::{SheetError, SheetResult};

/// Substring identifying the header row (case-sensitive).
pub const HEADER_MARKER: &str = "GEO";

/// Number of leading rows searched for [`HEADER_MARKER`].
pub const HEADER_SCAN_ROWS: usize = 5;

/// Raw worksheet cells, row-major, starting at the sheet's row 0.
pub type Grid = Vec<Vec<Data>>;

/// A worksheet sliced at its header row.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    /// Trimmed header names; blank headers become `Unnamed: <index>`.
    pub headers: Vec<String>,
    /// Data rows below the header, each as wide as `headers`.
    pub rows: Vec<Vec<Data>>,
}

/// A table together with where its header was found.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub header_row: usize,
    pub table: SourceTable,
}

/// Read the first worksheet of a workbook.
///
/// calamine ranges start at the first non-empty cell; leading blank rows and
/// columns are restored so that row indexes match the sheet.
pub fn read_grid<P: AsRef<Path>>(path: P) -> SheetResult<Grid> {
    let mut workbook: Xlsx<_> = open_workbook(path.as_ref())?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoSheets)?;

    let range = workbook.worksheet_range(&sheet_name)?;

    let (start_row, start_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => return Ok(Vec::new()),
    };
    let width = start_col + range.width();

    let mut grid: Grid = Vec::with_capacity(start_row + range.height());
    grid.extend((0..start_row).map(|_| vec![Data::Empty; width]));
    for row in range.rows() {
        let mut cells = Vec::with_capacity(width);
        cells.extend(std::iter::repeat(Data::Empty).take(start_col));
        cells.extend(row.iter().cloned());
        grid.push(cells);
    }

    Ok(grid)
}

/// Read a workbook and slice it at its detected header row.
pub fn load_table<P: AsRef<Path>>(path: P) -> SheetResult<LoadedTable> {
    let grid = read_grid(path)?;
    let header_row = locate_header_row(&grid);
    let table = SourceTable::from_grid(grid, header_row);
    Ok(LoadedTable { header_row, table })
}

/// Index of the first of the leading rows containing [`HEADER_MARKER`], or 0.
pub fn locate_header_row(grid: &[Vec<Data>]) -> usize {
    grid.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| row.iter().any(|cell| cell_text(cell).contains(HEADER_MARKER)))
        .unwrap_or(0)
}

impl SourceTable {
    /// Use `header_row` as column names and everything below it as data.
    pub fn from_grid(mut grid: Grid, header_row: usize) -> Self {
        if header_row >= grid.len() {
            return Self::default();
        }

        let rows = grid.split_off(header_row + 1);
        let header_cells = grid.swap_remove(header_row);

        let headers: Vec<String> = header_cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let name = cell_text(cell).trim().to_string();
                if name.is_empty() {
                    format!("Unnamed: {}", i)
                } else {
                    name
                }
            })
            .collect();

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Data::Empty);
                row
            })
            .collect();

        Self { headers, rows }
    }
}

/// Text of a cell as written to the output.
///
/// Integral floats print without a fractional part (`10`, not `10.0`).
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// String values read as missing, besides the empty string.
pub const NA_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a cell counts as a missing value.
///
/// Strings are missing only when empty or exactly one of [`NA_VALUES`];
/// whitespace and other markers such as `:` are values.
pub fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty() || NA_VALUES.contains(&s.as_str()),
        Data::Error(e) => NA_VALUES.contains(&e.to_string().as_str()),
        Data::Float(f) => f.is_nan(),
        _ => false,
    }
}

/// Like [`cell_text`], but missing cells give an empty string.
pub fn value_text(cell: &Data) -> String {
    if is_missing(cell) {
        String::new()
    } else {
        cell_text(cell)
    }
}
