//! Shared test fixtures: small Eurostat-shaped workbooks.

use calamine::Data;
use rust_xlsxwriter::Workbook;
use std::path::Path;

pub fn s(v: &str) -> Data {
    Data::String(v.to_string())
}

enum FixtureRow {
    Values { code: String, label: String, counts: Vec<Option<f64>> },
    Text(Vec<String>),
}

/// A single-sheet workbook: optional title rows, a header, data rows.
#[derive(Default)]
pub struct Fixture {
    first_row: u32,
    titles: Vec<String>,
    header: Vec<String>,
    rows: Vec<FixtureRow>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `row` blank rows above the titles and header.
    pub fn at_row(mut self, row: u32) -> Self {
        self.first_row = row;
        self
    }

    /// A one-cell row written above the header.
    pub fn title(mut self, text: &str) -> Self {
        self.titles.push(text.to_string());
        self
    }

    pub fn header(mut self, names: &[&str]) -> Self {
        self.header = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Code, label and one count per period column (`None` leaves the cell blank).
    pub fn row(mut self, code: &str, label: &str, counts: &[Option<f64>]) -> Self {
        self.rows.push(FixtureRow::Values {
            code: code.to_string(),
            label: label.to_string(),
            counts: counts.to_vec(),
        });
        self
    }

    /// Arbitrary string cells; empty strings leave the cell blank.
    pub fn text_row(mut self, cells: &[&str]) -> Self {
        self.rows
            .push(FixtureRow::Text(cells.iter().map(|c| c.to_string()).collect()));
        self
    }
}

pub fn write_workbook(path: &Path, fixture: &Fixture) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let mut row = fixture.first_row;
    for title in &fixture.titles {
        sheet.write_string(row, 0, title.as_str()).unwrap();
        row += 1;
    }
    for (col, name) in fixture.header.iter().enumerate() {
        sheet.write_string(row, col as u16, name.as_str()).unwrap();
    }

    for data in &fixture.rows {
        row += 1;
        match data {
            FixtureRow::Values { code, label, counts } => {
                sheet.write_string(row, 0, code.as_str()).unwrap();
                sheet.write_string(row, 1, label.as_str()).unwrap();
                for (i, count) in counts.iter().enumerate() {
                    if let Some(n) = count {
                        sheet.write_number(row, (i + 2) as u16, *n).unwrap();
                    }
                }
            }
            FixtureRow::Text(cells) => {
                for (col, cell) in cells.iter().enumerate() {
                    if !cell.is_empty() {
                        sheet.write_string(row, col as u16, cell.as_str()).unwrap();
                    }
                }
            }
        }
    }

    workbook.save(path).unwrap();
}
