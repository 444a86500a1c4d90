//! Spreadsheet parsing via calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveTime;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::parser::{FileParser, ParsedFile};

/// Largest magnitude rendered as an integer when a float has no fraction.
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// First worksheet of an Excel or OpenDocument workbook.
///
/// Cells are rendered to text the way a spreadsheet displays them by
/// default. Column positions are kept even when the used range does not
/// start at column A; trailing empty cells are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookParser;

impl FileParser for WorkbookParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["xlsx", "xlsm", "xlsb", "xls", "ods"]
    }

    fn parse(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFile> {
        let workbook_error = |message: String| IngestError::WorkbookParse {
            file_name: file_name.to_string(),
            message,
        };

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| workbook_error(e.to_string()))?;
        let Some(sheet) = workbook.sheet_names().first().cloned() else {
            return Err(workbook_error("workbook has no worksheets".to_string()));
        };
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| workbook_error(e.to_string()))?;

        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = Vec::new();
        for cells in range.rows() {
            let mut row: Vec<String> = std::iter::repeat_n(String::new(), first_col as usize)
                .chain(cells.iter().map(render_cell))
                .collect();
            while row.last().is_some_and(String::is_empty) {
                row.pop();
            }
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(IngestError::EmptyFile {
                file_name: file_name.to_string(),
            });
        }
        debug!(
            file_name,
            sheet = %sheet,
            first_row,
            rows = rows.len(),
            "parsed workbook"
        );
        Ok(ParsedFile {
            file_name: file_name.to_string(),
            rows,
        })
    }
}

/// Text of a single cell.
pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => render_float(*value),
        Data::Bool(value) => if *value { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(value) => {
            if value.is_duration() {
                return render_float(value.as_f64());
            }
            match value.as_datetime() {
                Some(datetime) if datetime.time() == NaiveTime::MIN => {
                    datetime.format("%Y-%m-%d").to_string()
                }
                Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => render_float(value.as_f64()),
            }
        }
        Data::Error(error) => error.to_string(),
    }
}

fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_INTEGRAL_FLOAT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scalars() {
        assert_eq!(render_cell(&Data::Empty), "");
        assert_eq!(render_cell(&Data::String("Team A".to_string())), "Team A");
        assert_eq!(render_cell(&Data::Int(42)), "42");
        assert_eq!(render_cell(&Data::Float(30.0)), "30");
        assert_eq!(render_cell(&Data::Float(30.25)), "30.25");
        assert_eq!(render_cell(&Data::Float(-0.0)), "0");
        assert_eq!(render_cell(&Data::Bool(true)), "TRUE");
        assert_eq!(
            render_cell(&Data::DateTimeIso("2024-01-15".to_string())),
            "2024-01-15"
        );
    }

    #[test]
    fn test_invalid_bytes_are_a_workbook_error() {
        let err = WorkbookParser
            .parse(b"definitely not a zip", "broken.xlsx")
            .unwrap_err();
        assert!(matches!(err, IngestError::WorkbookParse { .. }));
    }
}
