//! Parser trait and extension dispatch.

use std::path::Path;

use crate::csv::CsvParser;
use crate::error::{IngestError, Result};
use crate::workbook::WorkbookParser;

/// Rows of an uploaded file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    pub file_name: String,
    pub rows: Vec<Vec<String>>,
}

impl ParsedFile {
    /// Keeps at most `max_rows` rows. Returns true if rows were dropped.
    pub fn truncate(&mut self, max_rows: usize) -> bool {
        if self.rows.len() <= max_rows {
            return false;
        }
        self.rows.truncate(max_rows);
        true
    }
}

/// Turns file bytes into rows of string cells.
pub trait FileParser {
    /// Lowercase extensions this parser accepts.
    fn extensions(&self) -> &'static [&'static str];

    fn parse(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFile>;
}

/// Lowercased extension of `file_name`, or an empty string.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Picks a parser by file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniversalParser;

impl FileParser for UniversalParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"]
    }

    fn parse(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFile> {
        let extension = extension_of(file_name);
        if CsvParser.extensions().contains(&extension.as_str()) {
            return CsvParser.parse(bytes, file_name);
        }
        if WorkbookParser.extensions().contains(&extension.as_str()) {
            return WorkbookParser.parse(bytes, file_name);
        }
        Err(IngestError::UnsupportedFormat { extension })
    }
}
