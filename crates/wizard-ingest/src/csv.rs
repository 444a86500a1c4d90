//! CSV parsing.

use ::csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::parser::{FileParser, ParsedFile};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Comma separated values with no header inference.
///
/// Rows may differ in width. Lines whose cells are all blank are skipped;
/// cell text is kept as written.
///
/// Row indices therefore count non-blank lines only: a blank line above the
/// header moves every later row up by one relative to its line in the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser;

impl CsvParser {
    /// Rejects UTF-16 input and strips a UTF-8 BOM.
    fn strip_bom<'a>(bytes: &'a [u8], file_name: &str) -> Result<&'a [u8]> {
        if bytes.starts_with(&[0xFF, 0xFE]) {
            return Err(IngestError::UnsupportedEncoding {
                file_name: file_name.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if bytes.starts_with(&[0xFE, 0xFF]) {
            return Err(IngestError::UnsupportedEncoding {
                file_name: file_name.to_string(),
                encoding: "UTF-16 BE",
            });
        }
        Ok(bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes))
    }
}

impl FileParser for CsvParser {
    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn parse(&self, bytes: &[u8], file_name: &str) -> Result<ParsedFile> {
        let content = Self::strip_bom(bytes, file_name)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();
        loop {
            let more = reader
                .read_byte_record(&mut record)
                .map_err(|e| IngestError::CsvParse {
                    file_name: file_name.to_string(),
                    message: e.to_string(),
                })?;
            if !more {
                break;
            }
            let cells: Vec<String> = record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect();
            if cells.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(cells);
        }

        if rows.is_empty() {
            return Err(IngestError::EmptyFile {
                file_name: file_name.to_string(),
            });
        }
        debug!(file_name, rows = rows.len(), "parsed CSV");
        Ok(ParsedFile {
            file_name: file_name.to_string(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_widths_and_quotes() {
        let parsed = CsvParser
            .parse(b"NAME,AGE,TEAM\n\"Doe, John\",30\nJane,28,Alpha,extra\n", "a.csv")
            .unwrap();
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.rows[1], vec!["Doe, John", "30"]);
        assert_eq!(parsed.rows[2].len(), 4);
    }

    #[test]
    fn test_blank_lines_skipped_cells_untrimmed() {
        let parsed = CsvParser
            .parse(b"NAME\r\n\r\n , \r\nRobert \r\n", "a.csv")
            .unwrap();
        assert_eq!(parsed.rows, vec![vec!["NAME"], vec!["Robert "]]);
    }

    #[test]
    fn test_blank_lines_above_header_renumber_rows() {
        let parsed = CsvParser
            .parse(b"\n\nNAME,AGE\nJohn,30\n", "a.csv")
            .unwrap();
        assert_eq!(parsed.rows[0], vec!["NAME", "AGE"]);
        assert_eq!(parsed.rows[1], vec!["John", "30"]);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let parsed = CsvParser.parse(b"\xEF\xBB\xBFNAME\nJohn\n", "a.csv").unwrap();
        assert_eq!(parsed.rows[0], vec!["NAME"]);
    }

    #[test]
    fn test_utf16_is_rejected() {
        let err = CsvParser.parse(b"\xFF\xFEN\x00", "a.csv").unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_file() {
        let err = CsvParser.parse(b"\n,\n", "a.csv").unwrap_err();
        assert!(matches!(err, IngestError::EmptyFile { .. }));
    }
}
