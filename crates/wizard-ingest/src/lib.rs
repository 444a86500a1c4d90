//! File parsing for the import wizard.
//!
//! Turns uploaded bytes into rows of string cells. The wizard core never
//! touches the file system; callers hand it the [`ParsedFile`] produced here.
//!
//! # Features
//!
//! - **CSV**: flexible row widths, UTF-8 with or without BOM
//! - **Workbooks**: first sheet of `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods`
//! - **Loading**: async file reads with a row limit
//!
//! # Example
//!
//! ```
//! use wizard_ingest::{FileParser, UniversalParser};
//!
//! let parsed = UniversalParser
//!     .parse(b"NAME,AGE\nJohn,30\n", "people.csv")
//!     .unwrap();
//! assert_eq!(parsed.rows[1], vec!["John", "30"]);
//! ```

mod csv;
mod error;
mod load;
mod parser;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsers ===
pub use self::csv::CsvParser;
pub use parser::{FileParser, ParsedFile, UniversalParser, extension_of};
pub use workbook::{WorkbookParser, render_cell};

// === Loading ===
pub use load::{DEFAULT_MAX_ROWS, MAX_FILE_SIZE, load_bytes, load_file};
