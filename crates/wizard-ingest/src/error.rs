//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size})")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// Extension is not one of the supported formats.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Text encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {file_name}")]
    UnsupportedEncoding {
        file_name: String,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// CSV content could not be read.
    #[error("failed to parse CSV {file_name}: {message}")]
    CsvParse { file_name: String, message: String },

    /// Workbook content could not be read.
    #[error("failed to parse workbook {file_name}: {message}")]
    WorkbookParse { file_name: String, message: String },

    /// File contains no non-blank rows.
    #[error("file is empty: {file_name}")]
    EmptyFile { file_name: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
