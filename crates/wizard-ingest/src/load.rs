//! Loading files from disk.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::parser::{FileParser, ParsedFile, UniversalParser};

/// Rows kept from an uploaded file unless configured otherwise.
pub const DEFAULT_MAX_ROWS: usize = 10_000;

/// Maximum file size accepted for loading (100 MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Parses in-memory bytes and keeps at most `max_rows` rows.
pub fn load_bytes(bytes: &[u8], file_name: &str, max_rows: usize) -> Result<ParsedFile> {
    let mut parsed = UniversalParser.parse(bytes, file_name)?;
    let total = parsed.rows.len();
    if parsed.truncate(max_rows) {
        warn!(file_name, total, max_rows, "file truncated to row limit");
    }
    Ok(parsed)
}

/// Reads `path` asynchronously, parses it by extension and keeps at most
/// `max_rows` rows.
pub async fn load_file(path: &Path, max_rows: usize) -> Result<ParsedFile> {
    let io_error = |source: std::io::Error| {
        if source.kind() == ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: MAX_FILE_SIZE,
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(io_error)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let parsed = load_bytes(&bytes, &file_name, max_rows)?;
    info!(
        path = %path.display(),
        rows = parsed.rows.len(),
        "file loaded"
    );
    Ok(parsed)
}
