//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No expected column has this field key.
    #[error("Unknown target field: {0}")]
    UnknownField(String),

    /// An additional source may not repeat the primary source.
    #[error("Column {index} is already the primary source of '{field}'")]
    AdditionalIsPrimary { field: String, index: usize },
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
