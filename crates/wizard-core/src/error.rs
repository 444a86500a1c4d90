//! Error types for the wizard controller.

use std::path::PathBuf;

use thiserror::Error;
use wizard_ingest::IngestError;
use wizard_map::MappingError;

/// Errors surfaced by [`crate::ImportWizard`] and its configuration.
#[derive(Debug, Error)]
pub enum WizardError {
    /// An operation needs an uploaded dataset.
    #[error("No file has been uploaded")]
    NoDataset,

    /// The chosen header row lies outside the dataset.
    #[error("Header row {row} is out of range (dataset has {len} rows)")]
    HeaderRowOutOfRange { row: usize, len: usize },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Configuration file could not be read or parsed.
    #[error("Invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Result type for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;
