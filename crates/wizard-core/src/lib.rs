//! The import wizard core.
//!
//! [`ImportWizard`] drives an upload through header selection, column
//! matching and validation:
//!
//! 1. **Upload**: parse a file, drop empty rows, auto-map against row 0
//! 2. **Select header row**: re-run auto-mapping against the chosen row
//! 3. **Match columns**: adjust sources, merges and transformations
//! 4. **Validate**: batched validation, row edits, row deletion
//!
//! # Example
//!
//! ```
//! use wizard_core::{ImportWizard, WizardConfig, WizardStep};
//! use wizard_model::{DataType, ExpectedColumn};
//!
//! let columns = vec![
//!     ExpectedColumn::new("name", "Name", DataType::Text).required(),
//!     ExpectedColumn::new("age", "Age", DataType::Number),
//! ];
//! let mut wizard = ImportWizard::new(columns, WizardConfig::default());
//! wizard
//!     .upload_bytes(b"NAME,AGE\nJohn,thirty\n", "people.csv")
//!     .unwrap();
//! wizard.go_next();
//! assert_eq!(wizard.go_next(), WizardStep::Validate);
//! assert_eq!(wizard.issues().len(), 1);
//! assert!(wizard.has_blocking_errors());
//! ```

mod config;
mod controller;
mod edit;
mod error;
mod steps;
mod templates;

pub use config::{HeuristicKind, IngestConfig, MappingConfig, ValidationConfig, WizardConfig};
pub use controller::{ImportSummary, ImportWizard, remove_empty_rows};
pub use edit::{RowEditSession, is_boolean_like, is_boolean_like_str};
pub use error::{Result, WizardError};
pub use steps::{StepView, WizardStep, step_views};
pub use templates::TemplateStore;
