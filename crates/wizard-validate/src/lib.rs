//! Validation for the import wizard.
//!
//! Checks run against the transformed, merged value of each mapped field:
//!
//! - **Required mappings**: required fields without a primary source (global)
//! - **Numeric fields**: values that do not parse as a number (error)
//! - **Allowed values**: values outside an enumerated set (warning)
//!
//! Rows are processed in batches by a [`ValidationRun`]. Each run carries the
//! generation number it was started with, and the [`ValidationEngine`] only
//! accepts progress and results from the latest generation.
//!
//! # Example
//!
//! ```
//! use wizard_map::ColumnMapper;
//! use wizard_model::{DataType, ExpectedColumn, TabularDataset};
//! use wizard_transform::Transformer;
//! use wizard_validate::{ValidationEngine, ValidationRules};
//!
//! let columns = vec![ExpectedColumn::new("age", "AGE", DataType::Number).required()];
//! let dataset = TabularDataset::new(
//!     "people.csv",
//!     vec![vec!["NAME".into(), "AGE".into()], vec!["John".into(), "thirty".into()]],
//! );
//! let mut mapper = ColumnMapper::new(columns.clone());
//! mapper.set_mapping("age", Some(1)).unwrap();
//!
//! let mut engine = ValidationEngine::new(100);
//! let rules = ValidationRules::from_columns(&columns);
//! let issues = engine.validate(&dataset, 0, mapper.mappings(), &rules, &Transformer::default());
//! assert_eq!(issues[0].row, 1);
//! ```

mod checks;
mod engine;
mod rules;
mod run;

pub use engine::{ValidationEngine, ValidationState};
pub use rules::ValidationRules;
pub use run::{ValidationOutcome, ValidationRun, progress_percent};

/// Default number of rows processed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;
