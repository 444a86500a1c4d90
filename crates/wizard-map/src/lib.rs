//! Column mapping for the import wizard.
//!
//! A [`ColumnMapper`] holds one [`ColumnMapping`](wizard_model::ColumnMapping)
//! per expected column. Every update replaces the affected mapping by its
//! target field; callers never mutate a mapping they obtained from the mapper.
//!
//! Value merging lives in [`merge`]: the raw primary and additional cells are
//! joined first, and the field's transformation is applied to the joined
//! string as a whole.

mod error;
mod heuristics;
mod mapper;
pub mod merge;
mod utils;

pub use error::{MappingError, Result};
pub use heuristics::{
    FuzzyHeuristic, KeywordHeuristic, KeywordRule, MatchHeuristic, default_keywords,
};
pub use mapper::{ColumnMapper, MappingSummary, suggested_transformation};
pub use merge::{Record, cleaned_export, effective_value, preview_records, transformed_value};
pub use utils::{column_label, normalize_text};
