//! Reusable mapping/transformation templates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::mapping::ColumnMapping;

/// Named snapshot of a mapping set.
///
/// Only `transformation` and `additional_sources` are re-applied from a
/// template; primary source indices belong to the file being imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date_created: NaiveDate,
    pub mappings: Vec<ColumnMapping>,
}

impl TransformationTemplate {
    /// Number of mappings with a transformation other than `none`.
    pub fn active_transformation_count(&self) -> usize {
        self.mappings
            .iter()
            .filter(|mapping| mapping.transformation.is_active())
            .count()
    }

    pub fn mapping_for(&self, target_field: &str) -> Option<&ColumnMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.target_field == target_field)
    }
}
