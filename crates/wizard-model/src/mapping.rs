//! Target-field to source-column mappings.

use serde::{Deserialize, Serialize};

use crate::column::ExpectedColumn;
use crate::transformation::TransformationConfig;

/// A secondary column whose value is appended to the primary value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalSource {
    pub source_index: usize,
    pub label: String,
}

impl AdditionalSource {
    pub fn new(source_index: usize, label: impl Into<String>) -> Self {
        Self {
            source_index,
            label: label.into(),
        }
    }
}

/// Mapping for one target field.
///
/// `additional_sources` never contains `source_index` and never contains the
/// same index twice; order is the join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub target_field: String,
    pub source_index: Option<usize>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub transformation: TransformationConfig,
    #[serde(default)]
    pub additional_sources: Vec<AdditionalSource>,
}

impl ColumnMapping {
    /// Creates an unmapped mapping for `column`.
    pub fn unmapped(column: &ExpectedColumn) -> Self {
        Self {
            target_field: column.field.clone(),
            source_index: None,
            required: column.required,
            transformation: TransformationConfig::none(),
            additional_sources: Vec::new(),
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.source_index.is_some()
    }

    pub fn has_additional_source(&self, source_index: usize) -> bool {
        self.additional_sources
            .iter()
            .any(|source| source.source_index == source_index)
    }

    /// Primary index (if any) followed by the additional indices.
    pub fn source_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.source_index.into_iter().chain(
            self.additional_sources
                .iter()
                .map(|source| source.source_index),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::DataType;

    #[test]
    fn unmapped_copies_required_flag() {
        let column = ExpectedColumn::new("age", "AGE", DataType::Number).required();
        let mapping = ColumnMapping::unmapped(&column);
        assert!(mapping.required);
        assert!(!mapping.is_mapped());
        assert_eq!(mapping.source_indices().count(), 0);
    }

    #[test]
    fn source_indices_keep_join_order() {
        let mapping = ColumnMapping {
            target_field: "team".to_string(),
            source_index: Some(3),
            required: true,
            transformation: TransformationConfig::none(),
            additional_sources: vec![
                AdditionalSource::new(5, "GROUP"),
                AdditionalSource::new(4, "DEPARTMENT"),
            ],
        };
        assert_eq!(mapping.source_indices().collect::<Vec<_>>(), vec![3, 5, 4]);
        assert!(mapping.has_additional_source(4));
        assert!(!mapping.has_additional_source(3));
    }
}
