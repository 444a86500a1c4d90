//! Merging source cells into target-field values.

use std::collections::BTreeMap;

use wizard_model::{ColumnMapping, TabularDataset};
use wizard_transform::Transformer;

/// A cleaned record keyed by target field.
pub type Record = BTreeMap<String, String>;

/// Joins the primary cell and each additional cell with a single space.
///
/// Cells the row does not have are left out; an unmapped field with no
/// additional sources yields an empty string.
pub fn effective_value(row: &[String], mapping: &ColumnMapping) -> String {
    mapping
        .source_indices()
        .filter_map(|index| row.get(index))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The merged value passed through the field's transformation.
pub fn transformed_value(
    row: &[String],
    mapping: &ColumnMapping,
    transformer: &Transformer,
) -> String {
    transformer.apply(&effective_value(row, mapping), &mapping.transformation)
}

fn record(row: &[String], mappings: &[ColumnMapping], transformer: &Transformer) -> Record {
    mappings
        .iter()
        .filter(|mapping| mapping.is_mapped())
        .map(|mapping| {
            (
                mapping.target_field.clone(),
                transformed_value(row, mapping, transformer),
            )
        })
        .collect()
}

/// One record per row after `header_row`. Unmapped fields are omitted.
pub fn cleaned_export(
    dataset: &TabularDataset,
    header_row: usize,
    mappings: &[ColumnMapping],
    transformer: &Transformer,
) -> Vec<Record> {
    dataset
        .data_rows(header_row)
        .map(|row| record(row.cells, mappings, transformer))
        .collect()
}

/// The first `limit` records of [`cleaned_export`].
pub fn preview_records(
    dataset: &TabularDataset,
    header_row: usize,
    mappings: &[ColumnMapping],
    transformer: &Transformer,
    limit: usize,
) -> Vec<Record> {
    dataset
        .data_rows(header_row)
        .take(limit)
        .map(|row| record(row.cells, mappings, transformer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_model::{AdditionalSource, TransformationConfig, TransformationType};

    fn mapping(source: Option<usize>, additional: &[usize]) -> ColumnMapping {
        ColumnMapping {
            target_field: "field".to_string(),
            source_index: source,
            required: false,
            transformation: TransformationConfig::none(),
            additional_sources: additional
                .iter()
                .map(|index| AdditionalSource::new(*index, format!("col{index}")))
                .collect(),
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn merges_primary_then_additional() {
        let row = row(&["a", "b", "c", "d", "e"]);
        assert_eq!(effective_value(&row, &mapping(Some(2), &[4])), "c e");
        assert_eq!(effective_value(&row, &mapping(Some(2), &[9])), "c");
        assert_eq!(effective_value(&row, &mapping(None, &[0, 1])), "a b");
        assert_eq!(effective_value(&row, &mapping(None, &[])), "");
    }

    #[test]
    fn transforms_the_joined_value() {
        let mut merged = mapping(Some(0), &[1]);
        merged.transformation = TransformationConfig::of(TransformationType::Capitalize);
        let row = row(&["jOHN", "doe"]);
        assert_eq!(
            transformed_value(&row, &merged, &Transformer::default()),
            "John Doe"
        );
    }
}
