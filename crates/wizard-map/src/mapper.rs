//! Mapping state for the match-columns step.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use wizard_model::{
    AdditionalSource, ColumnMapping, DataType, ExpectedColumn, TransformationConfig,
    TransformationType,
};

use crate::error::{MappingError, Result};
use crate::heuristics::{KeywordHeuristic, MatchHeuristic};
use crate::utils::column_label;

/// Transformation suggested when a field first resolves to a source column.
///
/// Numbers get zero decimal places, booleans the default lexicon, and any
/// other field whose key contains "name" is trimmed.
pub fn suggested_transformation(column: &ExpectedColumn) -> Option<TransformationConfig> {
    match column.data_type {
        DataType::Number => Some(TransformationConfig::number(0)),
        DataType::Boolean => Some(TransformationConfig::boolean_default()),
        _ if column.field.to_lowercase().contains("name") => {
            Some(TransformationConfig::of(TransformationType::Trim))
        }
        _ => None,
    }
}

/// Summary counts shown on the match-columns step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    pub total: usize,
    pub mapped: usize,
    pub required: usize,
    pub required_mapped: usize,
    pub active_transformations: usize,
    pub additional_sources: usize,
}

impl MappingSummary {
    /// True when every required field has a primary source.
    pub fn all_required_mapped(&self) -> bool {
        self.required_mapped == self.required
    }
}

/// One mapping per expected column, updated by replacing whole mappings.
#[derive(Debug, Clone)]
pub struct ColumnMapper {
    columns: Vec<ExpectedColumn>,
    mappings: Vec<ColumnMapping>,
    heuristic: Arc<dyn MatchHeuristic>,
}

impl ColumnMapper {
    /// Creates a mapper with unmapped fields and the keyword heuristic.
    pub fn new(columns: Vec<ExpectedColumn>) -> Self {
        let mut mapper = Self {
            columns: Vec::new(),
            mappings: Vec::new(),
            heuristic: Arc::new(KeywordHeuristic::default()),
        };
        mapper.initialize(columns);
        mapper
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Arc<dyn MatchHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn set_heuristic(&mut self, heuristic: Arc<dyn MatchHeuristic>) {
        self.heuristic = heuristic;
    }

    /// Re-derives every mapping from `columns`. Prior state is discarded.
    pub fn initialize(&mut self, columns: Vec<ExpectedColumn>) {
        self.mappings = columns.iter().map(ColumnMapping::unmapped).collect();
        self.columns = columns;
        debug!(fields = self.mappings.len(), "mappings initialized");
    }

    pub fn columns(&self) -> &[ExpectedColumn] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ExpectedColumn> {
        self.columns.iter().find(|column| column.field == field)
    }

    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.mappings
    }

    pub fn mapping(&self, field: &str) -> Option<&ColumnMapping> {
        self.mappings
            .iter()
            .find(|mapping| mapping.target_field == field)
    }

    /// Matches header cells to fields.
    ///
    /// An exact match (case-insensitive, header trimmed) sets the primary
    /// source. The suggested transformation is applied only when the field
    /// had no primary source before. Without an exact match the heuristic's
    /// related columns, when there are any, replace the additional sources.
    pub fn auto_map(&mut self, header: &[String]) {
        let mut exact = 0;
        let mut related = 0;
        let updated: Vec<ColumnMapping> = self
            .mappings
            .iter()
            .map(|mapping| {
                let target = mapping.target_field.to_lowercase();
                let matched = header
                    .iter()
                    .position(|cell| cell.trim().to_lowercase() == target);
                let column = self.column(&mapping.target_field);
                let mut next = mapping.clone();
                match (matched, column) {
                    (Some(index), _) => {
                        exact += 1;
                        if mapping.source_index.is_none()
                            && let Some(suggestion) = column.and_then(suggested_transformation)
                        {
                            next.transformation = suggestion;
                        }
                        next.source_index = Some(index);
                        next.additional_sources
                            .retain(|source| source.source_index != index);
                    }
                    (None, Some(column)) => {
                        let candidates: Vec<AdditionalSource> = self
                            .heuristic
                            .related_columns(column, header)
                            .into_iter()
                            .filter(|index| Some(*index) != mapping.source_index)
                            .map(|index| AdditionalSource::new(index, column_label(header, index)))
                            .collect();
                        if !candidates.is_empty() {
                            related += 1;
                            next.additional_sources = candidates;
                        }
                    }
                    (None, None) => {}
                }
                next
            })
            .collect();
        self.mappings = updated;
        info!(
            exact_matches = exact,
            heuristic_matches = related,
            fields = self.mappings.len(),
            "auto-mapped header row"
        );
    }

    /// Sets the primary source of `field`. An additional source equal to the
    /// new primary is dropped.
    pub fn set_mapping(&mut self, field: &str, source_index: Option<usize>) -> Result<()> {
        self.replace(field, |mapping| {
            mapping.source_index = source_index;
            if let Some(index) = source_index {
                mapping
                    .additional_sources
                    .retain(|source| source.source_index != index);
            }
            Ok(())
        })
    }

    pub fn set_transformation(&mut self, field: &str, config: TransformationConfig) -> Result<()> {
        self.replace(field, |mapping| {
            mapping.transformation = config;
            Ok(())
        })
    }

    /// Appends an additional source. Adding an index already present is a
    /// no-op; adding the primary source is rejected.
    pub fn add_additional_source(
        &mut self,
        field: &str,
        source_index: usize,
        label: impl Into<String>,
    ) -> Result<()> {
        self.replace(field, |mapping| {
            if mapping.source_index == Some(source_index) {
                return Err(MappingError::AdditionalIsPrimary {
                    field: mapping.target_field.clone(),
                    index: source_index,
                });
            }
            if !mapping.has_additional_source(source_index) {
                mapping
                    .additional_sources
                    .push(AdditionalSource::new(source_index, label));
            }
            Ok(())
        })
    }

    pub fn remove_additional_source(&mut self, field: &str, source_index: usize) -> Result<()> {
        self.replace(field, |mapping| {
            mapping
                .additional_sources
                .retain(|source| source.source_index != source_index);
            Ok(())
        })
    }

    /// Replaces all additional sources of `field` with `indices`, labelled
    /// from `header`. The primary index and repeated indices are skipped.
    pub fn set_additional_sources(
        &mut self,
        field: &str,
        indices: &[usize],
        header: &[String],
    ) -> Result<()> {
        self.replace(field, |mapping| {
            let mut sources: Vec<AdditionalSource> = Vec::with_capacity(indices.len());
            for &index in indices {
                if Some(index) == mapping.source_index
                    || sources.iter().any(|source| source.source_index == index)
                {
                    continue;
                }
                sources.push(AdditionalSource::new(index, column_label(header, index)));
            }
            mapping.additional_sources = sources;
            Ok(())
        })
    }

    /// Merges transformations and additional sources from `snapshot` by
    /// target field. Primary sources are left alone; fields missing from
    /// either side are skipped.
    pub fn merge_snapshot(&mut self, snapshot: &[ColumnMapping]) -> usize {
        let mut merged = 0;
        let updated: Vec<ColumnMapping> = self
            .mappings
            .iter()
            .map(|mapping| {
                let Some(saved) = snapshot
                    .iter()
                    .find(|saved| saved.target_field == mapping.target_field)
                else {
                    return mapping.clone();
                };
                merged += 1;
                let mut sources: Vec<AdditionalSource> = Vec::new();
                for source in &saved.additional_sources {
                    if Some(source.source_index) != mapping.source_index
                        && !sources.iter().any(|s| s.source_index == source.source_index)
                    {
                        sources.push(source.clone());
                    }
                }
                ColumnMapping {
                    transformation: saved.transformation.clone(),
                    additional_sources: sources,
                    ..mapping.clone()
                }
            })
            .collect();
        self.mappings = updated;
        debug!(merged, "merged mapping snapshot");
        merged
    }

    /// Required fields with no primary source.
    pub fn missing_required(&self) -> impl Iterator<Item = &ColumnMapping> {
        self.mappings
            .iter()
            .filter(|mapping| mapping.required && mapping.source_index.is_none())
    }

    pub fn summary(&self) -> MappingSummary {
        let mut summary = MappingSummary {
            total: self.mappings.len(),
            ..MappingSummary::default()
        };
        for mapping in &self.mappings {
            if mapping.is_mapped() {
                summary.mapped += 1;
            }
            if mapping.required {
                summary.required += 1;
                if mapping.is_mapped() {
                    summary.required_mapped += 1;
                }
            }
            if mapping.transformation.is_active() {
                summary.active_transformations += 1;
            }
            summary.additional_sources += mapping.additional_sources.len();
        }
        summary
    }

    /// Builds the updated mapping for `field` and swaps it in.
    fn replace<F>(&mut self, field: &str, update: F) -> Result<()>
    where
        F: FnOnce(&mut ColumnMapping) -> Result<()>,
    {
        let position = self
            .mappings
            .iter()
            .position(|mapping| mapping.target_field == field)
            .ok_or_else(|| MappingError::UnknownField(field.to_string()))?;
        let mut next = self.mappings[position].clone();
        update(&mut next)?;
        debug!(field, source = ?next.source_index, "mapping updated");
        self.mappings[position] = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ExpectedColumn> {
        vec![
            ExpectedColumn::new("name", "NAME", DataType::Text).required(),
            ExpectedColumn::new("surname", "SURNAME", DataType::Text).required(),
            ExpectedColumn::new("age", "AGE", DataType::Number).required(),
            ExpectedColumn::new("team", "TEAM", DataType::Text).required(),
            ExpectedColumn::new("isManager", "IS MANAGER", DataType::Boolean),
        ]
    }

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn auto_map_suggests_transformations_on_first_match() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.auto_map(&header(&[" NAME", "SURNAME", "Age", "TEAM", "IsManager"]));

        let name = mapper.mapping("name").unwrap();
        assert_eq!(name.source_index, Some(0));
        assert_eq!(name.transformation.kind, TransformationType::Trim);
        assert_eq!(
            mapper.mapping("age").unwrap().transformation,
            TransformationConfig::number(0)
        );
        assert_eq!(
            mapper.mapping("isManager").unwrap().transformation,
            TransformationConfig::boolean_default()
        );
        assert_eq!(
            mapper.mapping("team").unwrap().transformation,
            TransformationConfig::none()
        );
    }

    #[test]
    fn auto_map_keeps_customized_transformation_when_remapping() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.auto_map(&header(&["NAME", "SURNAME", "AGE", "TEAM"]));
        mapper
            .set_transformation("age", TransformationConfig::number(2))
            .unwrap();

        mapper.auto_map(&header(&["AGE", "NAME", "SURNAME", "TEAM"]));
        let age = mapper.mapping("age").unwrap();
        assert_eq!(age.source_index, Some(0));
        assert_eq!(age.transformation, TransformationConfig::number(2));
    }

    #[test]
    fn auto_map_attaches_related_columns_without_exact_match() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.auto_map(&header(&["First Name", "Last Name", "AGE", "Department", "Group"]));

        let name = mapper.mapping("name").unwrap();
        assert_eq!(name.source_index, None);
        assert_eq!(name.additional_sources, vec![AdditionalSource::new(0, "First Name")]);

        let team = mapper.mapping("team").unwrap();
        let indices: Vec<usize> = team.additional_sources.iter().map(|s| s.source_index).collect();
        assert_eq!(indices, vec![3, 4]);
    }

    #[test]
    fn additional_sources_never_repeat_primary() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.set_mapping("team", Some(3)).unwrap();
        mapper.add_additional_source("team", 4, "GROUP").unwrap();
        mapper.add_additional_source("team", 4, "GROUP").unwrap();
        assert_eq!(mapper.mapping("team").unwrap().additional_sources.len(), 1);

        let err = mapper.add_additional_source("team", 3, "TEAM").unwrap_err();
        assert_eq!(
            err,
            MappingError::AdditionalIsPrimary {
                field: "team".to_string(),
                index: 3
            }
        );

        mapper.set_mapping("team", Some(4)).unwrap();
        assert!(mapper.mapping("team").unwrap().additional_sources.is_empty());
    }

    #[test]
    fn set_additional_sources_filters_and_labels() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.set_mapping("name", Some(0)).unwrap();
        mapper
            .set_additional_sources("name", &[0, 2, 2, 7], &header(&["NAME", "X", "FIRST"]))
            .unwrap();
        assert_eq!(
            mapper.mapping("name").unwrap().additional_sources,
            vec![
                AdditionalSource::new(2, "FIRST"),
                AdditionalSource::new(7, "Column 8")
            ]
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut mapper = ColumnMapper::new(columns());
        assert_eq!(
            mapper.set_mapping("email", Some(1)),
            Err(MappingError::UnknownField("email".to_string()))
        );
    }

    #[test]
    fn initialize_discards_previous_state() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.set_mapping("age", Some(2)).unwrap();
        mapper.initialize(columns());
        assert!(mapper.mappings().iter().all(|m| m.source_index.is_none()));
        assert_eq!(mapper.summary().mapped, 0);
    }

    #[test]
    fn summary_counts_required_and_active() {
        let mut mapper = ColumnMapper::new(columns());
        mapper.auto_map(&header(&["NAME", "SURNAME", "AGE"]));
        let summary = mapper.summary();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.mapped, 3);
        assert_eq!(summary.required, 4);
        assert_eq!(summary.required_mapped, 3);
        assert_eq!(summary.active_transformations, 3);
        assert!(!summary.all_required_mapped());
        assert_eq!(mapper.missing_required().count(), 1);
    }
}
