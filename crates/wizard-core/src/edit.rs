//! Buffered row edits.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;
use wizard_map::effective_value;
use wizard_model::{CellUpdate, ColumnMapping, TabularDataset};

/// Edited values keyed by absolute row index, then by target field.
///
/// Nothing reaches the dataset until [`RowEditSession::commit`], which
/// collapses a merged field into its primary column: the edited value is
/// written to the primary cell and every additional-source cell is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEditSession {
    rows: BTreeMap<usize, BTreeMap<String, String>>,
}

impl RowEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the buffer with the merged values of every mapped field for
    /// each of `rows`.
    pub fn begin_edit_all(
        &mut self,
        dataset: &TabularDataset,
        mappings: &[ColumnMapping],
        rows: impl IntoIterator<Item = usize>,
    ) {
        self.rows = rows
            .into_iter()
            .filter_map(|index| {
                let cells = dataset.row(index)?;
                let fields = mappings
                    .iter()
                    .filter(|mapping| mapping.is_mapped())
                    .map(|mapping| {
                        (
                            mapping.target_field.clone(),
                            effective_value(cells, mapping),
                        )
                    })
                    .collect();
                Some((index, fields))
            })
            .collect();
        debug!(rows = self.rows.len(), "edit session started");
    }

    pub fn set_field(&mut self, row: usize, field: impl Into<String>, value: impl Into<String>) {
        self.rows
            .entry(row)
            .or_default()
            .insert(field.into(), value.into());
    }

    pub fn value(&self, row: usize, field: &str) -> Option<&str> {
        self.rows.get(&row)?.get(field).map(String::as_str)
    }

    pub fn is_active(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Absolute indices of the rows in the buffer.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    pub fn discard(&mut self) {
        self.rows.clear();
    }

    /// Cell writes for every non-empty buffered value. Fields without a
    /// primary source have nowhere to go and are skipped.
    pub fn updates(&self, mappings: &[ColumnMapping]) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (&row, fields) in &self.rows {
            for (field, value) in fields {
                if value.is_empty() {
                    continue;
                }
                let Some(mapping) = mappings.iter().find(|m| &m.target_field == field) else {
                    continue;
                };
                let Some(primary) = mapping.source_index else {
                    continue;
                };
                updates.push(CellUpdate {
                    row,
                    column: primary,
                    value: value.clone(),
                });
                updates.extend(mapping.additional_sources.iter().map(|source| CellUpdate {
                    row,
                    column: source.source_index,
                    value: String::new(),
                }));
            }
        }
        updates
    }

    /// Applies the buffer to `dataset` and clears it. Returns `None` when
    /// there was nothing buffered.
    pub fn commit(
        &mut self,
        dataset: &TabularDataset,
        mappings: &[ColumnMapping],
    ) -> Option<TabularDataset> {
        if !self.is_active() {
            return None;
        }
        let updates = self.updates(mappings);
        debug!(
            rows = self.rows.len(),
            cells = updates.len(),
            "committing edits"
        );
        self.rows.clear();
        Some(dataset.with_cell_updates(updates))
    }
}

/// Whether a value should be edited as a checkbox.
pub fn is_boolean_like(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Number(number) => number.as_f64().is_some_and(|n| n == 0.0 || n == 1.0),
        Value::String(text) => is_boolean_like_str(text),
        _ => false,
    }
}

pub fn is_boolean_like_str(value: &str) -> bool {
    matches!(value, "true" | "false" | "0" | "1")
}
