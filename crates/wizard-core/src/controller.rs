//! The import wizard state machine.
//!
//! [`ImportWizard`] owns the uploaded dataset, the column mappings, the
//! validation engine, the row-edit buffer and the template store, and moves
//! through the four [`WizardStep`]s. Every change to the dataset replaces it
//! with a new value.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};
use wizard_ingest::{ParsedFile, load_bytes, load_file};
use wizard_map::{
    ColumnMapper, MappingSummary, Record, cleaned_export, column_label, preview_records,
};
use wizard_model::{
    ColumnMapping, ExpectedColumn, TabularDataset, TransformationConfig, TransformationTemplate,
    ValidationIssue, error_count, has_blocking_errors, warning_count,
};
use wizard_transform::{CustomFunctions, Transformer};
use wizard_validate::{
    ValidationEngine, ValidationOutcome, ValidationRules, ValidationRun, ValidationState,
};

use crate::config::WizardConfig;
use crate::edit::RowEditSession;
use crate::error::{Result, WizardError};
use crate::steps::{StepView, WizardStep, step_views};
use crate::templates::TemplateStore;

/// Drops data rows whose header-matched columns are all blank.
///
/// Columns are matched by comparing each trimmed, lowercased header cell
/// with the lowercased field name. Rows up to and including `header_row`
/// are kept. When no header cell matches any field, nothing is dropped,
/// rather than treating every row as empty and dropping them all.
pub fn remove_empty_rows(
    dataset: &TabularDataset,
    columns: &[ExpectedColumn],
    header_row: usize,
) -> TabularDataset {
    let Some(header) = dataset.row(header_row) else {
        return dataset.clone();
    };
    let matched: Vec<usize> = columns
        .iter()
        .filter_map(|column| {
            let field = column.field.to_lowercase();
            header
                .iter()
                .position(|cell| cell.trim().to_lowercase() == field)
        })
        .collect();
    if matched.is_empty() {
        return dataset.clone();
    }

    let empty: BTreeSet<usize> = dataset
        .data_rows(header_row)
        .filter(|row| {
            !matched
                .iter()
                .any(|&index| row.cell(index).is_some_and(|cell| !cell.trim().is_empty()))
        })
        .map(|row| row.index)
        .collect();
    if empty.is_empty() {
        return dataset.clone();
    }
    debug!(removed = empty.len(), "removed empty rows");
    dataset.without_rows(&empty)
}

/// Totals for the current import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub file_name: String,
    pub total_rows: usize,
    pub header_row: usize,
    pub data_rows: usize,
    pub mapping: MappingSummary,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug)]
pub struct ImportWizard {
    config: WizardConfig,
    step: WizardStep,
    dataset: Option<TabularDataset>,
    header_row: usize,
    mapper: ColumnMapper,
    transformer: Transformer,
    rules: ValidationRules,
    validation: ValidationEngine,
    edits: RowEditSession,
    selection: BTreeSet<usize>,
    show_only_issues: bool,
    templates: TemplateStore,
}

impl ImportWizard {
    pub fn new(columns: Vec<ExpectedColumn>, config: WizardConfig) -> Self {
        let rules = config.rules_for(&columns);
        let mapper = ColumnMapper::new(columns).with_heuristic(config.heuristic());
        let validation = ValidationEngine::new(config.validation.batch_size);
        Self {
            config,
            step: WizardStep::Upload,
            dataset: None,
            header_row: 0,
            mapper,
            transformer: Transformer::default(),
            rules,
            validation,
            edits: RowEditSession::new(),
            selection: BTreeSet::new(),
            show_only_issues: false,
            templates: TemplateStore::new(),
        }
    }

    /// Resolves `custom` transformations against `functions`.
    #[must_use]
    pub fn with_custom_functions(mut self, functions: CustomFunctions) -> Self {
        self.transformer = Transformer::new(functions);
        self
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn columns(&self) -> &[ExpectedColumn] {
        self.mapper.columns()
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn step_views(&self) -> Vec<StepView> {
        step_views(self.step)
    }

    pub fn dataset(&self) -> Option<&TabularDataset> {
        self.dataset.as_ref()
    }

    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Cells of the selected header row, empty before an upload.
    pub fn header(&self) -> &[String] {
        self.dataset
            .as_ref()
            .and_then(|dataset| dataset.row(self.header_row))
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------------
    // Upload and header selection
    // ---------------------------------------------------------------------

    /// Replaces the dataset with `parsed`, removes empty rows against the
    /// first row, re-derives the mappings and moves to header selection.
    pub fn upload(&mut self, parsed: ParsedFile) {
        let raw = TabularDataset::new(parsed.file_name, parsed.rows);
        let dataset = remove_empty_rows(&raw, self.mapper.columns(), 0);
        info!(
            file_name = %dataset.file_name,
            rows = dataset.len(),
            removed = raw.len() - dataset.len(),
            "file uploaded"
        );

        let columns = self.mapper.columns().to_vec();
        self.mapper.initialize(columns);
        self.mapper.auto_map(dataset.row(0).unwrap_or_default());
        self.dataset = Some(dataset);
        self.header_row = 0;
        self.validation.reset();
        self.edits.discard();
        self.selection.clear();
        self.show_only_issues = false;
        self.step = WizardStep::SelectHeader;
    }

    /// Parses in-memory file contents. On error nothing changes.
    pub fn upload_bytes(&mut self, bytes: &[u8], file_name: &str) -> Result<()> {
        let parsed = load_bytes(bytes, file_name, self.config.ingest.max_rows)?;
        self.upload(parsed);
        Ok(())
    }

    /// Loads `path` from disk. On error nothing changes.
    pub async fn upload_file(&mut self, path: &Path) -> Result<()> {
        let parsed = load_file(path, self.config.ingest.max_rows).await?;
        self.upload(parsed);
        Ok(())
    }

    /// Uses row `row` as the header and auto-maps against it.
    pub fn select_header_row(&mut self, row: usize) -> Result<()> {
        let dataset = self.dataset.as_ref().ok_or(WizardError::NoDataset)?;
        let header = dataset
            .row(row)
            .ok_or(WizardError::HeaderRowOutOfRange {
                row,
                len: dataset.len(),
            })?
            .to_vec();
        self.header_row = row;
        self.mapper.auto_map(&header);
        self.edits.discard();
        self.selection.clear();
        info!(header_row = row, "header row selected");
        if self.step == WizardStep::Validate {
            self.revalidate();
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Advances one step. Entering the validation step runs validation.
    pub fn go_next(&mut self) -> WizardStep {
        let next = self.step.next();
        if next != self.step {
            self.step = next;
            info!(step = next.number(), "entered step");
            if next == WizardStep::Validate {
                self.revalidate();
            }
        }
        self.step
    }

    pub fn go_previous(&mut self) -> WizardStep {
        let previous = self.step.previous();
        if previous != self.step {
            self.step = previous;
            info!(step = previous.number(), "returned to step");
        }
        self.step
    }

    // ---------------------------------------------------------------------
    // Mappings
    // ---------------------------------------------------------------------

    pub fn mappings(&self) -> &[ColumnMapping] {
        self.mapper.mappings()
    }

    pub fn mapping(&self, field: &str) -> Option<&ColumnMapping> {
        self.mapper.mapping(field)
    }

    pub fn mapping_summary(&self) -> MappingSummary {
        self.mapper.summary()
    }

    pub fn set_mapping(&mut self, field: &str, source_index: Option<usize>) -> Result<()> {
        self.mapper.set_mapping(field, source_index)?;
        Ok(())
    }

    pub fn set_transformation(&mut self, field: &str, config: TransformationConfig) -> Result<()> {
        self.mapper.set_transformation(field, config)?;
        Ok(())
    }

    /// Adds `index` as an additional source, labelled from the header row.
    pub fn add_additional_source(&mut self, field: &str, index: usize) -> Result<()> {
        let label = column_label(self.header(), index);
        self.mapper.add_additional_source(field, index, label)?;
        Ok(())
    }

    pub fn remove_additional_source(&mut self, field: &str, index: usize) -> Result<()> {
        self.mapper.remove_additional_source(field, index)?;
        Ok(())
    }

    /// Replaces the additional sources of `field` with `indices`.
    pub fn set_additional_sources(&mut self, field: &str, indices: &[usize]) -> Result<()> {
        let header = self.header().to_vec();
        self.mapper.set_additional_sources(field, indices, &header)?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------

    pub fn validation_state(&self) -> &ValidationState {
        self.validation.state()
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Starts a new validation generation. Drive the returned run with
    /// [`ValidationRun::step`], then hand its outcome to
    /// [`Self::finish_validation`].
    pub fn start_validation(&mut self) -> Result<ValidationRun> {
        let dataset = self.dataset.as_ref().ok_or(WizardError::NoDataset)?;
        Ok(self.validation.start(
            dataset,
            self.header_row,
            self.mapper.mappings(),
            &self.rules,
            &self.transformer,
        ))
    }

    /// Records progress for `generation`. Stale generations are ignored.
    pub fn report_validation_progress(&mut self, generation: u64, progress: u8) -> bool {
        self.validation.report_progress(generation, progress)
    }

    /// Applies a finished run. Returns false when the run was superseded.
    pub fn finish_validation(&mut self, outcome: ValidationOutcome) -> bool {
        if !self.validation.complete(outcome) {
            return false;
        }
        if self.show_only_issues && self.validation.issues().is_empty() {
            debug!("no issues left, showing all rows");
            self.show_only_issues = false;
        }
        true
    }

    /// Runs validation to completion, calling `on_progress` after each batch.
    pub fn run_validation_with(
        &mut self,
        mut on_progress: impl FnMut(u8),
    ) -> Result<&[ValidationIssue]> {
        let run = self.start_validation()?;
        let generation = run.generation();
        let outcome = run.run_to_end(|progress| {
            self.validation.report_progress(generation, progress);
            on_progress(progress);
        });
        self.finish_validation(outcome);
        Ok(self.validation.issues())
    }

    pub fn run_validation(&mut self) -> Result<&[ValidationIssue]> {
        self.run_validation_with(|_| {})
    }

    /// Runs validation batch by batch, yielding to the runtime in between.
    pub async fn validate_async(&mut self) -> Result<()> {
        let mut run = self.start_validation()?;
        let generation = run.generation();
        loop {
            let progress = run.step();
            self.validation.report_progress(generation, progress);
            if run.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        self.finish_validation(run.into_outcome());
        Ok(())
    }

    fn revalidate(&mut self) {
        if self.edits.is_active() {
            debug!("validation deferred while editing");
            return;
        }
        if self.dataset.is_none() {
            return;
        }
        if let Err(e) = self.run_validation() {
            warn!(error = %e, "validation failed");
        }
    }

    /// Issues of the last completed run.
    pub fn issues(&self) -> &[ValidationIssue] {
        self.validation.issues()
    }

    pub fn issues_for_row(&self, row: usize) -> Vec<&ValidationIssue> {
        self.issues().iter().filter(|issue| issue.row == row).collect()
    }

    /// Absolute indices of rows with at least one issue.
    pub fn rows_with_issues(&self) -> BTreeSet<usize> {
        self.issues()
            .iter()
            .filter(|issue| issue.is_row_specific())
            .map(|issue| issue.row)
            .collect()
    }

    pub fn error_count(&self) -> usize {
        error_count(self.issues())
    }

    pub fn warning_count(&self) -> usize {
        warning_count(self.issues())
    }

    pub fn has_blocking_errors(&self) -> bool {
        has_blocking_errors(self.issues())
    }

    // ---------------------------------------------------------------------
    // Row filter and selection
    // ---------------------------------------------------------------------

    pub fn show_only_issues(&self) -> bool {
        self.show_only_issues
    }

    /// Toggles the "only rows with issues" filter. An active edit session is
    /// re-snapshotted over the newly visible rows.
    pub fn set_show_only_issues(&mut self, enabled: bool) {
        self.show_only_issues = enabled;
        if self.edits.is_active()
            && let Err(e) = self.begin_edit_all()
        {
            warn!(error = %e, "could not refresh edit session");
        }
    }

    /// Absolute indices of the data rows currently shown.
    pub fn visible_rows(&self) -> Vec<usize> {
        let Some(dataset) = &self.dataset else {
            return Vec::new();
        };
        let flagged = self.show_only_issues.then(|| self.rows_with_issues());
        dataset
            .data_rows(self.header_row)
            .map(|row| row.index)
            .filter(|index| flagged.as_ref().is_none_or(|rows| rows.contains(index)))
            .collect()
    }

    pub fn selected_rows(&self) -> &BTreeSet<usize> {
        &self.selection
    }

    /// Selects or deselects data row `row`. The header row, rows above it
    /// and indices past the end are ignored.
    pub fn toggle_row_selection(&mut self, row: usize, selected: bool) {
        let len = self.dataset.as_ref().map_or(0, TabularDataset::len);
        if row <= self.header_row || row >= len {
            debug!(row, header_row = self.header_row, "ignored selection outside data rows");
            return;
        }
        if selected {
            self.selection.insert(row);
        } else {
            self.selection.remove(&row);
        }
    }

    /// Selects every visible row, or clears the selection.
    pub fn select_all_rows(&mut self, selected: bool) {
        self.selection = if selected {
            self.visible_rows().into_iter().collect()
        } else {
            BTreeSet::new()
        };
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Removes the selected rows and returns how many were removed.
    pub fn delete_selected_rows(&mut self) -> Result<usize> {
        let dataset = self.dataset.as_ref().ok_or(WizardError::NoDataset)?;
        if self.selection.is_empty() {
            return Ok(0);
        }
        let updated = dataset.without_rows(&self.selection);
        let removed = dataset.len() - updated.len();
        self.dataset = Some(updated);
        self.selection.clear();
        // Buffered edits are keyed by the old row positions.
        self.edits.discard();
        info!(removed, "rows deleted");
        if self.step == WizardStep::Validate {
            self.revalidate();
        }
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Row editing
    // ---------------------------------------------------------------------

    pub fn edit_session(&self) -> &RowEditSession {
        &self.edits
    }

    /// Buffers the merged values of every visible row.
    pub fn begin_edit_all(&mut self) -> Result<()> {
        let rows = self.visible_rows();
        let dataset = self.dataset.as_ref().ok_or(WizardError::NoDataset)?;
        self.edits
            .begin_edit_all(dataset, self.mapper.mappings(), rows);
        Ok(())
    }

    pub fn set_edit_field(&mut self, row: usize, field: &str, value: impl Into<String>) {
        self.edits.set_field(row, field, value);
    }

    /// Writes buffered edits into the dataset. Returns false when nothing
    /// was buffered.
    pub fn commit_edits(&mut self) -> Result<bool> {
        let dataset = self.dataset.as_ref().ok_or(WizardError::NoDataset)?;
        let Some(updated) = self.edits.commit(dataset, self.mapper.mappings()) else {
            return Ok(false);
        };
        self.dataset = Some(updated);
        info!("edits committed");
        if self.step == WizardStep::Validate {
            self.revalidate();
        }
        Ok(true)
    }

    pub fn discard_edits(&mut self) {
        self.edits.discard();
    }

    // ---------------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------------

    /// One record per data row, keyed by mapped target field.
    pub fn cleaned_export(&self) -> Vec<Record> {
        match &self.dataset {
            Some(dataset) => cleaned_export(
                dataset,
                self.header_row,
                self.mapper.mappings(),
                &self.transformer,
            ),
            None => Vec::new(),
        }
    }

    pub fn preview_rows(&self, limit: usize) -> Vec<Record> {
        match &self.dataset {
            Some(dataset) => preview_records(
                dataset,
                self.header_row,
                self.mapper.mappings(),
                &self.transformer,
                limit,
            ),
            None => Vec::new(),
        }
    }

    pub fn summary(&self) -> Option<ImportSummary> {
        let dataset = self.dataset.as_ref()?;
        Some(ImportSummary {
            file_name: dataset.file_name.clone(),
            total_rows: dataset.len(),
            header_row: self.header_row,
            data_rows: dataset.data_row_count(self.header_row),
            mapping: self.mapper.summary(),
            errors: self.error_count(),
            warnings: self.warning_count(),
        })
    }

    // ---------------------------------------------------------------------
    // Templates
    // ---------------------------------------------------------------------

    pub fn templates(&self) -> &[TransformationTemplate] {
        self.templates.list()
    }

    /// Saves the current mappings as a template.
    pub fn save_template(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> &TransformationTemplate {
        self.templates
            .save(name, description, self.mapper.mappings())
    }

    /// Adds a template loaded from elsewhere and returns its id.
    pub fn import_template(&mut self, template: TransformationTemplate) -> String {
        self.templates.insert(template).id.clone()
    }

    /// Merges a template's transformations and additional sources into the
    /// current mappings. Returns the number of fields merged.
    pub fn apply_template(&mut self, id: &str) -> Result<usize> {
        let template = self
            .templates
            .get(id)
            .ok_or_else(|| WizardError::UnknownTemplate(id.to_string()))?;
        let merged = self.mapper.merge_snapshot(&template.mappings);
        info!(id, merged, "template applied");
        Ok(merged)
    }

    pub fn delete_template(&mut self, id: &str) -> bool {
        self.templates.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_model::DataType;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn columns() -> Vec<ExpectedColumn> {
        vec![
            ExpectedColumn::new("name", "Name", DataType::Text).required(),
            ExpectedColumn::new("age", "Age", DataType::Number),
        ]
    }

    #[test]
    fn test_remove_empty_rows_keeps_header_and_filled_rows() {
        let dataset = TabularDataset::new(
            "a.csv",
            rows(&[
                &["NAME", "AGE", "NOTE"],
                &["", " ", "only a note"],
                &["John", "", ""],
                &["", "30"],
            ]),
        );
        let cleaned = remove_empty_rows(&dataset, &columns(), 0);
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned.row(1).unwrap()[0], "John");
    }

    #[test]
    fn test_remove_empty_rows_without_matches_keeps_everything() {
        let dataset = TabularDataset::new("a.csv", rows(&[&["X", "Y"], &["", ""], &["1", "2"]]));
        assert_eq!(remove_empty_rows(&dataset, &columns(), 0), dataset);
    }

    #[test]
    fn test_upload_moves_to_header_selection() {
        let mut wizard = ImportWizard::new(columns(), WizardConfig::default());
        wizard.upload(ParsedFile {
            file_name: "people.csv".to_string(),
            rows: rows(&[&["NAME", "AGE"], &["John", "30"]]),
        });
        assert_eq!(wizard.current_step(), WizardStep::SelectHeader);
        assert_eq!(wizard.mapping("name").unwrap().source_index, Some(0));
        assert_eq!(wizard.mapping("age").unwrap().source_index, Some(1));
    }

    #[test]
    fn test_header_row_out_of_range() {
        let mut wizard = ImportWizard::new(columns(), WizardConfig::default());
        assert!(matches!(
            wizard.select_header_row(0),
            Err(WizardError::NoDataset)
        ));
        wizard.upload(ParsedFile {
            file_name: "a.csv".to_string(),
            rows: rows(&[&["NAME"]]),
        });
        assert!(matches!(
            wizard.select_header_row(3),
            Err(WizardError::HeaderRowOutOfRange { row: 3, len: 1 })
        ));
    }

    #[test]
    fn test_selection_ignores_header_and_rows_above() {
        let mut wizard = ImportWizard::new(columns(), WizardConfig::default());
        wizard.upload(ParsedFile {
            file_name: "a.csv".to_string(),
            rows: rows(&[&["report"], &["NAME", "AGE"], &["John", "30"], &["Jane", "28"]]),
        });
        wizard.select_header_row(1).unwrap();
        wizard.toggle_row_selection(0, true);
        wizard.toggle_row_selection(1, true);
        wizard.toggle_row_selection(9, true);
        assert!(wizard.selected_rows().is_empty());

        wizard.toggle_row_selection(3, true);
        assert_eq!(wizard.delete_selected_rows().unwrap(), 1);
        assert_eq!(wizard.header(), ["NAME", "AGE"]);
        assert_eq!(wizard.dataset().unwrap().len(), 3);
    }

    #[test]
    fn test_navigation_without_dataset() {
        let mut wizard = ImportWizard::new(columns(), WizardConfig::default());
        assert_eq!(wizard.go_previous(), WizardStep::Upload);
        for _ in 0..5 {
            wizard.go_next();
        }
        assert_eq!(wizard.current_step(), WizardStep::Validate);
        assert_eq!(wizard.validation_state(), &ValidationState::Idle);
    }
}
