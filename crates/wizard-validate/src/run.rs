//! A single batched validation pass.

use tracing::{debug, trace};
use wizard_model::{ColumnMapping, TabularDataset, ValidationIssue};
use wizard_transform::Transformer;

use crate::checks;
use crate::rules::ValidationRules;

/// `round(100 * processed / total)`, with an empty dataset counting as done.
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (processed.min(total) as f64 * 100.0 / total as f64).round();
    percent as u8
}

/// Issues produced by a finished run, tagged with its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub generation: u64,
    pub issues: Vec<ValidationIssue>,
}

/// Snapshot of the inputs of one validation pass plus its cursor.
///
/// The run owns copies of the dataset and mappings, so later edits to the
/// wizard cannot change a run that is already in flight.
#[derive(Debug, Clone)]
pub struct ValidationRun {
    generation: u64,
    dataset: TabularDataset,
    header_row: usize,
    mappings: Vec<ColumnMapping>,
    rules: ValidationRules,
    transformer: Transformer,
    batch_size: usize,
    processed: usize,
    total: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidationRun {
    /// Creates a run and records the required-mapping issues up front.
    pub fn new(
        generation: u64,
        dataset: TabularDataset,
        header_row: usize,
        mappings: Vec<ColumnMapping>,
        rules: ValidationRules,
        transformer: Transformer,
        batch_size: usize,
    ) -> Self {
        let total = dataset.data_row_count(header_row);
        let issues = checks::required::check(&mappings);
        debug!(
            generation,
            total_rows = total,
            unmapped_required = issues.len(),
            "validation run created"
        );
        Self {
            generation,
            dataset,
            header_row,
            mappings,
            rules,
            transformer,
            batch_size: batch_size.max(1),
            processed: 0,
            total,
            issues,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn total_rows(&self) -> usize {
        self.total
    }

    pub fn processed_rows(&self) -> usize {
        self.processed
    }

    pub fn progress(&self) -> u8 {
        progress_percent(self.processed, self.total)
    }

    pub fn is_finished(&self) -> bool {
        self.processed >= self.total
    }

    /// Issues found so far, in discovery order.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Processes the next batch and returns the progress afterwards.
    /// Calling this on a finished run only reports 100.
    pub fn step(&mut self) -> u8 {
        let end = (self.processed + self.batch_size).min(self.total);
        for row in self
            .dataset
            .data_rows(self.header_row)
            .skip(self.processed)
            .take(end - self.processed)
        {
            let row_number = row.offset + self.header_row + 1;
            checks::check_row(
                &row,
                row_number,
                &self.mappings,
                &self.rules,
                &self.transformer,
                &mut self.issues,
            );
        }
        self.processed = end;
        let progress = self.progress();
        trace!(generation = self.generation, progress, "validation batch done");
        progress
    }

    /// Runs the remaining batches, reporting progress after each one.
    pub fn run_to_end(mut self, mut on_progress: impl FnMut(u8)) -> ValidationOutcome {
        if self.total == 0 {
            on_progress(self.step());
        }
        while !self.is_finished() {
            on_progress(self.step());
        }
        self.into_outcome()
    }

    pub fn into_outcome(self) -> ValidationOutcome {
        ValidationOutcome {
            generation: self.generation,
            issues: self.issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_model::{DataType, ExpectedColumn, Severity};

    fn dataset(rows: &[&[&str]]) -> TabularDataset {
        TabularDataset::new(
            "test.csv",
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    fn age_mapping(source: Option<usize>) -> Vec<ColumnMapping> {
        let mut mapping =
            ColumnMapping::unmapped(&ExpectedColumn::new("age", "AGE", DataType::Number).required());
        mapping.source_index = source;
        vec![mapping]
    }

    fn run(dataset: TabularDataset, header_row: usize, mappings: Vec<ColumnMapping>) -> ValidationRun {
        ValidationRun::new(
            1,
            dataset,
            header_row,
            mappings,
            ValidationRules::new().with_numeric("age"),
            Transformer::default(),
            2,
        )
    }

    #[test]
    fn progress_rounds_and_treats_empty_as_done() {
        assert_eq!(progress_percent(0, 0), 100);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(3, 3), 100);
    }

    #[test]
    fn numeric_issue_uses_absolute_row() {
        let data = dataset(&[&["NAME", "AGE"], &["John", "thirty"]]);
        let outcome = run(data, 0, age_mapping(Some(1))).run_to_end(|_| {});
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].row, 1);
        assert_eq!(outcome.issues[0].column, "age");
        assert_eq!(outcome.issues[0].severity, Severity::Error);
    }

    #[test]
    fn header_offset_is_added() {
        let data = dataset(&[
            &["report"],
            &[""],
            &["NAME", "AGE"],
            &["A", "1"],
            &["B", "x"],
        ]);
        let outcome = run(data, 2, age_mapping(Some(1))).run_to_end(|_| {});
        let rows: Vec<usize> = outcome.issues.iter().map(|issue| issue.row).collect();
        assert_eq!(rows, vec![4]);
    }

    #[test]
    fn blank_rows_contribute_nothing() {
        let data = dataset(&[&["NAME", "AGE"], &["  ", ""], &["", "", "\t"]]);
        let outcome = run(data, 0, age_mapping(Some(1))).run_to_end(|_| {});
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn required_issue_comes_first_regardless_of_rows() {
        let data = dataset(&[&["NAME"]]);
        let mut progress = Vec::new();
        let outcome = run(data, 0, age_mapping(None)).run_to_end(|p| progress.push(p));
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].row, 0);
        assert_eq!(progress, vec![100]);
    }

    #[test]
    fn batches_report_progress() {
        let data = dataset(&[&["AGE"], &["1"], &["2"], &["3"], &["4"], &["5"]]);
        let mut progress = Vec::new();
        run(data, 0, age_mapping(Some(0))).run_to_end(|p| progress.push(p));
        assert_eq!(progress, vec![40, 80, 100]);
    }
}
