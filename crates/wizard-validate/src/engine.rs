//! Validation lifecycle and generation tracking.

use tracing::{info, warn};
use wizard_model::{ColumnMapping, TabularDataset, ValidationIssue};
use wizard_transform::Transformer;

use crate::DEFAULT_BATCH_SIZE;
use crate::rules::ValidationRules;
use crate::run::{ValidationOutcome, ValidationRun};

/// `Idle -> Running(progress) -> Complete(issues)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationState {
    #[default]
    Idle,
    Running { generation: u64, progress: u8 },
    Complete {
        generation: u64,
        issues: Vec<ValidationIssue>,
    },
}

impl ValidationState {
    pub fn progress(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running { progress, .. } => *progress,
            Self::Complete { .. } => 100,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }
}

/// Starts validation runs and accepts only the latest one's results.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    batch_size: usize,
    generation: u64,
    state: ValidationState,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl ValidationEngine {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            generation: 0,
            state: ValidationState::Idle,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Generation of the most recently started run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Issues of the completed run; empty while idle or running.
    pub fn issues(&self) -> &[ValidationIssue] {
        match &self.state {
            ValidationState::Complete { issues, .. } => issues.as_slice(),
            _ => &[],
        }
    }

    /// Starts a new generation. Any run still in flight becomes stale.
    pub fn start(
        &mut self,
        dataset: &TabularDataset,
        header_row: usize,
        mappings: &[ColumnMapping],
        rules: &ValidationRules,
        transformer: &Transformer,
    ) -> ValidationRun {
        self.generation += 1;
        self.state = ValidationState::Running {
            generation: self.generation,
            progress: 0,
        };
        info!(
            generation = self.generation,
            header_row,
            rows = dataset.len(),
            "validation started"
        );
        ValidationRun::new(
            self.generation,
            dataset.clone(),
            header_row,
            mappings.to_vec(),
            rules.clone(),
            transformer.clone(),
            self.batch_size,
        )
    }

    /// Records progress of `generation`. Returns false for stale runs.
    pub fn report_progress(&mut self, generation: u64, progress: u8) -> bool {
        match &mut self.state {
            ValidationState::Running {
                generation: current,
                progress: stored,
            } if *current == generation => {
                // Progress never moves backwards within a run.
                *stored = (*stored).max(progress.min(100));
                true
            }
            _ => false,
        }
    }

    /// Applies a finished run. Results from a superseded generation are
    /// dropped and `false` is returned.
    pub fn complete(&mut self, outcome: ValidationOutcome) -> bool {
        if outcome.generation != self.generation {
            warn!(
                stale = outcome.generation,
                current = self.generation,
                "discarding stale validation result"
            );
            return false;
        }
        info!(
            generation = outcome.generation,
            issues = outcome.issues.len(),
            "validation complete"
        );
        self.state = ValidationState::Complete {
            generation: outcome.generation,
            issues: outcome.issues,
        };
        true
    }

    /// Runs a full pass synchronously and returns the resulting issues.
    pub fn validate(
        &mut self,
        dataset: &TabularDataset,
        header_row: usize,
        mappings: &[ColumnMapping],
        rules: &ValidationRules,
        transformer: &Transformer,
    ) -> &[ValidationIssue] {
        let run = self.start(dataset, header_row, mappings, rules, transformer);
        let generation = run.generation();
        let outcome = run.run_to_end(|progress| {
            self.report_progress(generation, progress);
        });
        self.complete(outcome);
        self.issues()
    }

    /// Back to `Idle`, invalidating any run in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = ValidationState::Idle;
    }
}
