//! Validation issue types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the import when the caller gates on errors.
    Error,
    /// Should review.
    Warning,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single finding of a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Absolute row index; `0` marks an issue that is not row specific.
    pub row: usize,
    /// Target field key.
    pub column: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_row_specific(&self) -> bool {
        self.row != 0
    }
}

/// True if any issue is an error.
pub fn has_blocking_errors(issues: &[ValidationIssue]) -> bool {
    issues
        .iter()
        .any(|issue| issue.severity == Severity::Error)
}

pub fn error_count(issues: &[ValidationIssue]) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity == Severity::Error)
        .count()
}

pub fn warning_count(issues: &[ValidationIssue]) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity == Severity::Warning)
        .count()
}
