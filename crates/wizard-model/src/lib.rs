pub mod column;
pub mod dataset;
pub mod issue;
pub mod mapping;
pub mod template;
pub mod transformation;

pub use column::{DataType, ExpectedColumn};
pub use dataset::{CellUpdate, DataRow, TabularDataset, is_blank_row};
pub use issue::{Severity, ValidationIssue, error_count, has_blocking_errors, warning_count};
pub use mapping::{AdditionalSource, ColumnMapping};
pub use template::TransformationTemplate;
pub use transformation::{
    DEFAULT_FALSE_VALUES, DEFAULT_TRUE_VALUES, TransformationConfig, TransformationOptions,
    TransformationType,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_errors_follow_severity() {
        let issues = vec![
            ValidationIssue::warning(3, "team", "Team name \"x\" is not standardized"),
            ValidationIssue::warning(4, "team", "Team name \"y\" is not standardized"),
        ];
        assert!(!has_blocking_errors(&issues));
        assert_eq!(warning_count(&issues), 2);

        let mut issues = issues;
        issues.push(ValidationIssue::error(0, "age", "Required column \"age\" is not mapped"));
        assert!(has_blocking_errors(&issues));
        assert_eq!(error_count(&issues), 1);
    }
}
