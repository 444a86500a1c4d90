//! Required mapping checks.
//!
//! Checks that every required field has a primary source column.

use wizard_model::{ColumnMapping, ValidationIssue};

/// One error per required field without a primary source, at row 0.
pub fn check(mappings: &[ColumnMapping]) -> Vec<ValidationIssue> {
    mappings
        .iter()
        .filter(|mapping| mapping.required && mapping.source_index.is_none())
        .map(|mapping| {
            ValidationIssue::error(
                0,
                mapping.target_field.clone(),
                format!("Required column \"{}\" is not mapped", mapping.target_field),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_model::{DataType, ExpectedColumn, Severity};

    #[test]
    fn unmapped_required_field_is_reported_once() {
        let mut mappings = vec![
            ColumnMapping::unmapped(&ExpectedColumn::new("age", "AGE", DataType::Number).required()),
            ColumnMapping::unmapped(&ExpectedColumn::new("team", "TEAM", DataType::Text)),
        ];
        let issues = check(&mappings);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row, 0);
        assert_eq!(issues[0].column, "age");
        assert_eq!(issues[0].severity, Severity::Error);

        mappings[0].source_index = Some(1);
        assert!(check(&mappings).is_empty());
    }
}
