//! Numeric field checks.
//!
//! Blank values are not type errors; missing data is the concern of the
//! required-mapping check.

use wizard_model::ValidationIssue;
use wizard_transform::normalization::is_numeric;

pub fn check(row: usize, field: &str, value: &str) -> Option<ValidationIssue> {
    if is_numeric(value) {
        return None;
    }
    Some(ValidationIssue::error(
        row,
        field,
        format!("Invalid {field} value: \"{value}\""),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_pass() {
        assert!(check(1, "age", "30").is_none());
        assert!(check(1, "age", " 30.5 ").is_none());
        assert!(check(1, "age", "").is_none());
    }

    #[test]
    fn test_text_is_an_error() {
        let issue = check(4, "age", "thirty").unwrap();
        assert_eq!(issue.row, 4);
        assert_eq!(issue.message, "Invalid age value: \"thirty\"");
    }
}
