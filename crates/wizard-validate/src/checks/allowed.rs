//! Enumerated value checks.

use std::collections::BTreeSet;

use wizard_model::ValidationIssue;

/// Warns when the lowercased value is not in `allowed`. Blank values pass.
pub fn check(
    row: usize,
    field: &str,
    value: &str,
    allowed: &BTreeSet<String>,
) -> Option<ValidationIssue> {
    let normalized = value.to_lowercase();
    if normalized.is_empty() || allowed.contains(&normalized) {
        return None;
    }
    Some(ValidationIssue::warning(
        row,
        field,
        format!("Value \"{normalized}\" for {field} is not standardized"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> BTreeSet<String> {
        ["alpha", "beta", "gamma"].into_iter().map(String::from).collect()
    }

    #[test]
    fn test_case_insensitive_membership() {
        assert!(check(2, "team", "Alpha", &teams()).is_none());
        assert!(check(2, "team", "", &teams()).is_none());
    }

    #[test]
    fn test_unknown_value_warns() {
        let issue = check(2, "team", "Team A", &teams()).unwrap();
        assert_eq!(issue.message, "Value \"team a\" for team is not standardized");
    }
}
