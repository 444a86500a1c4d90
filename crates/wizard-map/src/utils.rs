//! Utility functions for mapping operations.

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display label for a source column: the header cell, or `Column N`
/// (1-based) when the header cell is missing or blank.
pub fn column_label(header: &[String], index: usize) -> String {
    match header.get(index) {
        Some(cell) if !cell.trim().is_empty() => cell.clone(),
        _ => format!("Column {}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  First_Name "), "first name");
        assert_eq!(normalize_text("dept./group"), "dept group");
    }

    #[test]
    fn test_column_label_fallback() {
        let header = vec!["NAME".to_string(), " ".to_string()];
        assert_eq!(column_label(&header, 0), "NAME");
        assert_eq!(column_label(&header, 1), "Column 2");
        assert_eq!(column_label(&header, 4), "Column 5");
    }
}
