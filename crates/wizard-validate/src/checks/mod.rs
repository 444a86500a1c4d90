//! Individual validation checks.

pub mod allowed;
pub mod numeric;
pub mod required;

use wizard_map::transformed_value;
use wizard_model::{ColumnMapping, DataRow, ValidationIssue};
use wizard_transform::Transformer;

use crate::rules::ValidationRules;

/// Runs every row-level check against one data row.
///
/// Blank rows and fields without a primary source produce nothing. Issues
/// are appended in mapping order, numeric before allowed-values.
pub fn check_row(
    row: &DataRow<'_>,
    row_number: usize,
    mappings: &[ColumnMapping],
    rules: &ValidationRules,
    transformer: &Transformer,
    issues: &mut Vec<ValidationIssue>,
) {
    if row.is_blank() {
        return;
    }
    for mapping in mappings.iter().filter(|mapping| mapping.is_mapped()) {
        let field = mapping.target_field.as_str();
        let value = transformed_value(row.cells, mapping, transformer);
        if rules.is_numeric(field) {
            issues.extend(numeric::check(row_number, field, &value));
        }
        if let Some(allowed) = rules.allowed_values(field) {
            issues.extend(allowed::check(row_number, field, &value, allowed));
        }
    }
}
