//! Per-field rule configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use wizard_model::ExpectedColumn;

/// Which fields are numeric and which have an enumerated value set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    numeric_fields: BTreeSet<String>,
    /// Field to lowercased allowed values.
    allowed_values: BTreeMap<String, BTreeSet<String>>,
}

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules derived from column types: `number` and `float` columns are
    /// numeric.
    pub fn from_columns(columns: &[ExpectedColumn]) -> Self {
        Self {
            numeric_fields: columns
                .iter()
                .filter(|column| column.data_type.is_numeric())
                .map(|column| column.field.clone())
                .collect(),
            allowed_values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_numeric(mut self, field: impl Into<String>) -> Self {
        self.numeric_fields.insert(field.into());
        self
    }

    #[must_use]
    pub fn with_allowed_values<I>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.allowed_values.insert(
            field.into(),
            values
                .into_iter()
                .map(|value| value.as_ref().trim().to_lowercase())
                .collect(),
        );
        self
    }

    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric_fields.contains(field)
    }

    pub fn allowed_values(&self, field: &str) -> Option<&BTreeSet<String>> {
        self.allowed_values.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.numeric_fields.is_empty() && self.allowed_values.is_empty()
    }
}
