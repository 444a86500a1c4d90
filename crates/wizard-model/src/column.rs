//! Expected target columns supplied by the consuming system.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a target field.
///
/// The set is open: unrecognised tags are preserved as [`DataType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
    Float,
    Json,
    Enum,
    Other(String),
}

impl DataType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Float => "float",
            Self::Json => "json",
            Self::Enum => "enum",
            Self::Other(tag) => tag,
        }
    }

    /// True for types whose values must parse as numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Float)
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "text" => Self::Text,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "float" => Self::Float,
            "json" => Self::Json,
            "enum" => Self::Enum,
            _ => Self::Other(value),
        }
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field the import must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedColumn {
    /// Unique key. Dotted or bracketed paths (`address.city`,
    /// `documents[0].type`) are kept opaque here.
    pub field: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub data_type: DataType,
}

impl ExpectedColumn {
    pub fn new(field: impl Into<String>, label: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            required: false,
            data_type,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
