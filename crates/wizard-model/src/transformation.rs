//! Per-field transformation configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lexicon used by boolean transformations when no `true_values` are set.
pub const DEFAULT_TRUE_VALUES: [&str; 3] = ["true", "yes", "1"];
/// Lexicon used by boolean transformations when no `false_values` are set.
pub const DEFAULT_FALSE_VALUES: [&str; 3] = ["false", "no", "0"];

/// Kind of transformation applied to a field's merged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransformationType {
    #[default]
    None,
    Trim,
    Uppercase,
    Lowercase,
    Capitalize,
    Number,
    Date,
    Boolean,
    Custom,
    /// Any tag this version does not know. Behaves as identity.
    Unknown,
}

impl TransformationType {
    pub const ALL: [TransformationType; 9] = [
        Self::None,
        Self::Trim,
        Self::Uppercase,
        Self::Lowercase,
        Self::Capitalize,
        Self::Number,
        Self::Date,
        Self::Boolean,
        Self::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Trim => "trim",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Capitalize => "capitalize",
            Self::Number => "number",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Custom => "custom",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a tag, returning `None` for unknown tags.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
    }
}

impl From<String> for TransformationType {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or(Self::Unknown)
    }
}

impl From<TransformationType> for String {
    fn from(value: TransformationType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TransformationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific options. Only the options relevant to the selected
/// [`TransformationType`] are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationOptions {
    /// Output layout for dates (`YYYY`, `MM`, `DD`, `M`, `D` tokens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_values: Option<Vec<String>>,
    /// Name of a registered custom function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_formula: Option<String>,
}

/// A transformation and its options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationConfig {
    #[serde(rename = "type")]
    pub kind: TransformationType,
    #[serde(default)]
    pub options: TransformationOptions,
}

impl TransformationConfig {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(kind: TransformationType) -> Self {
        Self {
            kind,
            options: TransformationOptions::default(),
        }
    }

    pub fn number(decimal_places: u32) -> Self {
        Self {
            kind: TransformationType::Number,
            options: TransformationOptions {
                decimal_places: Some(decimal_places),
                ..TransformationOptions::default()
            },
        }
    }

    pub fn boolean<T, F>(true_values: T, false_values: F) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            kind: TransformationType::Boolean,
            options: TransformationOptions {
                true_values: Some(true_values.into_iter().map(Into::into).collect()),
                false_values: Some(false_values.into_iter().map(Into::into).collect()),
                ..TransformationOptions::default()
            },
        }
    }

    /// Boolean transformation with the default lexicon spelled out.
    pub fn boolean_default() -> Self {
        Self::boolean(DEFAULT_TRUE_VALUES, DEFAULT_FALSE_VALUES)
    }

    pub fn date(date_format: impl Into<String>) -> Self {
        Self {
            kind: TransformationType::Date,
            options: TransformationOptions {
                date_format: Some(date_format.into()),
                ..TransformationOptions::default()
            },
        }
    }

    pub fn custom(formula: impl Into<String>) -> Self {
        Self {
            kind: TransformationType::Custom,
            options: TransformationOptions {
                custom_formula: Some(formula.into()),
                ..TransformationOptions::default()
            },
        }
    }

    /// True for anything other than `none`.
    pub fn is_active(&self) -> bool {
        self.kind != TransformationType::None
    }
}
