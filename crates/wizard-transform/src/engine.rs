//! Transformation dispatch.

use tracing::trace;
use wizard_model::{
    DEFAULT_FALSE_VALUES, DEFAULT_TRUE_VALUES, TransformationConfig, TransformationOptions,
    TransformationType,
};

use crate::custom::CustomFunctions;
use crate::normalization::{capitalize_words, format_date, format_fixed, parse_date, parse_leading_float};

/// Output layout used when a date transformation has no `date_format`.
const DEFAULT_DATE_FORMAT: &str = "M/D/YYYY";

/// Applies `config` to `value` without any custom functions registered.
///
/// Empty input is returned unchanged for every transformation type.
pub fn transform(value: &str, config: &TransformationConfig) -> String {
    Transformer::default().apply(value, config)
}

/// Applies transformations, resolving `custom` ones against a registry.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    custom: CustomFunctions,
}

impl Transformer {
    pub fn new(custom: CustomFunctions) -> Self {
        Self { custom }
    }

    pub fn custom_functions(&self) -> &CustomFunctions {
        &self.custom
    }

    pub fn apply(&self, value: &str, config: &TransformationConfig) -> String {
        if value.is_empty() {
            return String::new();
        }
        let options = &config.options;
        match config.kind {
            TransformationType::None | TransformationType::Unknown => value.to_string(),
            TransformationType::Trim => value.trim().to_string(),
            TransformationType::Uppercase => value.to_uppercase(),
            TransformationType::Lowercase => value.to_lowercase(),
            TransformationType::Capitalize => capitalize_words(value),
            TransformationType::Number => parse_leading_float(value)
                .and_then(|number| format_fixed(number, options.decimal_places.unwrap_or(0)))
                .unwrap_or_else(|| value.to_string()),
            TransformationType::Boolean => to_boolean(value, options),
            TransformationType::Date => match parse_date(value) {
                Some(date) => format_date(
                    date,
                    options.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT),
                ),
                None => value.to_string(),
            },
            TransformationType::Custom => self.apply_custom(value, options),
        }
    }

    fn apply_custom(&self, value: &str, options: &TransformationOptions) -> String {
        let function = options
            .custom_formula
            .as_deref()
            .and_then(|name| self.custom.get(name));
        match function {
            Some(function) => function(value),
            None => {
                trace!(formula = ?options.custom_formula, "no custom function registered");
                format!("{value} (custom)")
            }
        }
    }
}

fn to_boolean(value: &str, options: &TransformationOptions) -> String {
    let matches = |candidates: &[String]| candidates.iter().any(|c| c.eq_ignore_ascii_case(value));
    let defaults = |values: &[&str]| values.iter().map(|v| (*v).to_string()).collect::<Vec<_>>();

    let true_values = options
        .true_values
        .clone()
        .unwrap_or_else(|| defaults(&DEFAULT_TRUE_VALUES));
    if matches(&true_values) {
        return "true".to_string();
    }
    let false_values = options
        .false_values
        .clone()
        .unwrap_or_else(|| defaults(&DEFAULT_FALSE_VALUES));
    if matches(&false_values) {
        return "false".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_collapses_whitespace() {
        let config = TransformationConfig::of(TransformationType::Capitalize);
        assert_eq!(transform("hello world", &config), "Hello World");
        assert_eq!(transform("mIxEd   CASE text", &config), "Mixed Case Text");
    }

    #[test]
    fn number_uses_decimal_places() {
        assert_eq!(transform("3.14159", &TransformationConfig::number(2)), "3.14");
        assert_eq!(transform("42abc", &TransformationConfig::number(1)), "42.0");
        assert_eq!(
            transform("7.6", &TransformationConfig::of(TransformationType::Number)),
            "8"
        );
        assert_eq!(transform("abc", &TransformationConfig::number(0)), "abc");
        assert_eq!(transform("2.5", &TransformationConfig::number(101)), "2.5");
    }

    #[test]
    fn boolean_matches_lexicon_case_insensitively() {
        let config = TransformationConfig::boolean(["yes"], ["no"]);
        assert_eq!(transform("YES", &config), "true");
        assert_eq!(transform("No", &config), "false");
        assert_eq!(transform("maybe", &config), "maybe");

        let defaults = TransformationConfig::of(TransformationType::Boolean);
        assert_eq!(transform("1", &defaults), "true");
        assert_eq!(transform("FALSE", &defaults), "false");
    }

    #[test]
    fn date_formats_parsed_values() {
        let default = TransformationConfig::of(TransformationType::Date);
        assert_eq!(transform("2024-01-05", &default), "1/5/2024");
        assert_eq!(
            transform("2024-01-05", &TransformationConfig::date("YYYY/MM/DD")),
            "2024/01/05"
        );
        assert_eq!(transform("not a date", &default), "not a date");
    }

    #[test]
    fn custom_uses_registered_function() {
        let transformer = Transformer::new(
            CustomFunctions::new().with("reverse", |value| value.chars().rev().collect()),
        );
        assert_eq!(
            transformer.apply("abc", &TransformationConfig::custom("reverse")),
            "cba"
        );
        assert_eq!(
            transformer.apply("abc", &TransformationConfig::custom("missing")),
            "abc (custom)"
        );
        assert_eq!(
            transform("abc", &TransformationConfig::of(TransformationType::Custom)),
            "abc (custom)"
        );
    }

    #[test]
    fn unknown_is_identity() {
        let config = TransformationConfig::of(TransformationType::Unknown);
        assert_eq!(transform(" keep ", &config), " keep ");
    }
}
