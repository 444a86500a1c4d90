//! Command-line mapping and transformation overrides.
//!
//! - `--map age=2` sets the primary source, `--map age=none` clears it
//! - `--merge name=0,3` replaces the additional sources
//! - `--transform age=number:2`, `--transform born=date:YYYY-MM-DD`,
//!   `--transform active=boolean:y|si:n|no`, `--transform code=custom:slug`

use wizard_model::{TransformationConfig, TransformationType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    pub field: String,
    pub source_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOverride {
    pub field: String,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOverride {
    pub field: String,
    pub config: TransformationConfig,
}

fn split_field(raw: &str) -> Result<(String, &str), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    Ok((field.to_string(), value.trim()))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a column index"))
}

pub fn parse_mapping_override(raw: &str) -> Result<MappingOverride, String> {
    let (field, value) = split_field(raw)?;
    let source_index = match value {
        "" | "none" | "-" => None,
        index => Some(parse_index(index)?),
    };
    Ok(MappingOverride {
        field,
        source_index,
    })
}

pub fn parse_merge_override(raw: &str) -> Result<MergeOverride, String> {
    let (field, value) = split_field(raw)?;
    let indices = value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_index)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MergeOverride { field, indices })
}

fn split_values(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_transform_override(raw: &str) -> Result<TransformOverride, String> {
    let (field, value) = split_field(raw)?;
    let (tag, argument) = match value.split_once(':') {
        Some((tag, argument)) => (tag, Some(argument)),
        None => (value, None),
    };
    let kind = TransformationType::parse(tag)
        .ok_or_else(|| format!("unknown transformation `{tag}`"))?;

    let config = match (kind, argument) {
        (TransformationType::Number, Some(places)) => {
            let places = places
                .parse()
                .map_err(|_| format!("`{places}` is not a number of decimal places"))?;
            TransformationConfig::number(places)
        }
        (TransformationType::Date, Some(format)) => TransformationConfig::date(format),
        (TransformationType::Boolean, Some(lexicon)) => {
            let (true_values, false_values) = lexicon.split_once(':').unwrap_or((lexicon, ""));
            TransformationConfig::boolean(split_values(true_values), split_values(false_values))
        }
        (TransformationType::Custom, Some(name)) => TransformationConfig::custom(name),
        (kind, None) => TransformationConfig::of(kind),
        (kind, Some(_)) => return Err(format!("`{kind}` takes no argument")),
    };
    Ok(TransformOverride { field, config })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_override() {
        assert_eq!(
            parse_mapping_override("age=2").unwrap(),
            MappingOverride {
                field: "age".to_string(),
                source_index: Some(2)
            }
        );
        assert_eq!(parse_mapping_override("age=none").unwrap().source_index, None);
        assert!(parse_mapping_override("age").is_err());
        assert!(parse_mapping_override("=2").is_err());
        assert!(parse_mapping_override("age=-1").is_err());
    }

    #[test]
    fn test_merge_override() {
        let merge = parse_merge_override("name=0, 3,").unwrap();
        assert_eq!(merge.indices, vec![0, 3]);
        assert!(parse_merge_override("name=a").is_err());
    }

    #[test]
    fn test_transform_override() {
        let number = parse_transform_override("age=number:2").unwrap();
        assert_eq!(number.config, TransformationConfig::number(2));

        let plain = parse_transform_override("name=capitalize").unwrap();
        assert_eq!(plain.config.kind, TransformationType::Capitalize);

        let boolean = parse_transform_override("active=boolean:y|si:n|no").unwrap();
        assert_eq!(
            boolean.config.options.true_values,
            Some(vec!["y".to_string(), "si".to_string()])
        );
        assert_eq!(
            boolean.config.options.false_values,
            Some(vec!["n".to_string(), "no".to_string()])
        );

        assert!(parse_transform_override("age=round").is_err());
        assert!(parse_transform_override("name=trim:x").is_err());
    }
}
