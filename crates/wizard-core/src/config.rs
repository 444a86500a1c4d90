//! Wizard configuration.
//!
//! Stored as TOML. Every section falls back to its defaults when missing, so
//! an empty file is a valid configuration:
//!
//! ```toml
//! [ingest]
//! max_rows = 10000
//!
//! [validation]
//! batch_size = 100
//! numeric_fields = ["age"]
//!
//! [validation.allowed_values]
//! team = ["Alpha", "Beta"]
//!
//! [mapping]
//! heuristic = "fuzzy"
//! fuzzy_threshold = 0.85
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wizard_ingest::DEFAULT_MAX_ROWS;
use wizard_map::{FuzzyHeuristic, KeywordHeuristic, MatchHeuristic, default_keywords};
use wizard_model::ExpectedColumn;
use wizard_validate::{DEFAULT_BATCH_SIZE, ValidationRules};

use crate::error::{Result, WizardError};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "import-wizard";
const APP_NAME: &str = "Import Wizard";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    pub ingest: IngestConfig,
    pub validation: ValidationConfig,
    pub mapping: MappingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Rows kept from an uploaded file.
    pub max_rows: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Rows checked per batch.
    pub batch_size: usize,
    /// Fields checked as numbers in addition to number/float columns.
    pub numeric_fields: Vec<String>,
    /// Enumerated values per field. Values outside the set are warnings.
    pub allowed_values: BTreeMap<String, Vec<String>>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            numeric_fields: Vec::new(),
            allowed_values: BTreeMap::new(),
        }
    }
}

/// Strategy proposing additional sources when no header matches a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    #[default]
    Keywords,
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub heuristic: HeuristicKind,
    /// Minimum Jaro-Winkler similarity for the fuzzy heuristic.
    pub fuzzy_threshold: f64,
    /// Keyword rules per field; `|` separates alternatives within one rule.
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::default(),
            fuzzy_threshold: FuzzyHeuristic::DEFAULT_THRESHOLD,
            keywords: default_keywords(),
        }
    }
}

impl WizardConfig {
    /// Platform config file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config_error = |message: String| WizardError::Config {
            path: path.to_path_buf(),
            message,
        };
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self =
                    toml::from_str(&content).map_err(|e| config_error(e.to_string()))?;
                info!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(config_error(e.to_string())),
        }
    }

    /// Reads the file at [`Self::default_path`], falling back to the
    /// defaults when there is no usable file.
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            warn!("could not determine configuration path, using defaults");
            return Self::default();
        };
        Self::load(&path).unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| WizardError::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| WizardError::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Validation rules for `columns`: number/float columns plus the
    /// configured numeric fields and allowed values.
    pub fn rules_for(&self, columns: &[ExpectedColumn]) -> ValidationRules {
        let mut rules = ValidationRules::from_columns(columns);
        for field in &self.validation.numeric_fields {
            rules = rules.with_numeric(field.clone());
        }
        for (field, values) in &self.validation.allowed_values {
            rules = rules.with_allowed_values(field.clone(), values.iter().cloned());
        }
        rules
    }

    pub fn heuristic(&self) -> Arc<dyn MatchHeuristic> {
        match self.mapping.heuristic {
            HeuristicKind::Keywords => {
                Arc::new(KeywordHeuristic::from_table(&self.mapping.keywords))
            }
            HeuristicKind::Fuzzy => Arc::new(FuzzyHeuristic::new(self.mapping.fuzzy_threshold)),
        }
    }
}
