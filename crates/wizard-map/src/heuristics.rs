//! Strategies proposing related columns when no header matches a field exactly.

use std::collections::BTreeMap;
use std::fmt::Debug;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use wizard_model::ExpectedColumn;

use crate::utils::normalize_text;

/// Proposes source columns related to `column` when auto-mapping found no
/// exact header match.
///
/// Returned indices become additional sources, in order. Implementations
/// must not return duplicates.
pub trait MatchHeuristic: Debug + Send + Sync {
    fn related_columns(&self, column: &ExpectedColumn, header: &[String]) -> Vec<usize>;
}

/// One keyword rule: the first header containing any alternative matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    alternatives: Vec<String>,
}

impl KeywordRule {
    /// Parses `first|fname` style rules. Alternatives are case-insensitive.
    pub fn parse(rule: &str) -> Self {
        Self {
            alternatives: rule
                .split('|')
                .map(|alt| alt.trim().to_lowercase())
                .filter(|alt| !alt.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, header: &str) -> bool {
        let header = header.to_lowercase();
        self.alternatives.iter().any(|alt| header.contains(alt))
    }

    fn first_match(&self, header: &[String]) -> Option<usize> {
        header.iter().position(|cell| self.matches(cell))
    }
}

/// Built-in keyword table: field key to rules.
pub fn default_keywords() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([
        ("name".to_string(), vec!["first|fname".to_string()]),
        ("surname".to_string(), vec!["last|lname".to_string()]),
        (
            "team".to_string(),
            vec!["department".to_string(), "group".to_string()],
        ),
    ])
}

/// Substring keyword matching keyed by field.
///
/// Each rule contributes at most one column: the first header cell containing
/// one of the rule's alternatives.
#[derive(Debug, Clone)]
pub struct KeywordHeuristic {
    rules: BTreeMap<String, Vec<KeywordRule>>,
}

impl KeywordHeuristic {
    pub fn from_table(table: &BTreeMap<String, Vec<String>>) -> Self {
        let rules = table
            .iter()
            .map(|(field, rules)| {
                (
                    field.trim().to_lowercase(),
                    rules.iter().map(|rule| KeywordRule::parse(rule)).collect(),
                )
            })
            .collect();
        Self { rules }
    }
}

impl Default for KeywordHeuristic {
    fn default() -> Self {
        Self::from_table(&default_keywords())
    }
}

impl MatchHeuristic for KeywordHeuristic {
    fn related_columns(&self, column: &ExpectedColumn, header: &[String]) -> Vec<usize> {
        let Some(rules) = self.rules.get(&column.field.to_lowercase()) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for index in rules.iter().filter_map(|rule| rule.first_match(header)) {
            if !found.contains(&index) {
                found.push(index);
            }
        }
        found
    }
}

/// Jaro-Winkler similarity between the normalized field key or label and
/// each normalized header cell.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyHeuristic {
    threshold: f64,
}

impl FuzzyHeuristic {
    pub const DEFAULT_THRESHOLD: f64 = 0.85;

    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn score(&self, column: &ExpectedColumn, header: &str) -> f64 {
        let header = normalize_text(header);
        if header.is_empty() {
            return 0.0;
        }
        let field = normalize_text(&column.field);
        let label = normalize_text(&column.label);
        jaro_similarity(field.chars(), header.chars())
            .max(jaro_similarity(label.chars(), header.chars()))
    }
}

impl Default for FuzzyHeuristic {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl MatchHeuristic for FuzzyHeuristic {
    /// Candidates at or above the threshold, best score first.
    fn related_columns(&self, column: &ExpectedColumn, header: &[String]) -> Vec<usize> {
        let mut scored: Vec<(usize, f64)> = header
            .iter()
            .enumerate()
            .map(|(index, cell)| (index, self.score(column, cell)))
            .filter(|(_, score)| *score >= self.threshold)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(index, _)| index).collect()
    }
}
