//! In-memory template store.

use chrono::{DateTime, Local};
use tracing::{debug, info};
use wizard_model::{ColumnMapping, TransformationTemplate};

/// Templates saved during the current session, in save order.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<TransformationTemplate>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `mappings` under a new id.
    pub fn save(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        mappings: &[ColumnMapping],
    ) -> &TransformationTemplate {
        self.save_at(name, description, mappings, Local::now())
    }

    /// [`Self::save`] with an explicit clock.
    pub fn save_at(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        mappings: &[ColumnMapping],
        now: DateTime<Local>,
    ) -> &TransformationTemplate {
        let base = format!("template-{}", now.timestamp_millis());
        let mut id = base.clone();
        let mut suffix = 1;
        while self.get(&id).is_some() {
            suffix += 1;
            id = format!("{base}-{suffix}");
        }
        let template = TransformationTemplate {
            id,
            name: name.into(),
            description: description.into(),
            date_created: now.date_naive(),
            mappings: mappings.to_vec(),
        };
        info!(
            id = %template.id,
            name = %template.name,
            active_transformations = template.active_transformation_count(),
            "template saved"
        );
        self.insert(template)
    }

    /// Adds a template built elsewhere, replacing one with the same id.
    pub fn insert(&mut self, template: TransformationTemplate) -> &TransformationTemplate {
        let position = match self.templates.iter().position(|t| t.id == template.id) {
            Some(position) => {
                debug!(id = %template.id, "template replaced");
                self.templates[position] = template;
                position
            }
            None => {
                self.templates.push(template);
                self.templates.len() - 1
            }
        };
        &self.templates[position]
    }

    pub fn get(&self, id: &str) -> Option<&TransformationTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| template.id != id);
        before != self.templates.len()
    }

    pub fn list(&self) -> &[TransformationTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wizard_model::{DataType, ExpectedColumn, TransformationConfig, TransformationType};

    fn mappings() -> Vec<ColumnMapping> {
        let mut name = ColumnMapping::unmapped(&ExpectedColumn::new("name", "Name", DataType::Text));
        name.transformation = TransformationConfig::of(TransformationType::Trim);
        let age = ColumnMapping::unmapped(&ExpectedColumn::new("age", "Age", DataType::Number));
        vec![name, age]
    }

    #[test]
    fn test_ids_are_unique_within_one_millisecond() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let mut store = TemplateStore::new();
        let first = store.save_at("A", "", &mappings(), now).id.clone();
        let second = store.save_at("B", "", &mappings(), now).id.clone();

        assert_ne!(first, second);
        assert_eq!(second, format!("{first}-2"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].date_created.to_string(), "2024-03-09");
    }

    #[test]
    fn test_active_transformation_count_and_delete() {
        let mut store = TemplateStore::new();
        let id = store.save("Names", "trim names", &mappings()).id.clone();
        assert_eq!(store.get(&id).unwrap().active_transformation_count(), 1);

        assert!(store.delete(&id));
        assert!(!store.delete(&id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut store = TemplateStore::new();
        let mut template = store.save("A", "", &mappings()).clone();
        template.name = "Renamed".to_string();
        store.insert(template);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].name, "Renamed");
    }
}
