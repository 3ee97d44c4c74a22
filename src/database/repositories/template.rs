use anyhow::Result;
use chrono::Utc;

use crate::database::models::{TemplateInput, TipOutTemplate};
use crate::database::repositories::kv::{KvStore, TEMPLATES_KEY};

#[derive(Clone)]
pub struct TemplateRepository {
    store: KvStore,
}

impl TemplateRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Saved templates in creation order; the built-in presets when none were saved.
    pub async fn get_templates(&self) -> Result<Vec<TipOutTemplate>> {
        Ok(self
            .store
            .get_json::<Vec<TipOutTemplate>>(TEMPLATES_KEY)
            .await?
            .unwrap_or_else(TipOutTemplate::builtin_presets))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<TipOutTemplate>> {
        let templates = self.get_templates().await?;
        Ok(templates.into_iter().find(|t| t.id == id))
    }

    pub async fn save_template(&self, input: TemplateInput) -> Result<TipOutTemplate> {
        let mut templates = self.get_templates().await?;
        let template = TipOutTemplate::from_input(input, Utc::now());

        templates.push(template.clone());
        self.store.set_json(TEMPLATES_KEY, &templates).await?;

        Ok(template)
    }

    /// Returns false when no template had the given id.
    pub async fn delete_template(&self, id: &str) -> Result<bool> {
        let mut templates = self.get_templates().await?;
        let before = templates.len();
        templates.retain(|t| t.id != id);

        if templates.len() == before {
            return Ok(false);
        }

        self.store.set_json(TEMPLATES_KEY, &templates).await?;
        Ok(true)
    }
}
