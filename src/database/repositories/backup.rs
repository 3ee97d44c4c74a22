use anyhow::Result;
use chrono::Utc;

use crate::database::models::{ExportBundle, ImportBundle, ImportSummary};
use crate::database::repositories::kv::{KvStore, SETTINGS_KEY, SHIFTS_KEY, TEMPLATES_KEY};
use crate::database::repositories::{SettingsRepository, ShiftRepository, TemplateRepository};

/// Whole-store operations: export, import and reset.
#[derive(Clone)]
pub struct BackupRepository {
    store: KvStore,
    shifts: ShiftRepository,
    settings: SettingsRepository,
    templates: TemplateRepository,
}

impl BackupRepository {
    pub fn new(store: KvStore) -> Self {
        Self {
            shifts: ShiftRepository::new(store.clone()),
            settings: SettingsRepository::new(store.clone()),
            templates: TemplateRepository::new(store.clone()),
            store,
        }
    }

    pub async fn export_data(&self) -> Result<ExportBundle> {
        Ok(ExportBundle {
            shifts: self.shifts.get_shifts().await?,
            settings: self.settings.get_settings().await?,
            templates: self.templates.get_templates().await?,
            exported_at: Utc::now(),
        })
    }

    pub async fn import_data(&self, bundle: ImportBundle) -> Result<ImportSummary> {
        let mut summary = ImportSummary {
            shifts_imported: None,
            settings_imported: false,
            templates_imported: None,
        };

        if let Some(shifts) = bundle.shifts {
            self.store.set_json(SHIFTS_KEY, &shifts).await?;
            summary.shifts_imported = Some(shifts.len());
        }
        if let Some(settings) = bundle.settings {
            self.store.set_json(SETTINGS_KEY, &settings).await?;
            summary.settings_imported = true;
        }
        if let Some(templates) = bundle.templates {
            self.store.set_json(TEMPLATES_KEY, &templates).await?;
            summary.templates_imported = Some(templates.len());
        }

        log::info!("Imported data: {:?}", summary);
        Ok(summary)
    }

    pub async fn clear_all_data(&self) -> Result<()> {
        let removed = self
            .store
            .remove(&[SHIFTS_KEY, SETTINGS_KEY, TEMPLATES_KEY])
            .await?;
        log::warn!("Cleared all data ({} stored entries removed)", removed);
        Ok(())
    }
}
