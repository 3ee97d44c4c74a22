use anyhow::Result;

use crate::database::models::{OnboardingInput, Settings, SettingsUpdate};
use crate::database::repositories::kv::{KvStore, SETTINGS_KEY};

#[derive(Clone)]
pub struct SettingsRepository {
    store: KvStore,
}

impl SettingsRepository {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// The stored settings, or the defaults when nothing was saved yet.
    pub async fn get_settings(&self) -> Result<Settings> {
        Ok(self
            .store
            .get_json::<Settings>(SETTINGS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn save_settings(&self, settings: Settings) -> Result<Settings> {
        self.store.set_json(SETTINGS_KEY, &settings).await?;
        Ok(settings)
    }

    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<Settings> {
        let mut settings = self.get_settings().await?;
        settings.apply(update);
        self.save_settings(settings).await
    }

    pub async fn complete_onboarding(&self, input: OnboardingInput) -> Result<Settings> {
        let settings = input.into_settings();
        log::info!("Onboarding completed for role {:?}", settings.role);
        self.save_settings(settings).await
    }
}
