use actix_web::web;
use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use database::repositories::{
    BackupRepository, KvStore, SettingsRepository, ShiftRepository, TemplateRepository,
};

/// Repositories shared by every handler, all backed by one key-value store.
#[derive(Clone)]
pub struct AppState {
    pub shift_repository: ShiftRepository,
    pub settings_repository: SettingsRepository,
    pub template_repository: TemplateRepository,
    pub backup_repository: BackupRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let store = KvStore::new(pool);

        Self {
            shift_repository: ShiftRepository::new(store.clone()),
            settings_repository: SettingsRepository::new(store.clone()),
            template_repository: TemplateRepository::new(store.clone()),
            backup_repository: BackupRepository::new(store),
        }
    }

    /// Registers the repositories as app data and mounts the API routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.shift_repository.clone()))
            .app_data(web::Data::new(self.settings_repository.clone()))
            .app_data(web::Data::new(self.template_repository.clone()))
            .app_data(web::Data::new(self.backup_repository.clone()))
            .configure(routes::configure);
    }
}
