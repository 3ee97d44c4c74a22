pub mod backup;
pub mod kv;
pub mod settings;
pub mod shift;
pub mod template;

// Re-export all repositories for easy importing
pub use backup::BackupRepository;
pub use kv::KvStore;
pub use settings::SettingsRepository;
pub use shift::ShiftRepository;
pub use template::TemplateRepository;
