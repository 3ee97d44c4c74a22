pub mod backup;
pub mod settings;
pub mod shift;
pub mod template;

// Re-export all models for easy importing
pub use backup::*;
pub use settings::*;
pub use shift::*;
pub use template::*;
