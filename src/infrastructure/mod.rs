//! Infrastructure layer module
//!
//! This module contains the external data sources the leaderboard reads on
//! every request: the imported payload and the participant registry.

pub mod import;
pub mod registry;

// Re-export commonly used types
pub use import::{ImportLoader, InMemoryImportLoader, JsonFileImportLoader};
pub use registry::{InMemoryRegistry, JsonFileRegistry, UserRegistry};

use std::sync::Arc;

/// Data source collection for dependency injection
#[derive(Debug, Clone)]
pub struct DataSources {
    /// Imported payload loader
    pub import: Arc<dyn ImportLoader>,
    /// Participant registry
    pub registry: Arc<dyn UserRegistry>,
}

impl DataSources {
    /// Collect explicit sources
    pub fn new(import: Arc<dyn ImportLoader>, registry: Arc<dyn UserRegistry>) -> Self {
        Self { import, registry }
    }

    /// File-backed sources at the configured locations
    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        tracing::info!(
            "🏗️  Using import {} and registry {}",
            config.sources.import_path,
            config.sources.registry_path
        );

        Self {
            import: Arc::new(JsonFileImportLoader::new(&config.sources.import_path)),
            registry: Arc::new(JsonFileRegistry::new(&config.sources.registry_path)),
        }
    }
}
