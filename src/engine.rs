use crate::catalog::catalog_manager::CatalogManager;
use crate::config::EngineConfig;
use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;
use crate::storage::storage_engine::StorageEngine;
use crate::types::parser_types::Statement;

/// One engine session: the catalog, the heap files behind it and the
/// configuration they were opened with.
pub struct Engine {
    config: EngineConfig,
    catalog: CatalogManager,
    storage: StorageEngine,
}

impl Engine {
    /// Loads the catalog, then re-opens the data file of every table in it.
    pub fn open(config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = CatalogManager::open(config.catalog_path())?;
        let storage = StorageEngine::new(
            config.data_dir.clone(),
            config.data_file_extension.clone(),
        );
        let restored = storage.restore(catalog.all_tables().iter())?;

        tracing::info!(
            data_dir = ?config.data_dir,
            tables = restored,
            "engine opened"
        );

        Ok(Self {
            config,
            catalog,
            storage,
        })
    }

    /// Engine without any files; everything is gone after `shutdown`.
    pub fn in_memory() -> Self {
        let config = EngineConfig::in_memory();
        let storage = StorageEngine::new(None, config.data_file_extension.clone());
        Self {
            config,
            catalog: CatalogManager::in_memory(),
            storage,
        }
    }

    /// Runs one statement and returns its printable result.
    pub fn execute(&self, statement: &Statement) -> Result<String, EngineError> {
        Executer::new(&self.catalog, &self.storage).execute(statement)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogManager {
        &self.catalog
    }

    pub fn storage(&self) -> &StorageEngine {
        &self.storage
    }

    /// Closes every open heap file.
    pub fn shutdown(self) {
        self.storage.shutdown();
    }
}
