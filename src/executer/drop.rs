use crate::errors::catalog_error::CatalogError;
use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;

impl Executer<'_> {
    pub(crate) fn drop_table(&self, table_name: &str) -> Result<String, EngineError> {
        if !self.catalog.table_exists(table_name) {
            return Err(CatalogError::TableNotFound(table_name.to_string()).into());
        }

        // data file first, then the catalog entry
        self.storage.drop_heap_file(table_name)?;
        self.catalog.drop_table(table_name)?;

        tracing::info!(table = table_name, "table dropped");
        Ok(format!("Table '{}' dropped.", table_name))
    }
}
