use crate::catalog::catalog_manager::CatalogManager;
use crate::errors::engine_error::EngineError;
use crate::storage::storage_engine::StorageEngine;
use crate::types::parser_types::Statement;

/// Runs statements against one catalog and its heap files. Each statement
/// kind has its handler in a sibling module.
pub struct Executer<'a> {
    pub(crate) catalog: &'a CatalogManager,
    pub(crate) storage: &'a StorageEngine,
}

impl<'a> Executer<'a> {
    pub fn new(catalog: &'a CatalogManager, storage: &'a StorageEngine) -> Self {
        Self { catalog, storage }
    }

    /// Executes one statement and returns its printable result.
    pub fn execute(&self, statement: &Statement) -> Result<String, EngineError> {
        tracing::debug!(kind = statement.kind(), "executing statement");

        match statement {
            // CREATE TABLE name (...)
            Statement::CreateTable {
                table_name,
                columns,
            } => self.create_table(table_name, columns),

            // DROP TABLE name
            Statement::DropTable { table_name } => self.drop_table(table_name),

            // INSERT INTO name VALUES (...), ...
            Statement::Insert { table_name, rows } => self.insert_into(table_name, rows),

            // SELECT ... FROM ... [WHERE ...]
            Statement::Select(select) => self.select(select),

            // UPDATE name SET ... [WHERE ...]
            Statement::Update {
                target,
                column_names,
                values,
                filter,
            } => self.update(target, column_names, values, filter.as_ref()),

            // DELETE FROM name [WHERE ...]
            Statement::Delete { target, filter } => self.delete(target, filter.as_ref()),

            Statement::Unsupported(kind) => Err(EngineError::Unsupported(format!(
                "statement kind {}",
                kind
            ))),
        }
    }
}
