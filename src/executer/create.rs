use crate::consts::catalog_consts::DEFAULT_VARCHAR_LENGTH;
use crate::errors::catalog_error::CatalogError;
use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;
use crate::types::parser_types::ColumnSpec;
use crate::types::storage_types::{ColumnDefinition, ColumnType, TableSchema};

impl Executer<'_> {
    pub(crate) fn create_table(
        &self,
        table_name: &str,
        columns: &[ColumnSpec],
    ) -> Result<String, EngineError> {
        if self.catalog.table_exists(table_name) {
            return Err(CatalogError::TableExists(table_name.to_string()).into());
        }

        let columns = columns
            .iter()
            .map(column_definition)
            .collect::<Result<Vec<_>, _>>()?;
        let schema = TableSchema::new(table_name, columns);

        // catalog first; it re-checks existence under its own lock
        self.catalog.create_table(schema.clone())?;
        if let Err(e) = self.storage.create_heap_file(&schema) {
            if let Err(rollback) = self.catalog.drop_table(table_name) {
                tracing::error!(table = table_name, error = %rollback, "catalog rollback failed");
            }
            return Err(e.into());
        }

        tracing::info!(table = table_name, columns = schema.column_count(), "table created");
        Ok(format!("Table '{}' created.", table_name))
    }
}

/// Maps a declared column type onto a storage type.
pub fn column_definition(spec: &ColumnSpec) -> Result<ColumnDefinition, EngineError> {
    let column_type = match spec.type_name.to_ascii_uppercase().as_str() {
        "INT" | "INTEGER" => ColumnType::Int,
        "FLOAT" | "REAL" => ColumnType::Float,
        "TEXT" => ColumnType::Text,
        "BOOLEAN" | "BOOL" => ColumnType::Boolean,
        "VARCHAR" => {
            let max_length = match spec.length {
                Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
                _ => DEFAULT_VARCHAR_LENGTH,
            };
            return Ok(ColumnDefinition::with_max_length(
                spec.name.as_str(),
                ColumnType::Varchar,
                max_length,
            ));
        }
        other => {
            return Err(EngineError::Unsupported(format!(
                "column type {} for column '{}'",
                other, spec.name
            )))
        }
    };
    Ok(ColumnDefinition::new(spec.name.as_str(), column_type))
}
