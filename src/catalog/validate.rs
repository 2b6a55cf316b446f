use crate::errors::catalog_error::CatalogError;
use crate::types::storage_types::TableSchema;
use std::collections::HashSet;

/// Rejects schemas the engine or the metadata file cannot represent.
pub fn validate_schema(schema: &TableSchema) -> Result<(), CatalogError> {
    let name = &schema.table_name;
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(CatalogError::InvalidSchema(format!(
            "invalid table name '{}'",
            name
        )));
    }
    if schema.columns.is_empty() {
        return Err(CatalogError::InvalidSchema(format!(
            "table '{}' has no columns",
            name
        )));
    }

    let mut seen = HashSet::new();
    for col in &schema.columns {
        // column lines are space separated in the metadata file
        if col.name.is_empty() || col.name.chars().any(char::is_whitespace) {
            return Err(CatalogError::InvalidSchema(format!(
                "invalid column name '{}' in table {}",
                col.name, name
            )));
        }
        if !seen.insert(col.name.to_ascii_uppercase()) {
            return Err(CatalogError::InvalidSchema(format!(
                "duplicate column '{}' in table {}",
                col.name, name
            )));
        }
    }
    Ok(())
}
