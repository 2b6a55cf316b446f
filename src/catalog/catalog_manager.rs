use super::io::{load_catalog, save_catalog_atomic};
use super::validate::validate_schema;
use crate::errors::catalog_error::CatalogError;
use crate::types::storage_types::TableSchema;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Table name -> schema registry, persisted to a flat metadata file.
///
/// Keys are upper-cased table names; the schema keeps the name as the user
/// wrote it. Without a catalog path the registry lives in memory only.
pub struct CatalogManager {
    catalog_path: Option<PathBuf>,
    tables: RwLock<BTreeMap<String, TableSchema>>,
}

impl CatalogManager {
    /// Loads the metadata file if it exists; a malformed file is an error.
    pub fn open(catalog_path: Option<PathBuf>) -> Result<Self, CatalogError> {
        let mut tables = BTreeMap::new();
        if let Some(path) = catalog_path.as_deref() {
            for schema in load_catalog(path)? {
                let key = Self::key(&schema.table_name);
                if tables.contains_key(&key) {
                    return Err(CatalogError::Invalid {
                        line: 0,
                        msg: format!("table '{}' listed twice", schema.table_name),
                    });
                }
                tables.insert(key, schema);
            }
        }

        Ok(Self {
            catalog_path,
            tables: RwLock::new(tables),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            catalog_path: None,
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    fn key(table_name: &str) -> String {
        table_name.to_ascii_uppercase()
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    /// Registers a new table. The existence check and the insert happen
    /// under a single write guard.
    pub fn create_table(&self, schema: TableSchema) -> Result<(), CatalogError> {
        validate_schema(&schema)?;

        let mut tables = self.tables.write();
        let key = Self::key(&schema.table_name);
        if tables.contains_key(&key) {
            return Err(CatalogError::TableExists(schema.table_name));
        }
        tables.insert(key, schema);
        self.persist(&tables);
        Ok(())
    }

    /// Removes a table and returns its schema.
    pub fn drop_table(&self, table_name: &str) -> Result<TableSchema, CatalogError> {
        let mut tables = self.tables.write();
        let schema = tables
            .remove(&Self::key(table_name))
            .ok_or_else(|| CatalogError::TableNotFound(table_name.to_string()))?;
        self.persist(&tables);
        Ok(schema)
    }

    pub fn get_table(&self, table_name: &str) -> Option<TableSchema> {
        self.tables.read().get(&Self::key(table_name)).cloned()
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        self.tables.read().contains_key(&Self::key(table_name))
    }

    /// Every schema, ordered by upper-cased table name.
    pub fn all_tables(&self) -> Vec<TableSchema> {
        self.tables.read().values().cloned().collect()
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().len()
    }

    // metadata is best-effort: a failed write is logged, the in-memory change stays
    fn persist(&self, tables: &BTreeMap<String, TableSchema>) {
        let Some(path) = self.catalog_path.as_deref() else {
            return;
        };
        if let Err(e) = save_catalog_atomic(path, tables.values()) {
            tracing::error!(path = %path.display(), error = %e, "failed to persist catalog");
        }
    }
}
