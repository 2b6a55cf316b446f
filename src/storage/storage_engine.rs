use crate::errors::storage_error::StorageError;
use crate::storage::heap_file::HeapFile;
use crate::types::storage_types::TableSchema;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handle to one table's heap file. The mutex serializes all access
/// to that table's pages.
pub type HeapFileRef = Arc<Mutex<HeapFile>>;

/// Table name -> heap file registry. Owns every open table file.
pub struct StorageEngine {
    data_dir: Option<PathBuf>,
    extension: String,
    heap_files: RwLock<HashMap<String, HeapFileRef>>,
}

impl StorageEngine {
    /// `data_dir = None` keeps every heap file in memory only.
    pub fn new(data_dir: Option<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            data_dir,
            extension: extension.into(),
            heap_files: RwLock::new(HashMap::new()),
        }
    }

    fn key(table_name: &str) -> String {
        table_name.to_ascii_uppercase()
    }

    /// `<data_dir>/<TABLE>.<ext>`
    pub fn heap_file_path(&self, table_name: &str) -> Option<PathBuf> {
        self.data_dir
            .as_deref()
            .map(|dir| dir.join(format!("{}.{}", Self::key(table_name), self.extension)))
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Re-opens the data file of every table known to the catalog.
    pub fn restore<'a>(
        &self,
        schemas: impl IntoIterator<Item = &'a TableSchema>,
    ) -> Result<usize, StorageError> {
        let mut files = self.heap_files.write();
        let mut restored = 0;
        for schema in schemas {
            let heap = match self.heap_file_path(&schema.table_name) {
                Some(path) => HeapFile::open(schema.clone(), path)?,
                None => HeapFile::in_memory(schema.clone()),
            };
            tracing::info!(
                table = %schema.table_name,
                pages = heap.page_count(),
                "restored heap file"
            );
            files.insert(Self::key(&schema.table_name), Arc::new(Mutex::new(heap)));
            restored += 1;
        }
        Ok(restored)
    }

    /// Allocates an empty heap file; check and insert happen under one lock.
    pub fn create_heap_file(&self, schema: &TableSchema) -> Result<HeapFileRef, StorageError> {
        let key = Self::key(&schema.table_name);
        let mut files = self.heap_files.write();
        if files.contains_key(&key) {
            return Err(StorageError::HeapFileExists(schema.table_name.clone()));
        }

        let heap = match self.heap_file_path(&schema.table_name) {
            Some(path) => HeapFile::create(schema.clone(), path)?,
            None => HeapFile::in_memory(schema.clone()),
        };
        let handle = Arc::new(Mutex::new(heap));
        files.insert(key, Arc::clone(&handle));
        Ok(handle)
    }

    pub fn get_heap_file(&self, table_name: &str) -> Option<HeapFileRef> {
        self.heap_files.read().get(&Self::key(table_name)).cloned()
    }

    pub fn heap_file_exists(&self, table_name: &str) -> bool {
        self.heap_files.read().contains_key(&Self::key(table_name))
    }

    /// Unregisters the table and deletes its data file.
    pub fn drop_heap_file(&self, table_name: &str) -> Result<(), StorageError> {
        let handle = self
            .heap_files
            .write()
            .remove(&Self::key(table_name))
            .ok_or_else(|| StorageError::HeapFileNotFound(table_name.to_string()))?;

        // waits for any statement still holding this table
        let mut heap = handle.lock();
        heap.destroy()
    }

    pub fn table_count(&self) -> usize {
        self.heap_files.read().len()
    }

    /// Closes every open heap file handle.
    pub fn shutdown(&self) {
        let closed = {
            let mut files = self.heap_files.write();
            let n = files.len();
            files.clear();
            n
        };
        tracing::info!(closed, "closed all heap files");
    }
}
