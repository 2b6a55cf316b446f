use crate::consts::page_consts::{MAX_TUPLE_SIZE, SLOT_SIZE};
use crate::errors::storage_error::StorageError;
use crate::storage::disk_manager::DiskPageManager;
use crate::storage::free_space_map::FreeSpaceMap;
use crate::types::page_types::SlottedPage;
use crate::types::storage_types::{TableSchema, Tuple, TupleId};
use std::path::Path;

/// All pages of one table, plus the free-space map used to place inserts
/// and the file the pages are flushed to.
///
/// Pages live in memory; every mutation is written through to disk before
/// the call returns. Without a backing file (`in_memory`) the pages are
/// simply never flushed.
#[derive(Debug)]
pub struct HeapFile {
    schema: TableSchema,
    pages: Vec<SlottedPage>,
    free_space: FreeSpaceMap,
    disk: Option<DiskPageManager>,
}

impl HeapFile {
    pub fn in_memory(schema: TableSchema) -> Self {
        Self {
            schema,
            pages: Vec::new(),
            free_space: FreeSpaceMap::new(),
            disk: None,
        }
    }

    /// New, empty heap file at `path`; any stale file there is truncated.
    pub fn create(schema: TableSchema, path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let disk = DiskPageManager::create(path)?;
        Ok(Self {
            schema,
            pages: Vec::new(),
            free_space: FreeSpaceMap::new(),
            disk: Some(disk),
        })
    }

    /// Loads every page of an existing file and rebuilds the free-space map
    /// from the page headers.
    pub fn open(schema: TableSchema, path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let mut disk = DiskPageManager::open(path)?;
        let page_count = disk.page_count()?;

        let mut pages = Vec::with_capacity(page_count as usize);
        let mut free_space = FreeSpaceMap::new();
        for page_no in 0..page_count {
            let buf = disk.read_page(page_no)?;
            let page = SlottedPage::from_bytes(&buf)?;
            if page.page_id() != page_no {
                return Err(StorageError::CorruptPage {
                    page: page_no,
                    reason: format!("header carries page id {}", page.page_id()),
                });
            }
            free_space.add_page(page_no as usize, page.free_space());
            pages.push(page);
        }

        Ok(Self {
            schema,
            pages,
            free_space,
            disk: Some(disk),
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn free_space_map(&self) -> &FreeSpaceMap {
        &self.free_space
    }

    pub fn path(&self) -> Option<&Path> {
        self.disk.as_ref().map(DiskPageManager::path)
    }

    /// Writes the page at `page_index` to disk. On failure the in-memory page
    /// is put back to `before` (or dropped, for a freshly appended page) so
    /// memory never runs ahead of the file.
    fn flush_or_restore(
        &mut self,
        page_index: usize,
        before: Option<SlottedPage>,
    ) -> Result<(), StorageError> {
        let Some(disk) = self.disk.as_mut() else {
            return Ok(());
        };
        if let Err(e) = disk.write_page(page_index as u32, self.pages[page_index].as_bytes()) {
            match before {
                Some(page) => {
                    self.free_space.update_page(page_index, page.free_space());
                    self.pages[page_index] = page;
                }
                None => {
                    self.pages.truncate(page_index);
                    self.free_space.truncate(page_index);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Serializes `tuple` and checks it can ever fit on a page.
    fn encode(&self, tuple: &Tuple) -> Result<Vec<u8>, StorageError> {
        let bytes = tuple.to_bytes(&self.schema)?;
        if bytes.len() > MAX_TUPLE_SIZE {
            return Err(StorageError::TupleTooLarge {
                size: bytes.len(),
                max: MAX_TUPLE_SIZE,
            });
        }
        Ok(bytes)
    }

    /// Fails exactly when `insert_tuple` would reject the tuple itself
    /// (arity, types, size), without touching any page.
    pub fn check_insertable(&self, tuple: &Tuple) -> Result<(), StorageError> {
        self.encode(tuple).map(|_| ())
    }

    /// Places the tuple on the first page with room, appending a page when
    /// none has enough free space. The page is on disk when this returns.
    pub fn insert_tuple(&mut self, tuple: &Tuple) -> Result<TupleId, StorageError> {
        let bytes = self.encode(tuple)?;
        let needed = bytes.len() + SLOT_SIZE;

        if let Some(page_index) = self.free_space.find_page_with_space(needed) {
            let before = self.pages[page_index].clone();
            if let Some(slot) = self.pages[page_index].insert_tuple(&bytes) {
                return self.finish_insert(page_index, slot, Some(before));
            }
            // the map over-reported; resync it and fall through to a new page
            let actual = self.pages[page_index].free_space();
            self.free_space.update_page(page_index, actual);
        }

        let page_index = self.pages.len();
        self.pages.push(SlottedPage::new(page_index as u32));
        self.free_space
            .add_page(page_index, self.pages[page_index].free_space());
        tracing::debug!(
            table = %self.schema.table_name,
            page = page_index,
            "allocated heap page"
        );

        match self.pages[page_index].insert_tuple(&bytes) {
            Some(slot) => self.finish_insert(page_index, slot, None),
            None => {
                self.pages.truncate(page_index);
                self.free_space.truncate(page_index);
                Err(StorageError::TupleTooLarge {
                    size: bytes.len(),
                    max: MAX_TUPLE_SIZE,
                })
            }
        }
    }

    fn finish_insert(
        &mut self,
        page_index: usize,
        slot: u16,
        before: Option<SlottedPage>,
    ) -> Result<TupleId, StorageError> {
        self.free_space
            .update_page(page_index, self.pages[page_index].free_space());
        self.flush_or_restore(page_index, before)?;
        Ok(TupleId::new(page_index as u32, slot))
    }

    pub fn get_tuple(&self, id: TupleId) -> Result<Option<Tuple>, StorageError> {
        let Some(page) = self.pages.get(id.page_index as usize) else {
            return Ok(None);
        };
        match page.get_tuple(id.slot_index) {
            Some(bytes) => Ok(Some(Tuple::from_bytes(bytes, &self.schema)?)),
            None => Ok(None),
        }
    }

    /// Every live tuple with its address, page by page, slots ascending.
    fn live_tuples(&self) -> impl Iterator<Item = Result<(TupleId, Tuple), StorageError>> + '_ {
        self.pages.iter().enumerate().flat_map(move |(page_no, page)| {
            page.active_slots().into_iter().filter_map(move |slot| {
                let bytes = page.get_tuple(slot)?;
                let id = TupleId::new(page_no as u32, slot);
                Some(Tuple::from_bytes(bytes, &self.schema).map(|t| (id, t)))
            })
        })
    }

    pub fn scan_all(&self) -> Result<Vec<Tuple>, StorageError> {
        self.live_tuples().map(|r| r.map(|(_, t)| t)).collect()
    }

    pub fn scan_all_with_ids(&self) -> Result<Vec<(TupleId, Tuple)>, StorageError> {
        self.live_tuples().collect()
    }

    /// Live tuples for which `predicate` holds. The predicate may fail, which
    /// aborts the scan.
    pub fn scan_with_filter<F, E>(&self, mut predicate: F) -> Result<Vec<Tuple>, E>
    where
        F: FnMut(&Tuple) -> Result<bool, E>,
        E: From<StorageError>,
    {
        let mut out = Vec::new();
        for entry in self.live_tuples() {
            let (_, tuple) = entry?;
            if predicate(&tuple)? {
                out.push(tuple);
            }
        }
        Ok(out)
    }

    pub fn scan_with_filter_and_ids<F, E>(
        &self,
        mut predicate: F,
    ) -> Result<Vec<(TupleId, Tuple)>, E>
    where
        F: FnMut(&Tuple) -> Result<bool, E>,
        E: From<StorageError>,
    {
        let mut out = Vec::new();
        for entry in self.live_tuples() {
            let (id, tuple) = entry?;
            if predicate(&tuple)? {
                out.push((id, tuple));
            }
        }
        Ok(out)
    }

    /// Tombstones the tuple at `id`; `false` if it was already gone.
    pub fn delete_tuple(&mut self, id: TupleId) -> Result<bool, StorageError> {
        let page_index = id.page_index as usize;
        let Some(page) = self.pages.get_mut(page_index) else {
            return Ok(false);
        };
        let before = page.clone();
        if !page.delete_tuple(id.slot_index) {
            return Ok(false);
        }
        let free = page.free_space();
        self.free_space.update_page(page_index, free);
        self.flush_or_restore(page_index, Some(before))?;
        Ok(true)
    }

    /// Drops all pages and removes the backing file.
    pub fn destroy(&mut self) -> Result<(), StorageError> {
        self.pages.clear();
        self.free_space = FreeSpaceMap::new();
        if let Some(disk) = self.disk.take() {
            disk.delete()?;
        }
        Ok(())
    }
}
