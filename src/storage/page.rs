use crate::consts::page_consts::{PAGE_SIZE, SLOT_SIZE};
use crate::errors::storage_error::StorageError;
use crate::types::page_types::{Slot, SlottedPage};
use std::fmt;

impl SlottedPage {
    pub fn new(page_id: u32) -> Self {
        // empty page: no slots, tuple region starts at the very end
        let mut page = Self {
            data: Box::new([0u8; PAGE_SIZE]),
        };
        page.set_slot_count(0);
        page.set_free_space_ptr(PAGE_SIZE as u16);
        page.set_page_id(page_id);
        page
    }

    /// Rebuilds a page from a raw block read from disk.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, StorageError> {
        if buf.len() != PAGE_SIZE {
            return Err(StorageError::InvalidPageSize {
                expected: PAGE_SIZE,
                actual: buf.len(),
            });
        }
        let mut data = Box::new([0u8; PAGE_SIZE]);
        data.copy_from_slice(buf);
        let page = Self { data };

        if let Some(reason) = page.header_problem() {
            return Err(StorageError::CorruptPage {
                page: page.page_id(),
                reason,
            });
        }
        Ok(page)
    }

    pub fn as_bytes(&self) -> &[u8; PAGE_SIZE] {
        &self.data
    }

    /// Appends a tuple and returns its slot, or `None` when the page lacks
    /// room for the bytes plus one directory entry.
    pub fn insert_tuple(&mut self, tuple_bytes: &[u8]) -> Option<u16> {
        let needed = tuple_bytes.len() + SLOT_SIZE;
        if self.free_space() < needed {
            return None;
        }

        // tuple bytes end right where the current data region begins
        let new_ptr = self.free_space_ptr() as usize - tuple_bytes.len();
        self.data[new_ptr..new_ptr + tuple_bytes.len()].copy_from_slice(tuple_bytes);

        let slot_no = self.slot_count();
        self.write_slot(
            slot_no,
            Slot {
                offset: new_ptr as u16,
                len: tuple_bytes.len() as u16,
            },
        );
        self.set_slot_count(slot_no + 1);
        self.set_free_space_ptr(new_ptr as u16);

        Some(slot_no)
    }

    /// Bytes of a live tuple; `None` for out-of-range or deleted slots.
    pub fn get_tuple(&self, slot_no: u16) -> Option<&[u8]> {
        let slot = self.slot(slot_no)?;
        if slot.is_deleted() {
            return None;
        }
        let start = slot.offset as usize;
        self.data.get(start..start + slot.len as usize)
    }

    /// Tombstones a slot. Bytes are not reclaimed and the slot is never reused.
    pub fn delete_tuple(&mut self, slot_no: u16) -> bool {
        match self.slot(slot_no) {
            Some(slot) if !slot.is_deleted() => {
                self.tombstone_slot(slot_no);
                true
            }
            _ => false,
        }
    }

    /// Live slot numbers in ascending order.
    pub fn active_slots(&self) -> Vec<u16> {
        (0..self.slot_count())
            .filter(|&i| self.slot(i).is_some_and(|s| !s.is_deleted()))
            .collect()
    }
}

impl fmt::Debug for SlottedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlottedPage")
            .field("page_id", &self.page_id())
            .field("slot_count", &self.slot_count())
            .field("free_space_ptr", &self.free_space_ptr())
            .field("free_space", &self.free_space())
            .finish()
    }
}
