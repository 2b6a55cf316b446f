use crate::consts::page_consts::{PAGE_HEADER_SIZE, PAGE_SIZE, SLOT_SIZE};
use crate::types::page_types::SlottedPage;

// byte offsets of the fixed header fields
const SLOT_COUNT_OFFSET: usize = 0;
const FREE_PTR_OFFSET: usize = 2;
const PAGE_ID_OFFSET: usize = 4;

impl SlottedPage {
    pub(crate) fn read_u16(&self, at: usize) -> u16 {
        u16::from_be_bytes([self.data[at], self.data[at + 1]])
    }

    pub(crate) fn write_u16(&mut self, at: usize, value: u16) {
        self.data[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    fn read_u32(&self, at: usize) -> u32 {
        u32::from_be_bytes([
            self.data[at],
            self.data[at + 1],
            self.data[at + 2],
            self.data[at + 3],
        ])
    }

    fn write_u32(&mut self, at: usize, value: u32) {
        self.data[at..at + 4].copy_from_slice(&value.to_be_bytes());
    }

    pub fn slot_count(&self) -> u16 {
        self.read_u16(SLOT_COUNT_OFFSET)
    }

    pub(crate) fn set_slot_count(&mut self, count: u16) {
        self.write_u16(SLOT_COUNT_OFFSET, count);
    }

    /// Offset where the tuple-data region currently begins.
    pub fn free_space_ptr(&self) -> u16 {
        self.read_u16(FREE_PTR_OFFSET)
    }

    pub(crate) fn set_free_space_ptr(&mut self, ptr: u16) {
        self.write_u16(FREE_PTR_OFFSET, ptr);
    }

    pub fn page_id(&self) -> u32 {
        self.read_u32(PAGE_ID_OFFSET)
    }

    pub(crate) fn set_page_id(&mut self, id: u32) {
        self.write_u32(PAGE_ID_OFFSET, id);
    }

    /// First byte past the slot directory.
    pub(crate) fn directory_end(&self) -> usize {
        PAGE_HEADER_SIZE + self.slot_count() as usize * SLOT_SIZE
    }

    /// Bytes between the end of the slot directory and the tuple-data region.
    pub fn free_space(&self) -> usize {
        (self.free_space_ptr() as usize).saturating_sub(self.directory_end())
    }

    /// Checks the header invariants of a page read back from disk.
    pub(crate) fn header_problem(&self) -> Option<String> {
        let ptr = self.free_space_ptr() as usize;
        if ptr > PAGE_SIZE {
            return Some(format!("free space pointer {} beyond page end", ptr));
        }
        if self.directory_end() > ptr {
            return Some(format!(
                "slot directory ({} slots) overlaps tuple data at {}",
                self.slot_count(),
                ptr
            ));
        }
        None
    }
}
