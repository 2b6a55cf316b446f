use crate::consts::page_consts::{DELETED_SLOT, PAGE_HEADER_SIZE, SLOT_SIZE};
use crate::types::page_types::{Slot, SlottedPage};

impl Slot {
    pub fn is_deleted(&self) -> bool {
        self.offset == DELETED_SLOT
    }

    pub fn to_bytes(&self) -> [u8; SLOT_SIZE] {
        let mut buf = [0u8; SLOT_SIZE];
        buf[0..2].copy_from_slice(&self.offset.to_be_bytes());
        buf[2..4].copy_from_slice(&self.len.to_be_bytes());
        buf
    }

    pub fn from_bytes(buf: [u8; SLOT_SIZE]) -> Self {
        Self {
            offset: u16::from_be_bytes([buf[0], buf[1]]),
            len: u16::from_be_bytes([buf[2], buf[3]]),
        }
    }
}

impl SlottedPage {
    fn slot_position(slot_no: u16) -> usize {
        PAGE_HEADER_SIZE + slot_no as usize * SLOT_SIZE
    }

    /// Reads a directory entry, `None` when the slot was never allocated.
    pub fn slot(&self, slot_no: u16) -> Option<Slot> {
        if slot_no >= self.slot_count() {
            return None;
        }
        let pos = Self::slot_position(slot_no);
        Some(Slot::from_bytes([
            self.data[pos],
            self.data[pos + 1],
            self.data[pos + 2],
            self.data[pos + 3],
        ]))
    }

    pub(crate) fn write_slot(&mut self, slot_no: u16, slot: Slot) {
        let pos = Self::slot_position(slot_no);
        self.data[pos..pos + SLOT_SIZE].copy_from_slice(&slot.to_bytes());
    }

    /// Overwrites only the offset field with the tombstone marker.
    pub(crate) fn tombstone_slot(&mut self, slot_no: u16) {
        let pos = Self::slot_position(slot_no);
        self.write_u16(pos, DELETED_SLOT);
    }
}
