pub const PAGE_SIZE: usize = 4096;          // total page size in bytes (4 KB)
pub const PAGE_HEADER_SIZE: usize = 8;      // slot count (2) + free space pointer (2) + page id (4)
pub const SLOT_SIZE: usize = 4;             // offset (2) + length (2)
pub const DELETED_SLOT: u16 = 0xFFFF;       // offset value marking a tombstoned slot
pub const TUPLE_SIZE_PREFIX: usize = 4;     // leading total-size field of an encoded tuple

// largest tuple that still fits into an empty page together with its slot
pub const MAX_TUPLE_SIZE: usize = PAGE_SIZE - PAGE_HEADER_SIZE - SLOT_SIZE;
