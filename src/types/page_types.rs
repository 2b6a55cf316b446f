use crate::consts::page_consts::PAGE_SIZE;

/// One 4096-byte block of a heap file.
///
/// ```text
/// +--------------------------+ 0
/// | slot count      (u16)    |
/// | free space ptr  (u16)    |
/// | page id         (u32)    |
/// +--------------------------+ 8
/// | slot 0 | slot 1 | ...    |  grows forward, 4 bytes per slot
/// +--------------------------+
/// |        free space        |
/// +--------------------------+ free space ptr
/// | ... | tuple 1 | tuple 0  |  grows backward from the end
/// +--------------------------+ PAGE_SIZE
/// ```
#[derive(Clone)]
pub struct SlottedPage {
    pub(crate) data: Box<[u8; PAGE_SIZE]>,
}

/// Directory entry pointing at one tuple inside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub offset: u16,
    pub len: u16,
}
