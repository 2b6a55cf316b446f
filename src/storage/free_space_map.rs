/// Free bytes per page of one heap file, so inserts can pick a page
/// without reading every page header.
#[derive(Debug, Clone, Default)]
pub struct FreeSpaceMap {
    free_bytes: Vec<usize>,
}

impl FreeSpaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page; indices between the old end and `page_index` count as full.
    pub fn add_page(&mut self, page_index: usize, free_space: usize) {
        if self.free_bytes.len() <= page_index {
            self.free_bytes.resize(page_index + 1, 0);
        }
        self.free_bytes[page_index] = free_space;
    }

    /// Records the new free space of a known page; unknown pages are ignored.
    pub fn update_page(&mut self, page_index: usize, free_space: usize) {
        if let Some(entry) = self.free_bytes.get_mut(page_index) {
            *entry = free_space;
        }
    }

    /// Forgets every page from `len` on.
    pub fn truncate(&mut self, len: usize) {
        self.free_bytes.truncate(len);
    }

    /// First-fit: lowest page index with at least `needed` free bytes.
    pub fn find_page_with_space(&self, needed: usize) -> Option<usize> {
        self.free_bytes.iter().position(|&free| free >= needed)
    }

    pub fn page_count(&self) -> usize {
        self.free_bytes.len()
    }

    pub fn free_space(&self, page_index: usize) -> usize {
        self.free_bytes.get(page_index).copied().unwrap_or(0)
    }
}
