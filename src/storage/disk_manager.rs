use crate::consts::page_consts::PAGE_SIZE;
use crate::errors::storage_error::StorageError;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Raw block I/O on one table file: consecutive 4096-byte pages, no file header.
#[derive(Debug)]
pub struct DiskPageManager {
    path: PathBuf, // path to the physical heap file
    file: File,
}

impl DiskPageManager {
    /// Opens (or creates) the file, keeping existing pages.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with(path.as_ref(), false)
    }

    /// Creates an empty file, discarding whatever was stored at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with(path.as_ref(), true)
    }

    fn open_with(path: &Path, truncate: bool) -> Result<Self, StorageError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(truncate)
            .open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of whole pages in the file.
    pub fn page_count(&self) -> Result<u32, StorageError> {
        let len = self.file.metadata()?.len();
        Ok((len / PAGE_SIZE as u64) as u32)
    }

    pub fn read_page(&mut self, page_no: u32) -> Result<[u8; PAGE_SIZE], StorageError> {
        // seek to page offset; a short read surfaces as UnexpectedEof
        let offset = page_no as u64 * PAGE_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;

        let mut buf = [0u8; PAGE_SIZE];
        self.file.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Writes one full page and waits until it is on stable storage.
    pub fn write_page(&mut self, page_no: u32, buf: &[u8; PAGE_SIZE]) -> Result<(), StorageError> {
        let offset = page_no as u64 * PAGE_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(buf)?;
        self.file.sync_all()?;
        Ok(())
    }

    /// Closes the handle and removes the file.
    pub fn delete(self) -> Result<(), StorageError> {
        let Self { path, file } = self;
        drop(file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
