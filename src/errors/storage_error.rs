use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("page must be {expected} bytes, got {actual}")]
    InvalidPageSize { expected: usize, actual: usize },
    #[error("corrupt page {page}: {reason}")]
    CorruptPage { page: u32, reason: String },
    #[error("corrupt tuple: {0}")]
    CorruptTuple(String),
    #[error("tuple of {size} bytes does not fit into an empty page (max {max})")]
    TupleTooLarge { size: usize, max: usize },
    #[error("tuple has {actual} values but schema '{table}' has {expected} columns")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },
    #[error("value for column '{column}' does not match declared type {expected}")]
    ValueTypeMismatch { column: String, expected: String },
    #[error("heap file already exists for table: {0}")]
    HeapFileExists(String),
    #[error("no heap file for table: {0}")]
    HeapFileNotFound(String),
}
