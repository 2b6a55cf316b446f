use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog file at line {line}: {msg}")]
    Invalid { line: usize, msg: String },
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    #[error("table already exists: {0}")]
    TableExists(String),
    #[error("table does not exist: {0}")]
    TableNotFound(String),
}
