use crate::errors::catalog_error::CatalogError;
use crate::errors::config_error::ConfigError;
use crate::errors::eval_error::EvalError;
use crate::errors::storage_error::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Eval(#[from] EvalError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Coarse classification of every failure a statement can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Schema,
    Type,
    Unsupported,
    Io,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Catalog(CatalogError::Io(_) | CatalogError::Invalid { .. }) => {
                ErrorKind::Io
            }
            EngineError::Catalog(_) => ErrorKind::Schema,
            EngineError::Storage(
                StorageError::ArityMismatch { .. }
                | StorageError::HeapFileExists(_)
                | StorageError::HeapFileNotFound(_),
            ) => ErrorKind::Schema,
            EngineError::Storage(StorageError::ValueTypeMismatch { .. }) => ErrorKind::Type,
            EngineError::Storage(_) => ErrorKind::Io,
            EngineError::Eval(EvalError::UnknownColumn(_) | EvalError::AmbiguousColumn(_)) => {
                ErrorKind::Schema
            }
            EngineError::Eval(EvalError::TypeMismatch { .. } | EvalError::LiteralType { .. }) => {
                ErrorKind::Type
            }
            EngineError::Eval(EvalError::Unsupported(_)) => ErrorKind::Unsupported,
            EngineError::Config(_) => ErrorKind::Io,
            EngineError::Schema(_) => ErrorKind::Schema,
            EngineError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}
