pub mod catalog;
pub mod config;
pub mod consts;
pub mod engine;
pub mod errors;
pub mod executer;
pub mod printer;
pub mod storage;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::engine_error::{EngineError, ErrorKind};
