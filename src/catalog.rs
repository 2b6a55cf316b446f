pub mod catalog_manager;
pub mod io;
pub mod validate;
