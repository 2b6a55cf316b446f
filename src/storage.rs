pub mod disk_manager;
pub mod free_space_map;
pub mod heap_file;
pub mod page;
pub mod page_header;
pub mod slot;
pub mod storage_engine;
pub mod tuple;
pub mod tuple_header;
