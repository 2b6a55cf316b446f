pub mod filter_types;
pub mod page_types;
pub mod parser_types;
pub mod storage_types;
