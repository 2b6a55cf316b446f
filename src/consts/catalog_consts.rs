pub const DATA_DIR: &str = "./data";            // default directory for catalog and table files
pub const CATALOG_FILE: &str = "catalog.meta";  // flat metadata file inside DATA_DIR
pub const DATA_FILE_EXTENSION: &str = "dat";    // extension of per-table heap files
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;    // VARCHAR without (or with invalid) length
