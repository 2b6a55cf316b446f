use crate::catalog::validate::validate_schema;
use crate::errors::catalog_error::CatalogError;
use crate::types::storage_types::{ColumnDefinition, ColumnType, TableSchema};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

// File format, one block per table:
//
//   TABLE <name>
//   COLUMN <name> <TYPE> <maxLength>
//   ...
//   END

/// Renders the metadata file contents for the given tables.
pub fn render_catalog<'a>(tables: impl IntoIterator<Item = &'a TableSchema>) -> String {
    let mut out = String::new();
    for schema in tables {
        out.push_str(&format!("TABLE {}\n", schema.table_name));
        for col in &schema.columns {
            out.push_str(&format!(
                "COLUMN {} {} {}\n",
                col.name,
                col.column_type.name(),
                col.max_length
            ));
        }
        out.push_str("END\n");
    }
    out
}

/// Parses a metadata file; tables are returned in file order.
pub fn parse_catalog(text: &str) -> Result<Vec<TableSchema>, CatalogError> {
    let mut tables = Vec::new();
    let mut current: Option<TableSchema> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        let invalid = |msg: String| CatalogError::Invalid { line: line_no, msg };

        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix("TABLE ") {
            if current.is_some() {
                return Err(invalid("TABLE before END of previous table".into()));
            }
            current = Some(TableSchema::new(name.trim(), Vec::new()));
        } else if let Some(rest) = line.strip_prefix("COLUMN ") {
            let schema = current
                .as_mut()
                .ok_or_else(|| invalid("COLUMN outside of a TABLE block".into()))?;
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [name, ty, len] = parts.as_slice() else {
                return Err(invalid(format!("expected 'COLUMN name TYPE length', got '{}'", line)));
            };
            let column_type = ColumnType::from_name(ty)
                .ok_or_else(|| invalid(format!("unknown column type '{}'", ty)))?;
            let max_length = len
                .parse::<u32>()
                .map_err(|e| invalid(format!("bad length '{}': {}", len, e)))?;
            schema
                .columns
                .push(ColumnDefinition::with_max_length(*name, column_type, max_length));
        } else if line == "END" {
            let schema = current
                .take()
                .ok_or_else(|| invalid("END without TABLE".into()))?;
            validate_schema(&schema).map_err(|e| invalid(e.to_string()))?;
            tables.push(schema);
        } else {
            return Err(invalid(format!("unrecognized line '{}'", line)));
        }
    }

    if let Some(schema) = current {
        return Err(CatalogError::Invalid {
            line: text.lines().count(),
            msg: format!("table '{}' is missing END", schema.table_name),
        });
    }
    Ok(tables)
}

/// Reads the metadata file; a missing file means an empty catalog.
pub fn load_catalog(path: &Path) -> Result<Vec<TableSchema>, CatalogError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)?;
    parse_catalog(&text)
}

/// Writes the metadata file through a synced temp file and an atomic rename.
pub fn save_catalog_atomic<'a>(
    path: &Path,
    tables: impl IntoIterator<Item = &'a TableSchema>,
) -> Result<(), CatalogError> {
    let contents = render_catalog(tables);
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut f = tmp.as_file();
        f.write_all(contents.as_bytes())?;
        f.sync_all()?;
    }
    tmp.persist(path).map_err(|e| CatalogError::Io(e.error))?;

    // make the rename itself durable
    #[cfg(unix)]
    {
        let dirfd = fs::File::open(dir)?;
        dirfd.sync_all()?;
    }
    Ok(())
}
