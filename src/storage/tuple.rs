use crate::consts::page_consts::TUPLE_SIZE_PREFIX;
use crate::errors::storage_error::StorageError;
use crate::storage::tuple_header::{NullBitmap, TupleHeader};
use crate::types::storage_types::{ColumnType, TableSchema, Tuple, Value};

// Encoding:
//   [total size: u32][null bitmap: ceil(n/8)][non-NULL values in column order]
// INT i32, FLOAT f32, BOOLEAN one byte 0/1, VARCHAR/TEXT [len: u32][utf-8].
// NULL columns take no space in the value section.

impl Tuple {
    /// Serialized size in bytes, including the header.
    pub fn encoded_len(&self, schema: &TableSchema) -> usize {
        let mut size = TUPLE_SIZE_PREFIX + NullBitmap::byte_len(schema.column_count());
        for value in &self.values {
            size += match value {
                Value::Int(_) | Value::Float(_) => 4,
                Value::Bool(_) => 1,
                Value::Text(s) => 4 + s.len(),
                Value::Null => 0,
            };
        }
        size
    }

    pub fn to_bytes(&self, schema: &TableSchema) -> Result<Vec<u8>, StorageError> {
        if self.values.len() != schema.column_count() {
            return Err(StorageError::ArityMismatch {
                table: schema.table_name.clone(),
                expected: schema.column_count(),
                actual: self.values.len(),
            });
        }

        // build null bitmap, rejecting values that do not match their column
        let mut nullmap = NullBitmap::new(schema.column_count());
        for (i, (value, col)) in self.values.iter().zip(&schema.columns).enumerate() {
            if !value.fits(col.column_type) {
                return Err(StorageError::ValueTypeMismatch {
                    column: col.name.clone(),
                    expected: col.column_type.to_string(),
                });
            }
            if value.is_null() {
                nullmap.set_null(i);
            }
        }

        let total_size = self.encoded_len(schema);
        let header = TupleHeader {
            total_size: total_size as u32,
            nullmap,
        };

        let mut buf = Vec::with_capacity(total_size);
        header.write_to(&mut buf);
        for value in &self.values {
            match value {
                Value::Int(i) => buf.extend_from_slice(&i.to_be_bytes()),
                Value::Float(x) => buf.extend_from_slice(&x.to_be_bytes()),
                Value::Bool(b) => buf.push(u8::from(*b)),
                Value::Text(s) => {
                    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
                    buf.extend_from_slice(s.as_bytes());
                }
                Value::Null => {}
            }
        }
        Ok(buf)
    }

    /// Decodes a tuple written by [`Tuple::to_bytes`] with the same schema.
    pub fn from_bytes(buf: &[u8], schema: &TableSchema) -> Result<Tuple, StorageError> {
        let header = TupleHeader::from_bytes(buf, schema.column_count())?;
        let mut reader = ByteReader {
            buf,
            pos: header.encoded_len(),
        };

        let mut values = Vec::with_capacity(schema.column_count());
        for (i, col) in schema.columns.iter().enumerate() {
            if header.nullmap.is_null(i) {
                values.push(Value::Null);
                continue;
            }
            let value = match col.column_type {
                ColumnType::Int => Value::Int(i32::from_be_bytes(reader.take_array()?)),
                ColumnType::Float => Value::Float(f32::from_be_bytes(reader.take_array()?)),
                ColumnType::Boolean => Value::Bool(reader.take(1)?[0] != 0),
                ColumnType::Varchar | ColumnType::Text => {
                    let len = u32::from_be_bytes(reader.take_array()?) as usize;
                    let bytes = reader.take(len)?;
                    let s = std::str::from_utf8(bytes).map_err(|e| {
                        StorageError::CorruptTuple(format!("column '{}': {}", col.name, e))
                    })?;
                    Value::Text(s.to_string())
                }
            };
            values.push(value);
        }

        Ok(Tuple { values })
    }
}

/// Bounds-checked cursor over an encoded tuple.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], StorageError> {
        let end = self.pos + n;
        let bytes = self.buf.get(self.pos..end).ok_or_else(|| {
            StorageError::CorruptTuple(format!(
                "read of {} bytes at offset {} past end ({})",
                n,
                self.pos,
                self.buf.len()
            ))
        })?;
        self.pos = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], StorageError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }
}
