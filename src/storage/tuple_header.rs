use crate::consts::page_consts::TUPLE_SIZE_PREFIX;
use crate::errors::storage_error::StorageError;

/// One bit per column, bit set = value is NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullBitmap {
    pub bytes: Vec<u8>,
    pub column_count: usize,
}

impl NullBitmap {
    pub fn new(column_count: usize) -> Self {
        // number of bytes needed (round up)
        Self {
            bytes: vec![0; Self::byte_len(column_count)],
            column_count,
        }
    }

    pub fn byte_len(column_count: usize) -> usize {
        column_count.div_ceil(8)
    }

    pub fn set_null(&mut self, idx: usize) {
        self.bytes[idx / 8] |= 1 << (idx % 8);
    }

    pub fn is_null(&self, idx: usize) -> bool {
        (self.bytes[idx / 8] & (1 << (idx % 8))) != 0
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Fixed prefix of every encoded tuple: `[total size: u32][null bitmap]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleHeader {
    pub total_size: u32,
    pub nullmap: NullBitmap,
}

impl TupleHeader {
    pub fn encoded_len(&self) -> usize {
        TUPLE_SIZE_PREFIX + self.nullmap.size()
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.total_size.to_be_bytes());
        buf.extend_from_slice(&self.nullmap.bytes);
    }

    pub fn from_bytes(buf: &[u8], column_count: usize) -> Result<Self, StorageError> {
        let bitmap_len = NullBitmap::byte_len(column_count);
        let needed = TUPLE_SIZE_PREFIX + bitmap_len;
        if buf.len() < needed {
            return Err(StorageError::CorruptTuple(format!(
                "header needs {} bytes, tuple has {}",
                needed,
                buf.len()
            )));
        }

        let total_size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let nullmap = NullBitmap {
            bytes: buf[TUPLE_SIZE_PREFIX..needed].to_vec(),
            column_count,
        };

        Ok(Self {
            total_size,
            nullmap,
        })
    }
}
