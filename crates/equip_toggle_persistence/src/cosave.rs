//! # Co-save Container
//!
//! In-memory multi-record container. Stands in for the host's co-save when
//! the plugin writes its own companion file, and is what the tests drive the
//! callbacks through.
//!
//! ## Format
//!
//! ```text
//! [4 bytes: magic "ETCS"]
//! [4 bytes: format version]
//! [4 bytes: record count]
//!
//! Record format:
//! [4 bytes: type code]
//! [4 bytes: record version]
//! [4 bytes: body length]
//! [N bytes: body]
//! ```
//!
//! Header fields are little-endian. Body scalars are whatever the writer put
//! there (see [`crate::record`]).

use crate::error::{StreamError, StreamResult};
use crate::record::{RecordInfo, RecordReader, RecordWriter};
use crate::type_code::TypeCode;

/// Magic bytes identifying a co-save.
pub const COSAVE_MAGIC: &[u8; 4] = b"ETCS";

/// Current co-save container version.
pub const COSAVE_FORMAT_VERSION: u32 = 1;

/// Size of the container header.
const FILE_HEADER_SIZE: usize = 12;

/// Size of a record header.
const RECORD_HEADER_SIZE: usize = 12;

/// Builds a co-save in memory.
#[derive(Debug)]
pub struct CoSaveWriter {
    buffer: Vec<u8>,
    /// Offset of the open record's header.
    current: Option<usize>,
    record_count: u32,
    capacity: Option<usize>,
}

impl CoSaveWriter {
    /// Creates an unbounded writer.
    #[must_use]
    pub fn new() -> Self {
        let mut buffer = Vec::with_capacity(256);
        buffer.extend_from_slice(COSAVE_MAGIC);
        buffer.extend_from_slice(&COSAVE_FORMAT_VERSION.to_le_bytes());
        buffer.extend_from_slice(&0u32.to_le_bytes());

        Self {
            buffer,
            current: None,
            record_count: 0,
            capacity: None,
        }
    }

    /// Creates a writer that refuses to grow past `capacity` bytes in total.
    #[must_use]
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

    /// Number of records opened so far.
    #[must_use]
    pub const fn record_count(&self) -> u32 {
        self.record_count
    }

    /// Bytes written so far, headers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no record has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Closes the open record and returns the finished container.
    ///
    /// # Errors
    ///
    /// Fails if a record body outgrew its 32-bit length field.
    pub fn finish(mut self) -> StreamResult<Vec<u8>> {
        self.close_record()?;
        self.buffer[8..12].copy_from_slice(&self.record_count.to_le_bytes());
        Ok(self.buffer)
    }

    fn reserve(&self, additional: usize) -> StreamResult<()> {
        let requested = self.buffer.len() + additional;
        match self.capacity {
            Some(capacity) if requested > capacity => {
                Err(StreamError::CapacityExceeded { capacity, requested })
            }
            _ => Ok(()),
        }
    }

    /// Back-patches the open record's length.
    fn close_record(&mut self) -> StreamResult<()> {
        if let Some(offset) = self.current.take() {
            let body = self.buffer.len() - offset - RECORD_HEADER_SIZE;
            let length = u32::try_from(body).map_err(|_| StreamError::Corrupt("record body too large"))?;
            self.buffer[offset + 8..offset + 12].copy_from_slice(&length.to_le_bytes());
        }
        Ok(())
    }
}

impl Default for CoSaveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordWriter for CoSaveWriter {
    fn open_record(&mut self, type_code: TypeCode, version: u32) -> StreamResult<()> {
        self.close_record()?;
        self.reserve(RECORD_HEADER_SIZE)?;

        let offset = self.buffer.len();
        self.buffer.extend_from_slice(&type_code.raw().to_le_bytes());
        self.buffer.extend_from_slice(&version.to_le_bytes());
        self.buffer.extend_from_slice(&0u32.to_le_bytes());

        self.current = Some(offset);
        self.record_count += 1;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> StreamResult<()> {
        if self.current.is_none() {
            return Err(StreamError::NoOpenRecord);
        }
        self.reserve(bytes.len())?;
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }
}

/// Walks the records of a finished co-save.
#[derive(Debug)]
pub struct CoSaveReader {
    data: Vec<u8>,
    position: usize,
    /// End of the current record body; reads never cross it.
    record_end: usize,
    records_left: u32,
}

impl CoSaveReader {
    /// Validates the container header.
    ///
    /// # Errors
    ///
    /// Fails on a short buffer, a wrong magic, or an unknown format version.
    pub fn from_bytes(data: Vec<u8>) -> StreamResult<Self> {
        if data.len() < FILE_HEADER_SIZE {
            return Err(StreamError::Truncated {
                needed: FILE_HEADER_SIZE,
                available: data.len(),
            });
        }
        if &data[0..4] != COSAVE_MAGIC {
            return Err(StreamError::InvalidMagic);
        }

        let version = read_u32_le(&data, 4);
        if version != COSAVE_FORMAT_VERSION {
            return Err(StreamError::UnsupportedVersion(version));
        }
        let records_left = read_u32_le(&data, 8);

        Ok(Self {
            data,
            position: FILE_HEADER_SIZE,
            record_end: FILE_HEADER_SIZE,
            records_left,
        })
    }

    /// Bytes left unread in the current record.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.record_end.saturating_sub(self.position)
    }

    /// Records not yet visited.
    #[must_use]
    pub const fn records_left(&self) -> u32 {
        self.records_left
    }
}

impl RecordReader for CoSaveReader {
    fn next_record_info(&mut self) -> StreamResult<Option<RecordInfo>> {
        self.position = self.record_end;
        if self.records_left == 0 {
            return Ok(None);
        }

        let available = self.data.len() - self.position;
        if available < RECORD_HEADER_SIZE {
            return Err(StreamError::Truncated {
                needed: RECORD_HEADER_SIZE,
                available,
            });
        }

        let info = RecordInfo {
            type_code: TypeCode(read_u32_le(&self.data, self.position)),
            version: read_u32_le(&self.data, self.position + 4),
            length: read_u32_le(&self.data, self.position + 8),
        };
        let body_start = self.position + RECORD_HEADER_SIZE;
        let body_len = info.length as usize;
        if body_len > self.data.len() - body_start {
            return Err(StreamError::Truncated {
                needed: body_len,
                available: self.data.len() - body_start,
            });
        }

        self.position = body_start;
        self.record_end = body_start + body_len;
        self.records_left -= 1;
        Ok(Some(info))
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> StreamResult<()> {
        let available = self.remaining();
        if buf.len() > available {
            return Err(StreamError::Truncated {
                needed: buf.len(),
                available,
            });
        }
        buf.copy_from_slice(&self.data[self.position..self.position + buf.len()]);
        self.position += buf.len();
        Ok(())
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}
