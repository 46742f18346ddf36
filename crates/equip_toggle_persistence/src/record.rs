//! # Record Stream Primitives
//!
//! The host hands the callbacks a stream that reads or writes one scalar at
//! a time inside tagged, versioned, length-delimited records. These traits
//! are that surface; [`crate::CoSaveWriter`] and [`crate::CoSaveReader`]
//! implement it in memory.
//!
//! Scalars travel as raw [`Pod`] bytes in host byte order, exactly as they
//! sit in memory.

use bytemuck::{Pod, Zeroable};

use crate::error::StreamResult;
use crate::type_code::TypeCode;

/// Header of a record found while iterating a co-save.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordInfo {
    /// Record type tag.
    pub type_code: TypeCode,
    /// Version the record was written with.
    pub version: u32,
    /// Body length in bytes.
    pub length: u32,
}

/// Write side of a co-save.
pub trait RecordWriter {
    /// Starts a new record; later writes land in its body.
    ///
    /// # Errors
    ///
    /// Fails if the container cannot take another record.
    fn open_record(&mut self, type_code: TypeCode, version: u32) -> StreamResult<()>;

    /// Appends raw bytes to the open record.
    ///
    /// # Errors
    ///
    /// Fails if no record is open or the container is full.
    fn write_bytes(&mut self, bytes: &[u8]) -> StreamResult<()>;

    /// Appends one scalar to the open record.
    ///
    /// # Errors
    ///
    /// Same as [`RecordWriter::write_bytes`].
    fn write_record_data<T: Pod>(&mut self, value: &T) -> StreamResult<()>
    where
        Self: Sized,
    {
        self.write_bytes(bytemuck::bytes_of(value))
    }
}

/// Read side of a co-save.
pub trait RecordReader {
    /// Advances to the next record, skipping whatever is left of the current one.
    ///
    /// Returns `Ok(None)` once every record has been visited.
    ///
    /// # Errors
    ///
    /// Fails if the next record header is damaged.
    fn next_record_info(&mut self) -> StreamResult<Option<RecordInfo>>;

    /// Fills `buf` from the current record.
    ///
    /// # Errors
    ///
    /// Fails if the record does not hold enough bytes.
    fn read_bytes(&mut self, buf: &mut [u8]) -> StreamResult<()>;

    /// Reads one scalar from the current record.
    ///
    /// # Errors
    ///
    /// Same as [`RecordReader::read_bytes`].
    fn read_record_data<T: Pod>(&mut self) -> StreamResult<T>
    where
        Self: Sized,
    {
        let mut value = <T as Zeroable>::zeroed();
        self.read_bytes(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }
}
