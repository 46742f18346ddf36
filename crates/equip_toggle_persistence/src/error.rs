//! # Persistence Error Types
//!
//! Stream-level failures come from the record container; codec-level
//! failures add malformed toggle data on top.

use equip_toggle_core::ToggleError;
use std::io;
use thiserror::Error;

/// Errors raised by a record stream.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Data was written before any record was opened.
    #[error("no record is open")]
    NoOpenRecord,

    /// A read ran past the end of the current record.
    #[error("record truncated: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes the read asked for.
        needed: usize,
        /// Bytes left in the record.
        available: usize,
    },

    /// A write would grow the container past its bound.
    #[error("co-save capacity exceeded: capacity {capacity}, requested {requested}")]
    CapacityExceeded {
        /// Maximum container size in bytes.
        capacity: usize,
        /// Size the write would have produced.
        requested: usize,
    },

    /// The container does not start with the co-save magic.
    #[error("invalid co-save magic")]
    InvalidMagic,

    /// The container was written by an unknown format version.
    #[error("unsupported co-save version {0}")]
    UnsupportedVersion(u32),

    /// The container structure is inconsistent.
    #[error("corrupt co-save: {0}")]
    Corrupt(&'static str),

    /// Underlying file I/O failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for record stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors raised while encoding or decoding the toggle record.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The record stream failed.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The record held a slot or state outside the known values.
    #[error(transparent)]
    Toggle(#[from] ToggleError),
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
