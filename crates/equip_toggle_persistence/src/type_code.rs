//! # Record Type Codes
//!
//! Records are tagged with a 4-byte code built from a 3-character
//! signature, most significant character first:
//!
//! ```text
//! 'ATG' = 0x00_41_54_47
//!            A  T  G
//! ```
//!
//! Decoding reverses the low three bytes and drops the terminal byte.

use std::fmt;

/// A record type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeCode(pub u32);

impl TypeCode {
    /// Builds a type code from a 3-character signature.
    #[must_use]
    pub const fn from_signature(signature: [u8; 3]) -> Self {
        Self((signature[0] as u32) << 16 | (signature[1] as u32) << 8 | signature[2] as u32)
    }

    /// Returns the raw tag.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Decodes the human-readable signature.
    #[must_use]
    pub fn signature(self) -> String {
        let bytes = self.0.to_le_bytes();
        [bytes[2], bytes[1], bytes[0]].iter().map(|&b| char::from(b)).collect()
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}
