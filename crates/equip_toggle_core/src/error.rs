//! # Toggle Error Types
//!
//! Errors raised when raw integers do not map onto the closed enumerations.

use thiserror::Error;

/// Errors that can occur when decoding toggle data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleError {
    /// A slot number outside the biped slot range.
    #[error("invalid biped slot: {0}")]
    InvalidSlot(u32),

    /// A state value that is neither hide nor show.
    #[error("invalid toggle state: {0}")]
    InvalidState(i32),
}

/// Result type for toggle operations.
pub type ToggleResult<T> = Result<T, ToggleError>;
