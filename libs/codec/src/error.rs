//! Decimal codec errors

use thiserror::Error;

/// Errors raised while packing decimals into a word
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// More values than the packed word can hold alongside its terminator
    #[error("Too many decimals to pack: {len} exceeds maximum {max}")]
    TooManyValues { len: usize, max: usize },

    /// Value outside [min, max]; zero would be read back as the terminator
    #[error("Decimals {value} at position {index} outside [{min}, {max}]")]
    ValueOutOfRange { index: usize, value: u8, min: u8, max: u8 },
}
