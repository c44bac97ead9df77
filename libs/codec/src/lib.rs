//! # Pool Factory Codec
//!
//! Compact encoding for per-coin decimal counts. Base pool records store
//! their coin decimals as a single [`PackedDecimals`] word instead of a list.
//!
//! ## Format
//!
//! ```text
//! bit:   63 ... 24 23..16 15..8  7..0
//! slot:     ...      2      1     0      (8 bits per coin, slot 0 = coin 0)
//! value:    0        18     6     6      (first zero slot terminates)
//! ```
//!
//! Zero is the terminator, so zero decimals are rejected at pack time rather
//! than silently truncating the sequence on decode.

pub mod error;
pub mod packed_decimals;

pub use error::CodecError;
pub use packed_decimals::{DecimalList, PackedDecimals, MAX_PACKED_VALUES, PACKED_SLOTS};
