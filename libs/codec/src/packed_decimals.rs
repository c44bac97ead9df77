//! Packed decimals word

use crate::error::CodecError;
use factory_config::limits::{MAX_DECIMALS, MIN_DECIMALS};
use factory_types::FixedVec;
use serde::{Deserialize, Serialize};

/// Number of 8-bit slots in the packed word
pub const PACKED_SLOTS: usize = 8;

/// Longest sequence accepted by [`PackedDecimals::pack`]; one slot is left
/// for the terminator
pub const MAX_PACKED_VALUES: usize = PACKED_SLOTS - 1;

const SLOT_BITS: u32 = 8;
const SLOT_MASK: u64 = 0xff;

/// Decoded decimals with an explicit length
pub type DecimalList = FixedVec<u8, PACKED_SLOTS>;

/// Decimal counts packed 8 bits per coin, least-significant slot first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedDecimals(u64);

impl PackedDecimals {
    /// Pack `values`; each must lie in `[MIN_DECIMALS, MAX_DECIMALS]`
    pub fn pack(values: &[u8]) -> Result<Self, CodecError> {
        if values.len() > MAX_PACKED_VALUES {
            return Err(CodecError::TooManyValues {
                len: values.len(),
                max: MAX_PACKED_VALUES,
            });
        }

        let mut word = 0u64;
        for (index, &value) in values.iter().enumerate() {
            if !(MIN_DECIMALS..=MAX_DECIMALS).contains(&value) {
                return Err(CodecError::ValueOutOfRange {
                    index,
                    value,
                    min: MIN_DECIMALS,
                    max: MAX_DECIMALS,
                });
            }
            word |= (value as u64) << (SLOT_BITS * index as u32);
        }

        Ok(Self(word))
    }

    /// Decode slots in order, stopping at the first zero slot
    pub fn unpack(self) -> DecimalList {
        let mut out = DecimalList::new();
        for slot in 0..PACKED_SLOTS {
            match self.slot(slot) {
                0 => break,
                value => {
                    // PACKED_SLOTS iterations never exceed DecimalList capacity
                    let _ = out.try_push(value);
                }
            }
        }
        out
    }

    /// Decimals of coin `index`, if the sequence reaches it
    pub fn get(self, index: usize) -> Option<u8> {
        if index >= PACKED_SLOTS {
            return None;
        }
        (0..=index)
            .all(|slot| self.slot(slot) != 0)
            .then(|| self.slot(index))
    }

    /// Number of packed values before the terminator
    pub fn len(self) -> usize {
        (0..PACKED_SLOTS)
            .position(|slot| self.slot(slot) == 0)
            .unwrap_or(PACKED_SLOTS)
    }

    pub fn is_empty(self) -> bool {
        self.slot(0) == 0
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Wrap an already packed word without validation
    pub const fn from_raw(word: u64) -> Self {
        Self(word)
    }

    fn slot(self, index: usize) -> u8 {
        ((self.0 >> (SLOT_BITS * index as u32)) & SLOT_MASK) as u8
    }
}
