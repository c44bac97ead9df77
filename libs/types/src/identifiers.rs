//! # Typed Address Wrappers
//!
//! Zero-cost 20-byte address wrappers that keep pools, tokens, and generic
//! accounts (admins, templates, gauges, oracles) from being confused at
//! compile time while sharing one memory layout.
//!
//! ```rust
//! use factory_types::{Address, PoolAddress, TokenAddress};
//!
//! let pool: PoolAddress = "0x00000000000000000000000000000000000000aa".parse().unwrap();
//! let lp = TokenAddress::new([0xbb; 20]);
//!
//! // Explicit conversion when a pool address is used as a generic account
//! let holder: Address = pool.into();
//! assert_eq!(holder.into_inner(), pool.into_inner());
//! assert!(!lp.is_zero());
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a hex address
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("Invalid hex in address '{input}'")]
    InvalidHex { input: String },

    #[error("Address must be 20 bytes, got {got}")]
    InvalidLength { got: usize },
}

/// Parse an optionally `0x`-prefixed 40 character hex string
fn parse_address_bytes(input: &str) -> Result<[u8; 20], AddressParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let bytes = hex::decode(digits).map_err(|_| AddressParseError::InvalidHex {
        input: input.to_string(),
    })?;

    bytes
        .as_slice()
        .try_into()
        .map_err(|_| AddressParseError::InvalidLength { got: bytes.len() })
}

/// Macro for generating typed 20-byte address wrappers
macro_rules! define_address {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize
        )]
        #[repr(transparent)]
        pub struct $name(pub [u8; 20]);

        impl $name {
            /// The all-zero address, used as "empty"
            pub const ZERO: Self = Self([0u8; 20]);

            #[inline(always)]
            pub const fn new(inner: [u8; 20]) -> Self {
                Self(inner)
            }

            #[inline(always)]
            pub const fn inner(&self) -> &[u8; 20] {
                &self.0
            }

            #[inline(always)]
            pub const fn into_inner(self) -> [u8; 20] {
                self.0
            }

            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            #[inline(always)]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 20]
            }

            /// Build an address whose low-order bytes hold `value` (big-endian)
            pub const fn from_low_u64(value: u64) -> Self {
                let be = value.to_be_bytes();
                let mut bytes = [0u8; 20];
                let mut i = 0;
                while i < 8 {
                    bytes[12 + i] = be[i];
                    i += 1;
                }
                Self(bytes)
            }

            /// First four bytes as hex, for compact log lines
            pub fn short(&self) -> String {
                hex::encode(&self.0[..4])
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = AddressParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_address_bytes(s).map(Self)
            }
        }

        impl From<[u8; 20]> for $name {
            #[inline(always)]
            fn from(inner: [u8; 20]) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for [u8; 20] {
            #[inline(always)]
            fn from(wrapper: $name) -> [u8; 20] {
                wrapper.0
            }
        }

        impl AsRef<[u8; 20]> for $name {
            #[inline(always)]
            fn as_ref(&self) -> &[u8; 20] {
                &self.0
            }
        }
    };
}

/// Implements lossless conversions between two address wrappers
macro_rules! impl_address_conversion {
    ($from:ident => $to:ident) => {
        impl From<$from> for $to {
            #[inline(always)]
            fn from(value: $from) -> Self {
                Self(value.0)
            }
        }
    };
}

define_address!(
    /// Generic account address: admins, templates, gauges, oracles
    Address
);

define_address!(
    /// Deployed or registered pool address
    PoolAddress
);

define_address!(
    /// Token contract address (pool coins and LP tokens)
    TokenAddress
);

impl_address_conversion!(PoolAddress => Address);
impl_address_conversion!(TokenAddress => Address);
impl_address_conversion!(Address => PoolAddress);
impl_address_conversion!(Address => TokenAddress);
