//! Protocol limits enforced by the factory
//!
//! Fee values are expressed in units of [`FEE_DENOMINATOR`], so a fee of
//! `4_000_000` is 0.04%.

/// Maximum number of coins in any pool (and in a metapool's underlying set)
pub const MAX_COINS: usize = 8;

/// Minimum number of coins in a plain or base pool
pub const MIN_COINS: usize = 2;

/// Largest accepted token decimals
pub const MAX_DECIMALS: u8 = 18;

/// Smallest accepted token decimals. Zero is the packed-decimals terminator.
pub const MIN_DECIMALS: u8 = 1;

/// Decimals of every pool LP token
pub const LP_TOKEN_DECIMALS: u8 = 18;

/// Exponent used for rate multipliers: `10^(RATE_PRECISION_EXPONENT - decimals)`
pub const RATE_PRECISION_EXPONENT: u32 = 36;

/// Fee scaling
pub mod fees {
    /// Fee denominator (10^10)
    pub const FEE_DENOMINATOR: u128 = 10_000_000_000;

    /// Maximum swap fee for a newly deployed pool: 1%
    pub const MAX_POOL_FEE: u128 = 100_000_000;

    /// Maximum effective fee (50%)
    pub const MAX_FEE: u128 = 5_000_000_000;

    /// Ceiling for `offpeg_fee_multiplier * fee`
    pub const MAX_OFFPEG_FEE_PRODUCT: u128 = MAX_FEE * FEE_DENOMINATOR;
}

/// Metadata string bounds
pub mod strings {
    /// Maximum pool name length
    pub const MAX_NAME_LEN: usize = 32;

    /// Maximum pool symbol length
    pub const MAX_SYMBOL_LEN: usize = 10;

    /// Maximum asset type name length
    pub const MAX_ASSET_TYPE_NAME_LEN: usize = 20;
}

pub use fees::*;
pub use strings::*;
