//! Deployment parameters and the validation rules shared by both pool kinds

use crate::error::{Result, ValidationError};
use factory_config::limits::{
    MAX_DECIMALS, MAX_NAME_LEN, MAX_OFFPEG_FEE_PRODUCT, MAX_POOL_FEE, MAX_SYMBOL_LEN, MIN_DECIMALS,
    RATE_PRECISION_EXPONENT,
};
use factory_types::{Address, AssetType, AssetTypeTable, PoolAddress, TokenAddress};
use serde::{Deserialize, Serialize};

/// Typical parameters for a newly deployed stable pool
pub mod defaults {
    pub const A: u128 = 200;
    /// 0.04%
    pub const FEE: u128 = 4_000_000;
    pub const OFFPEG_FEE_MULTIPLIER: u128 = 20_000_000_000;
    pub const MA_EXP_TIME: u128 = 866;
}

/// Rate oracle for a coin: `oracle.method_id()` returns the coin's rate
///
/// Coins without an oracle use [`OracleBinding::NONE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OracleBinding {
    pub method_id: [u8; 4],
    pub oracle: Address,
}

impl OracleBinding {
    pub const NONE: Self = Self {
        method_id: [0; 4],
        oracle: Address::ZERO,
    };

    pub fn new(method_id: [u8; 4], oracle: Address) -> Self {
        Self { method_id, oracle }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainPoolParams {
    pub name: String,
    pub symbol: String,
    pub coins: Vec<TokenAddress>,
    pub a: u128,
    pub fee: u128,
    pub offpeg_fee_multiplier: u128,
    pub ma_exp_time: u128,
    pub implementation_index: u64,
    pub asset_types: Vec<AssetType>,
    pub oracle_bindings: Vec<OracleBinding>,
}

impl PlainPoolParams {
    /// Standard-asset pool with default tuning, implementation index 0
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, coins: Vec<TokenAddress>) -> Self {
        let n = coins.len();
        Self {
            name: name.into(),
            symbol: symbol.into(),
            coins,
            a: defaults::A,
            fee: defaults::FEE,
            offpeg_fee_multiplier: defaults::OFFPEG_FEE_MULTIPLIER,
            ma_exp_time: defaults::MA_EXP_TIME,
            implementation_index: 0,
            asset_types: vec![AssetType::Standard; n],
            oracle_bindings: vec![OracleBinding::NONE; n],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaPoolParams {
    pub base_pool: PoolAddress,
    pub name: String,
    pub symbol: String,
    pub coin: TokenAddress,
    pub a: u128,
    pub fee: u128,
    pub offpeg_fee_multiplier: u128,
    pub ma_exp_time: u128,
    pub implementation_index: u64,
    pub asset_type: AssetType,
    pub oracle_binding: OracleBinding,
}

impl MetaPoolParams {
    /// Standard-asset metapool with default tuning, implementation index 0
    pub fn new(
        base_pool: PoolAddress,
        name: impl Into<String>,
        symbol: impl Into<String>,
        coin: TokenAddress,
    ) -> Self {
        Self {
            base_pool,
            name: name.into(),
            symbol: symbol.into(),
            coin,
            a: defaults::A,
            fee: defaults::FEE,
            offpeg_fee_multiplier: defaults::OFFPEG_FEE_MULTIPLIER,
            ma_exp_time: defaults::MA_EXP_TIME,
            implementation_index: 0,
            asset_type: AssetType::Standard,
            oracle_binding: OracleBinding::NONE,
        }
    }
}

pub(crate) fn validate_fees(fee: u128, offpeg_fee_multiplier: u128) -> Result<()> {
    if fee > MAX_POOL_FEE {
        return Err(ValidationError::FeeTooHigh {
            fee,
            max: MAX_POOL_FEE,
        }
        .into());
    }

    let within_limit = offpeg_fee_multiplier
        .checked_mul(fee)
        .is_some_and(|product| product <= MAX_OFFPEG_FEE_PRODUCT);
    if !within_limit {
        return Err(ValidationError::OffpegFeeTooHigh {
            multiplier: offpeg_fee_multiplier,
            fee,
            max: MAX_OFFPEG_FEE_PRODUCT,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn validate_text(name: &str, symbol: &str) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TextTooLong {
            field: "name",
            len: name.len(),
            max: MAX_NAME_LEN,
        }
        .into());
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(ValidationError::TextTooLong {
            field: "symbol",
            len: symbol.len(),
            max: MAX_SYMBOL_LEN,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn validate_decimals(coin: TokenAddress, decimals: u8) -> Result<()> {
    if !(MIN_DECIMALS..=MAX_DECIMALS).contains(&decimals) {
        return Err(ValidationError::Decimals {
            coin,
            decimals,
            min: MIN_DECIMALS,
            max: MAX_DECIMALS,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn validate_asset_types(table: &AssetTypeTable, asset_types: &[AssetType]) -> Result<()> {
    match asset_types.iter().find(|asset_type| !table.contains(**asset_type)) {
        Some(unknown) => Err(ValidationError::UnknownAssetType { id: unknown.id() }.into()),
        None => Ok(()),
    }
}

/// `10^(36 - decimals)`; scales a coin's balance to 18-decimal precision
/// with 18 extra digits. `decimals` must already be validated.
pub fn rate_multiplier(decimals: u8) -> u128 {
    10u128.pow(RATE_PRECISION_EXPONENT - u32::from(decimals))
}
