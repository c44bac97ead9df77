//! Registry error taxonomy
//!
//! Every failure is reported synchronously and leaves the registry unchanged.
//! The four registry kinds map onto [`ErrorKind`]; collaborator failures are
//! surfaced as-is.

use crate::environment::{ChainError, InstantiationError};
use crate::slots::SlotKind;
use factory_codec::CodecError;
use factory_types::{Address, AssetTypeError, PoolAddress, TokenAddress};
use thiserror::Error;

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;

/// Coarse classification of a [`RegistryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    State,
    Authorization,
    Instantiation,
    Chain,
}

/// Malformed or out-of-bounds input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Pool needs {min}..={max} coins, got {got}")]
    CoinCount { got: usize, min: usize, max: usize },

    #[error("Duplicate coin {coin}")]
    DuplicateCoin { coin: TokenAddress },

    #[error("Zero address at coin position {index}")]
    ZeroCoin { index: usize },

    #[error("Length mismatch: {coins} coins, {asset_types} asset types, {oracles} oracle bindings")]
    LengthMismatch {
        coins: usize,
        asset_types: usize,
        oracles: usize,
    },

    #[error("Coin {coin} reports {decimals} decimals, expected {min}..={max}")]
    Decimals {
        coin: TokenAddress,
        decimals: u8,
        min: u8,
        max: u8,
    },

    #[error("Fee {fee} exceeds maximum {max}")]
    FeeTooHigh { fee: u128, max: u128 },

    #[error("Offpeg fee multiplier {multiplier} * fee {fee} exceeds {max}")]
    OffpegFeeTooHigh { multiplier: u128, fee: u128, max: u128 },

    #[error("Coin {coin} is a constituent of a registered base pool")]
    PairedCoinInBasePool { coin: TokenAddress },

    #[error("Coin {coin} is the LP token of base pool {base_pool}")]
    PairedCoinIsBaseLpToken {
        coin: TokenAddress,
        base_pool: PoolAddress,
    },

    #[error("Rebasing asset at position {index} cannot join a base pool")]
    RebasingInBasePool { index: usize },

    #[error("Unknown asset type id {id}")]
    UnknownAssetType { id: u8 },

    #[error("Asset type name must be 1..={max} characters, got {len}")]
    AssetTypeName { len: usize, max: usize },

    #[error("{field} must be at most {max} characters, got {len}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Zero address is not a valid {what}")]
    ZeroAddress { what: &'static str },

    #[error("Pool {pool} is not a metapool")]
    NotMetapool { pool: PoolAddress },

    #[error("Cannot look up indices of {coin} against itself")]
    SameCoin { coin: TokenAddress },

    #[error("Packed decimals rejected: {0}")]
    Codec(#[from] CodecError),
}

/// Unknown records or empty slots
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Pool {0} is not registered")]
    Pool(PoolAddress),

    #[error("Base pool {0} is not registered")]
    BasePool(PoolAddress),

    #[error("No {kind} implementation at index {index}")]
    Implementation { kind: SlotKind, index: u64 },

    #[error("Pool {pool} cannot exchange {from} for {to}")]
    CoinPair {
        pool: PoolAddress,
        from: TokenAddress,
        to: TokenAddress,
    },
}

/// Operation conflicts with existing records
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Base pool {0} is already registered")]
    BasePoolExists(PoolAddress),

    #[error("Pool {pool} already has gauge {gauge}")]
    GaugeAlreadyDeployed { pool: PoolAddress, gauge: Address },

    #[error("Asset type id {id} is already registered as '{existing}'")]
    AssetTypeTaken { id: u8, existing: String },

    #[error("Instantiated address {0} is already registered")]
    AddressInUse(Address),
}

/// Caller is not allowed to perform the operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Caller {caller} is not the admin")]
    NotAdmin { caller: Address },

    #[error("Caller {caller} is not the pending admin")]
    NotFutureAdmin { caller: Address },
}

/// Unified registry error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(#[from] NotFoundError),

    #[error("Invalid state: {0}")]
    State(#[from] StateError),

    #[error("Unauthorized: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("Instantiation failed: {0}")]
    Instantiation(#[from] InstantiationError),

    #[error("Chain read failed: {0}")]
    Chain(#[from] ChainError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Validation(_) => ErrorKind::Validation,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::State(_) => ErrorKind::State,
            RegistryError::Authorization(_) => ErrorKind::Authorization,
            RegistryError::Instantiation(_) => ErrorKind::Instantiation,
            RegistryError::Chain(_) => ErrorKind::Chain,
        }
    }
}

impl From<CodecError> for RegistryError {
    fn from(err: CodecError) -> Self {
        RegistryError::Validation(ValidationError::Codec(err))
    }
}

impl From<AssetTypeError> for RegistryError {
    fn from(err: AssetTypeError) -> Self {
        match err {
            AssetTypeError::AlreadyRegistered { id, existing } => {
                RegistryError::State(StateError::AssetTypeTaken { id, existing })
            }
            AssetTypeError::InvalidName { len, max } => {
                RegistryError::Validation(ValidationError::AssetTypeName { len, max })
            }
        }
    }
}
