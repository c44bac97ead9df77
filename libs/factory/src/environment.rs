//! External collaborators of the factory
//!
//! The factory never creates code or reads balances itself. It asks an
//! [`Instantiator`] for fresh instances and a [`ChainReader`] for token and
//! pool facts. [`crate::InMemoryChain`] implements both for tests and
//! simulations.

use crate::constructor::ConstructorArgs;
use factory_types::{Address, PoolAddress, TokenAddress};
use thiserror::Error;

/// Template instantiation failures; no partial instance exists afterwards
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstantiationError {
    #[error("Template {0} has no code")]
    UnknownTemplate(Address),

    #[error("Template {template} rejected constructor arguments: {reason}")]
    Rejected { template: Address, reason: String },
}

/// Failures reading token or pool state
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Token {0} is unknown")]
    UnknownToken(TokenAddress),

    #[error("Pool {0} is unknown")]
    UnknownPool(PoolAddress),

    #[error("Pool {pool} has no coin at index {index}")]
    CoinIndex { pool: PoolAddress, index: usize },
}

/// Creates independently addressed instances of code templates
pub trait Instantiator: Send + Sync {
    /// Instantiate `template` with positional `args`, returning the new address
    fn instantiate(
        &self,
        template: Address,
        args: &ConstructorArgs,
    ) -> Result<Address, InstantiationError>;
}

/// Read-only view of token and pool contracts
pub trait ChainReader: Send + Sync {
    /// Token `decimals()`
    fn decimals(&self, token: TokenAddress) -> Result<u8, ChainError>;

    /// Pool `coins(index)`
    fn pool_coin(&self, pool: PoolAddress, index: usize) -> Result<TokenAddress, ChainError>;

    /// Pool `balances(index)`
    fn pool_balance(&self, pool: PoolAddress, index: usize) -> Result<u128, ChainError>;

    /// Token `balanceOf(holder)`
    fn token_balance(&self, token: TokenAddress, holder: Address) -> Result<u128, ChainError>;

    /// Pool amplification coefficient `A()`
    fn amplification(&self, pool: PoolAddress) -> Result<u128, ChainError>;

    /// Pool swap fee, in units of the fee denominator
    fn fee(&self, pool: PoolAddress) -> Result<u128, ChainError>;

    /// Pool admin fee share, in units of the fee denominator
    fn admin_fee(&self, pool: PoolAddress) -> Result<u128, ChainError>;
}
