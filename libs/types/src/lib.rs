//! # Pool Factory Types Library
//!
//! Shared value types for the pool factory workspace.
//!
//! ## Design Philosophy
//!
//! - **Typed Addresses**: pools, tokens, and generic accounts are distinct types
//! - **Bounded Arrays**: coin lists are inline [`FixedVec`]s capped at `MAX_COINS`
//! - **Extensible Tags**: [`AssetType`] covers built-in classes plus admin-registered ids
//!
//! ## Quick Start
//!
//! ```rust
//! use factory_types::{AssetType, CoinArray, TokenAddress};
//!
//! let coins: CoinArray<TokenAddress> =
//!     CoinArray::from_slice(&[TokenAddress::from_low_u64(1), TokenAddress::from_low_u64(2)]).unwrap();
//! assert_eq!(coins.len(), 2);
//! assert_eq!(AssetType::from(1u8), AssetType::Oracle);
//! ```

pub mod asset_type;
pub mod fixed_vec;
pub mod identifiers;

pub use asset_type::{AssetType, AssetTypeError, AssetTypeTable};
pub use fixed_vec::{CoinArray, FixedVec, FixedVecError};
pub use identifiers::{Address, AddressParseError, PoolAddress, TokenAddress};
