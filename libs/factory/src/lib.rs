//! # Pool Factory
//!
//! Permissionless factory and registry for stableswap pools. Anyone can
//! deploy plain pools of 2..=8 coins, metapools that pair one coin against a
//! registered base pool's LP token, and a liquidity gauge per pool. The admin
//! manages implementation templates, base pools, custom asset types and the
//! fee receiver.
//!
//! ## Components
//!
//! - [`PoolFactory`]: serialized mutation, validation, instantiation, events
//! - [`RegistryState`]: committed records and the full read-only query surface
//! - [`MarketIndex`]: coin pair to pools, append-only
//! - [`MetadataStore`]: pool and base pool records
//! - [`AdminGate`]: admin authority and two-step ownership transfer
//! - [`InMemoryChain`]: in-process [`Instantiator`] and [`ChainReader`]
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use factory_types::{Address, TokenAddress};
//! use pool_factory::{InMemoryChain, PlainPoolParams, PoolFactory};
//!
//! let admin = Address::from_low_u64(0xad);
//! let chain = Arc::new(InMemoryChain::default());
//! let factory = PoolFactory::new(admin, admin, chain.clone(), chain.clone());
//! factory.set_pool_implementation(admin, 0, Some(Address::from_low_u64(0x1000))).unwrap();
//!
//! let usdc = TokenAddress::from_low_u64(1);
//! let usdt = TokenAddress::from_low_u64(2);
//! chain.add_token(usdc, 6);
//! chain.add_token(usdt, 6);
//!
//! let pool = factory
//!     .deploy_plain_pool(admin, PlainPoolParams::new("USD", "USD", vec![usdc, usdt]))
//!     .unwrap();
//! assert_eq!(factory.find_pool_for_coins(usdt, usdc, 0), Some(pool));
//! ```

pub mod admin;
pub mod constructor;
pub mod environment;
pub mod error;
pub mod events;
pub mod factory;
pub mod in_memory;
pub mod market_index;
pub mod params;
pub mod slots;
pub mod state;
pub mod store;

pub use admin::AdminGate;
pub use constructor::{layout, ConstructorArg, ConstructorArgs, DeploymentKind, CONSTRUCTOR_LAYOUT_VERSION};
pub use environment::{ChainError, ChainReader, InstantiationError, Instantiator};
pub use error::{
    AuthorizationError, ErrorKind, NotFoundError, RegistryError, Result, StateError, ValidationError,
};
pub use events::{EventBus, RegistryEvent};
pub use factory::PoolFactory;
pub use in_memory::{InMemoryChain, InstanceRecord, SimulatedPool};
pub use market_index::{MarketIndex, PairKey};
pub use params::{rate_multiplier, MetaPoolParams, OracleBinding, PlainPoolParams};
pub use slots::{ImplementationSlots, SlotKind};
pub use state::RegistryState;
pub use store::{BasePoolRecord, MetadataStore, PoolRecord};
