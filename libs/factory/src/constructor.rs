//! Versioned constructor argument layout handed to the instantiation service
//!
//! Argument positions are fixed per [`DeploymentKind`]; the [`layout`] module
//! names every position so templates and the factory agree on the ordering.

use factory_types::Address;
use serde::{Deserialize, Serialize};

/// Version of the argument ordering below
pub const CONSTRUCTOR_LAYOUT_VERSION: u16 = 1;

/// Argument positions
pub mod layout {
    // Shared prefix of plain and meta pools
    pub const NAME: usize = 0;
    pub const SYMBOL: usize = 1;
    pub const A: usize = 2;
    pub const FEE: usize = 3;
    pub const OFFPEG_FEE_MULTIPLIER: usize = 4;
    pub const MA_EXP_TIME: usize = 5;
    pub const MATH_IMPLEMENTATION: usize = 6;

    pub mod plain {
        pub const COINS: usize = 7;
        pub const RATE_MULTIPLIERS: usize = 8;
        pub const ASSET_TYPES: usize = 9;
        pub const METHOD_IDS: usize = 10;
        pub const ORACLES: usize = 11;
        pub const LEN: usize = 12;
    }

    pub mod meta {
        pub const BASE_POOL: usize = 7;
        pub const COINS: usize = 8;
        pub const BASE_COINS: usize = 9;
        pub const RATE_MULTIPLIERS: usize = 10;
        pub const ASSET_TYPES: usize = 11;
        pub const METHOD_IDS: usize = 12;
        pub const ORACLES: usize = 13;
        pub const LEN: usize = 14;
    }

    pub mod gauge {
        pub const POOL: usize = 0;
        pub const LEN: usize = 1;
    }
}

/// What a template instance is being created as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentKind {
    PlainPool,
    MetaPool,
    Gauge,
}

/// Single constructor argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructorArg {
    Text(String),
    Uint(u128),
    Address(Address),
    Addresses(Vec<Address>),
    Uints(Vec<u128>),
    Bytes(Vec<u8>),
    Selectors(Vec<[u8; 4]>),
}

/// Ordered constructor arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorArgs {
    pub version: u16,
    pub kind: DeploymentKind,
    values: Vec<ConstructorArg>,
}

impl ConstructorArgs {
    pub fn new(kind: DeploymentKind) -> Self {
        Self {
            version: CONSTRUCTOR_LAYOUT_VERSION,
            kind,
            values: Vec::new(),
        }
    }

    /// Append the next positional argument
    pub fn with(mut self, arg: ConstructorArg) -> Self {
        self.values.push(arg);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&ConstructorArg> {
        self.values.get(position)
    }

    pub fn values(&self) -> &[ConstructorArg] {
        &self.values
    }

    pub fn text(&self, position: usize) -> Option<&str> {
        match self.get(position)? {
            ConstructorArg::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn uint(&self, position: usize) -> Option<u128> {
        match self.get(position)? {
            ConstructorArg::Uint(value) => Some(*value),
            _ => None,
        }
    }

    pub fn address(&self, position: usize) -> Option<Address> {
        match self.get(position)? {
            ConstructorArg::Address(value) => Some(*value),
            _ => None,
        }
    }

    pub fn addresses(&self, position: usize) -> Option<&[Address]> {
        match self.get(position)? {
            ConstructorArg::Addresses(values) => Some(values),
            _ => None,
        }
    }

    pub fn uints(&self, position: usize) -> Option<&[u128]> {
        match self.get(position)? {
            ConstructorArg::Uints(values) => Some(values),
            _ => None,
        }
    }
}
