//! Pool and base pool records
//!
//! Records are created once and never removed. The only field that changes
//! after creation is [`PoolRecord::liquidity_gauge`], set at most once.

use crate::error::{NotFoundError, Result};
use factory_codec::PackedDecimals;
use factory_types::{Address, AssetType, CoinArray, PoolAddress, TokenAddress};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Metadata of a deployed plain pool or metapool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub address: PoolAddress,
    /// Present iff the pool is a metapool
    pub base_pool: Option<PoolAddress>,
    pub implementation: Address,
    /// Metapools hold `[paired coin, base pool LP token]`
    pub coins: CoinArray<TokenAddress>,
    pub decimals: CoinArray<u8>,
    /// Metapools hold the paired coin's type followed by the base pool's
    pub asset_types: CoinArray<AssetType>,
    pub liquidity_gauge: Option<Address>,
}

impl PoolRecord {
    pub fn n_coins(&self) -> usize {
        self.coins.len()
    }

    pub fn is_meta(&self) -> bool {
        self.base_pool.is_some()
    }
}

/// Metadata of a pool accepted as a metapool base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePoolRecord {
    pub address: PoolAddress,
    pub lp_token: TokenAddress,
    pub coins: CoinArray<TokenAddress>,
    pub packed_decimals: PackedDecimals,
    pub asset_types: CoinArray<AssetType>,
}

impl BasePoolRecord {
    pub fn n_coins(&self) -> usize {
        self.coins.len()
    }

    /// Per-coin decimals decoded from the packed word
    pub fn decimals(&self) -> Vec<u8> {
        self.packed_decimals.unpack().to_vec()
    }
}

/// Dense, append-only record storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataStore {
    pools: HashMap<PoolAddress, PoolRecord>,
    pool_list: Vec<PoolAddress>,
    base_pools: HashMap<PoolAddress, BasePoolRecord>,
    base_pool_list: Vec<PoolAddress>,
    base_pool_assets: HashSet<TokenAddress>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_pool(&self, pool: PoolAddress) -> bool {
        self.pools.contains_key(&pool)
    }

    pub fn contains_base_pool(&self, pool: PoolAddress) -> bool {
        self.base_pools.contains_key(&pool)
    }

    pub fn pool(&self, pool: PoolAddress) -> Option<&PoolRecord> {
        self.pools.get(&pool)
    }

    pub fn base_pool(&self, pool: PoolAddress) -> Option<&BasePoolRecord> {
        self.base_pools.get(&pool)
    }

    /// Like [`Self::pool`], failing with `NotFound`
    pub fn require_pool(&self, pool: PoolAddress) -> Result<&PoolRecord> {
        self.pools
            .get(&pool)
            .ok_or_else(|| NotFoundError::Pool(pool).into())
    }

    pub fn require_base_pool(&self, pool: PoolAddress) -> Result<&BasePoolRecord> {
        self.base_pools
            .get(&pool)
            .ok_or_else(|| NotFoundError::BasePool(pool).into())
    }

    pub fn pool_list(&self, index: usize) -> Option<PoolAddress> {
        self.pool_list.get(index).copied()
    }

    pub fn pool_count(&self) -> usize {
        self.pool_list.len()
    }

    pub fn base_pool_list(&self, index: usize) -> Option<PoolAddress> {
        self.base_pool_list.get(index).copied()
    }

    pub fn base_pool_count(&self) -> usize {
        self.base_pool_list.len()
    }

    pub fn is_base_pool_asset(&self, coin: TokenAddress) -> bool {
        self.base_pool_assets.contains(&coin)
    }

    /// Append a new pool record; the caller checked the address is unused
    pub(crate) fn insert_pool(&mut self, record: PoolRecord) {
        self.pool_list.push(record.address);
        self.pools.insert(record.address, record);
    }

    /// Append a base pool record and flag every coin it holds
    pub(crate) fn insert_base_pool(&mut self, record: BasePoolRecord) {
        self.base_pool_assets.extend(record.coins.iter().copied());
        self.base_pool_list.push(record.address);
        self.base_pools.insert(record.address, record);
    }

    pub(crate) fn set_gauge(&mut self, pool: PoolAddress, gauge: Address) {
        if let Some(record) = self.pools.get_mut(&pool) {
            record.liquidity_gauge = Some(gauge);
        }
    }
}
