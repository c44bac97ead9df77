//! Committed registry state and its read-only query surface
//!
//! [`RegistryState`] owns every record, the market index, the implementation
//! slots, the admin gate and the asset type table. Mutation goes through the
//! `commit_*` methods, which check everything that can fail before touching
//! any field.

use crate::admin::AdminGate;
use crate::error::{NotFoundError, Result, StateError, ValidationError};
use crate::market_index::MarketIndex;
use crate::params::rate_multiplier;
use crate::slots::{ImplementationSlots, SlotKind};
use crate::store::{BasePoolRecord, MetadataStore, PoolRecord};
use factory_types::{Address, AssetType, AssetTypeTable, PoolAddress, TokenAddress};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    store: MetadataStore,
    index: MarketIndex,
    slots: ImplementationSlots,
    admin: AdminGate,
    asset_types: AssetTypeTable,
}

impl RegistryState {
    pub fn new(admin: Address, fee_receiver: Address) -> Self {
        Self {
            store: MetadataStore::new(),
            index: MarketIndex::new(),
            slots: ImplementationSlots::new(),
            admin: AdminGate::new(admin, fee_receiver),
            asset_types: AssetTypeTable::new(),
        }
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn admin_gate(&self) -> &AdminGate {
        &self.admin
    }

    pub fn asset_type_table(&self) -> &AssetTypeTable {
        &self.asset_types
    }

    // ---- market index ----

    pub fn find_pool_for_coins(&self, from: TokenAddress, to: TokenAddress, i: usize) -> Option<PoolAddress> {
        self.index.lookup(from, to, i)
    }

    pub fn find_pools_for_coins(&self, from: TokenAddress, to: TokenAddress) -> Vec<PoolAddress> {
        self.index.pools_for(from, to).to_vec()
    }

    pub fn pool_count_for_coins(&self, from: TokenAddress, to: TokenAddress) -> usize {
        self.index.count(from, to)
    }

    // ---- pool metadata ----

    pub fn pool_record(&self, pool: PoolAddress) -> Option<PoolRecord> {
        self.store.pool(pool).cloned()
    }

    pub fn get_n_coins(&self, pool: PoolAddress) -> Result<usize> {
        Ok(self.store.require_pool(pool)?.n_coins())
    }

    pub fn get_coins(&self, pool: PoolAddress) -> Result<Vec<TokenAddress>> {
        Ok(self.store.require_pool(pool)?.coins.to_vec())
    }

    pub fn get_decimals(&self, pool: PoolAddress) -> Result<Vec<u8>> {
        Ok(self.store.require_pool(pool)?.decimals.to_vec())
    }

    /// Paired coin followed by every coin of the base pool
    pub fn get_underlying_coins(&self, pool: PoolAddress) -> Result<Vec<TokenAddress>> {
        let (record, base) = self.require_metapool(pool)?;
        Ok(underlying(record.coins.as_slice(), base.coins.as_slice()))
    }

    pub fn get_underlying_decimals(&self, pool: PoolAddress) -> Result<Vec<u8>> {
        let (record, base) = self.require_metapool(pool)?;
        Ok(underlying(record.decimals.as_slice(), &base.decimals()))
    }

    /// Positions of `from` and `to` and whether they are underlying coins
    ///
    /// The pool's own coins are searched first; a metapool then falls back to
    /// its underlying set.
    pub fn get_coin_indices(
        &self,
        pool: PoolAddress,
        from: TokenAddress,
        to: TokenAddress,
    ) -> Result<(usize, usize, bool)> {
        let record = self.store.require_pool(pool)?;
        if from == to {
            return Err(ValidationError::SameCoin { coin: from }.into());
        }

        if let (Some(i), Some(j)) = (record.coins.position(&from), record.coins.position(&to)) {
            return Ok((i, j, false));
        }

        if let Some(base_pool) = record.base_pool {
            let base = self.store.require_base_pool(base_pool)?;
            let coins = underlying(record.coins.as_slice(), base.coins.as_slice());
            let i = coins.iter().position(|coin| *coin == from);
            let j = coins.iter().position(|coin| *coin == to);
            if let (Some(i), Some(j)) = (i, j) {
                return Ok((i, j, true));
            }
        }

        Err(NotFoundError::CoinPair { pool, from, to }.into())
    }

    pub fn is_meta(&self, pool: PoolAddress) -> Result<bool> {
        Ok(self.store.require_pool(pool)?.is_meta())
    }

    pub fn get_pool_asset_types(&self, pool: PoolAddress) -> Result<Vec<AssetType>> {
        Ok(self.store.require_pool(pool)?.asset_types.to_vec())
    }

    pub fn get_base_pool(&self, pool: PoolAddress) -> Result<Option<PoolAddress>> {
        Ok(self.store.require_pool(pool)?.base_pool)
    }

    /// `(coins, underlying coins)` of a metapool
    pub fn get_meta_n_coins(&self, pool: PoolAddress) -> Result<(usize, usize)> {
        let (record, base) = self.require_metapool(pool)?;
        Ok((record.n_coins(), base.n_coins() + 1))
    }

    pub fn get_gauge(&self, pool: PoolAddress) -> Result<Option<Address>> {
        Ok(self.store.require_pool(pool)?.liquidity_gauge)
    }

    pub fn get_implementation_address(&self, pool: PoolAddress) -> Result<Address> {
        Ok(self.store.require_pool(pool)?.implementation)
    }

    pub fn get_rate_multipliers(&self, pool: PoolAddress) -> Result<Vec<u128>> {
        let record = self.store.require_pool(pool)?;
        Ok(record.decimals.iter().map(|d| rate_multiplier(*d)).collect())
    }

    // ---- enumeration ----

    pub fn pool_list(&self, index: usize) -> Option<PoolAddress> {
        self.store.pool_list(index)
    }

    pub fn pool_count(&self) -> usize {
        self.store.pool_count()
    }

    pub fn base_pool_list(&self, index: usize) -> Option<PoolAddress> {
        self.store.base_pool_list(index)
    }

    pub fn base_pool_count(&self) -> usize {
        self.store.base_pool_count()
    }

    pub fn base_pool_data(&self, pool: PoolAddress) -> Option<BasePoolRecord> {
        self.store.base_pool(pool).cloned()
    }

    pub fn is_base_pool_asset(&self, coin: TokenAddress) -> bool {
        self.store.is_base_pool_asset(coin)
    }

    // ---- admin, slots, asset types ----

    pub fn admin(&self) -> Address {
        self.admin.admin()
    }

    pub fn future_admin(&self) -> Option<Address> {
        self.admin.future_admin()
    }

    pub fn fee_receiver(&self) -> Address {
        self.admin.fee_receiver()
    }

    pub fn asset_type_name(&self, id: u8) -> Option<String> {
        self.asset_types.name(id).map(str::to_string)
    }

    pub fn pool_implementation(&self, index: u64) -> Option<Address> {
        self.slots.plain_pool(index)
    }

    pub fn metapool_implementation(&self, index: u64) -> Option<Address> {
        self.slots.metapool(index)
    }

    pub fn math_implementation(&self) -> Option<Address> {
        self.slots.math()
    }

    pub fn gauge_implementation(&self) -> Option<Address> {
        self.slots.gauge()
    }

    pub fn views_implementation(&self) -> Option<Address> {
        self.slots.views()
    }

    fn require_metapool(&self, pool: PoolAddress) -> Result<(&PoolRecord, &BasePoolRecord)> {
        let record = self.store.require_pool(pool)?;
        let base_pool = record
            .base_pool
            .ok_or(ValidationError::NotMetapool { pool })?;
        Ok((record, self.store.require_base_pool(base_pool)?))
    }

    // ---- commits ----

    fn ensure_unused(&self, address: PoolAddress) -> Result<()> {
        if self.store.contains_pool(address) {
            return Err(StateError::AddressInUse(address.into()).into());
        }
        Ok(())
    }

    /// Store a plain pool and index every pair of its coins
    pub(crate) fn commit_plain_pool(&mut self, record: PoolRecord) -> Result<()> {
        self.ensure_unused(record.address)?;

        self.index.register(record.address, record.coins.as_slice());
        debug!(
            "Registered {} coin pairs for plain pool {}",
            record.n_coins() * (record.n_coins() - 1) / 2,
            record.address
        );
        self.store.insert_pool(record);
        Ok(())
    }

    /// Store a metapool, indexing the paired coin against the LP token and
    /// against every base pool coin
    pub(crate) fn commit_metapool(&mut self, record: PoolRecord, base_coins: &[TokenAddress]) -> Result<()> {
        self.ensure_unused(record.address)?;

        let pool = record.address;
        let (coin, lp_token) = match record.coins.as_slice() {
            [coin, lp_token] => (*coin, *lp_token),
            coins => {
                return Err(ValidationError::CoinCount {
                    got: coins.len(),
                    min: 2,
                    max: 2,
                }
                .into())
            }
        };

        self.index.register_pair(pool, coin, lp_token);
        for base_coin in base_coins {
            self.index.register_pair(pool, coin, *base_coin);
        }
        debug!(
            "Registered {} coin pairs for metapool {}",
            base_coins.len() + 1,
            pool
        );
        self.store.insert_pool(record);
        Ok(())
    }

    pub(crate) fn commit_base_pool(&mut self, record: BasePoolRecord) -> Result<()> {
        if self.store.contains_base_pool(record.address) {
            return Err(StateError::BasePoolExists(record.address).into());
        }
        self.store.insert_base_pool(record);
        Ok(())
    }

    pub(crate) fn commit_gauge(&mut self, pool: PoolAddress, gauge: Address) -> Result<()> {
        let record = self.store.require_pool(pool)?;
        if let Some(existing) = record.liquidity_gauge {
            return Err(StateError::GaugeAlreadyDeployed {
                pool,
                gauge: existing,
            }
            .into());
        }
        self.store.set_gauge(pool, gauge);
        Ok(())
    }

    pub(crate) fn slots_mut(&mut self) -> &mut ImplementationSlots {
        &mut self.slots
    }

    pub(crate) fn admin_mut(&mut self) -> &mut AdminGate {
        &mut self.admin
    }

    pub(crate) fn asset_types_mut(&mut self) -> &mut AssetTypeTable {
        &mut self.asset_types
    }

    /// Check a slot kind is usable at `index`
    pub(crate) fn resolve_slot(&self, kind: SlotKind, index: u64) -> Result<Address> {
        self.slots.resolve(kind, index)
    }
}

/// `own[0]` followed by the base pool's entries
fn underlying<T: Copy>(own: &[T], base: &[T]) -> Vec<T> {
    own.iter().take(1).chain(base.iter()).copied().collect()
}
