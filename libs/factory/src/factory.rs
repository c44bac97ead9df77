//! Pool factory: deployment orchestration and admin operations
//!
//! Every mutating entry point holds the writer gate for its whole duration,
//! so operations are linearizable. Within one operation:
//!
//! 1. validate against a short read guard of the committed state
//! 2. read chain facts and instantiate templates with no state lock held
//! 3. take the write guard for the apply step only
//!
//! A failure in any step returns before step 3 mutates anything, so readers
//! never observe a partial deployment.

use crate::constructor::{ConstructorArg, ConstructorArgs, DeploymentKind};
use crate::environment::{ChainReader, Instantiator};
use crate::error::{RegistryError, Result, StateError, ValidationError};
use crate::events::{EventBus, RegistryEvent};
use crate::params::{
    rate_multiplier, validate_asset_types, validate_decimals, validate_fees, validate_text,
    MetaPoolParams, OracleBinding, PlainPoolParams,
};
use crate::slots::SlotKind;
use crate::state::RegistryState;
use crate::store::{BasePoolRecord, PoolRecord};
use anyhow::Context;
use crossbeam_channel::Receiver;
use factory_codec::PackedDecimals;
use factory_config::limits::{LP_TOKEN_DECIMALS, MAX_COINS, MIN_COINS};
use factory_config::RegistryConfig;
use factory_types::{Address, AssetType, CoinArray, PoolAddress, TokenAddress};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Forward read-only queries to the committed state under a read guard
macro_rules! delegate_to_state {
    ($( $(#[$meta:meta])* fn $name:ident(&self $(, $arg:ident: $ty:ty)*) -> $ret:ty; )*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self $(, $arg: $ty)*) -> $ret {
                self.state.read().$name($($arg),*)
            }
        )*
    };
}

/// A validated deployment waiting for its instance address
struct PendingPool {
    template: Address,
    args: ConstructorArgs,
    coins: CoinArray<TokenAddress>,
    decimals: CoinArray<u8>,
    asset_types: CoinArray<AssetType>,
    base_pool: Option<PoolAddress>,
    base_coins: Vec<TokenAddress>,
}

impl PendingPool {
    fn into_record(self, address: PoolAddress) -> (PoolRecord, Vec<TokenAddress>) {
        let record = PoolRecord {
            address,
            base_pool: self.base_pool,
            implementation: self.template,
            coins: self.coins,
            decimals: self.decimals,
            asset_types: self.asset_types,
            liquidity_gauge: None,
        };
        (record, self.base_coins)
    }
}

pub struct PoolFactory {
    writer: Mutex<()>,
    state: RwLock<RegistryState>,
    instantiator: Arc<dyn Instantiator>,
    chain: Arc<dyn ChainReader>,
    events: EventBus,
}

impl PoolFactory {
    pub fn new(
        admin: Address,
        fee_receiver: Address,
        instantiator: Arc<dyn Instantiator>,
        chain: Arc<dyn ChainReader>,
    ) -> Self {
        info!("Pool factory created: admin={}, fee_receiver={}", admin, fee_receiver);
        Self {
            writer: Mutex::new(()),
            state: RwLock::new(RegistryState::new(admin, fee_receiver)),
            instantiator,
            chain,
            events: EventBus::new(),
        }
    }

    /// Build a factory from loaded configuration, seeding implementation slots
    pub fn from_config(
        config: &RegistryConfig,
        instantiator: Arc<dyn Instantiator>,
        chain: Arc<dyn ChainReader>,
    ) -> anyhow::Result<Self> {
        let admin = parse_address("admin", &config.admin)?;
        let fee_receiver = parse_address("fee_receiver", &config.fee_receiver)?;
        let implementations = &config.implementations;

        let mut seeded: Vec<(SlotKind, u64, Address)> = Vec::new();
        for (kind, entries) in [
            (SlotKind::PlainPool, &implementations.plain),
            (SlotKind::MetaPool, &implementations.meta),
        ] {
            seeded.extend(parse_indexed(kind, entries)?);
        }
        for (kind, entry) in [
            (SlotKind::Math, &implementations.math),
            (SlotKind::Gauge, &implementations.gauge),
            (SlotKind::Views, &implementations.views),
        ] {
            if let Some(value) = entry {
                seeded.push((kind, 0, parse_address(&format!("{} implementation", kind), value)?));
            }
        }

        let factory = Self::new(admin, fee_receiver, instantiator, chain);
        {
            let mut state = factory.state.write();
            for (kind, index, template) in &seeded {
                state.slots_mut().set(*kind, *index, Some(*template));
            }
        }
        info!("Seeded {} implementation slots from config", seeded.len());
        Ok(factory)
    }

    /// Receive every event published after this call
    pub fn subscribe(&self) -> Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    /// Frozen copy of the committed state
    pub fn snapshot(&self) -> RegistryState {
        self.state.read().clone()
    }

    // ---- deployments ----

    /// Deploy a plain pool of 2..=8 coins. Permissionless.
    pub fn deploy_plain_pool(&self, deployer: Address, params: PlainPoolParams) -> Result<PoolAddress> {
        let _writer = self.writer.lock();
        self.try_deploy_plain_pool(deployer, &params).inspect_err(|err| {
            warn!("Plain pool deployment '{}' rejected: {}", params.name, err);
        })
    }

    fn try_deploy_plain_pool(&self, deployer: Address, params: &PlainPoolParams) -> Result<PoolAddress> {
        let (template, math) = {
            let state = self.state.read();
            validate_plain_params(&state, params)?;
            (
                state.resolve_slot(SlotKind::PlainPool, params.implementation_index)?,
                state.math_implementation().unwrap_or(Address::ZERO),
            )
        };

        let mut decimals = CoinArray::new();
        for coin in &params.coins {
            let d = self.chain.decimals(*coin)?;
            validate_decimals(*coin, d)?;
            decimals.try_push(d).map_err(|_| coin_count_error(params.coins.len()))?;
        }
        debug!("Plain pool '{}' decimals {:?}", params.name, decimals.as_slice());

        let rate_multipliers: Vec<u128> = decimals.iter().map(|d| rate_multiplier(*d)).collect();
        let (method_ids, oracles) = split_bindings(&params.oracle_bindings);
        let args = pool_args_prefix(
            DeploymentKind::PlainPool,
            &params.name,
            &params.symbol,
            [params.a, params.fee, params.offpeg_fee_multiplier, params.ma_exp_time],
            math,
        )
        .with(ConstructorArg::Addresses(params.coins.iter().map(|c| Address::from(*c)).collect()))
        .with(ConstructorArg::Uints(rate_multipliers))
        .with(ConstructorArg::Bytes(params.asset_types.iter().map(|t| t.id()).collect()))
        .with(ConstructorArg::Selectors(method_ids))
        .with(ConstructorArg::Addresses(oracles));

        let pending = PendingPool {
            template,
            args,
            coins: coin_array(&params.coins)?,
            decimals,
            asset_types: coin_array(&params.asset_types)?,
            base_pool: None,
            base_coins: Vec::new(),
        };

        let pool = self.instantiate_pool(&pending)?;
        let (record, _) = pending.into_record(pool);
        self.state.write().commit_plain_pool(record)?;

        info!(
            "Deployed plain pool {} '{}' with {} coins",
            pool,
            params.name,
            params.coins.len()
        );
        self.events.publish(RegistryEvent::PlainPoolDeployed {
            pool,
            coins: params.coins.clone(),
            a: params.a,
            fee: params.fee,
            offpeg_fee_multiplier: params.offpeg_fee_multiplier,
            deployer,
        });
        Ok(pool)
    }

    /// Deploy a metapool pairing one coin against a registered base pool's
    /// LP token. Permissionless.
    pub fn deploy_metapool(&self, deployer: Address, params: MetaPoolParams) -> Result<PoolAddress> {
        let _writer = self.writer.lock();
        self.try_deploy_metapool(deployer, &params).inspect_err(|err| {
            warn!("Metapool deployment '{}' rejected: {}", params.name, err);
        })
    }

    fn try_deploy_metapool(&self, deployer: Address, params: &MetaPoolParams) -> Result<PoolAddress> {
        let (base, template, math) = {
            let state = self.state.read();
            let base = state.store().require_base_pool(params.base_pool)?.clone();

            if params.coin.is_zero() {
                return Err(ValidationError::ZeroCoin { index: 0 }.into());
            }
            if state.is_base_pool_asset(params.coin) {
                return Err(ValidationError::PairedCoinInBasePool { coin: params.coin }.into());
            }
            if params.coin == base.lp_token {
                return Err(ValidationError::PairedCoinIsBaseLpToken {
                    coin: params.coin,
                    base_pool: base.address,
                }
                .into());
            }
            validate_fees(params.fee, params.offpeg_fee_multiplier)?;
            validate_text(&params.name, &params.symbol)?;
            validate_asset_types(state.asset_type_table(), &[params.asset_type])?;

            (
                base,
                state.resolve_slot(SlotKind::MetaPool, params.implementation_index)?,
                state.math_implementation().unwrap_or(Address::ZERO),
            )
        };

        let coin_decimals = self.chain.decimals(params.coin)?;
        validate_decimals(params.coin, coin_decimals)?;

        let coins = [params.coin, base.lp_token];
        let decimals = [coin_decimals, LP_TOKEN_DECIMALS];
        let asset_types: Vec<AssetType> = std::iter::once(params.asset_type)
            .chain(base.asset_types.iter().copied())
            .collect();
        let base_coins = base.coins.to_vec();
        let (method_ids, oracles) = split_bindings(&[params.oracle_binding, OracleBinding::NONE]);

        let args = pool_args_prefix(
            DeploymentKind::MetaPool,
            &params.name,
            &params.symbol,
            [params.a, params.fee, params.offpeg_fee_multiplier, params.ma_exp_time],
            math,
        )
        .with(ConstructorArg::Address(base.address.into()))
        .with(ConstructorArg::Addresses(coins.iter().map(|c| Address::from(*c)).collect()))
        .with(ConstructorArg::Addresses(base_coins.iter().map(|c| Address::from(*c)).collect()))
        .with(ConstructorArg::Uints(decimals.iter().map(|d| rate_multiplier(*d)).collect()))
        .with(ConstructorArg::Bytes(asset_types.iter().map(|t| t.id()).collect()))
        .with(ConstructorArg::Selectors(method_ids))
        .with(ConstructorArg::Addresses(oracles));

        let pending = PendingPool {
            template,
            args,
            coins: coin_array(&coins)?,
            decimals: coin_array(&decimals)?,
            asset_types: coin_array(&asset_types)?,
            base_pool: Some(base.address),
            base_coins,
        };

        let pool = self.instantiate_pool(&pending)?;
        let (record, base_coins) = pending.into_record(pool);
        self.state.write().commit_metapool(record, &base_coins)?;

        info!(
            "Deployed metapool {} '{}' pairing {} with base pool {}",
            pool, params.name, params.coin, base.address
        );
        self.events.publish(RegistryEvent::MetaPoolDeployed {
            pool,
            coin: params.coin,
            base_pool: base.address,
            a: params.a,
            fee: params.fee,
            offpeg_fee_multiplier: params.offpeg_fee_multiplier,
            deployer,
        });
        Ok(pool)
    }

    fn instantiate_pool(&self, pending: &PendingPool) -> Result<PoolAddress> {
        let address = self.instantiator.instantiate(pending.template, &pending.args)?;
        Ok(PoolAddress::from(address))
    }

    /// Deploy the liquidity gauge of a registered pool, at most once per pool.
    /// Permissionless.
    pub fn deploy_gauge(&self, pool: PoolAddress) -> Result<Address> {
        let _writer = self.writer.lock();
        self.try_deploy_gauge(pool).inspect_err(|err| {
            warn!("Gauge deployment for {} rejected: {}", pool, err);
        })
    }

    fn try_deploy_gauge(&self, pool: PoolAddress) -> Result<Address> {
        let template = {
            let state = self.state.read();
            if let Some(gauge) = state.get_gauge(pool)? {
                return Err(StateError::GaugeAlreadyDeployed { pool, gauge }.into());
            }
            state.resolve_slot(SlotKind::Gauge, 0)?
        };

        let args = ConstructorArgs::new(DeploymentKind::Gauge).with(ConstructorArg::Address(pool.into()));
        let gauge = self.instantiator.instantiate(template, &args)?;
        self.state.write().commit_gauge(pool, gauge)?;

        info!("Deployed liquidity gauge {} for pool {}", gauge, pool);
        self.events
            .publish(RegistryEvent::LiquidityGaugeDeployed { pool, gauge });
        Ok(gauge)
    }

    // ---- admin ----

    /// Register an existing pool as a metapool base. Admin only.
    pub fn add_base_pool(
        &self,
        caller: Address,
        base_pool: PoolAddress,
        lp_token: TokenAddress,
        asset_types: &[AssetType],
        n_coins: usize,
    ) -> Result<()> {
        let _writer = self.writer.lock();
        self.try_add_base_pool(caller, base_pool, lp_token, asset_types, n_coins)
            .inspect_err(|err| warn!("Base pool {} rejected: {}", base_pool, err))
    }

    fn try_add_base_pool(
        &self,
        caller: Address,
        base_pool: PoolAddress,
        lp_token: TokenAddress,
        asset_types: &[AssetType],
        n_coins: usize,
    ) -> Result<()> {
        {
            let state = self.state.read();
            state.admin_gate().ensure_admin(caller)?;
            if state.store().contains_base_pool(base_pool) {
                return Err(StateError::BasePoolExists(base_pool).into());
            }
            // one slot stays free for the paired coin of a metapool
            if !(MIN_COINS..MAX_COINS).contains(&n_coins) {
                return Err(ValidationError::CoinCount {
                    got: n_coins,
                    min: MIN_COINS,
                    max: MAX_COINS - 1,
                }
                .into());
            }
            if asset_types.len() != n_coins {
                return Err(ValidationError::LengthMismatch {
                    coins: n_coins,
                    asset_types: asset_types.len(),
                    oracles: n_coins,
                }
                .into());
            }
            if let Some(index) = asset_types.iter().position(|t| t.is_rebasing()) {
                return Err(ValidationError::RebasingInBasePool { index }.into());
            }
            validate_asset_types(state.asset_type_table(), asset_types)?;
        }
        if base_pool.is_zero() {
            return Err(ValidationError::ZeroAddress { what: "base pool" }.into());
        }
        if lp_token.is_zero() {
            return Err(ValidationError::ZeroAddress { what: "LP token" }.into());
        }

        let mut coins: CoinArray<TokenAddress> = CoinArray::new();
        let mut decimals = Vec::with_capacity(n_coins);
        for index in 0..n_coins {
            let coin = self.chain.pool_coin(base_pool, index)?;
            if coin.is_zero() {
                return Err(ValidationError::ZeroCoin { index }.into());
            }
            if coins.contains(&coin) {
                return Err(ValidationError::DuplicateCoin { coin }.into());
            }
            let d = self.chain.decimals(coin)?;
            validate_decimals(coin, d)?;
            coins.try_push(coin).map_err(|_| coin_count_error(n_coins))?;
            decimals.push(d);
        }

        let record = BasePoolRecord {
            address: base_pool,
            lp_token,
            coins,
            packed_decimals: PackedDecimals::pack(&decimals)?,
            asset_types: coin_array(asset_types)?,
        };
        self.state.write().commit_base_pool(record)?;

        info!("Added base pool {} with {} coins, LP token {}", base_pool, n_coins, lp_token);
        self.events.publish(RegistryEvent::BasePoolAdded { base_pool });
        Ok(())
    }

    /// Assign or clear (`None` or the zero address) an implementation slot.
    /// Admin only.
    pub fn set_implementation(
        &self,
        caller: Address,
        kind: SlotKind,
        index: u64,
        template: Option<Address>,
    ) -> Result<()> {
        let _writer = self.writer.lock();
        let template = template.filter(|address| !address.is_zero());
        {
            let mut state = self.state.write();
            state
                .admin_gate()
                .ensure_admin(caller)
                .inspect_err(|err| warn!("Slot update rejected: {}", err))?;
            state.slots_mut().set(kind, index, template);
        }

        let index = if kind.is_indexed() { index } else { 0 };
        info!("Set {} implementation {} to {:?}", kind, index, template);
        self.events.publish(RegistryEvent::ImplementationUpdated {
            kind,
            index,
            template,
        });
        Ok(())
    }

    pub fn set_pool_implementation(&self, caller: Address, index: u64, template: Option<Address>) -> Result<()> {
        self.set_implementation(caller, SlotKind::PlainPool, index, template)
    }

    pub fn set_metapool_implementation(&self, caller: Address, index: u64, template: Option<Address>) -> Result<()> {
        self.set_implementation(caller, SlotKind::MetaPool, index, template)
    }

    pub fn set_math_implementation(&self, caller: Address, template: Option<Address>) -> Result<()> {
        self.set_implementation(caller, SlotKind::Math, 0, template)
    }

    pub fn set_gauge_implementation(&self, caller: Address, template: Option<Address>) -> Result<()> {
        self.set_implementation(caller, SlotKind::Gauge, 0, template)
    }

    pub fn set_views_implementation(&self, caller: Address, template: Option<Address>) -> Result<()> {
        self.set_implementation(caller, SlotKind::Views, 0, template)
    }

    pub fn set_fee_receiver(&self, caller: Address, fee_receiver: Address) -> Result<()> {
        let _writer = self.writer.lock();
        {
            let mut state = self.state.write();
            state
                .admin_gate()
                .ensure_admin(caller)
                .inspect_err(|err| warn!("Fee receiver update rejected: {}", err))?;
            state.admin_mut().set_fee_receiver(fee_receiver);
        }

        info!("Fee receiver set to {}", fee_receiver);
        self.events
            .publish(RegistryEvent::FeeReceiverUpdated { fee_receiver });
        Ok(())
    }

    /// Register a custom asset type tag. Admin only.
    pub fn add_asset_type(&self, caller: Address, id: u8, name: &str) -> Result<AssetType> {
        let _writer = self.writer.lock();
        let asset_type = {
            let mut state = self.state.write();
            let checked = state
                .admin_gate()
                .ensure_admin(caller)
                .and_then(|()| state.asset_type_table().check_add(id, name).map_err(Into::into));
            checked.inspect_err(|err| warn!("Asset type {} rejected: {}", id, err))?;
            state.asset_types_mut().add(id, name)?
        };

        info!("Added asset type {} '{}'", id, name);
        self.events.publish(RegistryEvent::AssetTypeAdded {
            asset_type,
            name: name.to_string(),
        });
        Ok(asset_type)
    }

    /// First half of the ownership transfer. Admin only.
    pub fn commit_transfer_ownership(&self, caller: Address, future_admin: Address) -> Result<()> {
        let _writer = self.writer.lock();
        {
            let mut state = self.state.write();
            let checked = state.admin_gate().ensure_admin(caller).and_then(|()| {
                if future_admin.is_zero() {
                    return Err(ValidationError::ZeroAddress { what: "admin" }.into());
                }
                Ok(())
            });
            checked.inspect_err(|err| warn!("Ownership commit rejected: {}", err))?;
            state.admin_mut().commit(future_admin);
        }

        info!("Ownership transfer to {} committed", future_admin);
        self.events
            .publish(RegistryEvent::OwnershipTransferCommitted { future_admin });
        Ok(())
    }

    /// Second half of the ownership transfer. Pending admin only.
    pub fn accept_transfer_ownership(&self, caller: Address) -> Result<()> {
        let _writer = self.writer.lock();
        let previous_admin = {
            let mut state = self.state.write();
            state
                .admin_gate()
                .ensure_future_admin(caller)
                .inspect_err(|err| warn!("Ownership accept rejected: {}", err))?;
            state.admin_mut().accept()
        };

        if let Some(previous_admin) = previous_admin {
            info!("Ownership transferred from {} to {}", previous_admin, caller);
            self.events.publish(RegistryEvent::OwnershipTransferred {
                previous_admin,
                admin: caller,
            });
        }
        Ok(())
    }

    // ---- chain-backed views ----

    /// Internal balances of every coin of a registered pool
    pub fn get_balances(&self, pool: PoolAddress) -> Result<Vec<u128>> {
        let n_coins = self.state.read().get_n_coins(pool)?;
        (0..n_coins)
            .map(|i| Ok(self.chain.pool_balance(pool, i)?))
            .collect()
    }

    /// Coin balances held by the pool beyond its internal accounting
    pub fn get_admin_balances(&self, pool: PoolAddress) -> Result<Vec<u128>> {
        let coins = self.state.read().get_coins(pool)?;
        coins
            .iter()
            .enumerate()
            .map(|(i, coin)| {
                let held = self.chain.token_balance(*coin, pool.into())?;
                let tracked = self.chain.pool_balance(pool, i)?;
                Ok(held.saturating_sub(tracked))
            })
            .collect()
    }

    pub fn get_a(&self, pool: PoolAddress) -> Result<u128> {
        self.state.read().store().require_pool(pool)?;
        Ok(self.chain.amplification(pool)?)
    }

    /// `(fee, admin_fee)` of a registered pool
    pub fn get_fees(&self, pool: PoolAddress) -> Result<(u128, u128)> {
        self.state.read().store().require_pool(pool)?;
        Ok((self.chain.fee(pool)?, self.chain.admin_fee(pool)?))
    }

    // ---- committed state views ----

    delegate_to_state! {
        fn find_pool_for_coins(&self, from: TokenAddress, to: TokenAddress, i: usize) -> Option<PoolAddress>;
        fn find_pools_for_coins(&self, from: TokenAddress, to: TokenAddress) -> Vec<PoolAddress>;
        fn pool_count_for_coins(&self, from: TokenAddress, to: TokenAddress) -> usize;
        fn pool_record(&self, pool: PoolAddress) -> Option<PoolRecord>;
        fn get_n_coins(&self, pool: PoolAddress) -> Result<usize>;
        fn get_coins(&self, pool: PoolAddress) -> Result<Vec<TokenAddress>>;
        fn get_decimals(&self, pool: PoolAddress) -> Result<Vec<u8>>;
        fn get_underlying_coins(&self, pool: PoolAddress) -> Result<Vec<TokenAddress>>;
        fn get_underlying_decimals(&self, pool: PoolAddress) -> Result<Vec<u8>>;
        fn get_coin_indices(&self, pool: PoolAddress, from: TokenAddress, to: TokenAddress) -> Result<(usize, usize, bool)>;
        fn is_meta(&self, pool: PoolAddress) -> Result<bool>;
        fn get_pool_asset_types(&self, pool: PoolAddress) -> Result<Vec<AssetType>>;
        fn get_base_pool(&self, pool: PoolAddress) -> Result<Option<PoolAddress>>;
        fn get_meta_n_coins(&self, pool: PoolAddress) -> Result<(usize, usize)>;
        fn get_gauge(&self, pool: PoolAddress) -> Result<Option<Address>>;
        fn get_implementation_address(&self, pool: PoolAddress) -> Result<Address>;
        fn get_rate_multipliers(&self, pool: PoolAddress) -> Result<Vec<u128>>;
        fn pool_list(&self, index: usize) -> Option<PoolAddress>;
        fn pool_count(&self) -> usize;
        fn base_pool_list(&self, index: usize) -> Option<PoolAddress>;
        fn base_pool_count(&self) -> usize;
        fn base_pool_data(&self, pool: PoolAddress) -> Option<BasePoolRecord>;
        fn is_base_pool_asset(&self, coin: TokenAddress) -> bool;
        fn admin(&self) -> Address;
        fn future_admin(&self) -> Option<Address>;
        fn fee_receiver(&self) -> Address;
        fn asset_type_name(&self, id: u8) -> Option<String>;
        fn pool_implementation(&self, index: u64) -> Option<Address>;
        fn metapool_implementation(&self, index: u64) -> Option<Address>;
        fn math_implementation(&self) -> Option<Address>;
        fn gauge_implementation(&self) -> Option<Address>;
        fn views_implementation(&self) -> Option<Address>;
    }
}

fn validate_plain_params(state: &RegistryState, params: &PlainPoolParams) -> Result<()> {
    let n_coins = params.coins.len();
    if !(MIN_COINS..=MAX_COINS).contains(&n_coins) {
        return Err(coin_count_error(n_coins));
    }

    let mut seen = HashSet::with_capacity(n_coins);
    for (index, coin) in params.coins.iter().enumerate() {
        if coin.is_zero() {
            return Err(ValidationError::ZeroCoin { index }.into());
        }
        if !seen.insert(*coin) {
            return Err(ValidationError::DuplicateCoin { coin: *coin }.into());
        }
    }

    if params.asset_types.len() != n_coins || params.oracle_bindings.len() != n_coins {
        return Err(ValidationError::LengthMismatch {
            coins: n_coins,
            asset_types: params.asset_types.len(),
            oracles: params.oracle_bindings.len(),
        }
        .into());
    }

    validate_asset_types(state.asset_type_table(), &params.asset_types)?;
    validate_fees(params.fee, params.offpeg_fee_multiplier)?;
    validate_text(&params.name, &params.symbol)
}

/// Shared leading constructor arguments of plain pools and metapools.
/// `tuning` is `[A, fee, offpeg_fee_multiplier, ma_exp_time]`.
fn pool_args_prefix(
    kind: DeploymentKind,
    name: &str,
    symbol: &str,
    tuning: [u128; 4],
    math: Address,
) -> ConstructorArgs {
    let args = ConstructorArgs::new(kind)
        .with(ConstructorArg::Text(name.to_string()))
        .with(ConstructorArg::Text(symbol.to_string()));
    tuning
        .into_iter()
        .fold(args, |args, value| args.with(ConstructorArg::Uint(value)))
        .with(ConstructorArg::Address(math))
}

fn split_bindings(bindings: &[OracleBinding]) -> (Vec<[u8; 4]>, Vec<Address>) {
    bindings
        .iter()
        .map(|binding| (binding.method_id, binding.oracle))
        .unzip()
}

fn coin_count_error(got: usize) -> RegistryError {
    ValidationError::CoinCount {
        got,
        min: MIN_COINS,
        max: MAX_COINS,
    }
    .into()
}

fn coin_array<T: Copy + Default>(values: &[T]) -> Result<CoinArray<T>> {
    CoinArray::from_slice(values).map_err(|_| coin_count_error(values.len()))
}

fn parse_address(what: &str, value: &str) -> anyhow::Result<Address> {
    Address::from_str(value).with_context(|| format!("Invalid {} address '{}'", what, value))
}

fn parse_indexed(kind: SlotKind, entries: &BTreeMap<String, String>) -> anyhow::Result<Vec<(SlotKind, u64, Address)>> {
    entries
        .iter()
        .map(|(index, value)| {
            let index = u64::from_str(index)
                .with_context(|| format!("Invalid {} implementation index '{}'", kind, index))?;
            let template = parse_address(&format!("{} implementation {}", kind, index), value)?;
            Ok((kind, index, template))
        })
        .collect()
}
