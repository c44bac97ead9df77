//! In-memory chain simulation
//!
//! Implements both collaborator traits over concurrent maps. Instance
//! addresses are derived like contract creation addresses:
//! `keccak256(deployer ++ nonce)[12..]`.

use crate::constructor::{layout, ConstructorArgs, DeploymentKind};
use crate::environment::{ChainError, ChainReader, InstantiationError, Instantiator};
use dashmap::{DashMap, DashSet};
use factory_config::limits::LP_TOKEN_DECIMALS;
use factory_types::{Address, PoolAddress, TokenAddress};
use sha3::{Digest, Keccak256};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Admin fee given to simulated pools (50% of the fee denominator)
pub const DEFAULT_ADMIN_FEE: u128 = 5_000_000_000;

/// State of a simulated pool contract
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulatedPool {
    pub coins: Vec<TokenAddress>,
    pub balances: Vec<u128>,
    pub a: u128,
    pub fee: u128,
    pub admin_fee: u128,
}

/// Record of one instantiation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub template: Address,
    pub args: ConstructorArgs,
}

/// Concurrent in-memory implementation of [`Instantiator`] and [`ChainReader`]
pub struct InMemoryChain {
    deployer: Address,
    nonce: AtomicU64,
    decimals: DashMap<TokenAddress, u8>,
    balances: DashMap<(TokenAddress, Address), u128>,
    pools: DashMap<PoolAddress, SimulatedPool>,
    instances: DashMap<Address, InstanceRecord>,
    rejected_templates: DashSet<Address>,
}

impl Default for InMemoryChain {
    fn default() -> Self {
        Self::new(Address::from_low_u64(0xfac7))
    }
}

impl InMemoryChain {
    /// Create a chain whose instances are derived from `deployer`
    pub fn new(deployer: Address) -> Self {
        Self {
            deployer,
            nonce: AtomicU64::new(1),
            decimals: DashMap::new(),
            balances: DashMap::new(),
            pools: DashMap::new(),
            instances: DashMap::new(),
            rejected_templates: DashSet::new(),
        }
    }

    /// Register a token with its decimals
    pub fn add_token(&self, token: TokenAddress, decimals: u8) {
        self.decimals.insert(token, decimals);
    }

    /// Register an externally created pool (e.g. a base pool) with its coins
    pub fn add_pool(&self, pool: PoolAddress, coins: Vec<TokenAddress>) {
        let balances = vec![0; coins.len()];
        self.pools.insert(
            pool,
            SimulatedPool {
                coins,
                balances,
                admin_fee: DEFAULT_ADMIN_FEE,
                ..Default::default()
            },
        );
    }

    /// Overwrite the internal balances of a pool
    pub fn set_pool_balances(&self, pool: PoolAddress, balances: Vec<u128>) -> Result<(), ChainError> {
        let mut entry = self.pools.get_mut(&pool).ok_or(ChainError::UnknownPool(pool))?;
        entry.balances = balances;
        Ok(())
    }

    /// Set `balanceOf(holder)` for a token
    pub fn set_token_balance(&self, token: TokenAddress, holder: Address, amount: u128) {
        self.balances.insert((token, holder), amount);
    }

    /// Make every future instantiation of `template` fail
    pub fn reject_template(&self, template: Address) {
        self.rejected_templates.insert(template);
    }

    pub fn instance(&self, address: Address) -> Option<InstanceRecord> {
        self.instances.get(&address).map(|entry| entry.clone())
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn simulated_pool(&self, pool: PoolAddress) -> Option<SimulatedPool> {
        self.pools.get(&pool).map(|entry| entry.clone())
    }

    fn next_address(&self) -> Address {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        let mut hasher = Keccak256::new();
        hasher.update(self.deployer.as_bytes());
        hasher.update(nonce.to_be_bytes());
        let digest = hasher.finalize();

        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[12..32]);
        Address::new(bytes)
    }

    /// Seed pool state for pool instances so chain-backed views work
    fn simulate_pool_instance(&self, address: Address, args: &ConstructorArgs) {
        let coins_position = match args.kind {
            DeploymentKind::PlainPool => layout::plain::COINS,
            DeploymentKind::MetaPool => layout::meta::COINS,
            DeploymentKind::Gauge => return,
        };

        let coins: Vec<TokenAddress> = args
            .addresses(coins_position)
            .unwrap_or_default()
            .iter()
            .map(|coin| TokenAddress::from(*coin))
            .collect();
        let balances = vec![0; coins.len()];

        let pool = PoolAddress::from(address);
        self.pools.insert(
            pool,
            SimulatedPool {
                coins,
                balances,
                a: args.uint(layout::A).unwrap_or_default(),
                fee: args.uint(layout::FEE).unwrap_or_default(),
                admin_fee: DEFAULT_ADMIN_FEE,
            },
        );
        // pools are their own LP token
        self.decimals.insert(TokenAddress::from(address), LP_TOKEN_DECIMALS);
    }
}

impl Instantiator for InMemoryChain {
    fn instantiate(
        &self,
        template: Address,
        args: &ConstructorArgs,
    ) -> Result<Address, InstantiationError> {
        if template.is_zero() {
            return Err(InstantiationError::UnknownTemplate(template));
        }
        if self.rejected_templates.contains(&template) {
            return Err(InstantiationError::Rejected {
                template,
                reason: "template configured to reject".to_string(),
            });
        }

        let address = self.next_address();
        self.simulate_pool_instance(address, args);
        self.instances.insert(
            address,
            InstanceRecord {
                template,
                args: args.clone(),
            },
        );

        debug!(
            "Instantiated {:?} from template {} at {}",
            args.kind, template, address
        );
        Ok(address)
    }
}

impl ChainReader for InMemoryChain {
    fn decimals(&self, token: TokenAddress) -> Result<u8, ChainError> {
        self.decimals
            .get(&token)
            .map(|entry| *entry)
            .ok_or(ChainError::UnknownToken(token))
    }

    fn pool_coin(&self, pool: PoolAddress, index: usize) -> Result<TokenAddress, ChainError> {
        let entry = self.pools.get(&pool).ok_or(ChainError::UnknownPool(pool))?;
        entry
            .coins
            .get(index)
            .copied()
            .ok_or(ChainError::CoinIndex { pool, index })
    }

    fn pool_balance(&self, pool: PoolAddress, index: usize) -> Result<u128, ChainError> {
        let entry = self.pools.get(&pool).ok_or(ChainError::UnknownPool(pool))?;
        entry
            .balances
            .get(index)
            .copied()
            .ok_or(ChainError::CoinIndex { pool, index })
    }

    fn token_balance(&self, token: TokenAddress, holder: Address) -> Result<u128, ChainError> {
        if !self.decimals.contains_key(&token) {
            return Err(ChainError::UnknownToken(token));
        }
        Ok(self
            .balances
            .get(&(token, holder))
            .map(|entry| *entry)
            .unwrap_or_default())
    }

    fn amplification(&self, pool: PoolAddress) -> Result<u128, ChainError> {
        self.pools
            .get(&pool)
            .map(|entry| entry.a)
            .ok_or(ChainError::UnknownPool(pool))
    }

    fn fee(&self, pool: PoolAddress) -> Result<u128, ChainError> {
        self.pools
            .get(&pool)
            .map(|entry| entry.fee)
            .ok_or(ChainError::UnknownPool(pool))
    }

    fn admin_fee(&self, pool: PoolAddress) -> Result<u128, ChainError> {
        self.pools
            .get(&pool)
            .map(|entry| entry.admin_fee)
            .ok_or(ChainError::UnknownPool(pool))
    }
}
