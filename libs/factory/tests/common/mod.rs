//! Shared fixtures for registry integration tests

#![allow(dead_code)]

use factory_types::{Address, AssetType, PoolAddress, TokenAddress};
use pool_factory::{InMemoryChain, PoolFactory};
use std::sync::Arc;

pub const ADMIN: Address = Address::from_low_u64(0xad);
pub const FEE_RECEIVER: Address = Address::from_low_u64(0xfe);
pub const USER: Address = Address::from_low_u64(0x05e7);

pub const PLAIN_TEMPLATE: Address = Address::from_low_u64(0x1000);
pub const META_TEMPLATE: Address = Address::from_low_u64(0x2000);
pub const GAUGE_TEMPLATE: Address = Address::from_low_u64(0x3000);
pub const MATH_TEMPLATE: Address = Address::from_low_u64(0x4000);

pub const USDC: TokenAddress = TokenAddress::from_low_u64(0xa0b8);
pub const USDT: TokenAddress = TokenAddress::from_low_u64(0xdac1);
pub const FRAX: TokenAddress = TokenAddress::from_low_u64(0x853d);
pub const DAI: TokenAddress = TokenAddress::from_low_u64(0x6b17);

pub const BASE_POOL: PoolAddress = PoolAddress::from_low_u64(0xb0b0);
pub const BASE_LP: TokenAddress = TokenAddress::from_low_u64(0xb1b1);

pub struct Fixture {
    pub chain: Arc<InMemoryChain>,
    pub factory: PoolFactory,
}

impl Fixture {
    /// Factory with every template slot filled and common tokens known
    pub fn new() -> Self {
        factory_config::init_logging("warn");
        let chain = Arc::new(InMemoryChain::default());
        let factory = PoolFactory::new(ADMIN, FEE_RECEIVER, chain.clone(), chain.clone());

        factory.set_pool_implementation(ADMIN, 0, Some(PLAIN_TEMPLATE)).unwrap();
        factory.set_metapool_implementation(ADMIN, 0, Some(META_TEMPLATE)).unwrap();
        factory.set_gauge_implementation(ADMIN, Some(GAUGE_TEMPLATE)).unwrap();
        factory.set_math_implementation(ADMIN, Some(MATH_TEMPLATE)).unwrap();

        chain.add_token(USDC, 6);
        chain.add_token(USDT, 6);
        chain.add_token(FRAX, 18);
        chain.add_token(DAI, 18);
        chain.add_token(BASE_LP, 18);

        Self { chain, factory }
    }

    /// Fixture with the USDC/USDT base pool registered
    pub fn with_base_pool() -> Self {
        let fixture = Self::new();
        fixture.chain.add_pool(BASE_POOL, vec![USDC, USDT]);
        fixture
            .factory
            .add_base_pool(ADMIN, BASE_POOL, BASE_LP, &[AssetType::Standard; 2], 2)
            .unwrap();
        fixture
    }

    /// Register `count` fresh 18-decimal tokens
    pub fn tokens(&self, first: u64, count: usize) -> Vec<TokenAddress> {
        (0..count as u64)
            .map(|i| {
                let token = TokenAddress::from_low_u64(first + i);
                self.chain.add_token(token, 18);
                token
            })
            .collect()
    }
}
