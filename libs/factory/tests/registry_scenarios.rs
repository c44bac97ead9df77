//! Registry Scenario Tests
//!
//! End-to-end flows through `PoolFactory` backed by the in-memory chain:
//! base pool registration, metapool pairing, gauges, ownership transfer and
//! failure atomicity.

mod common;

use common::*;
use factory_types::{Address, AssetType, PoolAddress, TokenAddress};
use pool_factory::{
    layout, AuthorizationError, ErrorKind, InMemoryChain, InstantiationError, Instantiator,
    ConstructorArgs, MetaPoolParams, OracleBinding, PlainPoolParams, PoolFactory, RegistryError,
    RegistryEvent, SlotKind, StateError, ValidationError,
};
use std::sync::Arc;
use std::thread;

fn deploy_frax_metapool(fixture: &Fixture) -> PoolAddress {
    fixture
        .factory
        .deploy_metapool(USER, MetaPoolParams::new(BASE_POOL, "FRAX/USD", "FRAXUSD", FRAX))
        .unwrap()
}

#[test]
fn test_metapool_reaches_underlying_coins() {
    let fixture = Fixture::with_base_pool();
    let meta = deploy_frax_metapool(&fixture);
    let factory = &fixture.factory;

    assert_eq!(factory.get_coins(meta).unwrap(), vec![FRAX, BASE_LP]);
    assert_eq!(factory.get_underlying_coins(meta).unwrap(), vec![FRAX, USDC, USDT]);
    assert_eq!(factory.get_decimals(meta).unwrap(), vec![18, 18]);
    assert_eq!(factory.get_underlying_decimals(meta).unwrap(), vec![18, 6, 6]);
    assert_eq!(factory.get_meta_n_coins(meta).unwrap(), (2, 3));
    assert_eq!(factory.get_base_pool(meta).unwrap(), Some(BASE_POOL));
    assert!(factory.is_meta(meta).unwrap());
    assert_eq!(factory.get_implementation_address(meta).unwrap(), META_TEMPLATE);
    assert_eq!(
        factory.get_pool_asset_types(meta).unwrap(),
        vec![AssetType::Standard; 3]
    );

    assert_eq!(factory.find_pool_for_coins(FRAX, USDC, 0), Some(meta));
    assert_eq!(factory.find_pool_for_coins(FRAX, USDT, 0), Some(meta));
    assert_eq!(factory.find_pool_for_coins(USDT, FRAX, 0), Some(meta));
    assert_eq!(factory.find_pool_for_coins(FRAX, BASE_LP, 0), Some(meta));
    assert_eq!(factory.find_pool_for_coins(FRAX, USDC, 1), None);

    assert_eq!(factory.get_coin_indices(meta, FRAX, USDT).unwrap(), (0, 2, true));
    assert_eq!(factory.get_coin_indices(meta, BASE_LP, FRAX).unwrap(), (1, 0, false));
}

#[test]
fn test_metapool_constructor_arguments() {
    let fixture = Fixture::with_base_pool();
    let meta = deploy_frax_metapool(&fixture);

    let instance = fixture.chain.instance(meta.into()).unwrap();
    let args = &instance.args;
    assert_eq!(args.len(), layout::meta::LEN);
    assert_eq!(args.address(layout::meta::BASE_POOL), Some(BASE_POOL.into()));
    assert_eq!(args.address(layout::MATH_IMPLEMENTATION), Some(MATH_TEMPLATE));
    assert_eq!(
        args.addresses(layout::meta::BASE_COINS),
        Some(&[Address::from(USDC), Address::from(USDT)][..])
    );
    assert_eq!(
        args.uints(layout::meta::RATE_MULTIPLIERS),
        Some(&[10u128.pow(18), 10u128.pow(18)][..])
    );
    assert_eq!(
        factory_rates(&fixture.factory, meta),
        vec![10u128.pow(18), 10u128.pow(18)]
    );
}

fn factory_rates(factory: &PoolFactory, pool: PoolAddress) -> Vec<u128> {
    factory.get_rate_multipliers(pool).unwrap()
}

#[test]
fn test_base_pool_add_is_not_repeatable() {
    let fixture = Fixture::with_base_pool();
    let before = fixture.factory.base_pool_data(BASE_POOL).unwrap();

    let err = fixture
        .factory
        .add_base_pool(ADMIN, BASE_POOL, BASE_LP, &[AssetType::Standard; 2], 2)
        .unwrap_err();

    assert_eq!(err, RegistryError::State(StateError::BasePoolExists(BASE_POOL)));
    assert_eq!(fixture.factory.base_pool_count(), 1);
    assert_eq!(fixture.factory.base_pool_data(BASE_POOL).unwrap(), before);
    assert_eq!(before.decimals(), vec![6, 6]);
    assert_eq!(fixture.factory.base_pool_list(0), Some(BASE_POOL));
}

#[test]
fn test_base_pool_validation() {
    let fixture = Fixture::new();
    fixture.chain.add_pool(BASE_POOL, vec![USDC, USDT]);
    let factory = &fixture.factory;

    let err = factory
        .add_base_pool(USER, BASE_POOL, BASE_LP, &[AssetType::Standard; 2], 2)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = factory
        .add_base_pool(ADMIN, BASE_POOL, BASE_LP, &[AssetType::Standard; 8], 8)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(ValidationError::CoinCount { .. })));

    let err = factory
        .add_base_pool(ADMIN, BASE_POOL, BASE_LP, &[AssetType::Standard], 2)
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(ValidationError::LengthMismatch { .. })));

    let err = factory
        .add_base_pool(ADMIN, BASE_POOL, BASE_LP, &[AssetType::Standard, AssetType::Rebasing], 2)
        .unwrap_err();
    assert_eq!(err, ValidationError::RebasingInBasePool { index: 1 }.into());

    // the chain pool has only two coins
    let err = factory
        .add_base_pool(ADMIN, BASE_POOL, BASE_LP, &[AssetType::Standard; 3], 3)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Chain);

    assert_eq!(factory.base_pool_count(), 0);
    assert!(!factory.is_base_pool_asset(USDC));
}

#[test]
fn test_bad_metapool_pairing_changes_nothing() {
    let fixture = Fixture::with_base_pool();
    let factory = &fixture.factory;
    let instances_before = fixture.chain.instance_count();

    let err = factory
        .deploy_metapool(USER, MetaPoolParams::new(BASE_POOL, "bad", "BAD", USDC))
        .unwrap_err();
    assert_eq!(err, ValidationError::PairedCoinInBasePool { coin: USDC }.into());

    let err = factory
        .deploy_metapool(USER, MetaPoolParams::new(BASE_POOL, "bad", "BAD", BASE_LP))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Validation(ValidationError::PairedCoinIsBaseLpToken { .. })
    ));

    let unknown_base = PoolAddress::from_low_u64(0xdead);
    let err = factory
        .deploy_metapool(USER, MetaPoolParams::new(unknown_base, "bad", "BAD", FRAX))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(factory.pool_count(), 0);
    assert_eq!(factory.pool_count_for_coins(USDC, USDT), 0);
    assert_eq!(fixture.chain.instance_count(), instances_before);
}

#[test]
fn test_metapool_parameter_limits() {
    let fixture = Fixture::with_base_pool();
    let factory = &fixture.factory;

    let mut params = MetaPoolParams::new(BASE_POOL, "FRAX/USD", "FRAXUSD", FRAX);
    params.fee = 100_000_001;
    assert!(matches!(
        factory.deploy_metapool(USER, params).unwrap_err(),
        RegistryError::Validation(ValidationError::FeeTooHigh { .. })
    ));

    let mut params = MetaPoolParams::new(BASE_POOL, "FRAX/USD", "FRAXUSD_LONG", FRAX);
    params.asset_type = AssetType::Oracle;
    assert!(matches!(
        factory.deploy_metapool(USER, params).unwrap_err(),
        RegistryError::Validation(ValidationError::TextTooLong { field: "symbol", .. })
    ));

    let mut params = MetaPoolParams::new(BASE_POOL, "FRAX/USD", "FRAXUSD", FRAX);
    params.implementation_index = 7;
    assert_eq!(
        factory.deploy_metapool(USER, params).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(factory.pool_count(), 0);
}

#[test]
fn test_plain_pool_registers_every_pair() {
    let fixture = Fixture::new();
    let coins = fixture.tokens(0x7000, 4);
    let pool = fixture
        .factory
        .deploy_plain_pool(USER, PlainPoolParams::new("4pool", "4CRV", coins.clone()))
        .unwrap();

    for a in &coins {
        for b in &coins {
            if a != b {
                assert_eq!(fixture.factory.find_pool_for_coins(*a, *b, 0), Some(pool));
            }
        }
    }
    assert_eq!(fixture.factory.pool_list(0), Some(pool));
    assert_eq!(fixture.factory.get_n_coins(pool).unwrap(), 4);
    assert_eq!(
        fixture.factory.get_coin_indices(pool, coins[3], coins[1]).unwrap(),
        (3, 1, false)
    );
}

#[test]
fn test_plain_pool_rejects_bad_decimals() {
    let fixture = Fixture::new();
    let odd = TokenAddress::from_low_u64(0x0dd);
    fixture.chain.add_token(odd, 24);

    let err = fixture
        .factory
        .deploy_plain_pool(USER, PlainPoolParams::new("odd", "ODD", vec![USDC, odd]))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Validation(ValidationError::Decimals { decimals: 24, .. })));
    assert_eq!(fixture.factory.pool_count(), 0);
}

#[test]
fn test_oracle_pool_bindings_are_forwarded() {
    let fixture = Fixture::new();
    let oracle = Address::from_low_u64(0x0bac1e);
    let mut params = PlainPoolParams::new("wstETH/ETH", "wsteth", vec![FRAX, DAI]);
    params.asset_types = vec![AssetType::Oracle, AssetType::Standard];
    params.oracle_bindings = vec![
        OracleBinding::new([0xe6, 0xaa, 0x21, 0x6c], oracle),
        OracleBinding::NONE,
    ];

    let pool = fixture.factory.deploy_plain_pool(USER, params).unwrap();
    let instance = fixture.chain.instance(pool.into()).unwrap();
    assert_eq!(
        instance.args.addresses(layout::plain::ORACLES),
        Some(&[oracle, Address::ZERO][..])
    );
    assert_eq!(
        fixture.factory.get_pool_asset_types(pool).unwrap(),
        vec![AssetType::Oracle, AssetType::Standard]
    );
}

#[test]
fn test_custom_asset_type_must_be_registered() {
    let fixture = Fixture::new();
    let mut params = PlainPoolParams::new("custom", "CST", vec![FRAX, DAI]);
    params.asset_types[0] = AssetType::Custom(7);

    let err = fixture
        .factory
        .deploy_plain_pool(USER, params.clone())
        .unwrap_err();
    assert_eq!(err, ValidationError::UnknownAssetType { id: 7 }.into());

    let err = fixture.factory.add_asset_type(USER, 7, "Wrapped").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    let err = fixture.factory.add_asset_type(ADMIN, 1, "Taken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);

    fixture.factory.add_asset_type(ADMIN, 7, "Wrapped").unwrap();
    assert_eq!(fixture.factory.asset_type_name(7).as_deref(), Some("Wrapped"));
    assert!(fixture.factory.deploy_plain_pool(USER, params).is_ok());
}

#[test]
fn test_gauge_deployed_exactly_once() {
    let fixture = Fixture::new();
    let pool = fixture
        .factory
        .deploy_plain_pool(USER, PlainPoolParams::new("X", "X", vec![FRAX, DAI]))
        .unwrap();

    let gauge = fixture.factory.deploy_gauge(pool).unwrap();
    assert_eq!(fixture.factory.get_gauge(pool).unwrap(), Some(gauge));
    assert_eq!(
        fixture.chain.instance(gauge).unwrap().args.address(layout::gauge::POOL),
        Some(pool.into())
    );

    let err = fixture.factory.deploy_gauge(pool).unwrap_err();
    assert_eq!(err, StateError::GaugeAlreadyDeployed { pool, gauge }.into());

    let err = fixture
        .factory
        .deploy_gauge(PoolAddress::from_low_u64(0x404))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_two_step_ownership_transfer() {
    let fixture = Fixture::new();
    let factory = &fixture.factory;
    let candidate = Address::from_low_u64(0xca);

    let err = factory.accept_transfer_ownership(candidate).unwrap_err();
    assert_eq!(
        err,
        AuthorizationError::NotFutureAdmin { caller: candidate }.into()
    );

    let err = factory.commit_transfer_ownership(USER, candidate).unwrap_err();
    assert_eq!(err, AuthorizationError::NotAdmin { caller: USER }.into());

    factory.commit_transfer_ownership(ADMIN, candidate).unwrap();
    assert_eq!(factory.admin(), ADMIN);
    assert_eq!(factory.future_admin(), Some(candidate));

    let err = factory.accept_transfer_ownership(USER).unwrap_err();
    assert_eq!(err, AuthorizationError::NotFutureAdmin { caller: USER }.into());

    factory.accept_transfer_ownership(candidate).unwrap();
    assert_eq!(factory.admin(), candidate);
    assert_eq!(factory.future_admin(), None);

    // the transfer is spent after one accept
    for caller in [candidate, ADMIN] {
        let err = factory.accept_transfer_ownership(caller).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(factory.admin(), candidate);
    }

    // old admin lost its authority
    let err = factory.set_fee_receiver(ADMIN, USER).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    factory.set_fee_receiver(candidate, USER).unwrap();
    assert_eq!(factory.fee_receiver(), USER);
}

#[test]
fn test_admin_only_slot_updates() {
    let fixture = Fixture::new();
    let factory = &fixture.factory;

    let err = factory
        .set_pool_implementation(USER, 1, Some(Address::from_low_u64(1)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(factory.pool_implementation(1), None);

    factory.set_views_implementation(ADMIN, Some(Address::from_low_u64(0x71e))).unwrap();
    assert_eq!(factory.views_implementation(), Some(Address::from_low_u64(0x71e)));

    // clearing a slot blocks new deployments, existing pools keep their template
    let pool = factory
        .deploy_plain_pool(USER, PlainPoolParams::new("X", "X", vec![FRAX, DAI]))
        .unwrap();
    factory.set_pool_implementation(ADMIN, 0, None).unwrap();
    let err = factory
        .deploy_plain_pool(USER, PlainPoolParams::new("Y", "Y", vec![FRAX, USDC]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(factory.get_implementation_address(pool).unwrap(), PLAIN_TEMPLATE);
}

#[test]
fn test_failed_instantiation_leaves_state_unchanged() {
    let fixture = Fixture::with_base_pool();
    fixture.chain.reject_template(META_TEMPLATE);
    let before = fixture.factory.snapshot();

    let err = fixture
        .factory
        .deploy_metapool(USER, MetaPoolParams::new(BASE_POOL, "FRAX/USD", "FRAXUSD", FRAX))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Instantiation);
    assert_eq!(fixture.factory.snapshot(), before);
    assert_eq!(fixture.factory.pool_count_for_coins(FRAX, USDC), 0);
}

/// Instantiator that always answers with the same address
struct FixedAddress(Address);

impl Instantiator for FixedAddress {
    fn instantiate(&self, _template: Address, _args: &ConstructorArgs) -> Result<Address, InstantiationError> {
        Ok(self.0)
    }
}

#[test]
fn test_address_collision_is_rejected() {
    let chain = Arc::new(InMemoryChain::default());
    chain.add_token(FRAX, 18);
    chain.add_token(DAI, 18);
    chain.add_token(USDC, 6);
    let instantiator = Arc::new(FixedAddress(Address::from_low_u64(0x9001)));
    let factory = PoolFactory::new(ADMIN, FEE_RECEIVER, instantiator, chain);
    factory.set_pool_implementation(ADMIN, 0, Some(PLAIN_TEMPLATE)).unwrap();

    factory
        .deploy_plain_pool(USER, PlainPoolParams::new("A", "A", vec![FRAX, DAI]))
        .unwrap();
    let err = factory
        .deploy_plain_pool(USER, PlainPoolParams::new("B", "B", vec![FRAX, USDC]))
        .unwrap_err();

    assert_eq!(err, StateError::AddressInUse(Address::from_low_u64(0x9001)).into());
    assert_eq!(factory.pool_count(), 1);
    assert_eq!(factory.pool_count_for_coins(FRAX, USDC), 0);
}

#[test]
fn test_events_follow_commits() {
    let fixture = Fixture::with_base_pool();
    let events = fixture.factory.subscribe();

    let meta = deploy_frax_metapool(&fixture);
    let _ = fixture
        .factory
        .deploy_metapool(USER, MetaPoolParams::new(BASE_POOL, "bad", "BAD", USDC));
    let gauge = fixture.factory.deploy_gauge(meta).unwrap();
    fixture
        .factory
        .set_gauge_implementation(ADMIN, Some(Address::ZERO))
        .unwrap();

    let received: Vec<RegistryEvent> = events.try_iter().collect();
    assert_eq!(received.len(), 3);
    assert!(matches!(received[0], RegistryEvent::MetaPoolDeployed { pool, coin, .. } if pool == meta && coin == FRAX));
    assert_eq!(received[1], RegistryEvent::LiquidityGaugeDeployed { pool: meta, gauge });
    assert_eq!(
        received[2],
        RegistryEvent::ImplementationUpdated {
            kind: SlotKind::Gauge,
            index: 0,
            template: None
        }
    );
}

#[test]
fn test_readers_never_see_partial_deployments() {
    let fixture = Arc::new(Fixture::new());
    let coins = fixture.tokens(0x8000, 8);

    let writer = {
        let fixture = Arc::clone(&fixture);
        let coins = coins.clone();
        thread::spawn(move || {
            for window in coins.windows(2) {
                fixture
                    .factory
                    .deploy_plain_pool(USER, PlainPoolParams::new("W", "W", window.to_vec()))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let fixture = Arc::clone(&fixture);
            thread::spawn(move || {
                for _ in 0..200 {
                    let state = fixture.factory.snapshot();
                    // every listed pool is fully indexed
                    for k in 0..state.pool_count() {
                        let pool = state.pool_list(k).unwrap();
                        let coins = state.get_coins(pool).unwrap();
                        assert!(state
                            .find_pools_for_coins(coins[0], coins[1])
                            .contains(&pool));
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(fixture.factory.pool_count(), 7);
}
