//! Coin-pair market index
//!
//! Maps an unordered coin pair to every pool that can exchange it, in
//! registration order. The key is the XOR of both coin addresses. XOR is an
//! approximation: two different pairs can share a key when
//! `a ^ b == c ^ d`. Coin addresses are sparse 160-bit values, so such a
//! collision is accepted as practically unreachable rather than ruled out.

use factory_types::{PoolAddress, TokenAddress};
use std::collections::HashMap;
use tracing::debug;

/// Symmetric key of an unordered coin pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey([u8; 20]);

impl PairKey {
    pub fn new(a: TokenAddress, b: TokenAddress) -> Self {
        let mut key = [0u8; 20];
        for (slot, (x, y)) in key
            .iter_mut()
            .zip(a.as_bytes().iter().zip(b.as_bytes().iter()))
        {
            *slot = x ^ y;
        }
        Self(key)
    }
}

/// Append-only pair index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketIndex {
    markets: HashMap<PairKey, Vec<PoolAddress>>,
}

impl MarketIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `pool` under every unordered pair of `coins`
    ///
    /// Callers register each pool once; the index does not deduplicate.
    pub fn register(&mut self, pool: PoolAddress, coins: &[TokenAddress]) {
        for (i, a) in coins.iter().enumerate() {
            for b in &coins[i + 1..] {
                self.register_pair(pool, *a, *b);
            }
        }
    }

    /// Register `pool` under a single pair
    pub fn register_pair(&mut self, pool: PoolAddress, a: TokenAddress, b: TokenAddress) {
        let pools = self.markets.entry(PairKey::new(a, b)).or_default();
        pools.push(pool);
        debug!(
            "Indexed pair ({}, {}) -> {} [{} pools]",
            a.short(),
            b.short(),
            pool.short(),
            pools.len()
        );
    }

    /// `i`-th pool registered for the pair, in registration order
    pub fn lookup(&self, a: TokenAddress, b: TokenAddress, i: usize) -> Option<PoolAddress> {
        self.pools_for(a, b).get(i).copied()
    }

    pub fn count(&self, a: TokenAddress, b: TokenAddress) -> usize {
        self.pools_for(a, b).len()
    }

    pub fn pools_for(&self, a: TokenAddress, b: TokenAddress) -> &[PoolAddress] {
        self.markets
            .get(&PairKey::new(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct pair keys
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(n: u64) -> TokenAddress {
        TokenAddress::from_low_u64(n)
    }

    fn pool(n: u64) -> PoolAddress {
        PoolAddress::from_low_u64(n)
    }

    #[test]
    fn test_pair_key_is_symmetric() {
        assert_eq!(PairKey::new(token(1), token(2)), PairKey::new(token(2), token(1)));
        assert_ne!(PairKey::new(token(1), token(2)), PairKey::new(token(1), token(4)));
    }

    #[test]
    fn test_register_covers_every_pair() {
        let mut index = MarketIndex::new();
        let coins = [token(1), token(2), token(4)];
        index.register(pool(100), &coins);

        for a in &coins {
            for b in &coins {
                if a != b {
                    assert_eq!(index.lookup(*a, *b, 0), Some(pool(100)));
                    assert_eq!(index.count(*a, *b), 1);
                }
            }
        }
        assert_eq!(index.market_count(), 3);
    }

    #[test]
    fn test_lookup_preserves_registration_order() {
        let mut index = MarketIndex::new();
        index.register(pool(100), &[token(1), token(2)]);
        index.register_pair(pool(200), token(2), token(1));

        assert_eq!(index.pools_for(token(1), token(2)), &[pool(100), pool(200)]);
        assert_eq!(index.lookup(token(1), token(2), 1), Some(pool(200)));
        assert_eq!(index.lookup(token(1), token(2), 2), None);
    }

    #[test]
    fn test_unknown_pair_is_empty() {
        let index = MarketIndex::new();
        assert_eq!(index.count(token(7), token(8)), 0);
        assert!(index.pools_for(token(7), token(8)).is_empty());
        assert_eq!(index.lookup(token(7), token(8), 0), None);
    }

    #[test]
    fn test_xor_collision_is_shared() {
        // 1 ^ 6 == 2 ^ 5: distinct pairs with one key
        let mut index = MarketIndex::new();
        index.register_pair(pool(100), token(1), token(6));
        assert_eq!(index.count(token(2), token(5)), 1);
    }
}
