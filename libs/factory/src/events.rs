//! Registry events
//!
//! Published after a mutation commits, never for a failed operation.
//! Subscribers receive events over bounded `crossbeam-channel` queues; a full
//! queue drops the event for that subscriber only, and disconnected
//! subscribers are pruned on the next publish.

use crate::slots::SlotKind;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use factory_types::{Address, AssetType, PoolAddress, TokenAddress};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Queue depth per subscriber
pub const SUBSCRIBER_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    PlainPoolDeployed {
        pool: PoolAddress,
        coins: Vec<TokenAddress>,
        a: u128,
        fee: u128,
        offpeg_fee_multiplier: u128,
        deployer: Address,
    },
    MetaPoolDeployed {
        pool: PoolAddress,
        coin: TokenAddress,
        base_pool: PoolAddress,
        a: u128,
        fee: u128,
        offpeg_fee_multiplier: u128,
        deployer: Address,
    },
    BasePoolAdded {
        base_pool: PoolAddress,
    },
    LiquidityGaugeDeployed {
        pool: PoolAddress,
        gauge: Address,
    },
    ImplementationUpdated {
        kind: SlotKind,
        index: u64,
        template: Option<Address>,
    },
    OwnershipTransferCommitted {
        future_admin: Address,
    },
    OwnershipTransferred {
        previous_admin: Address,
        admin: Address,
    },
    FeeReceiverUpdated {
        fee_receiver: Address,
    },
    AssetTypeAdded {
        asset_type: AssetType,
        name: String,
    },
}

/// Fan-out of registry events to any number of subscribers
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<RegistryEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<RegistryEvent> {
        let (tx, rx) = bounded(SUBSCRIBER_CAPACITY);
        self.subscribers.lock().push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    pub fn publish(&self, event: RegistryEvent) {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|subscriber| match subscriber.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Event subscriber queue full, dropping {:?}", event);
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        debug!("Published event to {} subscribers", subscribers.len());
    }
}
