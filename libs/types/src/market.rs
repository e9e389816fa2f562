//! Market registry record
//!
//! One canonical record per order-book key. Markets are created
//! lazily on the first activation-state or gas-base change for an
//! unseen key and are never deleted; reactivation never resets
//! anything accumulated by the offers that trade on the market.

use crate::ids::OrderBookKey;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Canonical record for one directed trading pair.
///
/// Token addresses and tick spacing are only known once a `SetActive`
/// event has been seen; a market created from a bare gas-base change
/// carries `None` until then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub key: OrderBookKey,
    pub active: bool,
    pub gas_base: U256,
    pub tick_spacing: U256,
    pub outbound_token: Option<Address>,
    pub inbound_token: Option<Address>,
    pub creation_date: u64,
    pub latest_update_date: u64,
}

impl Market {
    /// Create an inactive placeholder market for a freshly seen key.
    pub fn new(key: OrderBookKey, timestamp: u64) -> Self {
        Self {
            key,
            active: false,
            gas_base: U256::ZERO,
            tick_spacing: U256::ZERO,
            outbound_token: None,
            inbound_token: None,
            creation_date: timestamp,
            latest_update_date: timestamp,
        }
    }

    /// Apply an activation-state change, filling in the pair details
    /// carried by the event. Accumulated state is left untouched.
    pub fn set_active(
        &mut self,
        active: bool,
        outbound: Address,
        inbound: Address,
        tick_spacing: U256,
        timestamp: u64,
    ) {
        self.active = active;
        self.outbound_token = Some(outbound);
        self.inbound_token = Some(inbound);
        self.tick_spacing = tick_spacing;
        self.latest_update_date = timestamp;
    }

    /// Apply a gas-base change.
    pub fn set_gas_base(&mut self, gas_base: U256, timestamp: u64) {
        self.gas_base = gas_base;
        self.latest_update_date = timestamp;
    }
}
