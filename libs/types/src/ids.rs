//! Identifier types for projected entities
//!
//! All identities are chain-derived: order-book keys are 32-byte
//! hashes emitted by the exchange contract, offers are numbered per
//! book by the contract itself, and transaction-scoped records
//! (orders, wrappers, batches) are keyed by the (tx hash, log index)
//! of the event that opened them. Nothing here is generated locally.

use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque hash identifying one directed trading pair + tick spacing.
///
/// The exchange hashes (outbound token, inbound token, tick spacing)
/// into this key; the projection treats it as opaque and only ever
/// compares it for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBookKey(B256);

impl OrderBookKey {
    pub fn new(hash: B256) -> Self {
        Self(hash)
    }

    pub fn as_hash(&self) -> &B256 {
        &self.0
    }
}

impl From<B256> for OrderBookKey {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

impl fmt::Display for OrderBookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite identity of a resting offer: book key + contract-assigned
/// numeric id.
///
/// Offer ids are reused by the chain after full consumption, so this
/// key identifies a *slot*, not a single lifetime — the most recent
/// Write on the slot wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfferKey {
    pub book: OrderBookKey,
    pub id: U256,
}

impl OfferKey {
    pub fn new(book: OrderBookKey, id: U256) -> Self {
        Self { book, id }
    }
}

impl fmt::Display for OfferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.book, self.id)
    }
}

/// Identity of a transaction-scoped record: the (tx hash, log index)
/// of the event that created it.
///
/// Unique per chain history because log indices are unique within a
/// transaction and the feed is strictly ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRef {
    pub tx_hash: B256,
    pub log_index: u64,
}

impl EventRef {
    pub fn new(tx_hash: B256, log_index: u64) -> Self {
        Self { tx_hash, log_index }
    }
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tx_hash, self.log_index)
    }
}
