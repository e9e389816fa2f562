//! Offer lifecycle types
//!
//! A resting offer moves through `Open → {Filled, Failed, Retracted}`
//! and can only leave a terminal state through a new Write event that
//! reuses the same id (a fresh cycle on the same slot). Fill totals
//! are cumulative across cycles and never decrease.

use crate::ids::{EventRef, OfferKey};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// Mutually exclusive offer status.
///
/// Exactly one state holds at any time after the first Write; the
/// enum makes the exclusivity structural rather than a four-boolean
/// invariant to police.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    /// Live on the book (or consumed and awaiting re-write).
    Open,
    /// Fully consumed by a taker.
    Filled,
    /// Maker execution failed during a fill attempt.
    Failed,
    /// Pulled from the book by its maker.
    Retracted,
}

/// A single resting liquidity commitment on the order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub key: OfferKey,
    pub maker: Address,
    pub tick: i64,
    /// Remaining promised amount. Zeroed on any Success (the source
    /// pulls the offer from the book pending re-write), on Fail and
    /// on Retract.
    pub gives: U256,
    pub gasprice: U256,
    pub gasreq: U256,
    pub status: OfferStatus,
    /// Cumulative amount received by the maker. Never decreases.
    pub total_got: U256,
    /// Cumulative amount given up by the maker. Never decreases.
    pub total_gave: U256,
    /// Promise snapshot from just before the latest consumption or
    /// qualifying re-write. One level of history only.
    pub prev_gives: Option<U256>,
    pub prev_tick: Option<i64>,
    /// Opaque failure payload from the latest Fail event.
    pub failed_reason: Option<Bytes>,
    /// Whether the latest Retract released the maker's provision.
    pub deprovisioned: bool,
    /// Back-reference to the Kandel deployment that wrote the offer.
    pub kandel: Option<Address>,
    /// Back-reference to the limit order that owns the offer.
    pub limit_order: Option<EventRef>,
    pub creation_date: u64,
    pub latest_update_date: u64,
    pub latest_tx_hash: B256,
    pub latest_log_index: u64,
}

/// Outcome of applying a Success event to an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// The offer's entire remaining promise was taken.
    pub full: bool,
    /// Promise on the book before the fill (needed by inventory
    /// bookkeeping on the maker side).
    pub pre_gives: U256,
}

impl Offer {
    /// First Write for an unseen slot.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        key: OfferKey,
        maker: Address,
        tick: i64,
        gives: U256,
        gasprice: U256,
        gasreq: U256,
        timestamp: u64,
    ) -> Self {
        Self {
            key,
            maker,
            tick,
            gives,
            gasprice,
            gasreq,
            status: OfferStatus::Open,
            total_got: U256::ZERO,
            total_gave: U256::ZERO,
            prev_gives: None,
            prev_tick: None,
            failed_reason: None,
            deprovisioned: false,
            kandel: None,
            limit_order: None,
            creation_date: timestamp,
            latest_update_date: timestamp,
            latest_tx_hash: B256::ZERO,
            latest_log_index: 0,
        }
    }

    /// Apply a Write to an existing slot: a fresh cycle reusing the id.
    /// The chain reuses fully consumed ids, possibly under a different
    /// maker, so the event's maker always wins.
    ///
    /// The current promise is snapshotted into `prev_*` only when it
    /// is still nonzero — terminal offers and partially consumed
    /// offers were already zeroed, and overwriting the snapshot taken
    /// at consumption time with zeros would destroy it.
    pub fn rewrite(&mut self, maker: Address, tick: i64, gives: U256, gasprice: U256, gasreq: U256) {
        if self.gives > U256::ZERO {
            self.prev_gives = Some(self.gives);
            self.prev_tick = Some(self.tick);
        }
        self.maker = maker;
        self.tick = tick;
        self.gives = gives;
        self.gasprice = gasprice;
        self.gasreq = gasreq;
        self.status = OfferStatus::Open;
        self.failed_reason = None;
        self.deprovisioned = false;
    }

    /// Apply a Fail: maker execution reverted during a fill attempt.
    pub fn fail(&mut self, reason: Bytes) {
        self.status = OfferStatus::Failed;
        self.gives = U256::ZERO;
        self.gasprice = U256::ZERO;
        self.failed_reason = Some(reason);
    }

    /// Apply a Retract. A deprovisioning retract also releases the
    /// maker's gas provision; a plain retract preserves it.
    pub fn retract(&mut self, deprovision: bool) {
        self.status = OfferStatus::Retracted;
        self.gives = U256::ZERO;
        self.deprovisioned = deprovision;
        if deprovision {
            self.gasprice = U256::ZERO;
        }
    }

    /// Apply a Success: a taker consumed `taker_wants` of the promise
    /// against `taker_gives` of the inbound token.
    ///
    /// The fill is full exactly when the pre-update promise equals
    /// `taker_wants`. Either way the live promise drops to zero (the
    /// source pulls the offer pending re-write); a partial fill keeps
    /// the offer Open. Totals accumulate and never reset.
    pub fn fill(&mut self, taker_wants: U256, taker_gives: U256) -> FillOutcome {
        let pre_gives = self.gives;
        let full = pre_gives == taker_wants;

        self.prev_gives = Some(pre_gives);
        self.prev_tick = Some(self.tick);
        self.total_got += taker_wants;
        self.total_gave += taker_gives;
        self.gives = U256::ZERO;
        if full {
            self.status = OfferStatus::Filled;
        }

        FillOutcome { full, pre_gives }
    }

    /// Stamp the envelope of the event that last touched this offer.
    /// Batch reconciliation keys off `latest_log_index`.
    pub fn stamp(&mut self, tx_hash: B256, log_index: u64, timestamp: u64) {
        self.latest_tx_hash = tx_hash;
        self.latest_log_index = log_index;
        self.latest_update_date = timestamp;
    }

    pub fn is_open(&self) -> bool {
        self.status == OfferStatus::Open
    }
}
