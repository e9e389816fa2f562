//! Kandel deployment records
//!
//! A Kandel is an automated market-making strategy contract that
//! posts and retracts many offers in batched operations across the
//! two directions of one token pair. The projection tracks its
//! deposited and published inventory plus the full history of
//! index→offer assignments, which batch reconciliation replays.

use crate::ids::{EventRef, OrderBookKey};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which direction of the pair an offer slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferSide {
    /// Selling base for quote (the base→quote book).
    Ask,
    /// Selling quote for base (the quote→base book).
    Bid,
}

/// One index-mapping update: slot `index` on `side` now points at
/// `offer_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferIndexEntry {
    pub index: U256,
    pub offer_id: U256,
    pub side: OfferSide,
}

/// One Kandel deployment, keyed by its contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kandel {
    pub address: Address,
    pub seeder: Address,
    pub admin: Address,
    pub base: Address,
    pub quote: Address,
    /// Book selling base for quote (ask side).
    pub base_quote_book: OrderBookKey,
    /// Book selling quote for base (bid side).
    pub quote_base_book: OrderBookKey,
    pub deposited_base: U256,
    pub deposited_quote: U256,
    pub total_published_base: U256,
    pub total_published_quote: U256,
    /// Ordered history of every index-mapping update ever seen.
    /// Append-only: multiple (index, side) slots alias the same offer
    /// over time, and batch reconciliation replays this history to
    /// recover the current offer id at each slot.
    pub offer_indexes: Vec<OfferIndexEntry>,
    pub creation_date: u64,
    pub latest_update_date: u64,
}

impl Kandel {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        address: Address,
        seeder: Address,
        admin: Address,
        base: Address,
        quote: Address,
        base_quote_book: OrderBookKey,
        quote_base_book: OrderBookKey,
        timestamp: u64,
    ) -> Self {
        Self {
            address,
            seeder,
            admin,
            base,
            quote,
            base_quote_book,
            quote_base_book,
            deposited_base: U256::ZERO,
            deposited_quote: U256::ZERO,
            total_published_base: U256::ZERO,
            total_published_quote: U256::ZERO,
            offer_indexes: Vec::new(),
            creation_date: timestamp,
            latest_update_date: timestamp,
        }
    }

    /// Which side of this deployment a book belongs to, if either.
    pub fn side_of(&self, book: &OrderBookKey) -> Option<OfferSide> {
        if *book == self.base_quote_book {
            Some(OfferSide::Ask)
        } else if *book == self.quote_base_book {
            Some(OfferSide::Bid)
        } else {
            None
        }
    }

    /// The book an offer on `side` rests on.
    pub fn book_for(&self, side: OfferSide) -> OrderBookKey {
        match side {
            OfferSide::Ask => self.base_quote_book,
            OfferSide::Bid => self.quote_base_book,
        }
    }

    /// Append an index-mapping update. Never overwrites earlier
    /// entries: reconciliation needs the mapping as of any past
    /// transaction.
    pub fn record_index(&mut self, entry: OfferIndexEntry, timestamp: u64) {
        self.offer_indexes.push(entry);
        self.latest_update_date = timestamp;
    }

    /// Replay the index-mapping history to the current offer id at
    /// each (index, side) slot, in ascending index order.
    pub fn current_offers(&self) -> BTreeMap<(U256, OfferSide), U256> {
        let mut slots = BTreeMap::new();
        for entry in &self.offer_indexes {
            slots.insert((entry.index, entry.side), entry.offer_id);
        }
        slots
    }

    /// Apply a credit or debit to the deposited inventory. Returns
    /// false when the token matches neither base nor quote, in which
    /// case nothing is changed.
    pub fn apply_funding(&mut self, token: Address, amount: U256, is_deposit: bool, timestamp: u64) -> bool {
        let counter = if token == self.base {
            &mut self.deposited_base
        } else if token == self.quote {
            &mut self.deposited_quote
        } else {
            return false;
        };
        *counter = if is_deposit {
            *counter + amount
        } else {
            counter.saturating_sub(amount)
        };
        self.latest_update_date = timestamp;
        true
    }

    /// Increase the published inventory on one side.
    pub fn add_published(&mut self, side: OfferSide, amount: U256) {
        let counter = self.published_mut(side);
        *counter += amount;
    }

    /// Decrease the published inventory on one side. Saturating: a
    /// feed that starts mid-history may retract offers it never saw
    /// written.
    pub fn sub_published(&mut self, side: OfferSide, amount: U256) {
        let counter = self.published_mut(side);
        *counter = counter.saturating_sub(amount);
    }

    fn published_mut(&mut self, side: OfferSide) -> &mut U256 {
        match side {
            OfferSide::Ask => &mut self.total_published_base,
            OfferSide::Bid => &mut self.total_published_quote,
        }
    }
}

/// Immutable audit record for one credit or debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KandelDepositWithdraw {
    pub id: EventRef,
    pub kandel: Address,
    pub token: Address,
    pub amount: U256,
    pub is_deposit: bool,
    pub date: u64,
}

/// Per-slot offer snapshot taken when a batch operation closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KandelOfferView {
    pub index: U256,
    pub side: OfferSide,
    pub offer_id: U256,
    pub gives: U256,
    pub total_got: U256,
    pub total_gave: U256,
}

/// One batched populate or retract call, keyed by its Start event.
///
/// The snapshot list is produced at End time by filtering the
/// deployment's current slots to offers last touched inside the
/// batch's log-index window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KandelPopulateRetract {
    pub id: EventRef,
    pub kandel: Address,
    pub is_retract: bool,
    pub start_log_index: u64,
    pub end_log_index: Option<u64>,
    pub offers: Vec<KandelOfferView>,
    pub date: u64,
}

impl KandelPopulateRetract {
    pub fn new(id: EventRef, kandel: Address, is_retract: bool, timestamp: u64) -> Self {
        Self {
            id,
            kandel,
            is_retract,
            start_log_index: id.log_index,
            end_log_index: None,
            offers: Vec::new(),
            date: timestamp,
        }
    }
}
