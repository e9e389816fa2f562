//! Decoded event input
//!
//! One struct per event kind, already decoded by the host from raw
//! logs into strongly typed fields, plus the envelope metadata every
//! log carries. Events arrive one at a time, strictly in emission
//! order (block order, then in-block log order); the engine performs
//! no reordering or buffering.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use types::ids::{EventRef, OrderBookKey};
use types::kandel::OfferSide;

/// Envelope metadata shared by every decoded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub tx_hash: B256,
    pub log_index: u64,
    pub block_number: u64,
    /// Block timestamp, Unix seconds.
    pub timestamp: u64,
    /// Contract that emitted the log.
    pub address: Address,
}

impl EventEnvelope {
    /// Identity of the record opened by this event.
    pub fn record_ref(&self) -> EventRef {
        EventRef::new(self.tx_hash, self.log_index)
    }
}

/// One decoded event ready for projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEvent {
    pub envelope: EventEnvelope,
    pub kind: EventKind,
}

/// Closed set of event kinds the engine projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    // Exchange core
    SetActive(SetActiveEvent),
    SetGasbase(SetGasbaseEvent),
    OfferWrite(OfferWriteEvent),
    OfferSuccess(OfferSuccessEvent),
    OfferFail(OfferFailEvent),
    OfferRetract(OfferRetractEvent),
    OrderStart(OrderStartEvent),
    OrderComplete(OrderCompleteEvent),
    CleanStart(CleanStartEvent),
    CleanComplete,
    // Order router
    LimitOrderStart(LimitOrderStartEvent),
    LimitOrderComplete,
    NewOwnedOffer(NewOwnedOfferEvent),
    // Kandel strategies
    NewKandel(NewKandelEvent),
    KandelCredit(KandelFundingEvent),
    KandelDebit(KandelFundingEvent),
    SetIndexMapping(SetIndexMappingEvent),
    PopulateStart,
    PopulateEnd,
    RetractStart,
    RetractEnd,
}

impl EventKind {
    /// Stable label for logging and error reporting.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::SetActive(_) => "SetActive",
            EventKind::SetGasbase(_) => "SetGasbase",
            EventKind::OfferWrite(_) => "OfferWrite",
            EventKind::OfferSuccess(_) => "OfferSuccess",
            EventKind::OfferFail(_) => "OfferFail",
            EventKind::OfferRetract(_) => "OfferRetract",
            EventKind::OrderStart(_) => "OrderStart",
            EventKind::OrderComplete(_) => "OrderComplete",
            EventKind::CleanStart(_) => "CleanStart",
            EventKind::CleanComplete => "CleanComplete",
            EventKind::LimitOrderStart(_) => "LimitOrderStart",
            EventKind::LimitOrderComplete => "LimitOrderComplete",
            EventKind::NewOwnedOffer(_) => "NewOwnedOffer",
            EventKind::NewKandel(_) => "NewKandel",
            EventKind::KandelCredit(_) => "Credit",
            EventKind::KandelDebit(_) => "Debit",
            EventKind::SetIndexMapping(_) => "SetIndexMapping",
            EventKind::PopulateStart => "PopulateStart",
            EventKind::PopulateEnd => "PopulateEnd",
            EventKind::RetractStart => "RetractStart",
            EventKind::RetractEnd => "RetractEnd",
        }
    }
}

/// Activation-state change for one order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetActiveEvent {
    pub book: OrderBookKey,
    pub outbound_token: Address,
    pub inbound_token: Address,
    pub tick_spacing: U256,
    pub active: bool,
}

/// Gas-base change for one order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGasbaseEvent {
    pub book: OrderBookKey,
    pub gas_base: U256,
}

/// A maker posted or updated a resting offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferWriteEvent {
    pub book: OrderBookKey,
    pub offer_id: U256,
    pub maker: Address,
    pub tick: i64,
    pub gives: U256,
    pub gasprice: U256,
    pub gasreq: U256,
}

/// A taker consumed part or all of a resting offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSuccessEvent {
    pub book: OrderBookKey,
    pub offer_id: U256,
    pub taker: Address,
    /// Amount of the offer's promise taken.
    pub taker_wants: U256,
    /// Amount of the inbound token paid by the taker.
    pub taker_gives: U256,
}

/// Maker execution failed during a fill attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferFailEvent {
    pub book: OrderBookKey,
    pub offer_id: U256,
    pub taker: Address,
    pub taker_wants: U256,
    pub taker_gives: U256,
    /// Opaque revert payload.
    pub reason: Bytes,
}

/// The maker pulled an offer from the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferRetractEvent {
    pub book: OrderBookKey,
    pub offer_id: U256,
    pub deprovision: bool,
}

/// A market order began executing against the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStartEvent {
    pub book: OrderBookKey,
    pub taker: Address,
}

/// A market order finished; totals here are authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompleteEvent {
    pub taker: Address,
    pub taker_got: U256,
    pub taker_gave: U256,
    pub penalty: U256,
    pub fee_paid: U256,
}

/// A cleaning call began targeting failing offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanStartEvent {
    pub book: OrderBookKey,
    pub taker: Address,
    pub offers_to_clean: u64,
}

/// The order router began executing a limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrderStartEvent {
    pub book: OrderBookKey,
    pub taker: Address,
    pub tick: i64,
    pub fill_volume: U256,
    pub fill_wants: bool,
    pub order_type: u8,
    pub taker_wants_logic: Option<Address>,
    pub taker_gives_logic: Option<Address>,
}

/// The router posted a resting offer owned by the limit order that is
/// currently open. Carries no order id: correlation is by stack top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOwnedOfferEvent {
    pub book: OrderBookKey,
    pub offer_id: U256,
    pub owner: Address,
}

/// A seeder deployed a new Kandel strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewKandelEvent {
    pub kandel: Address,
    pub admin: Address,
    pub base: Address,
    pub quote: Address,
    pub base_quote_book: OrderBookKey,
    pub quote_base_book: OrderBookKey,
}

/// Inventory credit or debit, emitted by the deployment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KandelFundingEvent {
    pub token: Address,
    pub amount: U256,
}

/// Slot `index` on `side` now points at `offer_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetIndexMappingEvent {
    pub index: U256,
    pub side: OfferSide,
    pub offer_id: U256,
}
