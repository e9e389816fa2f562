//! Shared builders for projection integration tests.

#![allow(dead_code)]

use alloy_primitives::{Address, B256, U256};
use projection::events::*;
use types::ids::{EventRef, OfferKey, OrderBookKey};

pub const EXCHANGE: Address = Address::repeat_byte(0xe0);

/// Route engine logs through the test harness. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn book(n: u8) -> OrderBookKey {
    OrderBookKey::new(B256::repeat_byte(n))
}

pub fn addr(n: u8) -> Address {
    Address::repeat_byte(n)
}

pub fn tx(n: u8) -> B256 {
    B256::repeat_byte(n)
}

pub fn event_ref(tx_byte: u8, log_index: u64) -> EventRef {
    EventRef::new(tx(tx_byte), log_index)
}

pub fn offer_key(book_byte: u8, id: u64) -> OfferKey {
    OfferKey::new(book(book_byte), U256::from(id))
}

/// Build an event in transaction `tx_byte` at `log_index`, emitted by
/// `address`.
pub fn event_from(address: Address, tx_byte: u8, log_index: u64, kind: EventKind) -> ChainEvent {
    ChainEvent {
        envelope: EventEnvelope {
            tx_hash: tx(tx_byte),
            log_index,
            block_number: 100,
            timestamp: 1_700_000_000 + log_index,
            address,
        },
        kind,
    }
}

/// Build an exchange-emitted event.
pub fn event(tx_byte: u8, log_index: u64, kind: EventKind) -> ChainEvent {
    event_from(EXCHANGE, tx_byte, log_index, kind)
}

pub fn offer_write(tx_byte: u8, log_index: u64, book_byte: u8, offer_id: u64, maker: Address, gives: u64) -> ChainEvent {
    event(
        tx_byte,
        log_index,
        EventKind::OfferWrite(OfferWriteEvent {
            book: book(book_byte),
            offer_id: U256::from(offer_id),
            maker,
            tick: 1000,
            gives: U256::from(gives),
            gasprice: U256::from(30u64),
            gasreq: U256::from(200_000u64),
        }),
    )
}

pub fn offer_success(tx_byte: u8, log_index: u64, book_byte: u8, offer_id: u64, taker: Address, wants: u64, gives: u64) -> ChainEvent {
    event(
        tx_byte,
        log_index,
        EventKind::OfferSuccess(OfferSuccessEvent {
            book: book(book_byte),
            offer_id: U256::from(offer_id),
            taker,
            taker_wants: U256::from(wants),
            taker_gives: U256::from(gives),
        }),
    )
}

pub fn order_start(tx_byte: u8, log_index: u64, book_byte: u8, taker: Address) -> ChainEvent {
    event(
        tx_byte,
        log_index,
        EventKind::OrderStart(OrderStartEvent { book: book(book_byte), taker }),
    )
}

pub fn order_complete(tx_byte: u8, log_index: u64, taker: Address, got: u64, gave: u64, penalty: u64, fee: u64) -> ChainEvent {
    event(
        tx_byte,
        log_index,
        EventKind::OrderComplete(OrderCompleteEvent {
            taker,
            taker_got: U256::from(got),
            taker_gave: U256::from(gave),
            penalty: U256::from(penalty),
            fee_paid: U256::from(fee),
        }),
    )
}
