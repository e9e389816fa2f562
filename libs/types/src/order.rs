//! Taker-side order records
//!
//! Three record shapes share the Start/End correlation pattern:
//! a market `Order` on the exchange itself, the `LimitOrder` wrapper
//! emitted by the order router, and the `CleanOrder` wrapper emitted
//! by the cleaning entrypoint. Each is keyed by the (tx hash, log
//! index) of its Start event.

use crate::ids::{EventRef, OfferKey, OrderBookKey};
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One market-order execution on the exchange.
///
/// Opened by an OrderStart event, it accumulates nested fill results
/// while it sits at the top of the Order correlation scope, then is
/// finalized by the authoritative totals carried by OrderComplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: EventRef,
    pub market: OrderBookKey,
    pub taker: Address,
    pub taker_got: U256,
    pub taker_gave: U256,
    pub penalty: U256,
    pub fee_paid: U256,
    /// Enclosing clean-order wrapper open when this order started.
    pub clean_order: Option<EventRef>,
    /// Enclosing limit-order wrapper open when this order started.
    pub limit_order: Option<EventRef>,
    pub creation_date: u64,
}

impl Order {
    pub fn new(id: EventRef, market: OrderBookKey, taker: Address, timestamp: u64) -> Self {
        Self {
            id,
            market,
            taker,
            taker_got: U256::ZERO,
            taker_gave: U256::ZERO,
            penalty: U256::ZERO,
            fee_paid: U256::ZERO,
            clean_order: None,
            limit_order: None,
            creation_date: timestamp,
        }
    }

    /// Fold one nested fill into the running totals.
    ///
    /// These increments feed fee/volume side-ledgers only; the final
    /// totals are overwritten wholesale by [`Order::finalize`].
    pub fn accumulate(&mut self, taker_got: U256, taker_gave: U256) {
        self.taker_got += taker_got;
        self.taker_gave += taker_gave;
    }

    /// Overwrite the running totals with the authoritative sums from
    /// the Complete event. The source emits these itself; they
    /// supersede anything accumulated incrementally.
    pub fn finalize(
        &mut self,
        taker: Address,
        taker_got: U256,
        taker_gave: U256,
        penalty: U256,
        fee_paid: U256,
    ) {
        self.taker = taker;
        self.taker_got = taker_got;
        self.taker_gave = taker_gave;
        self.penalty = penalty;
        self.fee_paid = fee_paid;
    }
}

/// Resting/market order wrapper emitted by the order router.
///
/// Receives its linked offer id from a later owned-offer event,
/// correlated through the LimitOrder scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub id: EventRef,
    pub market: OrderBookKey,
    pub taker: Address,
    pub is_open: bool,
    pub tick: i64,
    pub fill_volume: U256,
    /// Whether `fill_volume` denominates the wanted (true) or the
    /// given (false) token.
    pub fill_wants: bool,
    pub order_type: u8,
    pub taker_wants_logic: Option<Address>,
    pub taker_gives_logic: Option<Address>,
    /// The resting offer posted on behalf of this order, if any.
    pub offer: Option<OfferKey>,
    pub creation_date: u64,
}

impl LimitOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EventRef,
        market: OrderBookKey,
        taker: Address,
        tick: i64,
        fill_volume: U256,
        fill_wants: bool,
        order_type: u8,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            market,
            taker,
            is_open: true,
            tick,
            fill_volume,
            fill_wants,
            order_type,
            taker_wants_logic: None,
            taker_gives_logic: None,
            offer: None,
            creation_date: timestamp,
        }
    }
}

/// Offer-cleaning wrapper: a taker triggering failing offers to
/// collect their penalty bounty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanOrder {
    pub id: EventRef,
    pub market: OrderBookKey,
    pub taker: Address,
    pub offers_to_clean: u64,
    pub creation_date: u64,
}

impl CleanOrder {
    pub fn new(
        id: EventRef,
        market: OrderBookKey,
        taker: Address,
        offers_to_clean: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            market,
            taker,
            offers_to_clean,
            creation_date: timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    fn order() -> Order {
        Order::new(
            EventRef::new(B256::repeat_byte(0x01), 3),
            OrderBookKey::new(B256::repeat_byte(0x02)),
            Address::repeat_byte(0xcc),
            1_700_000_000,
        )
    }

    #[test]
    fn test_new_order_has_zeroed_aggregates() {
        let o = order();
        assert_eq!(o.taker_got, U256::ZERO);
        assert_eq!(o.taker_gave, U256::ZERO);
        assert!(o.clean_order.is_none());
        assert!(o.limit_order.is_none());
    }

    #[test]
    fn test_accumulate_adds_fills() {
        let mut o = order();
        o.accumulate(U256::from(500u64), U256::from(250u64));
        o.accumulate(U256::from(1500u64), U256::from(750u64));

        assert_eq!(o.taker_got, U256::from(2000u64));
        assert_eq!(o.taker_gave, U256::from(1000u64));
    }

    #[test]
    fn test_finalize_overwrites_accumulated_totals() {
        let mut o = order();
        o.accumulate(U256::from(999u64), U256::from(999u64));
        o.finalize(
            Address::repeat_byte(0xcc),
            U256::from(1000u64),
            U256::from(2000u64),
            U256::ZERO,
            U256::from(20u64),
        );

        assert_eq!(o.taker_got, U256::from(1000u64));
        assert_eq!(o.taker_gave, U256::from(2000u64));
        assert_eq!(o.fee_paid, U256::from(20u64));
    }

    #[test]
    fn test_limit_order_starts_open_without_offer() {
        let lo = LimitOrder::new(
            EventRef::new(B256::repeat_byte(0x03), 1),
            OrderBookKey::new(B256::repeat_byte(0x02)),
            Address::repeat_byte(0xcc),
            1000,
            U256::from(5000u64),
            true,
            0,
            1_700_000_000,
        );
        assert!(lo.is_open);
        assert!(lo.offer.is_none());
    }
}
