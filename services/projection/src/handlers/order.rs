//! Order aggregation handlers
//!
//! Start events open a record and push its id onto the matching
//! scope; Complete events pop it. A nested event occurring between a
//! Start and its End finds the currently open record through the
//! stack top — the source never tells it which record it belongs to.

use tracing::warn;

use crate::engine::ProjectionEngine;
use crate::errors::{ProjectionError, Result};
use crate::events::{
    CleanStartEvent, EventEnvelope, LimitOrderStartEvent, NewOwnedOfferEvent, OrderCompleteEvent,
    OrderStartEvent,
};
use crate::stack::Scope;
use types::ids::OfferKey;
use types::order::{CleanOrder, LimitOrder, Order};

impl ProjectionEngine {
    pub(crate) fn on_order_start(&mut self, env: &EventEnvelope, e: &OrderStartEvent) -> Result<()> {
        self.ensure_account(e.taker, env.timestamp);

        let mut order = Order::new(env.record_ref(), e.book, e.taker, env.timestamp);
        // optional enclosing wrappers: peek, not pop — they outlive
        // this order, and their absence is benign
        order.clean_order = self.stacks.peek(Scope::CleanOrder);
        order.limit_order = self.stacks.peek(Scope::LimitOrder);

        self.stacks.push(Scope::Order, order.id);
        self.store.insert_order(order);
        Ok(())
    }

    pub(crate) fn on_order_complete(&mut self, env: &EventEnvelope, e: &OrderCompleteEvent) -> Result<()> {
        let id = self.must_peek(Scope::Order, env)?;
        if self.store.order(&id).is_none() {
            return Err(ProjectionError::MissingRecord {
                entity: "Order",
                id: id.to_string(),
            });
        }
        self.stacks.pop(Scope::Order);

        let order = self.store.order_mut(&id).expect("validated above");
        order.finalize(e.taker, e.taker_got, e.taker_gave, e.penalty, e.fee_paid);
        Ok(())
    }

    pub(crate) fn on_clean_start(&mut self, env: &EventEnvelope, e: &CleanStartEvent) -> Result<()> {
        self.ensure_account(e.taker, env.timestamp);

        let clean = CleanOrder::new(
            env.record_ref(),
            e.book,
            e.taker,
            e.offers_to_clean,
            env.timestamp,
        );
        self.stacks.push(Scope::CleanOrder, clean.id);
        self.store.insert_clean_order(clean);
        Ok(())
    }

    pub(crate) fn on_clean_complete(&mut self, env: &EventEnvelope) -> Result<()> {
        self.must_pop(Scope::CleanOrder, env)?;
        Ok(())
    }

    pub(crate) fn on_limit_order_start(
        &mut self,
        env: &EventEnvelope,
        e: &LimitOrderStartEvent,
    ) -> Result<()> {
        self.ensure_account(e.taker, env.timestamp);

        let mut limit_order = LimitOrder::new(
            env.record_ref(),
            e.book,
            e.taker,
            e.tick,
            e.fill_volume,
            e.fill_wants,
            e.order_type,
            env.timestamp,
        );
        limit_order.taker_wants_logic = e.taker_wants_logic;
        limit_order.taker_gives_logic = e.taker_gives_logic;

        self.stacks.push(Scope::LimitOrder, limit_order.id);
        self.store.insert_limit_order(limit_order);
        Ok(())
    }

    pub(crate) fn on_limit_order_complete(&mut self, env: &EventEnvelope) -> Result<()> {
        self.must_pop(Scope::LimitOrder, env)?;
        Ok(())
    }

    /// Link the currently open limit order to the offer the router
    /// just posted on its behalf. The event carries no order id; an
    /// empty LimitOrder scope means the feed is corrupted.
    pub(crate) fn on_new_owned_offer(&mut self, env: &EventEnvelope, e: &NewOwnedOfferEvent) -> Result<()> {
        let limit_order_ref = self.must_peek(Scope::LimitOrder, env)?;
        if self.store.limit_order(&limit_order_ref).is_none() {
            return Err(ProjectionError::MissingRecord {
                entity: "LimitOrder",
                id: limit_order_ref.to_string(),
            });
        }

        self.ensure_account(e.owner, env.timestamp);

        let key = OfferKey::new(e.book, e.offer_id);
        if self.store.offer(&key).is_none() {
            // data quality, not corruption: keep processing
            warn!(offer = %key, "owned-offer event references an offer not in the store");
            return Ok(());
        }

        self.store.offer_mut(&key).expect("checked above").limit_order = Some(limit_order_ref);
        self.store
            .limit_order_mut(&limit_order_ref)
            .expect("validated above")
            .offer = Some(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::ProjectionEngine;
    use crate::errors::ProjectionError;
    use crate::events::{
        ChainEvent, CleanStartEvent, EventEnvelope, EventKind, LimitOrderStartEvent,
        NewOwnedOfferEvent, OfferWriteEvent, OrderCompleteEvent, OrderStartEvent,
    };
    use crate::stack::Scope;
    use alloy_primitives::{Address, B256, U256};
    use types::ids::{EventRef, OfferKey, OrderBookKey};

    fn book() -> OrderBookKey {
        OrderBookKey::new(B256::repeat_byte(0x0b))
    }

    fn taker() -> Address {
        Address::repeat_byte(0xcc)
    }

    fn event(log_index: u64, kind: EventKind) -> ChainEvent {
        ChainEvent {
            envelope: EventEnvelope {
                tx_hash: B256::repeat_byte(0x01),
                log_index,
                block_number: 1,
                timestamp: 1_700_000_000 + log_index,
                address: Address::repeat_byte(0xe0),
            },
            kind,
        }
    }

    fn order_start(log_index: u64) -> ChainEvent {
        event(
            log_index,
            EventKind::OrderStart(OrderStartEvent { book: book(), taker: taker() }),
        )
    }

    fn limit_order_start(log_index: u64) -> ChainEvent {
        event(
            log_index,
            EventKind::LimitOrderStart(LimitOrderStartEvent {
                book: book(),
                taker: taker(),
                tick: 1000,
                fill_volume: U256::from(5000u64),
                fill_wants: true,
                order_type: 0,
                taker_wants_logic: None,
                taker_gives_logic: None,
            }),
        )
    }

    #[test]
    fn test_order_complete_without_start_is_fatal() {
        let mut engine = ProjectionEngine::default();
        let err = engine
            .apply(&event(
                0,
                EventKind::OrderComplete(OrderCompleteEvent {
                    taker: taker(),
                    taker_got: U256::ZERO,
                    taker_gave: U256::ZERO,
                    penalty: U256::ZERO,
                    fee_paid: U256::ZERO,
                }),
            ))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::EmptyScope { scope: Scope::Order, .. }));
    }

    #[test]
    fn test_order_backrefs_enclosing_wrappers() {
        let mut engine = ProjectionEngine::default();
        engine
            .apply(&event(
                0,
                EventKind::CleanStart(CleanStartEvent {
                    book: book(),
                    taker: taker(),
                    offers_to_clean: 2,
                }),
            ))
            .unwrap();
        engine.apply(&order_start(1)).unwrap();

        let order_ref = EventRef::new(B256::repeat_byte(0x01), 1);
        let order = engine.store().order(&order_ref).unwrap();
        assert_eq!(order.clean_order, Some(EventRef::new(B256::repeat_byte(0x01), 0)));
        assert_eq!(order.limit_order, None);

        engine.apply(&event(2, EventKind::CleanComplete)).unwrap();
        assert!(engine.stacks().is_empty(Scope::CleanOrder));
    }

    #[test]
    fn test_clean_complete_without_start_is_fatal() {
        let mut engine = ProjectionEngine::default();
        let err = engine.apply(&event(0, EventKind::CleanComplete)).unwrap_err();
        assert!(matches!(err, ProjectionError::EmptyScope { scope: Scope::CleanOrder, .. }));
    }

    #[test]
    fn test_owned_offer_without_open_limit_order_is_fatal() {
        let mut engine = ProjectionEngine::default();
        let err = engine
            .apply(&event(
                0,
                EventKind::NewOwnedOffer(NewOwnedOfferEvent {
                    book: book(),
                    offer_id: U256::from(1u64),
                    owner: taker(),
                }),
            ))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::EmptyScope { scope: Scope::LimitOrder, .. }));
    }

    #[test]
    fn test_owned_offer_with_unknown_offer_is_warned_and_skipped() {
        let mut engine = ProjectionEngine::default();
        engine.apply(&limit_order_start(0)).unwrap();
        engine
            .apply(&event(
                1,
                EventKind::NewOwnedOffer(NewOwnedOfferEvent {
                    book: book(),
                    offer_id: U256::from(42u64),
                    owner: taker(),
                }),
            ))
            .unwrap();

        let lo_ref = EventRef::new(B256::repeat_byte(0x01), 0);
        assert_eq!(engine.store().limit_order(&lo_ref).unwrap().offer, None);
    }

    #[test]
    fn test_owned_offer_links_both_directions() {
        let mut engine = ProjectionEngine::default();
        engine
            .apply(&event(
                0,
                EventKind::OfferWrite(OfferWriteEvent {
                    book: book(),
                    offer_id: U256::from(7u64),
                    maker: Address::repeat_byte(0xaa),
                    tick: 1000,
                    gives: U256::from(2000u64),
                    gasprice: U256::from(30u64),
                    gasreq: U256::from(200_000u64),
                }),
            ))
            .unwrap();
        engine.apply(&limit_order_start(1)).unwrap();
        engine
            .apply(&event(
                2,
                EventKind::NewOwnedOffer(NewOwnedOfferEvent {
                    book: book(),
                    offer_id: U256::from(7u64),
                    owner: taker(),
                }),
            ))
            .unwrap();

        let lo_ref = EventRef::new(B256::repeat_byte(0x01), 1);
        let key = OfferKey::new(book(), U256::from(7u64));
        assert_eq!(engine.store().limit_order(&lo_ref).unwrap().offer, Some(key));
        assert_eq!(engine.store().offer(&key).unwrap().limit_order, Some(lo_ref));

        engine.apply(&event(3, EventKind::LimitOrderComplete)).unwrap();
        assert!(engine.stacks().is_empty(Scope::LimitOrder));
        // record outlives the scope entry
        assert!(engine.store().limit_order(&lo_ref).is_some());
    }
}
