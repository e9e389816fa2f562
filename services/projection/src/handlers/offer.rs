//! Offer lifecycle handlers
//!
//! Write/Success/Fail/Retract transitions plus their ripple effects:
//! Kandel published-inventory deltas, owning-limit-order open flags,
//! and the join point where a Success folds into whichever Order is
//! currently open on the Order scope.
//!
//! Fatal validation happens before any mutation, so a rejected event
//! commits nothing.

use alloy_primitives::{Address, U256};

use crate::engine::ProjectionEngine;
use crate::errors::{ProjectionError, Result};
use crate::events::{
    EventEnvelope, OfferFailEvent, OfferRetractEvent, OfferSuccessEvent, OfferWriteEvent,
};
use crate::stack::Scope;
use types::ids::{EventRef, OfferKey, OrderBookKey};
use types::offer::Offer;

impl ProjectionEngine {
    pub(crate) fn on_offer_write(&mut self, env: &EventEnvelope, e: &OfferWriteEvent) -> Result<()> {
        let key = OfferKey::new(e.book, e.offer_id);
        self.ensure_account(e.maker, env.timestamp);

        if self.store.offer(&key).is_some() {
            let maker_kandel = self.store.is_kandel(&e.maker).then_some(e.maker);

            let offer = self.store.offer_mut(&key).expect("checked above");
            let pre_gives = offer.gives;
            let prev_maker = offer.maker;
            let prev_kandel = offer.kandel;

            offer.rewrite(e.maker, e.tick, e.gives, e.gasprice, e.gasreq);
            offer.stamp(env.tx_hash, env.log_index, env.timestamp);

            // a reassigned slot belongs to the new maker: the old
            // owner's back-references no longer apply
            if prev_maker != e.maker {
                offer.kandel = maker_kandel;
                offer.limit_order = None;
            }
            let kandel = offer.kandel;
            let limit_order = offer.limit_order;

            if prev_kandel == kandel {
                if let Some(kandel) = kandel {
                    self.adjust_published(&kandel, &e.book, pre_gives, e.gives);
                }
            } else {
                if let Some(prev) = prev_kandel {
                    self.adjust_published(&prev, &e.book, pre_gives, U256::ZERO);
                }
                if let Some(kandel) = kandel {
                    self.adjust_published(&kandel, &e.book, U256::ZERO, e.gives);
                }
            }
            // a re-write reopens the owning limit order, when it exists
            if let Some(limit_order) = limit_order {
                self.set_limit_order_open(&limit_order, true);
            }
        } else {
            let mut offer = Offer::new(
                key,
                e.maker,
                e.tick,
                e.gives,
                e.gasprice,
                e.gasreq,
                env.timestamp,
            );
            offer.stamp(env.tx_hash, env.log_index, env.timestamp);
            if self.store.is_kandel(&e.maker) {
                offer.kandel = Some(e.maker);
            }
            let kandel = offer.kandel;
            self.store.insert_offer(offer);
            if let Some(kandel) = kandel {
                self.adjust_published(&kandel, &e.book, U256::ZERO, e.gives);
            }
        }
        Ok(())
    }

    pub(crate) fn on_offer_success(&mut self, env: &EventEnvelope, e: &OfferSuccessEvent) -> Result<()> {
        let key = OfferKey::new(e.book, e.offer_id);
        if self.store.offer(&key).is_none() {
            return Err(ProjectionError::UnknownOffer { key, event: "OfferSuccess" });
        }
        // Success events carry no order id: the target is whichever
        // Order is open at the top of the Order scope right now. The
        // scope claiming an open order whose record is gone is as
        // corrupt as the empty-scope case.
        let open_order = self.stacks.peek(Scope::Order);
        if let Some(order_ref) = open_order {
            if self.store.order(&order_ref).is_none() {
                return Err(ProjectionError::MissingRecord {
                    entity: "Order",
                    id: order_ref.to_string(),
                });
            }
        }

        self.ensure_account(e.taker, env.timestamp);

        let offer = self.store.offer_mut(&key).expect("validated above");
        let outcome = offer.fill(e.taker_wants, e.taker_gives);
        offer.stamp(env.tx_hash, env.log_index, env.timestamp);
        let kandel = offer.kandel;
        let limit_order = offer.limit_order;

        if let Some(kandel) = kandel {
            self.adjust_published(&kandel, &e.book, outcome.pre_gives, U256::ZERO);
        }
        if outcome.full {
            if let Some(limit_order) = limit_order {
                self.set_limit_order_open(&limit_order, false);
            }
        }
        if let Some(order_ref) = open_order {
            let order = self.store.order_mut(&order_ref).expect("validated above");
            order.accumulate(e.taker_wants, e.taker_gives);
        }
        Ok(())
    }

    pub(crate) fn on_offer_fail(&mut self, env: &EventEnvelope, e: &OfferFailEvent) -> Result<()> {
        let key = OfferKey::new(e.book, e.offer_id);
        if self.store.offer(&key).is_none() {
            return Err(ProjectionError::UnknownOffer { key, event: "OfferFail" });
        }

        self.ensure_account(e.taker, env.timestamp);

        let offer = self.store.offer_mut(&key).expect("validated above");
        let pre_gives = offer.gives;
        offer.fail(e.reason.clone());
        offer.stamp(env.tx_hash, env.log_index, env.timestamp);
        let kandel = offer.kandel;
        let limit_order = offer.limit_order;

        if let Some(kandel) = kandel {
            self.adjust_published(&kandel, &e.book, pre_gives, U256::ZERO);
        }
        if let Some(limit_order) = limit_order {
            self.set_limit_order_open(&limit_order, false);
        }
        Ok(())
    }

    pub(crate) fn on_offer_retract(&mut self, env: &EventEnvelope, e: &OfferRetractEvent) -> Result<()> {
        let key = OfferKey::new(e.book, e.offer_id);
        if self.store.offer(&key).is_none() {
            return Err(ProjectionError::UnknownOffer { key, event: "OfferRetract" });
        }

        let offer = self.store.offer_mut(&key).expect("validated above");
        let pre_gives = offer.gives;
        offer.retract(e.deprovision);
        offer.stamp(env.tx_hash, env.log_index, env.timestamp);
        let kandel = offer.kandel;
        let limit_order = offer.limit_order;

        if let Some(kandel) = kandel {
            self.adjust_published(&kandel, &e.book, pre_gives, U256::ZERO);
        }
        if let Some(limit_order) = limit_order {
            self.set_limit_order_open(&limit_order, false);
        }
        Ok(())
    }

    /// Replace a Kandel's published inventory for one offer: remove
    /// the old promise, add the new one. No-op when the book belongs
    /// to neither side of the deployment.
    fn adjust_published(&mut self, kandel: &Address, book: &OrderBookKey, pre: U256, new: U256) {
        if let Some(k) = self.store.kandel_mut(kandel) {
            if let Some(side) = k.side_of(book) {
                k.sub_published(side, pre);
                k.add_published(side, new);
            }
        }
    }

    /// Propagate an offer transition to the owning limit order.
    /// Benign absence: a missing record means nothing to update.
    fn set_limit_order_open(&mut self, id: &EventRef, open: bool) {
        if let Some(limit_order) = self.store.limit_order_mut(id) {
            limit_order.is_open = open;
        }
    }
}
