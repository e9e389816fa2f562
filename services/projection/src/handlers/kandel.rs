//! Kandel deployment handlers
//!
//! Deposits, debits, index-mapping updates and the batch populate/
//! retract reconciliation. A batch End event carries no offer list:
//! which offers the batch touched is recovered purely from log-index
//! ordering, by filtering the deployment's current slots to offers
//! last stamped inside the [Start, End] log-index window.

use tracing::warn;

use crate::engine::ProjectionEngine;
use crate::errors::{ProjectionError, Result};
use crate::events::{EventEnvelope, KandelFundingEvent, NewKandelEvent, SetIndexMappingEvent};
use crate::stack::Scope;
use types::ids::OfferKey;
use types::kandel::{
    Kandel, KandelDepositWithdraw, KandelOfferView, KandelPopulateRetract, OfferIndexEntry,
};

impl ProjectionEngine {
    pub(crate) fn on_new_kandel(&mut self, env: &EventEnvelope, e: &NewKandelEvent) -> Result<()> {
        self.ensure_account(e.admin, env.timestamp);
        self.ensure_token(e.base);
        self.ensure_token(e.quote);

        // the emitting contract is the seeder
        let kandel = Kandel::new(
            e.kandel,
            env.address,
            e.admin,
            e.base,
            e.quote,
            e.base_quote_book,
            e.quote_base_book,
            env.timestamp,
        );
        self.store.insert_kandel(kandel);
        Ok(())
    }

    /// Credit or debit, emitted by the deployment itself.
    pub(crate) fn on_kandel_funding(
        &mut self,
        env: &EventEnvelope,
        e: &KandelFundingEvent,
        is_deposit: bool,
    ) -> Result<()> {
        let kandel = self.store.kandel_mut(&env.address).ok_or_else(|| {
            ProjectionError::MissingRecord {
                entity: "Kandel",
                id: env.address.to_string(),
            }
        })?;

        if !kandel.apply_funding(e.token, e.amount, is_deposit, env.timestamp) {
            warn!(
                kandel = %env.address,
                token = %e.token,
                "funding event token matches neither base nor quote"
            );
            return Ok(());
        }

        self.store.insert_deposit(KandelDepositWithdraw {
            id: env.record_ref(),
            kandel: env.address,
            token: e.token,
            amount: e.amount,
            is_deposit,
            date: env.timestamp,
        });
        Ok(())
    }

    pub(crate) fn on_set_index_mapping(
        &mut self,
        env: &EventEnvelope,
        e: &SetIndexMappingEvent,
    ) -> Result<()> {
        let kandel = self.store.kandel_mut(&env.address).ok_or_else(|| {
            ProjectionError::MissingRecord {
                entity: "Kandel",
                id: env.address.to_string(),
            }
        })?;

        kandel.record_index(
            OfferIndexEntry {
                index: e.index,
                offer_id: e.offer_id,
                side: e.side,
            },
            env.timestamp,
        );
        Ok(())
    }

    pub(crate) fn on_batch_start(&mut self, env: &EventEnvelope, is_retract: bool) -> Result<()> {
        if self.store.kandel(&env.address).is_none() {
            return Err(ProjectionError::MissingRecord {
                entity: "Kandel",
                id: env.address.to_string(),
            });
        }

        let batch = KandelPopulateRetract::new(env.record_ref(), env.address, is_retract, env.timestamp);
        self.stacks.push(Scope::PopulateRetract, batch.id);
        self.store.insert_batch(batch);
        Ok(())
    }

    pub(crate) fn on_batch_end(&mut self, env: &EventEnvelope, is_retract: bool) -> Result<()> {
        let id = self.must_peek(Scope::PopulateRetract, env)?;
        let (kandel_address, start_log_index, batch_is_retract) = match self.store.batch(&id) {
            Some(batch) => (batch.kandel, batch.start_log_index, batch.is_retract),
            None => {
                return Err(ProjectionError::MissingRecord {
                    entity: "KandelPopulateRetract",
                    id: id.to_string(),
                })
            }
        };
        let kandel = self.store.kandel(&kandel_address).ok_or_else(|| {
            ProjectionError::MissingRecord {
                entity: "Kandel",
                id: kandel_address.to_string(),
            }
        })?;
        if batch_is_retract != is_retract {
            warn!(batch = %id, "batch start/end kinds disagree");
        }

        // Reconcile: replay the index history to the current offer at
        // each slot, then keep the offers last touched inside this
        // batch's window. Bounds are inclusive on both ends.
        let window = start_log_index..=env.log_index;
        let mut offers = Vec::new();
        for ((index, side), offer_id) in kandel.current_offers() {
            let key = OfferKey::new(kandel.book_for(side), offer_id);
            if let Some(offer) = self.store.offer(&key) {
                if window.contains(&offer.latest_log_index) {
                    offers.push(KandelOfferView {
                        index,
                        side,
                        offer_id,
                        gives: offer.gives,
                        total_got: offer.total_got,
                        total_gave: offer.total_gave,
                    });
                }
            }
        }

        self.stacks.pop(Scope::PopulateRetract);
        let batch = self.store.batch_mut(&id).expect("validated above");
        batch.end_log_index = Some(env.log_index);
        batch.offers = offers;
        Ok(())
    }
}
