//! Market registry handlers
//!
//! Markets are upserted lazily on the first activation-state or
//! gas-base change for an unseen key. Reactivation never resets
//! accumulated offer data and markets are never deleted.

use crate::engine::ProjectionEngine;
use crate::errors::Result;
use crate::events::{EventEnvelope, SetActiveEvent, SetGasbaseEvent};
use types::market::Market;

impl ProjectionEngine {
    pub(crate) fn on_set_active(&mut self, env: &EventEnvelope, e: &SetActiveEvent) -> Result<()> {
        self.ensure_token(e.outbound_token);
        self.ensure_token(e.inbound_token);

        if self.store.market(&e.book).is_none() {
            self.store.insert_market(Market::new(e.book, env.timestamp));
        }
        let market = self.store.market_mut(&e.book).expect("market upserted above");
        market.set_active(
            e.active,
            e.outbound_token,
            e.inbound_token,
            e.tick_spacing,
            env.timestamp,
        );
        Ok(())
    }

    pub(crate) fn on_set_gasbase(&mut self, env: &EventEnvelope, e: &SetGasbaseEvent) -> Result<()> {
        if self.store.market(&e.book).is_none() {
            self.store.insert_market(Market::new(e.book, env.timestamp));
        }
        let market = self.store.market_mut(&e.book).expect("market upserted above");
        market.set_gas_base(e.gas_base, env.timestamp);
        Ok(())
    }
}
