//! Projection engine core
//!
//! Single-threaded dispatcher: one event is fully applied, including
//! every store read and write it triggers, before the next one is
//! presented. Handlers validate existence before mutating, so a
//! fatal error leaves no partial state behind for that event.

use alloy_primitives::Address;
use tracing::debug;

use crate::errors::{ProjectionError, Result};
use crate::events::{ChainEvent, EventEnvelope, EventKind};
use crate::resolver::{StaticTokenResolver, TokenResolver};
use crate::stack::{CorrelationStacks, Scope};
use crate::store::MemoryStore;
use types::account::{Account, Token};
use types::ids::EventRef;

/// Main projection engine.
pub struct ProjectionEngine {
    pub(crate) store: MemoryStore,
    pub(crate) stacks: CorrelationStacks,
    resolver: Box<dyn TokenResolver>,
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(Box::new(StaticTokenResolver::new()))
    }
}

impl ProjectionEngine {
    pub fn new(resolver: Box<dyn TokenResolver>) -> Self {
        Self {
            store: MemoryStore::new(),
            stacks: CorrelationStacks::new(),
            resolver,
        }
    }

    /// Apply one decoded event.
    ///
    /// This is the only entry point. Events must arrive in the exact
    /// emission order of the chain; the engine never reorders or
    /// buffers. A returned error means the event was rejected without
    /// touching any record and the feed is corrupted from the host's
    /// point of view.
    pub fn apply(&mut self, event: &ChainEvent) -> Result<()> {
        let env = &event.envelope;
        debug!(
            kind = event.kind.label(),
            tx = %env.tx_hash,
            log_index = env.log_index,
            "applying event"
        );

        match &event.kind {
            EventKind::SetActive(e) => self.on_set_active(env, e),
            EventKind::SetGasbase(e) => self.on_set_gasbase(env, e),
            EventKind::OfferWrite(e) => self.on_offer_write(env, e),
            EventKind::OfferSuccess(e) => self.on_offer_success(env, e),
            EventKind::OfferFail(e) => self.on_offer_fail(env, e),
            EventKind::OfferRetract(e) => self.on_offer_retract(env, e),
            EventKind::OrderStart(e) => self.on_order_start(env, e),
            EventKind::OrderComplete(e) => self.on_order_complete(env, e),
            EventKind::CleanStart(e) => self.on_clean_start(env, e),
            EventKind::CleanComplete => self.on_clean_complete(env),
            EventKind::LimitOrderStart(e) => self.on_limit_order_start(env, e),
            EventKind::LimitOrderComplete => self.on_limit_order_complete(env),
            EventKind::NewOwnedOffer(e) => self.on_new_owned_offer(env, e),
            EventKind::NewKandel(e) => self.on_new_kandel(env, e),
            EventKind::KandelCredit(e) => self.on_kandel_funding(env, e, true),
            EventKind::KandelDebit(e) => self.on_kandel_funding(env, e, false),
            EventKind::SetIndexMapping(e) => self.on_set_index_mapping(env, e),
            EventKind::PopulateStart => self.on_batch_start(env, false),
            EventKind::PopulateEnd => self.on_batch_end(env, false),
            EventKind::RetractStart => self.on_batch_start(env, true),
            EventKind::RetractEnd => self.on_batch_end(env, true),
        }
    }

    /// Projected records, for host queries and tests.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Mutable store access for hosts that seed or repair state.
    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    /// Correlation state, for host diagnostics and tests.
    pub fn stacks(&self) -> &CorrelationStacks {
        &self.stacks
    }

    // ── Shared handler helpers ──────────────────────────────────────

    /// Peek a scope whose emptiness means feed corruption.
    pub(crate) fn must_peek(&self, scope: Scope, env: &EventEnvelope) -> Result<EventRef> {
        self.stacks
            .peek(scope)
            .ok_or(ProjectionError::EmptyScope {
                scope,
                tx_hash: env.tx_hash,
                log_index: env.log_index,
            })
    }

    /// Pop a scope whose emptiness means feed corruption.
    pub(crate) fn must_pop(&mut self, scope: Scope, env: &EventEnvelope) -> Result<EventRef> {
        self.stacks.pop(scope).ok_or(ProjectionError::EmptyScope {
            scope,
            tx_hash: env.tx_hash,
            log_index: env.log_index,
        })
    }

    /// Upsert an account and bump its latest-interaction date.
    pub(crate) fn ensure_account(&mut self, address: Address, timestamp: u64) {
        match self.store.account_mut(&address) {
            Some(account) => account.touch(timestamp),
            None => self.store.insert_account(Account::new(address, timestamp)),
        }
    }

    /// Resolve and cache token metadata on first sight.
    pub(crate) fn ensure_token(&mut self, address: Address) {
        if self.store.token(&address).is_none() {
            let meta = self.resolver.resolve(address);
            self.store
                .insert_token(Token::new(address, meta.name, meta.symbol, meta.decimals));
        }
    }
}
