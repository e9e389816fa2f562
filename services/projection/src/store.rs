//! In-memory keyed store
//!
//! One typed table per derived entity, mutated in place by exactly
//! one logical writer (the engine). Reads within a handler observe
//! writes made earlier in the same handler. Durable persistence is a
//! host concern; this store is what the core consumes and what tests
//! inspect.

use alloy_primitives::Address;
use std::collections::HashMap;
use types::account::{Account, Token};
use types::ids::{EventRef, OfferKey, OrderBookKey};
use types::kandel::{Kandel, KandelDepositWithdraw, KandelPopulateRetract};
use types::market::Market;
use types::offer::Offer;
use types::order::{CleanOrder, LimitOrder, Order};

/// Keyed store over all projected record types.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    markets: HashMap<OrderBookKey, Market>,
    offers: HashMap<OfferKey, Offer>,
    orders: HashMap<EventRef, Order>,
    limit_orders: HashMap<EventRef, LimitOrder>,
    clean_orders: HashMap<EventRef, CleanOrder>,
    kandels: HashMap<Address, Kandel>,
    batches: HashMap<EventRef, KandelPopulateRetract>,
    deposits: HashMap<EventRef, KandelDepositWithdraw>,
    accounts: HashMap<Address, Account>,
    tokens: HashMap<Address, Token>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Markets ─────────────────────────────────────────────────────

    pub fn market(&self, key: &OrderBookKey) -> Option<&Market> {
        self.markets.get(key)
    }

    pub fn market_mut(&mut self, key: &OrderBookKey) -> Option<&mut Market> {
        self.markets.get_mut(key)
    }

    pub fn insert_market(&mut self, market: Market) {
        self.markets.insert(market.key, market);
    }

    // ── Offers ──────────────────────────────────────────────────────

    pub fn offer(&self, key: &OfferKey) -> Option<&Offer> {
        self.offers.get(key)
    }

    pub fn offer_mut(&mut self, key: &OfferKey) -> Option<&mut Offer> {
        self.offers.get_mut(key)
    }

    pub fn insert_offer(&mut self, offer: Offer) {
        self.offers.insert(offer.key, offer);
    }

    // ── Orders and wrappers ─────────────────────────────────────────

    pub fn order(&self, id: &EventRef) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn order_mut(&mut self, id: &EventRef) -> Option<&mut Order> {
        self.orders.get_mut(id)
    }

    pub fn insert_order(&mut self, order: Order) {
        self.orders.insert(order.id, order);
    }

    pub fn limit_order(&self, id: &EventRef) -> Option<&LimitOrder> {
        self.limit_orders.get(id)
    }

    pub fn limit_order_mut(&mut self, id: &EventRef) -> Option<&mut LimitOrder> {
        self.limit_orders.get_mut(id)
    }

    pub fn insert_limit_order(&mut self, limit_order: LimitOrder) {
        self.limit_orders.insert(limit_order.id, limit_order);
    }

    pub fn clean_order(&self, id: &EventRef) -> Option<&CleanOrder> {
        self.clean_orders.get(id)
    }

    pub fn insert_clean_order(&mut self, clean_order: CleanOrder) {
        self.clean_orders.insert(clean_order.id, clean_order);
    }

    // ── Kandel deployments ──────────────────────────────────────────

    pub fn kandel(&self, address: &Address) -> Option<&Kandel> {
        self.kandels.get(address)
    }

    pub fn kandel_mut(&mut self, address: &Address) -> Option<&mut Kandel> {
        self.kandels.get_mut(address)
    }

    pub fn insert_kandel(&mut self, kandel: Kandel) {
        self.kandels.insert(kandel.address, kandel);
    }

    pub fn is_kandel(&self, address: &Address) -> bool {
        self.kandels.contains_key(address)
    }

    pub fn batch(&self, id: &EventRef) -> Option<&KandelPopulateRetract> {
        self.batches.get(id)
    }

    pub fn batch_mut(&mut self, id: &EventRef) -> Option<&mut KandelPopulateRetract> {
        self.batches.get_mut(id)
    }

    pub fn insert_batch(&mut self, batch: KandelPopulateRetract) {
        self.batches.insert(batch.id, batch);
    }

    pub fn deposit(&self, id: &EventRef) -> Option<&KandelDepositWithdraw> {
        self.deposits.get(id)
    }

    pub fn insert_deposit(&mut self, deposit: KandelDepositWithdraw) {
        self.deposits.insert(deposit.id, deposit);
    }

    // ── Accounts and tokens ─────────────────────────────────────────

    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn account_mut(&mut self, address: &Address) -> Option<&mut Account> {
        self.accounts.get_mut(address)
    }

    pub fn insert_account(&mut self, account: Account) {
        self.accounts.insert(account.address, account);
    }

    pub fn token(&self, address: &Address) -> Option<&Token> {
        self.tokens.get(address)
    }

    pub fn insert_token(&mut self, token: Token) {
        self.tokens.insert(token.address, token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, U256};

    #[test]
    fn test_read_your_writes_within_one_handler() {
        let mut store = MemoryStore::new();
        let key = OrderBookKey::new(B256::repeat_byte(0x01));
        store.insert_market(Market::new(key, 100));

        // a later read in the same logical step sees the write
        let m = store.market_mut(&key).unwrap();
        m.set_gas_base(U256::from(42u64), 200);
        assert_eq!(store.market(&key).unwrap().gas_base, U256::from(42u64));
    }

    #[test]
    fn test_insert_overwrites_same_key() {
        let mut store = MemoryStore::new();
        let key = OrderBookKey::new(B256::repeat_byte(0x01));
        store.insert_market(Market::new(key, 100));
        store.insert_market(Market::new(key, 999));
        assert_eq!(store.market(&key).unwrap().creation_date, 999);
    }
}
