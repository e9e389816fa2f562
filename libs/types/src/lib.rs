//! Types library for the order-book projection engine
//!
//! This library provides the frozen record definitions shared across
//! services: chain-derived identifiers and the derived entities the
//! projection maintains (markets, offers, orders, wrappers, Kandel
//! deployments, accounts, tokens).
//!
//! # Modules
//! - `ids`: chain-derived identifiers (OrderBookKey, OfferKey, EventRef)
//! - `market`: market registry records
//! - `offer`: offer lifecycle state machine
//! - `order`: taker-side order records (Order, LimitOrder, CleanOrder)
//! - `kandel`: market-maker deployment bookkeeping records
//! - `account`: account and token records

pub mod account;
pub mod ids;
pub mod kandel;
pub mod market;
pub mod offer;
pub mod order;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::account::*;
    pub use crate::ids::*;
    pub use crate::kandel::*;
    pub use crate::market::*;
    pub use crate::offer::*;
    pub use crate::order::*;
}
