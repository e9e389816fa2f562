//! Event Projection Service
//!
//! Incremental projection of a strictly ordered, append-only stream
//! of decoded on-chain events into derived, queryable records:
//! markets, offers, orders, limit/clean-order wrappers, Kandel
//! market-maker deployments, accounts and tokens.
//!
//! The source events are the flattened trace of a call tree with no
//! explicit parent/child ids. Nesting is recovered with one LIFO
//! stack per correlation scope; lifecycle state machines then apply
//! each event to the records it targets.
//!
//! **Key invariants:**
//! - Strictly sequential: one event fully applied before the next
//! - Offer status is mutually exclusive at all times
//! - Fill totals are monotonic, never reset
//! - A fatal error applies nothing: validation precedes mutation

pub mod engine;
pub mod errors;
pub mod events;
mod handlers;
pub mod resolver;
pub mod stack;
pub mod store;

pub use engine::ProjectionEngine;
pub use errors::{ProjectionError, Result};
