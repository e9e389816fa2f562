//! Per-event-kind handlers
//!
//! Each module extends [`crate::engine::ProjectionEngine`] with the
//! handlers for one component: market registry, offer lifecycle,
//! order aggregation, Kandel bookkeeping.

mod kandel;
mod market;
mod offer;
mod order;
