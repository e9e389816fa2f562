//! Error taxonomy for the projection engine
//!
//! Only feed corruption is fatal: a correlated event whose mandatory
//! counterpart is missing means the stream is corrupted or out of
//! order, and silently skipping it would desynchronize every
//! downstream aggregate permanently. Benign absences are handled at
//! the call site and never surface here; data-quality anomalies are
//! logged and skipped.

use crate::stack::Scope;
use alloy_primitives::B256;
use thiserror::Error;
use types::ids::OfferKey;

/// Fatal projection failures. The event that triggered one is not
/// applied at all — handlers validate before mutating.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("correlation scope {scope} is empty at {tx_hash}:{log_index} — corrupted or out-of-order feed")]
    EmptyScope {
        scope: Scope,
        tx_hash: B256,
        log_index: u64,
    },

    #[error("{event} references offer {key} that was never written")]
    UnknownOffer { key: OfferKey, event: &'static str },

    #[error("{entity} record {id} is missing mid-lifecycle")]
    MissingRecord { entity: &'static str, id: String },
}

pub type Result<T> = std::result::Result<T, ProjectionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use types::ids::OrderBookKey;

    #[test]
    fn test_empty_scope_display_names_scope_and_position() {
        let err = ProjectionError::EmptyScope {
            scope: Scope::LimitOrder,
            tx_hash: B256::repeat_byte(0x01),
            log_index: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("LimitOrder"));
        assert!(msg.contains(":9"));
    }

    #[test]
    fn test_unknown_offer_display() {
        let err = ProjectionError::UnknownOffer {
            key: OfferKey::new(OrderBookKey::new(B256::repeat_byte(0x02)), U256::from(3u64)),
            event: "OfferFail",
        };
        assert!(err.to_string().contains("OfferFail"));
        assert!(err.to_string().contains("never written"));
    }
}
