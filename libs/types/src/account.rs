//! Account and token records
//!
//! Every address seen as a taker, maker, owner or admin is upserted
//! as an Account. Token records are filled from the host's metadata
//! resolver the first time an address appears as a traded token.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// An externally owned account or contract that interacted with the
/// exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub creation_date: u64,
    pub latest_interaction_date: u64,
}

impl Account {
    pub fn new(address: Address, timestamp: u64) -> Self {
        Self {
            address,
            creation_date: timestamp,
            latest_interaction_date: timestamp,
        }
    }

    pub fn touch(&mut self, timestamp: u64) {
        self.latest_interaction_date = timestamp;
    }
}

/// Cached token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: Address, name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}
