//! Token metadata resolution seam
//!
//! The core never performs network I/O: token name/symbol/decimals
//! come from a host-provided resolver. Results are cached as Token
//! records in the store, so each address is resolved at most once.

use alloy_primitives::Address;
use std::collections::HashMap;

/// Metadata for one token address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Host-provided token metadata lookup.
pub trait TokenResolver {
    fn resolve(&self, token: Address) -> TokenMetadata;
}

/// Fixture resolver backed by a static table. Unknown addresses get
/// placeholder metadata rather than failing: a missing name must not
/// stall event processing.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    entries: HashMap<Address, TokenMetadata>,
}

impl StaticTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(
        mut self,
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
    ) -> Self {
        self.entries.insert(
            address,
            TokenMetadata {
                name: name.into(),
                symbol: symbol.into(),
                decimals,
            },
        );
        self
    }
}

impl TokenResolver for StaticTokenResolver {
    fn resolve(&self, token: Address) -> TokenMetadata {
        self.entries.get(&token).cloned().unwrap_or(TokenMetadata {
            name: "Unknown Token".to_string(),
            symbol: "UNKNOWN".to_string(),
            decimals: 18,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_resolver_returns_registered_metadata() {
        let addr = Address::repeat_byte(0x01);
        let resolver = StaticTokenResolver::new().with_token(addr, "Wrapped Ether", "WETH", 18);

        let meta = resolver.resolve(addr);
        assert_eq!(meta.symbol, "WETH");
        assert_eq!(meta.decimals, 18);
    }

    #[test]
    fn test_static_resolver_falls_back_to_placeholder() {
        let resolver = StaticTokenResolver::new();
        let meta = resolver.resolve(Address::repeat_byte(0x99));
        assert_eq!(meta.symbol, "UNKNOWN");
    }
}
