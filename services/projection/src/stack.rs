//! Event correlation stacks
//!
//! The event source never emits an explicit correlation id: only
//! call-tree order guarantees that "the most recently opened, not yet
//! closed record of this scope" is the correct target for a nested
//! event. One independent LIFO per scope recovers that nesting from
//! the flat stream; LIFO order exactly matches call-tree unwinding.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use types::ids::EventRef;

/// Closed set of correlation scopes. Each scope's stack is fully
/// independent: an entry in the Order scope and one in the LimitOrder
/// scope may be concurrently open without interacting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Order,
    LimitOrder,
    CleanOrder,
    AmplifiedBundle,
    PopulateRetract,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::Order => "Order",
            Scope::LimitOrder => "LimitOrder",
            Scope::CleanOrder => "CleanOrder",
            Scope::AmplifiedBundle => "AmplifiedBundle",
            Scope::PopulateRetract => "PopulateRetract",
        };
        write!(f, "{name}")
    }
}

/// One ordered id list per scope.
///
/// Explicit, injectable state — not a process-wide singleton — so
/// tests can run scopes in isolation and in parallel. Empty-scope
/// handling is the caller's decision: `peek`/`pop` return `None` and
/// the call site decides whether that is benign absence or feed
/// corruption.
#[derive(Debug, Clone, Default)]
pub struct CorrelationStacks {
    scopes: HashMap<Scope, Vec<EventRef>>,
}

impl CorrelationStacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an id to the scope's stack.
    pub fn push(&mut self, scope: Scope, id: EventRef) {
        self.scopes.entry(scope).or_default().push(id);
    }

    /// The last-appended id, without removing it. Repeated peeks
    /// return the same id until a pop.
    pub fn peek(&self, scope: Scope) -> Option<EventRef> {
        self.scopes.get(&scope).and_then(|ids| ids.last().copied())
    }

    /// Remove and return the last-appended id.
    pub fn pop(&mut self, scope: Scope) -> Option<EventRef> {
        self.scopes.get_mut(&scope).and_then(|ids| ids.pop())
    }

    /// Number of open records in the scope.
    pub fn depth(&self, scope: Scope) -> usize {
        self.scopes.get(&scope).map_or(0, |ids| ids.len())
    }

    pub fn is_empty(&self, scope: Scope) -> bool {
        self.depth(scope) == 0
    }
}
