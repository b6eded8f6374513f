//! Conversion registry: which elements were converted and from what

use crate::dom::NodeId;
use std::collections::HashMap;

/// Snapshot of an element at the moment it was first converted.
///
/// Immutable once created; only the element's displayed text is rewritten
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionEntry {
    /// Numeric value detected in the original text.
    pub price: f64,
    /// Original displayed text, trimmed.
    pub text: String,
    /// Source currency active when the element was registered.
    pub currency: String,
}

/// The active source/target currency selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

/// Which half of the pair a picker or message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    From,
    To,
}

/// Map from node identity to its conversion entry.
///
/// Invariant: every key is attached to the document. Entries for detached
/// nodes are pruned lazily on the next full-update pass.
#[derive(Debug, Default)]
pub struct ConversionRegistry {
    entries: HashMap<NodeId, ConversionEntry>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<&ConversionEntry> {
        self.entries.get(&node)
    }

    /// Registers an entry for a node, keeping an existing entry if present.
    pub fn register(&mut self, node: NodeId, entry: ConversionEntry) {
        self.entries.entry(node).or_insert(entry);
    }

    pub fn remove(&mut self, node: NodeId) -> Option<ConversionEntry> {
        self.entries.remove(&node)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.entries.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_first_entry() {
        let mut registry = ConversionRegistry::new();
        let first = ConversionEntry {
            price: 10.0,
            text: "$10.00".into(),
            currency: "USD".into(),
        };
        registry.register(1, first.clone());
        registry.register(
            1,
            ConversionEntry {
                price: 99.0,
                text: "$99.00".into(),
                currency: "USD".into(),
            },
        );
        assert_eq!(registry.get(1), Some(&first));
    }

    #[test]
    fn test_swap_round_trips() {
        let mut pair = CurrencyPair::new("USD", "EUR");
        pair.swap();
        assert_eq!(pair, CurrencyPair::new("EUR", "USD"));
        pair.swap();
        assert_eq!(pair, CurrencyPair::new("USD", "EUR"));
    }
}
