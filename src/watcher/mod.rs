//! Mutation filtering: which page changes warrant a reconversion pass

use crate::dom::{is_ancestor_or_self, DocumentView, MutationRecord, NodeId};

/// Decides whether observed document changes touch any registered element.
///
/// The host delivers observer batches to the engine; this only filters them.
/// Installing a new watcher disconnects the previous one first so a
/// re-initialized engine never double-handles a batch.
#[derive(Debug, Default)]
pub struct MutationWatcher {
    connected: bool,
}

impl MutationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self) {
        if self.connected {
            self.disconnect();
        }
        self.connected = true;
    }

    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// A batch is relevant iff some record's target is an ancestor or
    /// descendant of a registered element, or the record removed a subtree
    /// holding one. Unrelated page activity is ignored.
    pub fn is_relevant(
        &self,
        doc: &dyn DocumentView,
        registered: &[NodeId],
        records: &[MutationRecord],
    ) -> bool {
        if !self.connected || registered.is_empty() {
            return false;
        }
        records.iter().any(|record| {
            registered.iter().any(|&node| {
                is_ancestor_or_self(doc, record.target, node)
                    || is_ancestor_or_self(doc, node, record.target)
                    || record
                        .removed
                        .iter()
                        .any(|&removed| is_ancestor_or_self(doc, removed, node))
            })
        })
    }
}
