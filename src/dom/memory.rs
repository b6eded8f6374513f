//! In-memory document tree for embedding hosts and tests

use super::{DocumentView, MutationRecord, NodeId, Rect};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    rect: Option<Rect>,
    attached: bool,
}

/// A small element tree with text, layout rects, hit testing and mutation
/// records, standing in for a rendered page.
///
/// Mutation records accumulate until the host drains them with
/// [`MemoryDocument::take_mutations`] and feeds them to the engine, mirroring
/// how observer callbacks deliver batches.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: HashMap<NodeId, Node>,
    next_id: NodeId,
    root: NodeId,
    pending: Vec<MutationRecord>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            0,
            Node {
                parent: None,
                children: Vec::new(),
                text: String::new(),
                rect: None,
                attached: true,
            },
        );
        Self {
            nodes,
            next_id: 1,
            root: 0,
            pending: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates an attached child element. Does not emit a mutation record;
    /// call [`MemoryDocument::record_insertion`] when the host wants the
    /// insertion observed.
    pub fn create_element(&mut self, parent: NodeId, text: &str, rect: Option<Rect>) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        let attached = self.nodes.get(&parent).map(|n| n.attached).unwrap_or(false);
        self.nodes.insert(
            id,
            Node {
                parent: Some(parent),
                children: Vec::new(),
                text: text.to_string(),
                rect,
                attached,
            },
        );
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Emits the child-list record for a previously created element.
    pub fn record_insertion(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.pending
                .push(MutationRecord::child_list(parent, vec![node], Vec::new()));
        }
    }

    /// Detaches a subtree and emits the matching child-list record.
    ///
    /// Parent links inside the removed subtree stay intact so consumers can
    /// still relate detached nodes to the removal.
    pub fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|&c| c != node);
        }
        self.mark_detached(node);
        self.pending
            .push(MutationRecord::child_list(parent, Vec::new(), vec![node]));
    }

    fn mark_detached(&mut self, node: NodeId) {
        let children = match self.nodes.get_mut(&node) {
            Some(n) => {
                n.attached = false;
                n.children.clone()
            }
            None => return,
        };
        for child in children {
            self.mark_detached(child);
        }
    }

    /// Drains mutation records accumulated since the last call.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.rect = Some(rect);
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        if let Some(n) = self.nodes.get(&node) {
            out.push_str(&n.text);
            for &child in &n.children {
                self.collect_text(child, out);
            }
        }
    }

    fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            depth += 1;
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        depth
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentView for MemoryDocument {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|n| n.attached).unwrap_or(false)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.parent
    }

    fn text(&self, node: NodeId) -> Option<String> {
        if !self.nodes.contains_key(&node) {
            return None;
        }
        let mut out = String::new();
        self.collect_text(node, &mut out);
        Some(out)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let children = match self.nodes.get(&node) {
            Some(n) if n.text == text && n.children.is_empty() => return,
            Some(n) => n.children.clone(),
            None => return,
        };
        // textContent semantics: replace the subtree with one run of text.
        for child in children {
            self.mark_detached(child);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.children.clear();
            n.text = text.to_string();
        }
        self.pending.push(MutationRecord::character_data(node));
    }

    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        let n = self.nodes.get(&node)?;
        if !n.attached {
            return None;
        }
        n.rect
    }

    fn node_at(&self, x: f64, y: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.attached)
            .filter(|(_, n)| n.rect.map(|r| r.contains_point(x, y)).unwrap_or(false))
            .map(|(&id, _)| id)
            .max_by_key(|&id| self.depth(id))
    }
}
