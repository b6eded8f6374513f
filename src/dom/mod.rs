//! Document capability interface the engine runs against
//!
//! The host owns the real document (a browser DOM, a headless page model, a
//! test fixture); the engine only needs this narrow view of it. An in-memory
//! implementation lives in [`memory`].

pub mod memory;

pub use memory::MemoryDocument;

/// Opaque element identity within a document.
pub type NodeId = u64;

/// Screen-space bounding box of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// What kind of change a mutation record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Children added to or removed from the target.
    ChildList,
    /// The target's text content changed.
    CharacterData,
}

/// One reported document change, batched by the host.
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub target: NodeId,
    pub kind: MutationKind,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

impl MutationRecord {
    pub fn character_data(target: NodeId) -> Self {
        Self {
            target,
            kind: MutationKind::CharacterData,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            target,
            kind: MutationKind::ChildList,
            added,
            removed,
        }
    }
}

/// Narrow view of a document tree.
///
/// `text` aggregates the subtree text the way `textContent` does; `set_text`
/// replaces the subtree with a single run of text.
pub trait DocumentView {
    /// Whether the node is currently attached to the document.
    fn contains(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn bounding_box(&self, node: NodeId) -> Option<Rect>;

    /// Hit test: the innermost attached element at a screen position.
    fn node_at(&self, x: f64, y: f64) -> Option<NodeId>;
}

/// Whether `ancestor` is `node` itself or one of its ancestors.
///
/// Works on detached subtrees too: parent links inside a removed subtree are
/// kept so lazily-pruned registry entries can still be matched to the removal
/// that detached them.
pub fn is_ancestor_or_self(doc: &dyn DocumentView, ancestor: NodeId, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        current = doc.parent(id);
    }
    false
}
