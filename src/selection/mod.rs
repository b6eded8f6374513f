//! Interactive element picking: hover highlight, click to convert

use crate::detector;
use crate::dom::{DocumentView, NodeId, Rect};

/// Highlight box the host renders over the hovered candidate.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Overlay {
    visible: bool,
    rect: Option<Rect>,
}

impl Overlay {
    pub fn show(&mut self, rect: Rect) {
        self.visible = true;
        self.rect = Some(rect);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.rect = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Active,
}

/// Pointer-driven element picker.
///
/// While `Active`, pointer movement (debounced by the engine) highlights the
/// nearest priced ancestor-or-self of the hovered element; a click commits
/// that element and drops back to `Idle` after one successful pick.
#[derive(Debug)]
pub struct SelectionController {
    state: SelectionState,
    search_depth: usize,
    last_pointer: Option<(f64, f64)>,
    overlay: Overlay,
}

impl SelectionController {
    pub fn new(search_depth: usize) -> Self {
        Self {
            state: SelectionState::Idle,
            search_depth,
            last_pointer: None,
            overlay: Overlay::default(),
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SelectionState::Active
    }

    /// Whether the host should show the selection cursor (crosshair).
    pub fn wants_selection_cursor(&self) -> bool {
        self.is_active()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn activate(&mut self) {
        self.state = SelectionState::Active;
    }

    /// Leaves selection mode: overlay hidden, cursor restored.
    pub fn deactivate(&mut self) {
        self.state = SelectionState::Idle;
        self.last_pointer = None;
        self.overlay.hide();
    }

    /// Remembers the latest pointer position for the next probe.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.is_active() {
            self.last_pointer = Some((x, y));
        }
    }

    /// Debounced hover probe: highlights the nearest priced candidate under
    /// the last pointer position, or hides the overlay.
    pub fn probe(&mut self, doc: &dyn DocumentView) {
        if !self.is_active() {
            self.overlay.hide();
            return;
        }
        let candidate = self
            .last_pointer
            .and_then(|(x, y)| doc.node_at(x, y))
            .and_then(|node| find_priced_element(doc, node, self.search_depth));
        match candidate.and_then(|node| doc.bounding_box(node)) {
            Some(rect) => self.overlay.show(rect),
            None => self.overlay.hide(),
        }
    }

    /// Click while active: returns the committed element, if any, and exits
    /// selection mode on a successful pick. The caller prevents the default
    /// click action either way.
    pub fn click(&mut self, doc: &dyn DocumentView, x: f64, y: f64) -> Option<NodeId> {
        if !self.is_active() {
            return None;
        }
        let picked = doc
            .node_at(x, y)
            .and_then(|node| find_priced_element(doc, node, self.search_depth));
        if picked.is_some() {
            self.deactivate();
        }
        picked
    }
}

/// Searches `start` and its ancestors, up to `max_depth` levels including
/// `start`, for the nearest element whose text contains a detectable price.
///
/// The depth bound keeps very large ancestor containers, whose aggregate
/// text happens to contain digits, from matching.
pub fn find_priced_element(
    doc: &dyn DocumentView,
    start: NodeId,
    max_depth: usize,
) -> Option<NodeId> {
    let mut current = Some(start);
    for _ in 0..max_depth {
        let node = current?;
        if let Some(text) = doc.text(node) {
            if detector::contains_price(text.trim()) {
                return Some(node);
            }
        }
        current = doc.parent(node);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    fn doc_with_price() -> (MemoryDocument, NodeId, NodeId) {
        let mut doc = MemoryDocument::new();
        let card = doc.create_element(doc.root(), "", Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
        let price = doc.create_element(card, "$25.00", Some(Rect::new(10.0, 10.0, 60.0, 20.0)));
        (doc, card, price)
    }

    #[test]
    fn test_find_priced_prefers_innermost() {
        let (doc, _, price) = doc_with_price();
        assert_eq!(find_priced_element(&doc, price, 4), Some(price));
    }

    #[test]
    fn test_find_priced_walks_ancestors() {
        let mut doc = MemoryDocument::new();
        let wrapper = doc.create_element(doc.root(), "", None);
        let label = doc.create_element(wrapper, "Sale ", None);
        doc.create_element(wrapper, "$3.00", None);
        // label itself has no price; its parent aggregates one
        assert_eq!(find_priced_element(&doc, label, 4), Some(wrapper));
    }

    #[test]
    fn test_find_priced_depth_bound() {
        let mut doc = MemoryDocument::new();
        let mut node = doc.create_element(doc.root(), "", None);
        for _ in 0..5 {
            node = doc.create_element(node, "", None);
        }
        let leaf = doc.create_element(node, "plain label", None);
        // only the far-away root aggregates any digits
        doc.create_element(doc.root(), "$9.00", None);
        assert_eq!(find_priced_element(&doc, leaf, 4), None);
    }

    #[test]
    fn test_probe_highlights_and_hides() {
        let (doc, _, price) = doc_with_price();
        let mut sel = SelectionController::new(4);
        sel.activate();
        sel.pointer_moved(15.0, 15.0);
        sel.probe(&doc);
        assert!(sel.overlay.is_visible());
        assert_eq!(sel.overlay.rect(), doc.bounding_box(price));

        sel.pointer_moved(500.0, 500.0);
        sel.probe(&doc);
        assert!(!sel.overlay.is_visible());
    }

    #[test]
    fn test_probe_tracks_current_bounds() {
        let (mut doc, _, price) = doc_with_price();
        let mut sel = SelectionController::new(4);
        sel.activate();
        sel.pointer_moved(15.0, 15.0);
        sel.probe(&doc);
        let before = sel.overlay.rect();

        // element moved since the last probe; the overlay follows
        doc.set_rect(price, Rect::new(12.0, 14.0, 60.0, 20.0));
        sel.probe(&doc);
        assert_ne!(sel.overlay.rect(), before);
        assert_eq!(sel.overlay.rect(), doc.bounding_box(price));
    }

    #[test]
    fn test_click_commits_and_exits() {
        let (doc, _, price) = doc_with_price();
        let mut sel = SelectionController::new(4);
        sel.activate();
        assert_eq!(sel.click(&doc, 15.0, 15.0), Some(price));
        assert_eq!(sel.state(), SelectionState::Idle);
        assert!(!sel.overlay.is_visible());
    }

    #[test]
    fn test_click_miss_stays_active() {
        let (doc, _, _) = doc_with_price();
        let mut sel = SelectionController::new(4);
        sel.activate();
        assert_eq!(sel.click(&doc, 500.0, 500.0), None);
        assert_eq!(sel.state(), SelectionState::Active);
    }
}
