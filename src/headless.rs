//! In-memory element tree.
//!
//! Models just enough layout for the viewport: each node has a layout size,
//! a static offset inside its parent, and whatever inline `top`/`left`/
//! `transform: scale()` the viewport projected onto it. Scale uses a top-left
//! transform origin and compounds down the tree. Used by the unit tests and
//! by the replay CLI.

#[cfg(test)]
#[path = "headless_test.rs"]
mod headless_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::element::{Element, ElementRegistry, Rect, Size, StyleProjection};

/// Last value written for each projected property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadlessStyle {
    pub top: Option<f64>,
    pub left: Option<f64>,
    pub scale: Option<f64>,
    pub transition: Option<String>,
}

#[derive(Debug)]
struct Node {
    id: String,
    parent: Option<usize>,
    offset_x: f64,
    offset_y: f64,
    size: Size,
    style: HeadlessStyle,
    transitions: Vec<String>,
    writes: usize,
    attached: bool,
}

#[derive(Debug, Default)]
struct DocState {
    nodes: Vec<Node>,
    ids: BTreeMap<String, usize>,
}

impl DocState {
    fn push(&mut self, id: &str, parent: Option<usize>, layout: Rect) -> usize {
        let index = self.nodes.len();
        self.nodes.push(Node {
            id: id.to_owned(),
            parent,
            offset_x: layout.x,
            offset_y: layout.y,
            size: Size::new(layout.width, layout.height),
            style: HeadlessStyle::default(),
            transitions: Vec::new(),
            writes: 0,
            attached: true,
        });
        self.ids.insert(id.to_owned(), index);
        index
    }

    /// Rendered origin and compounded scale of a node.
    fn frame(&self, index: usize) -> (f64, f64, f64) {
        let node = &self.nodes[index];
        let (px, py, ps) = node.parent.map_or((0.0, 0.0, 1.0), |parent| self.frame(parent));
        let x = px + (node.offset_x + node.style.left.unwrap_or(0.0)) * ps;
        let y = py + (node.offset_y + node.style.top.unwrap_or(0.0)) * ps;
        (x, y, ps * node.style.scale.unwrap_or(1.0))
    }

    fn connected(&self, index: usize) -> bool {
        let node = &self.nodes[index];
        node.attached && node.parent.map_or(true, |parent| self.connected(parent))
    }

    fn is_ancestor_or_self(&self, ancestor: usize, mut index: usize) -> bool {
        loop {
            if index == ancestor {
                return true;
            }
            match self.nodes[index].parent {
                Some(parent) => index = parent,
                None => return false,
            }
        }
    }
}

/// A document of headless elements. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    state: Rc<RefCell<DocState>>,
}

impl HeadlessDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level element. `layout` gives its page origin and size.
    pub fn add_root(&self, id: &str, layout: Rect) -> HeadlessElement {
        let index = self.state.borrow_mut().push(id, None, layout);
        self.handle(index)
    }

    /// Add an element inside `parent`. `layout` gives its offset within the
    /// parent's untransformed box and its size.
    pub fn add_child(&self, parent: &HeadlessElement, id: &str, layout: Rect) -> HeadlessElement {
        let index = self.state.borrow_mut().push(id, Some(parent.index), layout);
        self.handle(index)
    }

    fn handle(&self, index: usize) -> HeadlessElement {
        HeadlessElement { state: Rc::clone(&self.state), index }
    }
}

impl ElementRegistry for HeadlessDocument {
    type Element = HeadlessElement;

    fn element(&self, id: &str) -> Option<HeadlessElement> {
        let state = self.state.borrow();
        let index = *state.ids.get(id)?;
        if !state.connected(index) {
            return None;
        }
        drop(state);
        Some(self.handle(index))
    }
}

/// Handle to one node of a [`HeadlessDocument`].
#[derive(Debug, Clone)]
pub struct HeadlessElement {
    state: Rc<RefCell<DocState>>,
    index: usize,
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.index == other.index
    }
}

impl HeadlessElement {
    #[must_use]
    pub fn id(&self) -> String {
        self.state.borrow().nodes[self.index].id.clone()
    }

    pub fn set_size(&self, size: Size) {
        self.state.borrow_mut().nodes[self.index].size = size;
    }

    /// Detach from the document. Descendants become disconnected too.
    pub fn remove(&self) {
        self.state.borrow_mut().nodes[self.index].attached = false;
    }

    #[must_use]
    pub fn style(&self) -> HeadlessStyle {
        self.state.borrow().nodes[self.index].style.clone()
    }

    /// Every transition value written, oldest first.
    #[must_use]
    pub fn transition_log(&self) -> Vec<String> {
        self.state.borrow().nodes[self.index].transitions.clone()
    }

    /// Number of non-empty style projections received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.borrow().nodes[self.index].writes
    }
}

impl Element for HeadlessElement {
    fn layout_size(&self) -> Size {
        self.state.borrow().nodes[self.index].size
    }

    fn bounding_box(&self) -> Rect {
        let state = self.state.borrow();
        let (x, y, scale) = state.frame(self.index);
        let size = state.nodes[self.index].size;
        Rect { x, y, width: size.width * scale, height: size.height * scale }
    }

    fn contains(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.state.borrow().is_ancestor_or_self(self.index, other.index)
    }

    fn is_connected(&self) -> bool {
        self.state.borrow().connected(self.index)
    }

    fn project(&self, style: &StyleProjection) {
        if style.is_empty() {
            return;
        }
        let mut state = self.state.borrow_mut();
        let node = &mut state.nodes[self.index];
        if let Some(top) = style.top {
            node.style.top = Some(top);
        }
        if let Some(left) = style.left {
            node.style.left = Some(left);
        }
        if let Some(scale) = style.scale {
            node.style.scale = Some(scale);
        }
        if let Some(transition) = &style.transition {
            node.style.transition = Some(transition.clone());
            node.transitions.push(transition.clone());
        }
        node.writes += 1;
    }
}
