//! The modal viewer state machine.
//!
//! ```text
//!            open(i)                 step(±1)
//!   Closed ─────────▶ Open(i) ──────────────▶ Open((i ± 1) mod n)
//!     ▲                  │
//!     └──── close() ─────┘   (close button, outside click, Escape)
//! ```
//!
//! One controller owns one modal element, its item list and its index. The
//! gallery, seller-detail and social-post viewers are all this type with a
//! different item type and population callback.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Document, Event, Key, NodeId};

/// Fills the modal's display fields from one item.
pub type Populate<T> = Box<dyn Fn(&Document, NodeId, &T)>;

/// Shared handle used by event listeners.
pub type ViewerHandle<T> = Rc<RefCell<ViewerController<T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Closed,
    Open(usize),
}

pub struct ViewerController<T> {
    modal: NodeId,
    items: Vec<T>,
    state: ViewerState,
    populate: Populate<T>,
    arrow_keys: bool,
}

impl<T> ViewerController<T> {
    pub fn new(modal: NodeId, populate: Populate<T>) -> Self {
        Self {
            modal,
            items: Vec::new(),
            state: ViewerState::Closed,
            populate,
            arrow_keys: false,
        }
    }

    /// Start with `items` already loaded.
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Let ArrowLeft/ArrowRight step while open.
    pub fn with_arrow_keys(mut self) -> Self {
        self.arrow_keys = true;
        self
    }

    pub fn modal(&self) -> NodeId {
        self.modal
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the backing items after the owning region re-rendered. An open
    /// viewer whose index no longer exists is closed.
    pub fn set_items(&mut self, doc: &Document, items: Vec<T>) {
        self.items = items;
        if let ViewerState::Open(index) = self.state {
            if index >= self.items.len() {
                self.close(doc);
            }
        }
    }

    /// Show item `index`. No-op when the list is empty or the index is out
    /// of range; re-opening while open just moves to `index`.
    pub fn open(&mut self, doc: &Document, index: usize) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        (self.populate)(doc, self.modal, item);
        self.state = ViewerState::Open(index);
        doc.show_modal(self.modal);
    }

    /// Move `direction` items with wrap-around. Only meaningful while open.
    pub fn step(&mut self, doc: &Document, direction: isize) {
        let ViewerState::Open(index) = self.state else {
            return;
        };
        let count = self.items.len();
        if count == 0 {
            return;
        }
        let next = (index as isize + direction).rem_euclid(count as isize) as usize;
        self.open(doc, next);
    }

    pub fn close(&mut self, doc: &Document) {
        if self.is_open() {
            doc.close_dialog(self.modal);
            self.state = ViewerState::Closed;
        }
    }

    /// Keyboard handling while open: Escape closes, arrows step when enabled.
    pub fn handle_key(&mut self, doc: &Document, key: &Key) {
        if !self.is_open() {
            return;
        }
        match key {
            Key::Escape => self.close(doc),
            Key::ArrowLeft if self.arrow_keys => self.step(doc, -1),
            Key::ArrowRight if self.arrow_keys => self.step(doc, 1),
            _ => {}
        }
    }

    /// A click that reached the modal element. Pointer clicks outside the
    /// modal's content box dismiss it; clicks without coordinates, or on a
    /// modal without known bounds, count as inside.
    pub fn handle_modal_click(&mut self, doc: &Document, event: &Event) {
        let (Some((x, y)), Some(bounds)) = (event.pointer, doc.bounds(self.modal)) else {
            return;
        };
        if !bounds.contains(x, y) {
            self.close(doc);
        }
    }
}
