//! One controller per modal element.
//!
//! Regions re-render whenever their page is initialized again, and every
//! render asks for its viewer. The registry is keyed by the modal element, so
//! the first request constructs the controller and wires its listeners and
//! every later request gets the same controller back without registering
//! anything twice.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::controller::{ViewerController, ViewerHandle};
use crate::dom::{Document, EventKind, NodeId};

/// Selectors of a modal's built-in controls, looked up inside the modal.
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    pub close: &'static str,
    pub prev: Option<&'static str>,
    pub next: Option<&'static str>,
}

#[derive(Default)]
pub struct ViewerRegistry {
    bound: RefCell<HashMap<NodeId, Rc<dyn Any>>>,
}

impl ViewerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bound.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.borrow().is_empty()
    }

    /// The controller bound to `modal`, constructing and wiring it on first
    /// use. Returns `None` when `modal` is already bound to a controller of a
    /// different item type.
    pub fn bind<T: 'static>(
        &self,
        doc: &Document,
        modal: NodeId,
        controls: Controls,
        make: impl FnOnce() -> ViewerController<T>,
    ) -> Option<ViewerHandle<T>> {
        if let Some(existing) = self.bound.borrow().get(&modal) {
            return match existing.clone().downcast::<RefCell<ViewerController<T>>>() {
                Ok(handle) => Some(handle),
                Err(_) => {
                    log::warn!("modal {modal:?} is already bound to another viewer type");
                    None
                }
            };
        }

        let handle: ViewerHandle<T> = Rc::new(RefCell::new(make()));
        attach(doc, modal, controls, &handle);
        self.bound.borrow_mut().insert(modal, handle.clone());
        Some(handle)
    }

    /// Look up an already-bound controller without binding.
    pub fn get<T: 'static>(&self, modal: NodeId) -> Option<ViewerHandle<T>> {
        self.bound
            .borrow()
            .get(&modal)
            .cloned()
            .and_then(|h| h.downcast::<RefCell<ViewerController<T>>>().ok())
    }
}

fn attach<T: 'static>(doc: &Document, modal: NodeId, controls: Controls, handle: &ViewerHandle<T>) {
    if let Some(close) = doc.query_within(modal, controls.close) {
        let h = handle.clone();
        doc.add_listener(
            close,
            EventKind::Click,
            Rc::new(move |doc, _| h.borrow_mut().close(doc)),
        );
    }

    for (selector, direction) in [(controls.prev, -1), (controls.next, 1)] {
        let Some(button) = selector.and_then(|s| doc.query_within(modal, s)) else {
            continue;
        };
        let h = handle.clone();
        doc.add_listener(
            button,
            EventKind::Click,
            Rc::new(move |doc, _| h.borrow_mut().step(doc, direction)),
        );
    }

    let h = handle.clone();
    doc.add_listener(
        modal,
        EventKind::Click,
        Rc::new(move |doc, event| h.borrow_mut().handle_modal_click(doc, event)),
    );

    let h = handle.clone();
    doc.add_document_listener(
        EventKind::KeyDown,
        Rc::new(move |doc, event| {
            if let Some(key) = &event.key {
                h.borrow_mut().handle_key(doc, key);
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Event, Key, Rect};
    use crate::viewer::ViewerState;

    const CONTROLS: Controls = Controls {
        close: ".lightbox__close",
        prev: Some(".lightbox__nav--prev"),
        next: Some(".lightbox__nav--next"),
    };

    struct Modal {
        doc: Document,
        modal: NodeId,
        close: NodeId,
        prev: NodeId,
        next: NodeId,
    }

    fn modal() -> Modal {
        let doc = Document::new();
        let modal = doc.create_element("dialog");
        doc.set_attr(modal, "id", "lightbox");
        doc.append(doc.root(), modal);
        let mut buttons = Vec::new();
        for class in ["lightbox__close", "lightbox__nav--prev", "lightbox__nav--next"] {
            let b = doc.create_element("button");
            doc.add_class(b, class);
            doc.append(modal, b);
            buttons.push(b);
        }
        Modal {
            doc,
            modal,
            close: buttons[0],
            prev: buttons[1],
            next: buttons[2],
        }
    }

    fn counting_viewer(
        modal: NodeId,
        count: Rc<RefCell<usize>>,
    ) -> impl FnOnce() -> ViewerController<u32> {
        move || {
            ViewerController::new(
                modal,
                Box::new(move |_, _, _: &u32| *count.borrow_mut() += 1),
            )
            .with_items(vec![1, 2, 3, 4, 5])
            .with_arrow_keys()
        }
    }

    #[test]
    fn rebinding_adds_no_listeners() {
        let m = modal();
        let registry = ViewerRegistry::new();
        let populated = Rc::new(RefCell::new(0));

        let first = registry
            .bind(&m.doc, m.modal, CONTROLS, counting_viewer(m.modal, populated.clone()))
            .unwrap();
        let listeners = m.doc.listener_count();
        let second = registry
            .bind(&m.doc, m.modal, CONTROLS, counting_viewer(m.modal, populated.clone()))
            .unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(m.doc.listener_count(), listeners);
        assert_eq!(registry.len(), 1);

        first.borrow_mut().open(&m.doc, 0);
        *populated.borrow_mut() = 0;
        m.doc.dispatch(&Event::click(m.next));
        // One step means one population, not one per bind.
        assert_eq!(*populated.borrow(), 1);
        assert_eq!(first.borrow().state(), ViewerState::Open(1));
    }

    #[test]
    fn controls_drive_the_controller() {
        let m = modal();
        let registry = ViewerRegistry::new();
        let handle = registry
            .bind(&m.doc, m.modal, CONTROLS, counting_viewer(m.modal, Rc::default()))
            .unwrap();
        handle.borrow_mut().open(&m.doc, 0);

        m.doc.dispatch(&Event::click(m.prev));
        assert_eq!(handle.borrow().state(), ViewerState::Open(4));
        m.doc.dispatch(&Event::key(m.doc.root(), Key::ArrowRight));
        assert_eq!(handle.borrow().state(), ViewerState::Open(0));
        m.doc.dispatch(&Event::click(m.close));
        assert_eq!(handle.borrow().state(), ViewerState::Closed);
        assert!(!m.doc.is_open(m.modal));
    }

    #[test]
    fn escape_and_backdrop_click_dismiss() {
        let m = modal();
        m.doc.set_bounds(m.modal, Rect::new(0.0, 0.0, 200.0, 200.0));
        let registry = ViewerRegistry::new();
        let handle = registry
            .bind(&m.doc, m.modal, CONTROLS, counting_viewer(m.modal, Rc::default()))
            .unwrap();

        handle.borrow_mut().open(&m.doc, 2);
        m.doc.dispatch(&Event::key(m.doc.root(), Key::Escape));
        assert!(!handle.borrow().is_open());

        handle.borrow_mut().open(&m.doc, 2);
        m.doc.dispatch(&Event::click_at(m.next, 50.0, 50.0));
        assert_eq!(handle.borrow().state(), ViewerState::Open(3));
        m.doc.dispatch(&Event::click_at(m.modal, 500.0, 50.0));
        assert!(!handle.borrow().is_open());
    }

    #[test]
    fn type_mismatch_is_refused() {
        let m = modal();
        let registry = ViewerRegistry::new();
        registry
            .bind(&m.doc, m.modal, CONTROLS, counting_viewer(m.modal, Rc::default()))
            .unwrap();
        let other = registry.bind(&m.doc, m.modal, CONTROLS, || {
            ViewerController::<String>::new(m.modal, Box::new(|_, _, _| {}))
        });
        assert!(other.is_none());
        assert!(registry.get::<u32>(m.modal).is_some());
        assert!(registry.get::<String>(m.modal).is_none());
    }
}
