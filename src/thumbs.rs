//! Thumbnails coordinator.
//!
//! Tracks the highlighted thumbnail and converts activation events
//! (clicks by default) into index-change notifications. Thumbnail
//! elements are referenced, never owned: only the active class and the
//! event listeners are managed here.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ThumbsOptions;
use crate::diag::{Diagnostic, Diagnostics};
use crate::error::CarouselError;
use crate::host::Host;

pub struct Thumbs<H: Host> {
    inner: Rc<RefCell<ThumbsInner<H>>>,
    bindings: Vec<H::Binding>,
}

struct ThumbsInner<H: Host> {
    host: H,
    thumbnails: Vec<H::Element>,
    current: Option<usize>,
    active_class: String,
    on_change: Option<Rc<dyn Fn(usize)>>,
    diagnostics: Diagnostics,
}

impl<H: Host> Thumbs<H> {
    pub fn new(host: H, options: ThumbsOptions<H::Element>) -> Self {
        let ThumbsOptions {
            thumbnails,
            thumbnail_active_class,
            thumbnail_trigger_event,
            on_change,
            diagnostics,
        } = options;

        let diagnostics = Diagnostics::new(diagnostics);
        if thumbnails.is_empty() {
            diagnostics.report(Diagnostic::NoThumbnails);
        }

        let inner = Rc::new(RefCell::new(ThumbsInner {
            host: host.clone(),
            thumbnails,
            current: None,
            active_class: thumbnail_active_class,
            on_change,
            diagnostics,
        }));

        let elements: Vec<H::Element> = inner.borrow().thumbnails.clone();
        let mut bindings = Vec::with_capacity(elements.len());
        for element in &elements {
            let weak = Rc::downgrade(&inner);
            let target = element.clone();
            let handler: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    ThumbsInner::activate(&inner, &target);
                }
            });
            bindings.push(host.bind(element, &thumbnail_trigger_event, handler));
        }

        Self { inner, bindings }
    }

    /// Highlight the thumbnail at `index`.
    ///
    /// Rejects out-of-range indexes without touching any state.
    pub fn go_to(&self, index: usize) -> Result<(), CarouselError> {
        self.inner.borrow_mut().go_to(index)
    }

    /// The highlighted index; `None` before the first highlight.
    pub fn current_index(&self) -> Option<usize> {
        self.inner.borrow().current
    }

    /// Detach the activation listeners. The active class stays on
    /// whatever thumbnail carries it.
    pub fn destroy(self) {
        self.inner.borrow_mut().current = None;
        drop(self.bindings);
    }
}

impl<H: Host> ThumbsInner<H> {
    /// Handle an activation event on `element`.
    ///
    /// The element is resolved against the construction-time snapshot; an
    /// element that left the document resolves to nothing and the event is
    /// ignored, as is re-activating the current index. The change callback
    /// runs after the interior borrow is released, so it may navigate
    /// freely.
    fn activate(inner: &Rc<RefCell<Self>>, element: &H::Element) {
        let (index, on_change) = {
            let state = inner.borrow();
            if !state.host.is_connected(element) {
                return;
            }
            let Some(index) = state.thumbnails.iter().position(|t| t == element) else {
                return;
            };
            if state.current == Some(index) {
                return;
            }
            (index, state.on_change.clone())
        };

        let _ = inner.borrow_mut().go_to(index);
        if let Some(on_change) = on_change {
            on_change(index);
        }
    }

    fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        let count = self.thumbnails.len();
        if index >= count {
            self.diagnostics
                .report(Diagnostic::NavigationRejected { index, count });
            return Err(CarouselError::IndexOutOfRange { index, count });
        }

        self.host
            .add_class(&self.thumbnails[index], &self.active_class);
        let previous = self.current.unwrap_or(0);
        if previous != index {
            self.host
                .remove_class(&self.thumbnails[previous], &self.active_class);
        }
        self.current = Some(index);
        Ok(())
    }
}
