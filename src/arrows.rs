//! Arrow controls.
//!
//! Left/right navigation elements with their enabled state expressed as a
//! CSS class. The class is the single source of truth: it is re-read on
//! every click, so enabling or disabling an arrow from outside the widget
//! is honored.

use std::rc::Rc;

use crate::config::{ARROW_TRIGGER_EVENT, ArrowsOptions};
use crate::diag::{Diagnostic, Diagnostics};
use crate::host::Host;

pub struct Arrows<H: Host> {
    inner: Rc<ArrowsInner<H>>,
    bindings: Vec<H::Binding>,
}

enum Side {
    Left,
    Right,
}

struct ArrowsInner<H: Host> {
    host: H,
    left: Option<H::Element>,
    right: Option<H::Element>,
    disabled_class: String,
    panel_count: usize,
    on_left_click: Option<Rc<dyn Fn()>>,
    on_right_click: Option<Rc<dyn Fn()>>,
}

impl<H: Host> Arrows<H> {
    pub fn new(host: H, options: ArrowsOptions<H::Element>) -> Self {
        let ArrowsOptions {
            left_arrow,
            right_arrow,
            panel_count,
            arrow_disabled_class,
            on_left_click,
            on_right_click,
            diagnostics,
        } = options;

        let diagnostics = Diagnostics::new(diagnostics);
        if left_arrow.is_none() && right_arrow.is_none() {
            diagnostics.report(Diagnostic::NoArrows);
        }

        let inner = Rc::new(ArrowsInner {
            host: host.clone(),
            left: left_arrow,
            right: right_arrow,
            disabled_class: arrow_disabled_class,
            panel_count,
            on_left_click,
            on_right_click,
        });

        let mut bindings = Vec::new();
        if let Some(element) = &inner.left {
            let weak = Rc::downgrade(&inner);
            let handler: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.activate(Side::Left);
                }
            });
            bindings.push(host.bind(element, ARROW_TRIGGER_EVENT, handler));
        }
        if let Some(element) = &inner.right {
            let weak = Rc::downgrade(&inner);
            let handler: Rc<dyn Fn()> = Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.activate(Side::Right);
                }
            });
            bindings.push(host.bind(element, ARROW_TRIGGER_EVENT, handler));
        }

        Self { inner, bindings }
    }

    /// Refresh both arrows for the panel at `index`.
    ///
    /// A single panel disables both sides, the first panel disables the
    /// left arrow, the last panel disables the right arrow, and anything
    /// between enables both. A missing side is skipped.
    pub fn update(&self, index: usize) {
        self.inner.update(index);
    }

    /// Disable both arrows.
    pub fn disable(&self) {
        self.inner.set_disabled(&self.inner.left, true);
        self.inner.set_disabled(&self.inner.right, true);
    }

    /// Re-enable both arrows.
    pub fn enable(&self) {
        self.inner.set_disabled(&self.inner.left, false);
        self.inner.set_disabled(&self.inner.right, false);
    }

    /// Detach the click listeners. Disabled classes stay as they are.
    pub fn destroy(self) {
        drop(self.bindings);
    }
}

impl<H: Host> ArrowsInner<H> {
    /// Invoke the side's callback, unless the arrow carries the disabled
    /// class at this moment.
    fn activate(&self, side: Side) {
        let (element, callback) = match side {
            Side::Left => (&self.left, &self.on_left_click),
            Side::Right => (&self.right, &self.on_right_click),
        };
        let Some(element) = element else {
            return;
        };
        if self.host.has_class(element, &self.disabled_class) {
            return;
        }
        if let Some(callback) = callback {
            callback();
        }
    }

    fn update(&self, index: usize) {
        if self.panel_count <= 1 {
            self.set_disabled(&self.left, true);
            self.set_disabled(&self.right, true);
        } else if index == 0 {
            self.set_disabled(&self.left, true);
            self.set_disabled(&self.right, false);
        } else if index >= self.panel_count - 1 {
            self.set_disabled(&self.left, false);
            self.set_disabled(&self.right, true);
        } else {
            self.set_disabled(&self.left, false);
            self.set_disabled(&self.right, false);
        }
    }

    fn set_disabled(&self, arrow: &Option<H::Element>, disabled: bool) {
        let Some(arrow) = arrow else {
            return;
        };
        if disabled {
            self.host.add_class(arrow, &self.disabled_class);
        } else {
            self.host.remove_class(arrow, &self.disabled_class);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ARROW_DISABLED_CLASS;
    use crate::mock::{MockElement, MockHost};
    use std::cell::RefCell;

    struct Fixture {
        host: MockHost,
        left: MockElement,
        right: MockElement,
        arrows: Arrows<MockHost>,
        clicks: Rc<RefCell<Vec<&'static str>>>,
    }

    fn fixture(panel_count: usize) -> Fixture {
        let host = MockHost::new();
        let left = host.element();
        let right = host.element();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let left_log = clicks.clone();
        let right_log = clicks.clone();
        let arrows = Arrows::new(
            host.clone(),
            ArrowsOptions {
                left_arrow: Some(left),
                right_arrow: Some(right),
                panel_count,
                on_left_click: Some(Rc::new(move || left_log.borrow_mut().push("left"))),
                on_right_click: Some(Rc::new(move || right_log.borrow_mut().push("right"))),
                ..ArrowsOptions::default()
            },
        );
        Fixture {
            host,
            left,
            right,
            arrows,
            clicks,
        }
    }

    fn disabled(host: &MockHost, element: &MockElement) -> bool {
        host.has_class(element, ARROW_DISABLED_CLASS)
    }

    #[test]
    fn test_update_disables_by_position() {
        let f = fixture(3);

        f.arrows.update(0);
        assert!(disabled(&f.host, &f.left));
        assert!(!disabled(&f.host, &f.right));

        f.arrows.update(1);
        assert!(!disabled(&f.host, &f.left));
        assert!(!disabled(&f.host, &f.right));

        f.arrows.update(2);
        assert!(!disabled(&f.host, &f.left));
        assert!(disabled(&f.host, &f.right));
    }

    #[test]
    fn test_single_panel_disables_both() {
        let f = fixture(1);
        f.arrows.update(0);
        assert!(disabled(&f.host, &f.left));
        assert!(disabled(&f.host, &f.right));
    }

    #[test]
    fn test_click_fires_only_when_enabled() {
        let f = fixture(3);

        f.arrows.update(0);
        f.host.click(&f.left);
        f.host.click(&f.right);
        assert_eq!(*f.clicks.borrow(), vec!["right"]);

        f.arrows.update(1);
        f.host.click(&f.left);
        assert_eq!(*f.clicks.borrow(), vec!["right", "left"]);
    }

    #[test]
    fn test_external_class_toggle_is_honored() {
        let f = fixture(3);
        f.arrows.update(1);

        f.host.add_class(&f.right, ARROW_DISABLED_CLASS);
        f.host.click(&f.right);
        assert!(f.clicks.borrow().is_empty());

        f.host.remove_class(&f.right, ARROW_DISABLED_CLASS);
        f.host.click(&f.right);
        assert_eq!(*f.clicks.borrow(), vec!["right"]);
    }

    #[test]
    fn test_manual_enable_disable() {
        let f = fixture(3);
        f.arrows.update(1);

        f.arrows.disable();
        assert!(disabled(&f.host, &f.left));
        assert!(disabled(&f.host, &f.right));

        f.arrows.enable();
        assert!(!disabled(&f.host, &f.left));
        assert!(!disabled(&f.host, &f.right));
    }

    #[test]
    fn test_missing_side_is_skipped() {
        let host = MockHost::new();
        let right = host.element();
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let log = clicks.clone();
        let arrows = Arrows::new(
            host.clone(),
            ArrowsOptions {
                right_arrow: Some(right),
                panel_count: 2,
                on_right_click: Some(Rc::new(move || log.borrow_mut().push("right"))),
                ..ArrowsOptions::default()
            },
        );

        arrows.update(0);
        host.click(&right);
        assert_eq!(*clicks.borrow(), vec!["right"]);
    }

    #[test]
    fn test_no_arrows_reports() {
        let host = MockHost::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _arrows = Arrows::new(
            host,
            ArrowsOptions::<MockElement> {
                diagnostics: Some(Rc::new(move |d| sink.borrow_mut().push(d))),
                ..ArrowsOptions::default()
            },
        );

        assert_eq!(seen.borrow()[0], Diagnostic::NoArrows);
    }

    #[test]
    fn test_destroy_detaches_listeners() {
        let f = fixture(3);
        f.arrows.update(1);

        f.arrows.destroy();
        f.host.click(&f.left);
        f.host.click(&f.right);

        assert!(f.clicks.borrow().is_empty());
    }
}
