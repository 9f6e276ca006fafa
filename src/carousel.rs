//! Root carousel coordinator.
//!
//! Composes the panels, thumbnails and arrow sub-coordinators around one
//! authoritative current index. Sub-widget activations (thumbnail and
//! arrow clicks) re-enter [`Carousel::go_to`], and every completed index
//! change is pushed back out to the thumbnail highlight, the arrow states
//! and the embedder's change callback.
//!
//! Unlike the strict sub-coordinators, the root never rejects an index:
//! anything above the last panel wraps to the first, anything below zero
//! wraps to the last. This is the entry point external callers should use.
//!
//! State lives behind `Rc<RefCell<_>>` because activations arrive from
//! host event listeners outside any method call; the listeners hold weak
//! references and die with the widget. User callbacks always fire after
//! interior borrows are released, so a callback may navigate freely.

use std::cell::RefCell;
use std::rc::Rc;

use crate::arrows::Arrows;
use crate::config::{ArrowsOptions, CarouselOptions, PanelsOptions, ThumbsOptions};
use crate::diag::{Diagnostic, Diagnostics};
use crate::error::CarouselError;
use crate::host::Host;
use crate::panels::Panels;
use crate::thumbs::Thumbs;
use crate::transition::Transition;

/// Carousel widget over pre-rendered markup.
///
/// Built from a host and a [`CarouselOptions`] naming the panel, thumbnail
/// and arrow elements. Sub-coordinators are only constructed for the parts
/// that were actually supplied; everything else degrades to a no-op with a
/// diagnostic.
pub struct Carousel<H: Host> {
    inner: Rc<RefCell<CarouselInner<H>>>,
}

struct CarouselInner<H: Host> {
    panels: Option<Panels<H>>,
    thumbs: Option<Thumbs<H>>,
    arrows: Option<Arrows<H>>,
    on_panel_change: Option<Rc<dyn Fn(usize)>>,
    on_left_arrow_click: Option<Rc<dyn Fn()>>,
    on_right_arrow_click: Option<Rc<dyn Fn()>>,
    diagnostics: Diagnostics,
}

impl<H: Host> Carousel<H> {
    pub fn new(host: H, options: CarouselOptions<H::Element>) -> Self {
        let CarouselOptions {
            panels,
            lazy_load_attr,
            auto_load_assets,
            panel_active_class,
            panel_loaded_class,
            asset_loading_class,
            panel_forward_class,
            panel_back_class,
            thumbnails,
            thumbnail_active_class,
            thumbnail_trigger_event,
            left_arrow,
            right_arrow,
            arrow_disabled_class,
            initial_index,
            on_panel_change,
            on_left_arrow_click,
            on_right_arrow_click,
            diagnostics: sink,
        } = options;

        let diagnostics = Diagnostics::new(sink.clone());
        if !thumbnails.is_empty() && thumbnails.len() != panels.len() {
            diagnostics.report(Diagnostic::ThumbnailCountMismatch {
                panels: panels.len(),
                thumbnails: thumbnails.len(),
            });
        }

        let inner = Rc::new(RefCell::new(CarouselInner {
            panels: None,
            thumbs: None,
            arrows: None,
            on_panel_change,
            on_left_arrow_click,
            on_right_arrow_click,
            diagnostics: diagnostics.clone(),
        }));

        let panel_count = panels.len();
        if panel_count > 0 {
            let panels = Panels::new(
                host.clone(),
                PanelsOptions {
                    panels,
                    lazy_load_attr,
                    auto_load_assets,
                    panel_active_class,
                    panel_loaded_class,
                    asset_loading_class,
                    panel_forward_class,
                    panel_back_class,
                    // outcomes are relayed by the root itself, no callback
                    on_change: None,
                    diagnostics: sink.clone(),
                },
            );
            inner.borrow_mut().panels = Some(panels);
        } else {
            diagnostics.report(Diagnostic::NoPanels);
        }

        if !thumbnails.is_empty() {
            let weak = Rc::downgrade(&inner);
            let on_change: Rc<dyn Fn(usize)> = Rc::new(move |index| {
                if let Some(inner) = weak.upgrade() {
                    let _ = CarouselInner::dispatch_go_to(&inner, index as isize);
                }
            });
            let thumbs = Thumbs::new(
                host.clone(),
                ThumbsOptions {
                    thumbnails,
                    thumbnail_active_class,
                    thumbnail_trigger_event,
                    on_change: Some(on_change),
                    diagnostics: sink.clone(),
                },
            );
            inner.borrow_mut().thumbs = Some(thumbs);
        }

        if left_arrow.is_some() || right_arrow.is_some() {
            let on_left: Rc<dyn Fn()> = {
                let weak = Rc::downgrade(&inner);
                Rc::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        CarouselInner::arrow_activated(&inner, -1);
                    }
                })
            };
            let on_right: Rc<dyn Fn()> = {
                let weak = Rc::downgrade(&inner);
                Rc::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        CarouselInner::arrow_activated(&inner, 1);
                    }
                })
            };
            let arrows = Arrows::new(
                host,
                ArrowsOptions {
                    left_arrow,
                    right_arrow,
                    panel_count,
                    arrow_disabled_class,
                    on_left_click: Some(on_left),
                    on_right_click: Some(on_right),
                    diagnostics: sink,
                },
            );
            inner.borrow_mut().arrows = Some(arrows);
        }

        let carousel = Self { inner };
        if let Some(index) = initial_index {
            let _ = carousel.go_to(index);
        }
        carousel
    }

    /// Transition to the panel at `index`, wrapping out-of-range input.
    ///
    /// An index above the last panel wraps to the first panel, an index
    /// below zero wraps to the last, so every integer is a valid request
    /// and the returned transition never fails. With zero panels the
    /// transition settles immediately.
    pub fn go_to(&self, index: isize) -> Transition {
        CarouselInner::dispatch_go_to(&self.inner, index)
    }

    /// Advance by one panel, wrapping from the last back to the first.
    pub fn next(&self) -> Transition {
        let target = self.inner.borrow().step_target(1);
        self.go_to(target)
    }

    /// Step back one panel, wrapping from the first to the last.
    pub fn prev(&self) -> Transition {
        let target = self.inner.borrow().step_target(-1);
        self.go_to(target)
    }

    /// Start loading the assets of the panel at `index` without
    /// navigating to it.
    pub fn load_panel(&self, index: usize) -> Transition {
        let state = self.inner.borrow();
        match &state.panels {
            Some(panels) => panels.load(index),
            None => {
                state
                    .diagnostics
                    .report(Diagnostic::NavigationRejected { index, count: 0 });
                Transition::rejected(CarouselError::IndexOutOfRange { index, count: 0 })
            }
        }
    }

    /// The index currently showing; `None` before the first navigation
    /// or when no panels were supplied.
    pub fn current_index(&self) -> Option<usize> {
        self.inner
            .borrow()
            .panels
            .as_ref()
            .and_then(Panels::current_index)
    }

    /// Tear down every sub-coordinator, detaching all listeners and
    /// removing the widget-managed panel classes.
    ///
    /// Dropping a `Carousel` without calling this also detaches the
    /// listeners, but leaves classes where they are.
    pub fn destroy(self) {
        let mut state = self.inner.borrow_mut();
        if let Some(panels) = state.panels.take() {
            panels.destroy();
        }
        if let Some(thumbs) = state.thumbs.take() {
            thumbs.destroy();
        }
        if let Some(arrows) = state.arrows.take() {
            arrows.destroy();
        }
    }
}

impl<H: Host> CarouselInner<H> {
    /// Wrap `index` into range, run the panel transition and, if the index
    /// actually changed, push the outcome to the thumbnail highlight, the
    /// arrow states and the embedder's callback. The callback fires after
    /// the interior borrow is released.
    fn dispatch_go_to(inner: &Rc<RefCell<Self>>, index: isize) -> Transition {
        let (transition, notify) = {
            let mut guard = inner.borrow_mut();
            let state = &mut *guard;
            let Some(panels) = state.panels.as_mut() else {
                return Transition::settled(false);
            };

            let last = panels.len() as isize - 1;
            let index = if index > last {
                0
            } else if index < 0 {
                last as usize
            } else {
                index as usize
            };

            // always in range here, so the strict go_to cannot reject
            let transition = panels.go_to(index);
            let notify = if transition.changed() {
                if let Some(thumbs) = &state.thumbs {
                    let _ = thumbs.go_to(index);
                }
                if let Some(arrows) = &state.arrows {
                    arrows.update(index);
                }
                state.on_panel_change.clone().map(|callback| (callback, index))
            } else {
                None
            };
            (transition, notify)
        };

        if let Some((on_panel_change, index)) = notify {
            on_panel_change(index);
        }
        transition
    }

    /// Navigate one panel in the clicked direction, then fire the
    /// embedder's arrow callback.
    fn arrow_activated(inner: &Rc<RefCell<Self>>, delta: isize) {
        let (target, after) = {
            let state = inner.borrow();
            let after = if delta < 0 {
                state.on_left_arrow_click.clone()
            } else {
                state.on_right_arrow_click.clone()
            };
            (state.step_target(delta), after)
        };
        let _ = Self::dispatch_go_to(inner, target);
        if let Some(after) = after {
            after();
        }
    }

    /// Current index plus `delta`; stepping from nowhere lands at the
    /// start.
    fn step_target(&self, delta: isize) -> isize {
        self.panels
            .as_ref()
            .and_then(Panels::current_index)
            .map_or(0, |current| current as isize + delta)
    }
}
