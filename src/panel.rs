//! Single carousel panel.
//!
//! A panel owns the lazy-loadable assets beneath its element. Loading is
//! initiated at most once, every asset settles on load or error, and the
//! combined completion is reported through a future, so a broken resource
//! can never wedge a transition.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};

use crate::diag::{Diagnostic, Diagnostics};
use crate::error::CarouselError;
use crate::host::Host;

/// Class names and the lazy-load attribute shared by all panels of one
/// carousel.
pub(crate) struct PanelStyle {
    pub active_class: String,
    pub loaded_class: String,
    pub asset_loading_class: String,
    pub lazy_load_attr: String,
}

/// Flags shared with in-flight load continuations.
///
/// `alive` is cleared on destroy so a completion that arrives afterwards
/// no longer marks the panel loaded.
struct PanelState {
    loaded: Cell<bool>,
    active: Cell<bool>,
    alive: Cell<bool>,
}

pub(crate) struct Panel<H: Host> {
    host: H,
    element: H::Element,
    style: Rc<PanelStyle>,
    state: Rc<PanelState>,
    // assets discovered by load(), kept so destroy can strip their marker
    assets: RefCell<Vec<H::Element>>,
    diagnostics: Diagnostics,
}

impl<H: Host> Panel<H> {
    pub(crate) fn new(
        host: H,
        element: H::Element,
        style: Rc<PanelStyle>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            host,
            element,
            style,
            state: Rc::new(PanelState {
                loaded: Cell::new(false),
                active: Cell::new(false),
                alive: Cell::new(true),
            }),
            assets: RefCell::new(Vec::new()),
            diagnostics,
        }
    }

    pub(crate) fn element(&self) -> &H::Element {
        &self.element
    }

    pub(crate) fn loaded(&self) -> bool {
        self.state.loaded.get()
    }

    /// Start loading every lazy asset under the panel.
    ///
    /// Assets load in parallel; the returned future resolves once all of
    /// them settled. Failures are reported as warnings and then count as
    /// settled. Repeated calls resolve immediately without touching the
    /// assets again.
    pub(crate) fn load(&self) -> LocalBoxFuture<'static, Result<(), CarouselError>> {
        if self.state.loaded.get() {
            return future::ready(Ok(())).boxed_local();
        }
        self.state.loaded.set(true);

        let discovered = self
            .host
            .lazy_assets(&self.element, &self.style.lazy_load_attr);
        *self.assets.borrow_mut() = discovered.iter().map(|(asset, _)| asset.clone()).collect();

        let mut loads = Vec::with_capacity(discovered.len());
        for (asset, url) in discovered {
            self.host.add_class(&asset, &self.style.asset_loading_class);
            let completion = self.host.begin_load(&asset, &url);
            let host = self.host.clone();
            let style = self.style.clone();
            let diagnostics = self.diagnostics.clone();
            loads.push(async move {
                if let Err(error) = completion.await {
                    diagnostics.report(Diagnostic::AssetLoadFailed { url: error.url });
                }
                host.remove_class(&asset, &style.asset_loading_class);
            });
        }

        let (done_tx, done_rx) = oneshot::channel();
        let host = self.host.clone();
        let element = self.element.clone();
        let style = self.style.clone();
        let state = self.state.clone();
        self.host.spawn(
            async move {
                future::join_all(loads).await;
                if state.alive.get() {
                    host.add_class(&element, &style.loaded_class);
                }
                let _ = done_tx.send(());
            }
            .boxed_local(),
        );

        // a dropped continuation settles the transition rather than wedging it
        done_rx.map(|_| Ok(())).boxed_local()
    }

    pub(crate) fn show(&self) {
        self.host.add_class(&self.element, &self.style.active_class);
        self.state.active.set(true);
    }

    pub(crate) fn hide(&self) {
        self.host.remove_class(&self.element, &self.style.active_class);
        self.state.active.set(false);
    }

    /// Detach the panel: late load completions stop mutating it, every
    /// widget-managed class on the panel element is removed, and in-flight
    /// assets lose their loading marker.
    pub(crate) fn destroy(&self) {
        self.state.alive.set(false);
        if self.state.active.get() {
            self.hide();
        }
        self.host.remove_class(&self.element, &self.style.loaded_class);
        for asset in self.assets.borrow().iter() {
            self.host.remove_class(asset, &self.style.asset_loading_class);
        }
    }
}
