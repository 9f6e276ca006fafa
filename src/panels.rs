//! Panels coordinator.
//!
//! Owns the ordered panel collection and the current index, applies the
//! positional (ahead/behind) classes during transitions, and sequences
//! lazy loading against showing and hiding. Usable on its own for
//! embedders that compose manually; [`Carousel`](crate::Carousel) drives
//! it for the common case.

use std::rc::Rc;

use crate::config::PanelsOptions;
use crate::diag::{Diagnostic, Diagnostics};
use crate::error::CarouselError;
use crate::host::Host;
use crate::panel::{Panel, PanelStyle};
use crate::transition::Transition;

pub struct Panels<H: Host> {
    host: H,
    panels: Vec<Panel<H>>,
    current: Option<usize>,
    forward_class: String,
    back_class: String,
    auto_load: bool,
    on_change: Option<Rc<dyn Fn(usize)>>,
    diagnostics: Diagnostics,
}

impl<H: Host> Panels<H> {
    pub fn new(host: H, options: PanelsOptions<H::Element>) -> Self {
        let PanelsOptions {
            panels,
            lazy_load_attr,
            auto_load_assets,
            panel_active_class,
            panel_loaded_class,
            asset_loading_class,
            panel_forward_class,
            panel_back_class,
            on_change,
            diagnostics,
        } = options;

        let diagnostics = Diagnostics::new(diagnostics);
        if panels.is_empty() {
            diagnostics.report(Diagnostic::NoPanels);
        }

        let style = Rc::new(PanelStyle {
            active_class: panel_active_class,
            loaded_class: panel_loaded_class,
            asset_loading_class,
            lazy_load_attr,
        });

        let panels: Vec<Panel<H>> = panels
            .into_iter()
            .map(|element| Panel::new(host.clone(), element, style.clone(), diagnostics.clone()))
            .collect();

        // nothing is visited yet, so every panel starts out ahead
        for panel in &panels {
            host.add_class(panel.element(), &panel_forward_class);
        }

        Self {
            host,
            panels,
            current: None,
            forward_class: panel_forward_class,
            back_class: panel_back_class,
            auto_load: auto_load_assets,
            on_change,
            diagnostics,
        }
    }

    /// Transition to the panel at `index`.
    ///
    /// Rejects out-of-range indexes without touching any state. A request
    /// for the current index settles immediately without firing the change
    /// callback. Otherwise loading starts first (unless automatic loading
    /// is off), positional classes are retagged, the destination is shown
    /// and only then the previous panel hidden, so no instant exists
    /// without an active panel.
    pub fn go_to(&mut self, index: usize) -> Transition {
        let count = self.panels.len();
        if index >= count {
            self.diagnostics
                .report(Diagnostic::NavigationRejected { index, count });
            return Transition::rejected(CarouselError::IndexOutOfRange { index, count });
        }
        if self.current == Some(index) {
            return Transition::settled(false);
        }

        let load = self.auto_load.then(|| self.panels[index].load());

        self.retag(self.current, index);
        self.panels[index].show();
        if let Some(previous) = self.current {
            self.panels[previous].hide();
        }

        self.current = Some(index);
        if let Some(on_change) = &self.on_change {
            on_change(index);
        }

        match load {
            Some(completion) => Transition::loading(true, completion),
            None => Transition::settled(true),
        }
    }

    /// The index currently showing; `None` before the first navigation.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Start loading the assets of the panel at `index` without navigating
    /// to it.
    pub fn load(&self, index: usize) -> Transition {
        let count = self.panels.len();
        if index >= count {
            self.diagnostics
                .report(Diagnostic::NavigationRejected { index, count });
            return Transition::rejected(CarouselError::IndexOutOfRange { index, count });
        }
        let panel = &self.panels[index];
        if panel.loaded() {
            return Transition::settled(false);
        }
        Transition::loading(false, panel.load())
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Tear the coordinator down, removing every widget-managed class and
    /// detaching all panels from their in-flight loads.
    pub fn destroy(self) {
        for panel in &self.panels {
            self.host.remove_class(panel.element(), &self.forward_class);
            self.host.remove_class(panel.element(), &self.back_class);
            panel.destroy();
        }
    }

    /// Re-tag positional classes for a move from `from` to `to`.
    ///
    /// Panels traversed forward end up behind, panels traversed backward
    /// ahead; the destination carries neither. On the first navigation
    /// nothing was traversed, so panels below the destination just have
    /// both tags cleared.
    fn retag(&self, from: Option<usize>, to: usize) {
        match from {
            None => {
                for panel in &self.panels[..to] {
                    self.host.remove_class(panel.element(), &self.forward_class);
                    self.host.remove_class(panel.element(), &self.back_class);
                }
            }
            Some(from) if from < to => {
                for panel in &self.panels[from..to] {
                    self.host.add_class(panel.element(), &self.back_class);
                    self.host.remove_class(panel.element(), &self.forward_class);
                }
            }
            Some(from) if from > to => {
                for panel in &self.panels[to + 1..=from] {
                    self.host.add_class(panel.element(), &self.forward_class);
                    self.host.remove_class(panel.element(), &self.back_class);
                }
            }
            Some(_) => {}
        }

        let destination = self.panels[to].element();
        self.host.remove_class(destination, &self.forward_class);
        self.host.remove_class(destination, &self.back_class);
    }
}
