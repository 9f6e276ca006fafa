//! Browser DOM host.
//!
//! Implements [`Host`] over `web_sys::Element`: classes through
//! `classList`, events through `addEventListener` with RAII detachment,
//! asset loads bridged from the element's `load`/`error` events into a
//! future, and task spawning through `wasm_bindgen_futures`. Compiles on
//! every target but is only meaningful on `wasm32`.

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget};

use crate::carousel::Carousel;
use crate::config::CarouselOptions;
use crate::diag::{Diagnostic, Severity};
use crate::error::AssetLoadError;
use crate::host::Host;

// =============================================================================
// Host Implementation
// =============================================================================

/// [`Host`] over the browser document.
#[derive(Clone, Copy, Default)]
pub struct WebHost;

impl WebHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for WebHost {
    type Element = Element;
    type Binding = WebBinding;

    fn add_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    /// Discover lazy images under the panel.
    ///
    /// Scoped to `img` elements, which settle a `src` load with `load` or
    /// `error`; the attribute on any other element is ignored.
    fn lazy_assets(&self, root: &Element, attr: &str) -> Vec<(Element, String)> {
        let selector = format!("img[{attr}]");

        // a root that is itself a loadable image is its own sole asset
        if root.matches(&selector).unwrap_or(false)
            && let Some(url) = root.get_attribute(attr)
        {
            return vec![(root.clone(), url)];
        }

        let mut found = Vec::new();
        if let Ok(nodes) = root.query_selector_all(&selector) {
            for i in 0..nodes.length() {
                if let Some(node) = nodes.get(i)
                    && let Some(element) = node.dyn_ref::<Element>()
                    && let Some(url) = element.get_attribute(attr)
                {
                    found.push((element.clone(), url));
                }
            }
        }
        found
    }

    /// Materialize `url` into the element's `src`, which starts the
    /// browser load, and settle once the element fires `load` or `error`.
    fn begin_load(
        &self,
        element: &Element,
        url: &str,
    ) -> LocalBoxFuture<'static, Result<(), AssetLoadError>> {
        let target: &EventTarget = element.as_ref();
        let settled = Promise::new(&mut |resolve, _| {
            let once = AddEventListenerOptions::new();
            once.set_once(true);
            let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
                "load", &resolve, &once,
            );
            let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
                "error", &resolve, &once,
            );
        });
        let _ = element.set_attribute("src", url);

        let url = url.to_string();
        JsFuture::from(settled)
            .map(move |event| {
                let failed = event
                    .ok()
                    .as_ref()
                    .and_then(|value| value.dyn_ref::<Event>().map(Event::type_))
                    .is_some_and(|kind| kind == "error");
                if failed { Err(AssetLoadError { url }) } else { Ok(()) }
            })
            .boxed_local()
    }

    fn bind(&self, element: &Element, event: &str, handler: Rc<dyn Fn()>) -> WebBinding {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn Fn()>);
        let target: EventTarget = element.clone().into();
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        WebBinding {
            target,
            event: event.to_string(),
            closure,
        }
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Listener registration that detaches on drop.
pub struct WebBinding {
    target: EventTarget,
    event: String,
    closure: Closure<dyn Fn()>,
}

impl Drop for WebBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.closure.as_ref().unchecked_ref());
    }
}

// =============================================================================
// Convenience Constructors
// =============================================================================

/// Build a carousel over the browser DOM.
///
/// Installs the [`console_sink`] when the options carry no diagnostic
/// sink of their own.
pub fn attach(mut options: CarouselOptions<Element>) -> Carousel<WebHost> {
    if options.diagnostics.is_none() {
        options.diagnostics = Some(console_sink());
    }
    Carousel::new(WebHost, options)
}

/// Diagnostic sink reporting through the browser console, warnings via
/// `console.warn` and errors via `console.error`.
pub fn console_sink() -> Rc<dyn Fn(Diagnostic)> {
    Rc::new(|diagnostic| {
        let message = JsValue::from_str(&diagnostic.to_string());
        match diagnostic.severity() {
            Severity::Warning => web_sys::console::warn_1(&message),
            Severity::Error => web_sys::console::error_1(&message),
        }
    })
}

// =============================================================================
// Element Lookup
// =============================================================================

/// Collect every element matching a CSS selector, in document order.
///
/// Convenience for gathering panels and thumbnails out of pre-rendered
/// markup.
pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The first element matching a CSS selector, if any.
pub fn query(selector: &str) -> Option<Element> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector(selector).ok().flatten())
}
