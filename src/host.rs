//! Document host abstraction.
//!
//! Everything the carousel needs from its embedding document sits behind
//! the [`Host`] trait: CSS class toggling, lazy-asset discovery and
//! loading, event subscription, and task spawning. The [`dom`](crate::dom)
//! module implements it for the browser DOM; the mock module (behind the
//! `mock` feature) provides a deterministic in-memory implementation for
//! tests.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::AssetLoadError;

/// Capabilities the carousel requires from its embedding document.
///
/// Implementations are cheap handles (clones share the same underlying
/// document) and single-threaded; nothing here is `Send`.
pub trait Host: Clone + 'static {
    /// Handle to one document element.
    type Element: Clone + PartialEq + 'static;

    /// Guard for one attached event listener. Dropping the guard detaches
    /// the listener.
    type Binding;

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Discover lazy-loadable assets under `root`: elements carrying
    /// `attr`, whose value is the deferred resource URL. Which elements
    /// qualify as loadable is the host's call; a root that is itself a
    /// loadable asset is returned as its own sole entry.
    fn lazy_assets(&self, root: &Self::Element, attr: &str) -> Vec<(Self::Element, String)>;

    /// Start loading `url` into `element`, returning a future that
    /// resolves when the resource finished loading or failed.
    fn begin_load(
        &self,
        element: &Self::Element,
        url: &str,
    ) -> LocalBoxFuture<'static, Result<(), AssetLoadError>>;

    /// Attach `handler` for the named event. The listener stays attached
    /// until the returned binding is dropped.
    fn bind(&self, element: &Self::Element, event: &str, handler: Rc<dyn Fn()>) -> Self::Binding;

    /// Whether the element is still connected to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;

    /// Hand a task to the host's single-threaded executor.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
