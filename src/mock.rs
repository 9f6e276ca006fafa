//! Deterministic in-memory host for tests.
//!
//! Models just enough of a document for the widget: elements with classes,
//! attributes, child structure and connectivity, recorded asset loads that
//! are completed manually, synchronous event dispatch, and a single
//! threaded task pump. Enabled for the crate's own tests and for
//! downstream tests through the `mock` feature.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use crate::error::AssetLoadError;
use crate::host::Host;

/// Handle to one element of the mock document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MockElement(u32);

#[derive(Default)]
struct ElementState {
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    children: Vec<MockElement>,
    connected: bool,
    src: Option<String>,
}

type Handler = Rc<dyn Fn()>;
type LoadSender = oneshot::Sender<Result<(), AssetLoadError>>;

struct MockInner {
    elements: RefCell<HashMap<MockElement, ElementState>>,
    listeners: RefCell<HashMap<(MockElement, String), Vec<(u64, Handler)>>>,
    pending_loads: RefCell<HashMap<MockElement, Vec<(String, LoadSender)>>>,
    load_requests: RefCell<Vec<(MockElement, String)>>,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    next_element: Cell<u32>,
    next_listener: Cell<u64>,
}

/// In-memory [`Host`] implementation.
///
/// Clones share one document. Asset loads stay pending until resolved
/// with [`complete_load`](MockHost::complete_load) or
/// [`fail_load`](MockHost::fail_load), and spawned tasks only make
/// progress inside [`run`](MockHost::run), which keeps every test fully
/// deterministic.
#[derive(Clone)]
pub struct MockHost {
    inner: Rc<MockInner>,
}

impl MockHost {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            inner: Rc::new(MockInner {
                elements: RefCell::new(HashMap::new()),
                listeners: RefCell::new(HashMap::new()),
                pending_loads: RefCell::new(HashMap::new()),
                load_requests: RefCell::new(Vec::new()),
                pool: RefCell::new(pool),
                spawner,
                next_element: Cell::new(0),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Create a fresh element, connected to the document.
    pub fn element(&self) -> MockElement {
        let id = self.inner.next_element.get();
        self.inner.next_element.set(id + 1);
        let element = MockElement(id);
        self.inner.elements.borrow_mut().insert(
            element,
            ElementState {
                connected: true,
                ..ElementState::default()
            },
        );
        element
    }

    /// Create several connected elements at once.
    pub fn elements(&self, count: usize) -> Vec<MockElement> {
        (0..count).map(|_| self.element()).collect()
    }

    pub fn append_child(&self, parent: &MockElement, child: &MockElement) {
        self.inner
            .elements
            .borrow_mut()
            .get_mut(parent)
            .expect("unknown parent element")
            .children
            .push(*child);
    }

    pub fn set_attr(&self, element: &MockElement, name: &str, value: &str) {
        if let Some(state) = self.inner.elements.borrow_mut().get_mut(element) {
            state.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Detach or reattach an element.
    pub fn set_connected(&self, element: &MockElement, connected: bool) {
        if let Some(state) = self.inner.elements.borrow_mut().get_mut(element) {
            state.connected = connected;
        }
    }

    /// All classes currently on the element, in insertion order.
    pub fn classes(&self, element: &MockElement) -> Vec<String> {
        self.inner
            .elements
            .borrow()
            .get(element)
            .map(|state| state.classes.clone())
            .unwrap_or_default()
    }

    /// The materialized resource URL, once a load was started.
    pub fn src(&self, element: &MockElement) -> Option<String> {
        self.inner
            .elements
            .borrow()
            .get(element)
            .and_then(|state| state.src.clone())
    }

    /// Every `begin_load` call so far, in order.
    pub fn load_requests(&self) -> Vec<(MockElement, String)> {
        self.inner.load_requests.borrow().clone()
    }

    /// Resolve all pending loads for the element successfully.
    pub fn complete_load(&self, element: &MockElement) {
        for (_, sender) in self.take_pending(element) {
            let _ = sender.send(Ok(()));
        }
    }

    /// Fail all pending loads for the element.
    pub fn fail_load(&self, element: &MockElement) {
        for (url, sender) in self.take_pending(element) {
            let _ = sender.send(Err(AssetLoadError { url }));
        }
    }

    fn take_pending(&self, element: &MockElement) -> Vec<(String, LoadSender)> {
        self.inner
            .pending_loads
            .borrow_mut()
            .remove(element)
            .unwrap_or_default()
    }

    /// Synchronously dispatch an event to the element's listeners.
    ///
    /// Handlers are cloned out before running, so a handler may detach
    /// listeners (for example by destroying the widget) mid-dispatch.
    pub fn dispatch(&self, element: &MockElement, event: &str) {
        let handlers: Vec<Handler> = self
            .inner
            .listeners
            .borrow()
            .get(&(*element, event.to_string()))
            .map(|handlers| handlers.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();
        for handler in handlers {
            handler();
        }
    }

    /// Dispatch a `click` event.
    pub fn click(&self, element: &MockElement) {
        self.dispatch(element, "click");
    }

    /// Drive spawned tasks until everything stalls on pending loads.
    pub fn run(&self) {
        self.inner.pool.borrow_mut().run_until_stalled();
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MockHost {
    type Element = MockElement;
    type Binding = MockBinding;

    fn add_class(&self, element: &MockElement, class: &str) {
        if let Some(state) = self.inner.elements.borrow_mut().get_mut(element)
            && !state.classes.iter().any(|c| c == class)
        {
            state.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, element: &MockElement, class: &str) {
        if let Some(state) = self.inner.elements.borrow_mut().get_mut(element) {
            state.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, element: &MockElement, class: &str) -> bool {
        self.inner
            .elements
            .borrow()
            .get(element)
            .is_some_and(|state| state.classes.iter().any(|c| c == class))
    }

    fn lazy_assets(&self, root: &MockElement, attr: &str) -> Vec<(MockElement, String)> {
        let elements = self.inner.elements.borrow();
        // a root that is itself loadable is its own sole asset
        if let Some(url) = elements.get(root).and_then(|state| state.attrs.get(attr)) {
            return vec![(*root, url.clone())];
        }

        fn walk(
            elements: &HashMap<MockElement, ElementState>,
            node: &MockElement,
            attr: &str,
            found: &mut Vec<(MockElement, String)>,
        ) {
            let Some(state) = elements.get(node) else {
                return;
            };
            for child in &state.children {
                if let Some(url) = elements.get(child).and_then(|s| s.attrs.get(attr)) {
                    found.push((*child, url.clone()));
                }
                walk(elements, child, attr, found);
            }
        }

        let mut found = Vec::new();
        walk(&elements, root, attr, &mut found);
        found
    }

    fn begin_load(
        &self,
        element: &MockElement,
        url: &str,
    ) -> LocalBoxFuture<'static, Result<(), AssetLoadError>> {
        self.inner
            .load_requests
            .borrow_mut()
            .push((*element, url.to_string()));
        if let Some(state) = self.inner.elements.borrow_mut().get_mut(element) {
            state.src = Some(url.to_string());
        }

        let (tx, rx) = oneshot::channel();
        self.inner
            .pending_loads
            .borrow_mut()
            .entry(*element)
            .or_default()
            .push((url.to_string(), tx));
        rx.map(|result| result.unwrap_or(Ok(()))).boxed_local()
    }

    fn bind(&self, element: &MockElement, event: &str, handler: Rc<dyn Fn()>) -> MockBinding {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .entry((*element, event.to_string()))
            .or_default()
            .push((id, handler));
        MockBinding {
            host: self.clone(),
            element: *element,
            event: event.to_string(),
            id,
        }
    }

    fn is_connected(&self, element: &MockElement) -> bool {
        self.inner
            .elements
            .borrow()
            .get(element)
            .is_some_and(|state| state.connected)
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.inner
            .spawner
            .spawn_local(task)
            .expect("mock executor is gone");
    }
}

/// Listener registration that detaches on drop.
pub struct MockBinding {
    host: MockHost,
    element: MockElement,
    event: String,
    id: u64,
}

impl Drop for MockBinding {
    fn drop(&mut self) {
        let mut listeners = self.host.inner.listeners.borrow_mut();
        if let Some(handlers) = listeners.get_mut(&(self.element, self.event.clone())) {
            handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_bookkeeping() {
        let host = MockHost::new();
        let element = host.element();

        host.add_class(&element, "one");
        host.add_class(&element, "two");
        host.add_class(&element, "one");
        assert_eq!(host.classes(&element), vec!["one", "two"]);

        host.remove_class(&element, "one");
        assert!(!host.has_class(&element, "one"));
        assert!(host.has_class(&element, "two"));
    }

    #[test]
    fn test_lazy_assets_prefers_root() {
        let host = MockHost::new();
        let root = host.element();
        let child = host.element();
        host.append_child(&root, &child);
        host.set_attr(&root, "data-src", "root.jpg");
        host.set_attr(&child, "data-src", "child.jpg");

        assert_eq!(
            host.lazy_assets(&root, "data-src"),
            vec![(root, "root.jpg".to_string())]
        );
    }

    #[test]
    fn test_lazy_assets_walks_descendants() {
        let host = MockHost::new();
        let root = host.element();
        let child = host.element();
        let grandchild = host.element();
        let plain = host.element();
        host.append_child(&root, &child);
        host.append_child(&root, &plain);
        host.append_child(&child, &grandchild);
        host.set_attr(&child, "data-src", "a.jpg");
        host.set_attr(&grandchild, "data-src", "b.jpg");

        assert_eq!(
            host.lazy_assets(&root, "data-src"),
            vec![(child, "a.jpg".to_string()), (grandchild, "b.jpg".to_string())]
        );
    }

    #[test]
    fn test_begin_load_materializes_src() {
        let host = MockHost::new();
        let element = host.element();

        let completion = host.begin_load(&element, "a.jpg");
        assert_eq!(host.src(&element), Some("a.jpg".to_string()));
        assert_eq!(host.load_requests(), vec![(element, "a.jpg".to_string())]);

        host.complete_load(&element);
        assert_eq!(completion.now_or_never(), Some(Ok(())));
    }

    #[test]
    fn test_fail_load_carries_url() {
        let host = MockHost::new();
        let element = host.element();

        let completion = host.begin_load(&element, "broken.jpg");
        host.fail_load(&element);
        assert_eq!(
            completion.now_or_never(),
            Some(Err(AssetLoadError {
                url: "broken.jpg".to_string()
            }))
        );
    }

    #[test]
    fn test_binding_drop_detaches_listener() {
        let host = MockHost::new();
        let element = host.element();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let binding = host.bind(&element, "click", Rc::new(move || counter.set(counter.get() + 1)));

        host.click(&element);
        assert_eq!(hits.get(), 1);

        drop(binding);
        host.click(&element);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_run_drives_spawned_tasks() {
        let host = MockHost::new();
        let done = Rc::new(Cell::new(false));

        let flag = done.clone();
        host.spawn(async move { flag.set(true) }.boxed_local());

        assert!(!done.get());
        host.run();
        assert!(done.get());
    }
}
