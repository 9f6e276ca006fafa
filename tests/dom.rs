//! Browser smoke test for the DOM host adapter.
//!
//! Runs only under the wasm-bindgen test runner; everything logic-level
//! is covered by the mock-host tests instead.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, Event};
use webcarousel::dom::{self, WebHost};
use webcarousel::{CarouselOptions, Host};

wasm_bindgen_test_configure!(run_in_browser);

// 1x1 transparent GIF; decodes instantly without touching the network
const TINY_GIF: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn div() -> Element {
    document().create_element("div").unwrap()
}

fn img() -> Element {
    document().create_element("img").unwrap()
}

fn click(element: &Element) {
    let event = Event::new("click").unwrap();
    element.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn test_class_primitives() {
    let host = WebHost::new();
    let element = div();

    host.add_class(&element, "one");
    host.add_class(&element, "two");
    assert!(host.has_class(&element, "one"));
    assert!(host.has_class(&element, "two"));

    host.remove_class(&element, "one");
    assert!(!host.has_class(&element, "one"));
    assert!(host.has_class(&element, "two"));
}

#[wasm_bindgen_test]
fn test_bind_dispatches_and_detaches_on_drop() {
    let host = WebHost::new();
    let element = div();
    let hits = Rc::new(Cell::new(0));

    let counter = hits.clone();
    let binding = host.bind(&element, "click", Rc::new(move || counter.set(counter.get() + 1)));

    click(&element);
    assert_eq!(hits.get(), 1);

    drop(binding);
    click(&element);
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
fn test_lazy_assets_walks_descendants() {
    let host = WebHost::new();
    let root = div();
    let first = img();
    let second = img();
    let wrapper = div();
    first.set_attribute("data-src", "a.jpg").unwrap();
    second.set_attribute("data-src", "b.jpg").unwrap();
    root.append_child(&first).unwrap();
    root.append_child(&wrapper).unwrap();
    wrapper.append_child(&second).unwrap();

    let assets = host.lazy_assets(&root, "data-src");
    let urls: Vec<&str> = assets.iter().map(|(_, url)| url.as_str()).collect();
    assert_eq!(urls, vec!["a.jpg", "b.jpg"]);
}

#[wasm_bindgen_test]
fn test_lazy_assets_root_image_is_its_own_asset() {
    let host = WebHost::new();
    let root = img();
    root.set_attribute("data-src", "root.jpg").unwrap();

    let assets = host.lazy_assets(&root, "data-src");
    assert_eq!(assets, vec![(root.clone(), "root.jpg".to_string())]);
}

#[wasm_bindgen_test]
fn test_lazy_assets_ignores_non_images() {
    let host = WebHost::new();
    let root = div();
    let image = img();
    let decoy = div();
    root.set_attribute("data-src", "root.jpg").unwrap();
    image.set_attribute("data-src", "a.jpg").unwrap();
    decoy.set_attribute("data-src", "b.jpg").unwrap();
    root.append_child(&decoy).unwrap();
    root.append_child(&image).unwrap();

    // neither the div root nor the div child can settle a load
    let assets = host.lazy_assets(&root, "data-src");
    assert_eq!(assets, vec![(image.clone(), "a.jpg".to_string())]);
}

#[wasm_bindgen_test]
fn test_is_connected_tracks_document_membership() {
    let host = WebHost::new();
    let element = div();
    assert!(!host.is_connected(&element));

    let mount = document().document_element().unwrap();
    mount.append_child(&element).unwrap();
    assert!(host.is_connected(&element));

    element.remove();
    assert!(!host.is_connected(&element));
}

#[wasm_bindgen_test]
fn test_query_all_in_document_order() {
    let mount = document().document_element().unwrap();
    let first = div();
    let second = div();
    first.set_class_name("query-target");
    second.set_class_name("query-target");
    mount.append_child(&first).unwrap();
    mount.append_child(&second).unwrap();

    let found = dom::query_all(".query-target");
    assert_eq!(found, vec![first.clone(), second.clone()]);
    assert_eq!(dom::query(".query-target"), Some(first.clone()));

    first.remove();
    second.remove();
}

#[wasm_bindgen_test]
async fn test_begin_load_resolves_on_load() {
    let host = WebHost::new();
    let image = img();

    let result = host.begin_load(&image, TINY_GIF).await;

    assert_eq!(result, Ok(()));
    assert_eq!(image.get_attribute("src").as_deref(), Some(TINY_GIF));
}

#[wasm_bindgen_test]
async fn test_begin_load_reports_error() {
    let host = WebHost::new();
    let image = img();

    // a text data URI can never decode as an image
    let result = host.begin_load(&image, "data:,broken").await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().url, "data:,broken");
}

#[wasm_bindgen_test]
fn test_attach_drives_real_markup() {
    let mount = document().document_element().unwrap();
    let panels = vec![div(), div()];
    let thumbs = vec![div(), div()];
    for element in panels.iter().chain(thumbs.iter()) {
        mount.append_child(element).unwrap();
    }

    let carousel = dom::attach(CarouselOptions {
        panels: panels.clone(),
        thumbnails: thumbs.clone(),
        ..CarouselOptions::default()
    });
    let host = WebHost::new();
    assert!(host.has_class(&panels[0], "carousel-panel-active"));

    click(&thumbs[1]);
    assert_eq!(carousel.current_index(), Some(1));
    assert!(host.has_class(&panels[1], "carousel-panel-active"));
    assert!(!host.has_class(&panels[0], "carousel-panel-active"));
    assert!(host.has_class(&thumbs[1], "carousel-thumbnail-active"));

    carousel.destroy();
    for element in panels.iter().chain(thumbs.iter()) {
        element.remove();
    }
}
