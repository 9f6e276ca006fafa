//! Widget configuration.
//!
//! Every recognized option is an explicit struct field with a default
//! drawn from the constants below, so a carousel can be configured with
//! struct-update syntax and there is no runtime option merging. Class
//! names, the lazy-load attribute and trigger events are all plain
//! strings applied verbatim to the embedding document.

use std::rc::Rc;

use crate::diag::Diagnostic;

// =============================================================================
// Default Class Names and Attributes
// =============================================================================

/// Attribute carrying the deferred resource URL of a lazy asset.
pub const LAZY_LOAD_ATTR: &str = "data-src";

/// Class on the panel currently showing.
pub const PANEL_ACTIVE_CLASS: &str = "carousel-panel-active";

/// Class on a panel whose assets have finished loading.
pub const PANEL_LOADED_CLASS: &str = "carousel-panel-loaded";

/// Class on an asset element while its load is in flight.
pub const ASSET_LOADING_CLASS: &str = "carousel-asset-loading";

/// Class on panels positioned ahead of the current one.
pub const PANEL_FORWARD_CLASS: &str = "carousel-panel-ahead";

/// Class on panels positioned behind the current one.
pub const PANEL_BACK_CLASS: &str = "carousel-panel-behind";

/// Class on the thumbnail of the current panel.
pub const THUMBNAIL_ACTIVE_CLASS: &str = "carousel-thumbnail-active";

/// Event that activates a thumbnail.
pub const THUMBNAIL_TRIGGER_EVENT: &str = "click";

/// Class on an arrow that is currently disabled.
pub const ARROW_DISABLED_CLASS: &str = "carousel-arrow-disabled";

/// Event that activates an arrow.
pub const ARROW_TRIGGER_EVENT: &str = "click";

// =============================================================================
// Root Options
// =============================================================================

/// Options for a [`Carousel`](crate::Carousel).
///
/// `E` is the host's element handle type. All collections are snapshots:
/// structural document changes after construction are unsupported, and an
/// element that leaves the document is treated as gone (activations on it
/// are ignored).
pub struct CarouselOptions<E> {
    /// Panel elements in visual order.
    pub panels: Vec<E>,
    /// Attribute holding the deferred resource URL of a lazy asset.
    pub lazy_load_attr: String,
    /// Load the destination panel's assets automatically on navigation.
    /// When `false`, loading only happens through
    /// [`load_panel`](crate::Carousel::load_panel).
    pub auto_load_assets: bool,
    pub panel_active_class: String,
    pub panel_loaded_class: String,
    pub asset_loading_class: String,
    pub panel_forward_class: String,
    pub panel_back_class: String,
    /// Thumbnail elements, index-aligned with `panels`.
    pub thumbnails: Vec<E>,
    pub thumbnail_active_class: String,
    /// Event name that activates a thumbnail.
    pub thumbnail_trigger_event: String,
    pub left_arrow: Option<E>,
    pub right_arrow: Option<E>,
    pub arrow_disabled_class: String,
    /// Index navigated to during construction; `None` suppresses the
    /// initial navigation entirely.
    pub initial_index: Option<isize>,
    /// Fires with the new index after every completed index change.
    pub on_panel_change: Option<Rc<dyn Fn(usize)>>,
    /// Fires after an enabled left arrow click was handled.
    pub on_left_arrow_click: Option<Rc<dyn Fn()>>,
    /// Fires after an enabled right arrow click was handled.
    pub on_right_arrow_click: Option<Rc<dyn Fn()>>,
    /// Sink for non-fatal problem reports.
    pub diagnostics: Option<Rc<dyn Fn(Diagnostic)>>,
}

impl<E> Default for CarouselOptions<E> {
    fn default() -> Self {
        Self {
            panels: Vec::new(),
            lazy_load_attr: LAZY_LOAD_ATTR.to_string(),
            auto_load_assets: true,
            panel_active_class: PANEL_ACTIVE_CLASS.to_string(),
            panel_loaded_class: PANEL_LOADED_CLASS.to_string(),
            asset_loading_class: ASSET_LOADING_CLASS.to_string(),
            panel_forward_class: PANEL_FORWARD_CLASS.to_string(),
            panel_back_class: PANEL_BACK_CLASS.to_string(),
            thumbnails: Vec::new(),
            thumbnail_active_class: THUMBNAIL_ACTIVE_CLASS.to_string(),
            thumbnail_trigger_event: THUMBNAIL_TRIGGER_EVENT.to_string(),
            left_arrow: None,
            right_arrow: None,
            arrow_disabled_class: ARROW_DISABLED_CLASS.to_string(),
            initial_index: Some(0),
            on_panel_change: None,
            on_left_arrow_click: None,
            on_right_arrow_click: None,
            diagnostics: None,
        }
    }
}

// =============================================================================
// Sub-Coordinator Options
// =============================================================================

/// Options for a standalone [`Panels`](crate::Panels) coordinator.
pub struct PanelsOptions<E> {
    pub panels: Vec<E>,
    pub lazy_load_attr: String,
    pub auto_load_assets: bool,
    pub panel_active_class: String,
    pub panel_loaded_class: String,
    pub asset_loading_class: String,
    pub panel_forward_class: String,
    pub panel_back_class: String,
    /// Fires with the new index after every completed index change.
    pub on_change: Option<Rc<dyn Fn(usize)>>,
    pub diagnostics: Option<Rc<dyn Fn(Diagnostic)>>,
}

impl<E> Default for PanelsOptions<E> {
    fn default() -> Self {
        Self {
            panels: Vec::new(),
            lazy_load_attr: LAZY_LOAD_ATTR.to_string(),
            auto_load_assets: true,
            panel_active_class: PANEL_ACTIVE_CLASS.to_string(),
            panel_loaded_class: PANEL_LOADED_CLASS.to_string(),
            asset_loading_class: ASSET_LOADING_CLASS.to_string(),
            panel_forward_class: PANEL_FORWARD_CLASS.to_string(),
            panel_back_class: PANEL_BACK_CLASS.to_string(),
            on_change: None,
            diagnostics: None,
        }
    }
}

/// Options for a standalone [`Thumbs`](crate::Thumbs) coordinator.
pub struct ThumbsOptions<E> {
    pub thumbnails: Vec<E>,
    pub thumbnail_active_class: String,
    /// Event name that activates a thumbnail.
    pub thumbnail_trigger_event: String,
    /// Fires with the new index after an activation changed the highlight.
    pub on_change: Option<Rc<dyn Fn(usize)>>,
    pub diagnostics: Option<Rc<dyn Fn(Diagnostic)>>,
}

impl<E> Default for ThumbsOptions<E> {
    fn default() -> Self {
        Self {
            thumbnails: Vec::new(),
            thumbnail_active_class: THUMBNAIL_ACTIVE_CLASS.to_string(),
            thumbnail_trigger_event: THUMBNAIL_TRIGGER_EVENT.to_string(),
            on_change: None,
            diagnostics: None,
        }
    }
}

/// Options for a standalone [`Arrows`](crate::Arrows) coordinator.
pub struct ArrowsOptions<E> {
    pub left_arrow: Option<E>,
    pub right_arrow: Option<E>,
    /// Total panel count the arrows navigate over.
    pub panel_count: usize,
    pub arrow_disabled_class: String,
    /// Fires on an enabled left arrow click.
    pub on_left_click: Option<Rc<dyn Fn()>>,
    /// Fires on an enabled right arrow click.
    pub on_right_click: Option<Rc<dyn Fn()>>,
    pub diagnostics: Option<Rc<dyn Fn(Diagnostic)>>,
}

impl<E> Default for ArrowsOptions<E> {
    fn default() -> Self {
        Self {
            left_arrow: None,
            right_arrow: None,
            panel_count: 0,
            arrow_disabled_class: ARROW_DISABLED_CLASS.to_string(),
            on_left_click: None,
            on_right_click: None,
            diagnostics: None,
        }
    }
}
