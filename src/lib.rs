//! Carousel widget core with lazy asset loading and a pluggable document
//! host.
//!
//! Attaches carousel behavior to pre-rendered markup: the panel,
//! thumbnail and arrow elements already exist in the page and are handed
//! to [`Carousel::new`] through [`CarouselOptions`]. One authoritative
//! current index is kept consistent across three sub-coordinators: the
//! panel display ([`Panels`]), the thumbnail highlight ([`Thumbs`]) and
//! the arrow enable/disable state ([`Arrows`]). Panel assets load lazily,
//! in parallel, and a broken asset counts as loaded so the UI never
//! wedges.
//!
//! The embedding document sits behind the [`Host`] trait. The [`dom`]
//! module binds it to the browser through `web-sys`; an in-memory mock
//! (the `mock` feature) drives the deterministic test suite.
//!
//! # Example
//!
//! ```no_run
//! use webcarousel::{CarouselOptions, dom};
//!
//! let carousel = dom::attach(CarouselOptions {
//!     panels: dom::query_all(".carousel-panel"),
//!     thumbnails: dom::query_all(".carousel-thumbnail"),
//!     left_arrow: dom::query(".carousel-arrow-left"),
//!     right_arrow: dom::query(".carousel-arrow-right"),
//!     ..CarouselOptions::default()
//! });
//!
//! let _ = carousel.next();
//! ```

mod arrows;
mod carousel;
pub mod config;
mod diag;
pub mod dom;
mod error;
mod host;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod panel;
mod panels;
mod thumbs;
mod transition;

pub use arrows::Arrows;
pub use carousel::Carousel;
pub use config::{ArrowsOptions, CarouselOptions, PanelsOptions, ThumbsOptions};
pub use diag::{Diagnostic, Severity};
pub use error::{AssetLoadError, CarouselError};
pub use host::Host;
pub use panels::Panels;
pub use thumbs::Thumbs;
pub use transition::Transition;
