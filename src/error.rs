//! Error types for carousel operations.
//!
//! Only strict navigation is fallible. Configuration problems and asset
//! failures are reported as [`Diagnostic`](crate::diag::Diagnostic) values
//! instead, because the widget keeps running through them.

use thiserror::Error;

/// Errors produced by strict navigation and load requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The request named an index outside the valid panel range.
    #[error("no panel at index {index} (have {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

/// A lazy asset failed to load.
///
/// Produced by the host's load future. The carousel reports the failure as
/// a warning and otherwise treats the asset as complete, so a broken asset
/// never leaves a panel stuck in its loading state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("asset failed to load: {url}")]
pub struct AssetLoadError {
    /// The resource URL that failed.
    pub url: String,
}
