//! Structured, non-fatal problem reporting.
//!
//! Construction and navigation never panic on degraded input (missing
//! elements, mismatched counts, out-of-range requests). Problems are
//! reported as [`Diagnostic`] values through an optional sink supplied in
//! the options, so the embedder decides where reports go. The DOM adapter
//! installs a console sink by default; tests collect diagnostics into a
//! vector.

use std::fmt;
use std::rc::Rc;

// =============================================================================
// Diagnostic Values
// =============================================================================

/// How serious a reported problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Degraded but survivable; the widget keeps working.
    Warning,
    /// A misconfiguration or rejected request; the affected part is inert.
    Error,
}

/// A non-fatal problem observed by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Constructed with an empty panel list; navigation has nothing to do.
    NoPanels,
    /// Thumbnail controls constructed with an empty element list.
    NoThumbnails,
    /// Arrow controls constructed without a left or right element.
    NoArrows,
    /// Thumbnail and panel counts differ; highlighting will drift.
    ThumbnailCountMismatch { panels: usize, thumbnails: usize },
    /// A strict navigation request named an index outside the valid range.
    NavigationRejected { index: usize, count: usize },
    /// A lazy asset failed to load; it is treated as complete anyway.
    AssetLoadFailed { url: String },
}

impl Diagnostic {
    /// Classification used by sinks that split warning and error streams.
    pub fn severity(&self) -> Severity {
        match self {
            Self::ThumbnailCountMismatch { .. } | Self::AssetLoadFailed { .. } => Severity::Warning,
            Self::NoPanels
            | Self::NoThumbnails
            | Self::NoArrows
            | Self::NavigationRejected { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPanels => write!(f, "carousel error: no panels were passed in constructor"),
            Self::NoThumbnails => {
                write!(f, "carousel error: no thumbnails were passed in constructor")
            }
            Self::NoArrows => write!(
                f,
                "carousel error: no left or right arrow was passed in constructor"
            ),
            Self::ThumbnailCountMismatch { panels, thumbnails } => write!(
                f,
                "carousel warning: {} thumbnails do not match {} panels",
                thumbnails, panels
            ),
            Self::NavigationRejected { index, count } => write!(
                f,
                "carousel error: unable to transition to index {} (have {})",
                index, count
            ),
            Self::AssetLoadFailed { url } => {
                write!(f, "carousel warning: asset failed to load: {}", url)
            }
        }
    }
}

// =============================================================================
// Diagnostic Sink
// =============================================================================

/// Shared handle to an optional diagnostic sink.
///
/// Cloned into every sub-component. Reporting through a handle without a
/// sink is a no-op.
#[derive(Clone, Default)]
pub struct Diagnostics {
    sink: Option<Rc<dyn Fn(Diagnostic)>>,
}

impl Diagnostics {
    pub fn new(sink: Option<Rc<dyn Fn(Diagnostic)>>) -> Self {
        Self { sink }
    }

    /// Report a problem to the sink, if one is installed.
    pub fn report(&self, diagnostic: Diagnostic) {
        if let Some(sink) = &self.sink {
            sink(diagnostic);
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_severity_classification() {
        assert_eq!(Diagnostic::NoPanels.severity(), Severity::Error);
        assert_eq!(Diagnostic::NoThumbnails.severity(), Severity::Error);
        assert_eq!(Diagnostic::NoArrows.severity(), Severity::Error);
        assert_eq!(
            Diagnostic::NavigationRejected { index: 4, count: 2 }.severity(),
            Severity::Error
        );
        assert_eq!(
            Diagnostic::ThumbnailCountMismatch {
                panels: 3,
                thumbnails: 2
            }
            .severity(),
            Severity::Warning
        );
        assert_eq!(
            Diagnostic::AssetLoadFailed {
                url: "a.jpg".to_string()
            }
            .severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_display_carries_context() {
        let msg = Diagnostic::NavigationRejected { index: 9, count: 4 }.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains('4'));

        let msg = Diagnostic::ThumbnailCountMismatch {
            panels: 5,
            thumbnails: 3,
        }
        .to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_report_without_sink_is_noop() {
        let diagnostics = Diagnostics::default();
        diagnostics.report(Diagnostic::NoPanels);
    }

    #[test]
    fn test_report_reaches_sink() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let diagnostics = Diagnostics::new(Some(Rc::new(move |d| sink.borrow_mut().push(d))));

        diagnostics.report(Diagnostic::NoPanels);
        diagnostics.report(Diagnostic::AssetLoadFailed {
            url: "x.png".to_string(),
        });

        assert_eq!(
            *seen.borrow(),
            vec![
                Diagnostic::NoPanels,
                Diagnostic::AssetLoadFailed {
                    url: "x.png".to_string()
                }
            ]
        );
    }
}
