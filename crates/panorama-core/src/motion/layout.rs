//! L3 Molecular Layer: layout measurement and responsive mode

use tracing::debug;

use crate::surface::{ElementId, RenderSurface, Viewport};

/// Responsive layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Panels scroll horizontally, driven by the wheel
    #[default]
    Horizontal,
    /// Narrow viewport: panels stack and the host scrolls natively
    Vertical,
}

impl LayoutMode {
    /// Mode for a viewport width; widths below the breakpoint are vertical
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            LayoutMode::Vertical
        } else {
            LayoutMode::Horizontal
        }
    }
}

/// Snapshot of the measured layout
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutMetrics {
    pub viewport: Viewport,
    /// Total scroll width of the panel strip
    pub content_width: f64,
}

impl LayoutMetrics {
    pub fn new(viewport: Viewport, content_width: f64) -> Self {
        Self {
            viewport,
            content_width,
        }
    }

    /// Scrollable distance, never negative
    pub fn max_scroll(&self) -> f64 {
        (self.content_width - self.viewport.width).max(0.0)
    }
}

/// Measure the viewport and the container's scroll width
///
/// Returns `None` while the container is not attached.
pub fn measure(surface: &dyn RenderSurface, container: Option<ElementId>) -> Option<LayoutMetrics> {
    let Some(container) = container else {
        debug!("Layout measurement skipped: container not attached");
        return None;
    };
    let Some(content_width) = surface.scroll_width(container) else {
        debug!("Layout measurement skipped: container has no scroll width yet");
        return None;
    };
    let metrics = LayoutMetrics::new(surface.viewport(), content_width);
    debug!(
        viewport = metrics.viewport.width,
        content = content_width,
        max_scroll = metrics.max_scroll(),
        "Measured layout"
    );
    Some(metrics)
}
