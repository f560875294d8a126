//! L3 Molecular Layer: the per-frame animation tick
//!
//! One call to [`FrameLoop::tick`] advances every smoothed value by one step
//! and writes the resulting transforms to the render surface:
//!
//! 1. scroll easing
//! 2. velocity-driven skew
//! 3. zoom from the scroll distance
//! 4. container transform (translate, scale, skew in that order)
//! 5. cursor easing
//! 6. parallax offset of the tracked element
//! 7. progress thumb
//!
//! Steps whose element ref is missing are skipped for that frame.

use tracing::trace;

use super::layout::{LayoutMetrics, LayoutMode};
use super::lerp::lerp;
use super::state::{CursorState, ScrollState};
use super::transform::Transform;
use crate::config::MotionConfig;
use crate::surface::{Rect, Refs, RenderSurface, StyleUpdate, Viewport};

/// Everything the tick reads and advances
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionState {
    pub scroll: ScrollState,
    pub cursor: CursorState,
    pub layout: LayoutMetrics,
    pub mode: LayoutMode,
}

/// Values computed by one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub mode: LayoutMode,
    /// Smoothed scroll position (horizontal mode only)
    pub scroll_x: Option<f64>,
    pub skew: f64,
    /// Zoom level (horizontal mode only)
    pub zoom: Option<f64>,
    pub cursor: (f64, f64),
    /// Parallax offset, when the anchor intersected the viewport this frame
    pub parallax: Option<f64>,
    /// Thumb offset along the progress track, when it was written
    pub progress: Option<f64>,
}

/// Zoom for a scroll position
///
/// Settles linearly from `zoom_start` to `zoom_end` over the first
/// `zoom_distance_ratio * viewport_width` of scrolling.
pub fn zoom_for(scroll_x: f64, viewport_width: f64, config: &MotionConfig) -> f64 {
    let span = config.zoom_distance_ratio * viewport_width;
    let t = if span > 0.0 {
        (scroll_x.abs() / span).clamp(0.0, 1.0)
    } else {
        1.0
    };
    lerp(config.zoom_start, config.zoom_end, t)
}

/// Thumb offset along the progress track
///
/// `None` when there is nothing to scroll.
pub fn progress_offset(scroll_x: f64, max_scroll: f64, track_length: f64) -> Option<f64> {
    if max_scroll <= 0.0 {
        return None;
    }
    let percentage = (scroll_x / max_scroll).clamp(0.0, 1.0);
    Some(percentage * track_length)
}

/// Parallax offset for an anchor element
///
/// Proportional to the distance between the anchor's center and the right
/// viewport edge. `None` while the anchor is horizontally off screen.
pub fn parallax_offset(anchor: Rect, viewport: Viewport, damping: f64) -> Option<f64> {
    if anchor.right() <= 0.0 || anchor.left() >= viewport.width {
        return None;
    }
    Some((viewport.width - anchor.center_x()) * damping)
}

/// Frame loop state that is not part of the page's motion record
#[derive(Debug, Clone)]
pub struct FrameLoop {
    config: MotionConfig,
    parallax: f64,
    last_mode: Option<LayoutMode>,
}

impl FrameLoop {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            parallax: 0.0,
            last_mode: None,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Last parallax offset written
    pub fn parallax(&self) -> f64 {
        self.parallax
    }

    /// Advance one frame
    pub fn tick(
        &mut self,
        state: &mut MotionState,
        refs: &Refs,
        surface: &mut dyn RenderSurface,
    ) -> FrameReport {
        let viewport = surface.viewport();
        let mut report = FrameReport {
            mode: state.mode,
            ..Default::default()
        };

        match state.mode {
            LayoutMode::Horizontal => {
                let current = state.scroll.ease(self.config.scroll_factor);

                let skew = if self.config.skew_gain != 0.0 {
                    state
                        .scroll
                        .ease_skew(self.config.skew_gain, self.config.skew_factor)
                } else {
                    state.scroll.skew = 0.0;
                    0.0
                };

                let zoom = zoom_for(current, viewport.width, &self.config);

                if let Some(container) = refs.container {
                    surface.apply(
                        container,
                        StyleUpdate::Transform(Transform::container(current, zoom, skew)),
                    );
                }

                report.scroll_x = Some(current);
                report.skew = skew;
                report.zoom = Some(zoom);
            }
            LayoutMode::Vertical => {
                if self.last_mode != Some(LayoutMode::Vertical) {
                    if let Some(container) = refs.container {
                        surface.apply(container, StyleUpdate::Transform(Transform::identity()));
                    }
                    state.scroll.skew = 0.0;
                }
            }
        }
        self.last_mode = Some(state.mode);

        let (cx, cy) = state.cursor.ease(self.config.cursor_factor);
        if let Some(cursor) = refs.cursor {
            let offset = self.config.cursor_offset;
            surface.apply(
                cursor,
                StyleUpdate::Transform(Transform::translate(cx - offset, cy - offset)),
            );
        }
        report.cursor = (cx, cy);

        if let (Some(anchor), Some(target)) = (refs.parallax_anchor, refs.parallax_target) {
            if let Some(bounds) = surface.bounds(anchor) {
                if let Some(offset) =
                    parallax_offset(bounds, viewport, self.config.parallax_damping)
                {
                    self.parallax = offset;
                    surface.apply(target, StyleUpdate::Transform(Transform::translate(offset, 0.0)));
                    report.parallax = Some(offset);
                }
            }
        }

        if state.mode == LayoutMode::Horizontal {
            if let Some(thumb) = refs.progress_thumb {
                if let Some(offset) = progress_offset(
                    state.scroll.current_x,
                    state.scroll.max_scroll(),
                    self.config.progress_track_length,
                ) {
                    surface.apply(thumb, StyleUpdate::Transform(Transform::translate(offset, 0.0)));
                    report.progress = Some(offset);
                }
            }
        }

        trace!(?report, "Frame");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;
    use crate::surface::ElementId;

    const CONTAINER: ElementId = ElementId(1);
    const CURSOR: ElementId = ElementId(2);
    const ANCHOR: ElementId = ElementId(3);
    const TARGET: ElementId = ElementId(4);
    const THUMB: ElementId = ElementId(5);

    fn refs() -> Refs {
        Refs {
            container: Some(CONTAINER),
            cursor: Some(CURSOR),
            parallax_anchor: Some(ANCHOR),
            parallax_target: Some(TARGET),
            progress_thumb: Some(THUMB),
            ..Default::default()
        }
    }

    fn horizontal(max_scroll: f64) -> MotionState {
        let mut state = MotionState::default();
        state.scroll.set_max_scroll(max_scroll);
        state
    }

    #[test]
    fn test_progress_offset() {
        assert_eq!(progress_offset(250.0, 500.0, 224.0), Some(112.0));
        assert_eq!(progress_offset(900.0, 500.0, 224.0), Some(224.0));
        assert_eq!(progress_offset(10.0, 0.0, 224.0), None);
    }

    #[test]
    fn test_zoom_for() {
        let config = MotionConfig::default();
        assert_eq!(zoom_for(0.0, 1000.0, &config), 1.5);
        assert_eq!(zoom_for(250.0, 1000.0, &config), 1.0);
        assert_eq!(zoom_for(4000.0, 1000.0, &config), 1.0);
        assert!((zoom_for(125.0, 1000.0, &config) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_parallax_offset() {
        let vp = Viewport::new(100.0, 40.0);
        assert_eq!(parallax_offset(Rect::new(40.0, 0.0, 20.0, 5.0), vp, 0.2), Some(10.0));
        assert_eq!(parallax_offset(Rect::new(100.0, 0.0, 20.0, 5.0), vp, 0.2), None);
        assert_eq!(parallax_offset(Rect::new(-30.0, 0.0, 20.0, 5.0), vp, 0.2), None);
    }

    #[test]
    fn test_tick_writes_ordered_container_transform() {
        let mut surface = RecordingSurface::new(1000.0, 600.0);
        let mut frame = FrameLoop::new(MotionConfig::default());
        let mut state = horizontal(3000.0);
        state.scroll.scroll_to(1000.0);

        let report = frame.tick(&mut state, &refs(), &mut surface);

        let scroll_x = report.scroll_x.unwrap();
        assert!((scroll_x - 60.0).abs() < 1e-9);
        let expected = Transform::container(scroll_x, report.zoom.unwrap(), report.skew);
        assert_eq!(surface.last_transform(CONTAINER), Some(&expected));
        assert!(report.skew > 0.0);
    }

    #[test]
    fn test_tick_converges_without_overshoot() {
        let mut surface = RecordingSurface::new(1000.0, 600.0);
        let mut frame = FrameLoop::new(MotionConfig::default());
        let mut state = horizontal(3000.0);
        state.scroll.scroll_to(500.0);

        let mut last = 0.0;
        for _ in 0..400 {
            let x = frame.tick(&mut state, &refs(), &mut surface).scroll_x.unwrap();
            assert!(x > last && x <= 500.0);
            last = x;
        }
        assert!(500.0 - last < 0.01);
    }

    #[test]
    fn test_missing_refs_are_skipped() {
        let mut surface = RecordingSurface::new(1000.0, 600.0);
        let mut frame = FrameLoop::new(MotionConfig::default());
        let mut state = horizontal(3000.0);
        state.scroll.scroll_to(400.0);

        let report = frame.tick(&mut state, &Refs::default(), &mut surface);
        assert!(surface.updates.is_empty());
        // State still advances
        assert!(report.scroll_x.unwrap() > 0.0);
    }

    #[test]
    fn test_progress_written_only_when_scrollable() {
        let mut surface = RecordingSurface::new(1000.0, 600.0);
        let mut frame = FrameLoop::new(MotionConfig::default());

        let mut empty = horizontal(0.0);
        let report = frame.tick(&mut empty, &refs(), &mut surface);
        assert_eq!(report.progress, None);
        assert_eq!(surface.transforms_for(THUMB), 0);

        let mut state = horizontal(500.0);
        state.scroll.current_x = 250.0;
        state.scroll.scroll_to(250.0);
        let config = MotionConfig {
            progress_track_length: 224.0,
            ..Default::default()
        };
        let mut frame = FrameLoop::new(config);
        let report = frame.tick(&mut state, &refs(), &mut surface);
        assert_eq!(report.progress, Some(112.0));
        assert_eq!(surface.last_transform(THUMB), Some(&Transform::translate(112.0, 0.0)));
    }

    #[test]
    fn test_vertical_mode_skips_scroll_steps() {
        let mut surface = RecordingSurface::new(80.0, 40.0);
        let mut frame = FrameLoop::new(MotionConfig::default());
        let mut state = horizontal(500.0);
        state.mode = LayoutMode::Vertical;
        state.scroll.scroll_to(300.0);
        state.cursor.set_raw(10.0, 10.0);

        let first = frame.tick(&mut state, &refs(), &mut surface);
        let second = frame.tick(&mut state, &refs(), &mut surface);

        assert_eq!(first.scroll_x, None);
        assert_eq!(first.zoom, None);
        assert_eq!(second.progress, None);
        assert_eq!(state.scroll.current_x, 0.0);
        // Identity written once on entering vertical mode
        assert_eq!(surface.transforms_for(CONTAINER), 1);
        assert_eq!(surface.last_transform(CONTAINER), Some(&Transform::identity()));
        // Cursor still eases
        assert!(second.cursor.0 > first.cursor.0);
    }

    #[test]
    fn test_cursor_offset_is_applied() {
        let mut surface = RecordingSurface::new(100.0, 40.0);
        let config = MotionConfig {
            cursor_factor: 1.0,
            cursor_offset: 10.0,
            ..Default::default()
        };
        let mut frame = FrameLoop::new(config);
        let mut state = horizontal(0.0);
        state.cursor.set_raw(50.0, 20.0);
        frame.tick(&mut state, &refs(), &mut surface);
        assert_eq!(surface.last_transform(CURSOR), Some(&Transform::translate(40.0, 10.0)));
    }

    #[test]
    fn test_parallax_retained_while_off_screen() {
        let mut surface = RecordingSurface::new(100.0, 40.0);
        let mut frame = FrameLoop::new(MotionConfig::default());
        let mut state = horizontal(0.0);

        surface.bounds.insert(ANCHOR, Rect::new(40.0, 0.0, 20.0, 4.0));
        let report = frame.tick(&mut state, &refs(), &mut surface);
        assert_eq!(report.parallax, Some(10.0));

        surface.bounds.insert(ANCHOR, Rect::new(300.0, 0.0, 20.0, 4.0));
        let report = frame.tick(&mut state, &refs(), &mut surface);
        assert_eq!(report.parallax, None);
        assert_eq!(frame.parallax(), 10.0);
        assert_eq!(surface.transforms_for(TARGET), 1);
    }
}
