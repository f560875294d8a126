//! L4 Atomic Layer: animation state records
//!
//! Input handlers only ever write targets; the frame loop is the sole writer
//! of the smoothed values.

use super::lerp::lerp;

/// Horizontal scroll state of the page
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    /// Smoothed scroll position, advanced once per frame
    pub current_x: f64,
    /// Accumulated scroll target, always within `[0, max_scroll]`
    target_x: f64,
    /// Upper scroll bound, never negative
    max_scroll: f64,
    /// Smoothed skew in degrees
    pub skew: f64,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn target_x(&self) -> f64 {
        self.target_x
    }

    #[inline]
    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    /// Replace the scroll bound and re-clamp the target into it
    ///
    /// Negative bounds (content narrower than the viewport) become zero.
    pub fn set_max_scroll(&mut self, max_scroll: f64) {
        self.max_scroll = if max_scroll.is_finite() { max_scroll.max(0.0) } else { 0.0 };
        self.target_x = self.target_x.clamp(0.0, self.max_scroll);
    }

    /// Add a delta to the target, clamped into `[0, max_scroll]`
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_to(self.target_x + delta)
    }

    /// Set the target, clamped into `[0, max_scroll]`
    ///
    /// Non-finite targets are ignored.
    pub fn scroll_to(&mut self, target: f64) -> f64 {
        if target.is_finite() {
            self.target_x = target.clamp(0.0, self.max_scroll);
        }
        self.target_x
    }

    /// Distance still to travel; drives the skew
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.target_x - self.current_x
    }

    /// Ease the current position towards the target
    pub fn ease(&mut self, factor: f64) -> f64 {
        self.current_x = lerp(self.current_x, self.target_x, factor);
        self.current_x
    }

    /// Ease the skew towards `velocity * gain`
    pub fn ease_skew(&mut self, gain: f64, factor: f64) -> f64 {
        let target_skew = self.velocity() * gain;
        self.skew = lerp(self.skew, target_skew, factor);
        self.skew
    }
}

/// Raw and smoothed pointer position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorState {
    pub raw_x: f64,
    pub raw_y: f64,
    pub x: f64,
    pub y: f64,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest pointer position
    #[inline]
    pub fn set_raw(&mut self, x: f64, y: f64) {
        self.raw_x = x;
        self.raw_y = y;
    }

    /// Ease the smoothed position towards the raw position
    pub fn ease(&mut self, factor: f64) -> (f64, f64) {
        self.x = lerp(self.x, self.raw_x, factor);
        self.y = lerp(self.y, self.raw_y, factor);
        (self.x, self.y)
    }

    /// Distance between smoothed and raw position
    pub fn lag(&self) -> f64 {
        (self.raw_x - self.x).hypot(self.raw_y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_clamps() {
        let mut s = ScrollState::new();
        s.set_max_scroll(500.0);
        assert_eq!(s.scroll_by(100.0), 100.0);
        assert_eq!(s.scroll_by(600.0), 500.0);
        assert_eq!(s.scroll_by(-50.0), 450.0);
        assert_eq!(s.scroll_by(-1000.0), 0.0);
    }

    #[test]
    fn test_non_finite_delta_keeps_target() {
        let mut s = ScrollState::new();
        s.set_max_scroll(500.0);
        s.scroll_by(120.0);
        assert_eq!(s.scroll_by(f64::NAN), 120.0);
        assert_eq!(s.scroll_by(f64::INFINITY), 120.0);
        assert_eq!(s.scroll_to(f64::NEG_INFINITY), 120.0);
        assert!(s.target_x().is_finite());
    }

    #[test]
    fn test_negative_max_scroll_is_clamped_to_zero() {
        let mut s = ScrollState::new();
        s.set_max_scroll(-200.0);
        assert_eq!(s.max_scroll(), 0.0);
        assert_eq!(s.scroll_by(30.0), 0.0);
    }

    #[test]
    fn test_shrinking_bound_reclamps_target_only() {
        let mut s = ScrollState::new();
        s.set_max_scroll(500.0);
        s.scroll_to(400.0);
        s.current_x = 390.0;
        s.set_max_scroll(300.0);
        assert_eq!(s.target_x(), 300.0);
        assert_eq!(s.current_x, 390.0);

        // Growing the bound keeps the target where it was
        s.set_max_scroll(800.0);
        assert_eq!(s.target_x(), 300.0);
    }

    #[test]
    fn test_ease_never_overshoots() {
        let mut s = ScrollState::new();
        s.set_max_scroll(1000.0);
        s.scroll_to(800.0);
        let mut prev_gap = s.velocity();
        for _ in 0..300 {
            s.ease(0.06);
            assert!(s.current_x <= s.target_x());
            assert!(s.velocity() < prev_gap);
            prev_gap = s.velocity();
        }
    }

    #[test]
    fn test_skew_follows_velocity_sign() {
        let mut s = ScrollState::new();
        s.set_max_scroll(1000.0);
        s.scroll_to(500.0);
        assert!(s.ease_skew(0.001, 0.1) > 0.0);

        s.current_x = 900.0;
        for _ in 0..100 {
            s.ease_skew(0.001, 0.1);
        }
        assert!(s.skew < 0.0);
    }

    #[test]
    fn test_cursor_converges() {
        let mut c = CursorState::new();
        c.set_raw(500.0, 0.0);
        for _ in 0..30 {
            c.ease(0.15);
        }
        // 500 · 0.85³⁰ ≈ 3.8
        assert!(c.lag() < 5.0, "lag after 30 ticks: {}", c.lag());
        for _ in 0..10 {
            c.ease(0.15);
        }
        assert!(c.lag() < 1.0, "lag after 40 ticks: {}", c.lag());
        assert!(c.x <= c.raw_x);
    }
}
