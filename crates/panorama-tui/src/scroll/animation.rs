//! L3 Molecular Layer: Scroll animation controller

use std::time::{Duration, Instant};

use panorama_core::motion::lerp::progress;
use panorama_core::motion::{lerp, EasingType, EasingTypeExt};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
}

/// Duration-based scroll animator for row offsets
///
/// Queue movement with `scroll_by()` or `scroll_to()`, then call `update()`
/// once per frame to advance the interpolated position.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    duration: Duration,
    easing: EasingType,
    current: u16,
    /// Deltas queued since the last update
    pending_delta: i32,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(150), EasingType::Cubic)
    }
}

impl ScrollAnimator {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            animation: None,
            duration,
            easing,
            current: 0,
            pending_delta: 0,
        }
    }

    /// Smooth scrolling is off when the duration is zero or easing is `None`
    pub fn is_smooth(&self) -> bool {
        !self.duration.is_zero() && self.easing != EasingType::None
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Animation running or deltas queued
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0
    }

    /// Position the current animation ends at
    pub fn target(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> u16 {
        self.current
    }

    /// Jump without animating
    pub fn set(&mut self, rows: u16) {
        self.animation = None;
        self.current = rows;
        self.pending_delta = 0;
    }

    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);
        self.pending_delta = 0;
        self.start(target, now);
    }

    /// Queue a relative scroll (positive = down)
    pub fn scroll_by(&mut self, delta: i32) {
        self.pending_delta += delta;
    }

    /// Advance and return the current position
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if self.pending_delta != 0 {
            let target = (self.target() as i32 + self.pending_delta).clamp(0, max_scroll as i32) as u16;
            self.pending_delta = 0;
            self.start(target, now);
        }

        if let Some(ref anim) = self.animation {
            let t = progress(now.saturating_duration_since(anim.start), self.duration);
            if t >= 1.0 {
                self.current = anim.to;
                self.animation = None;
            } else {
                let eased = self.easing.apply(t);
                self.current = lerp(anim.from as f64, anim.to as f64, eased).round() as u16;
            }
        }

        // Content may have shrunk under a finished scroll
        self.current = self.current.min(max_scroll);
        self.current
    }

    pub fn reset(&mut self) {
        self.set(0);
    }

    fn start(&mut self, target: u16, now: Instant) {
        if !self.is_smooth() {
            self.current = target;
            self.animation = None;
            return;
        }
        if target == self.current {
            self.animation = None;
            return;
        }
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
        });
    }
}
