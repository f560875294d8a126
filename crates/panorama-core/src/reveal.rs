//! One-shot reveal-on-intersect
//!
//! A reveal starts `Pending` and flips to `Revealed` the first time its
//! element's intersection ratio reaches the threshold. The observer
//! subscription is dropped on that transition, so later samples (including
//! the element scrolling back out of view) cannot hide it again.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::RevealConfig;
use crate::motion::lerp::progress;
use crate::motion::{EasingType, EasingTypeExt};
use crate::surface::{class, ElementId, Rect, RenderSurface, StyleUpdate, Viewport};

/// Reveal lifecycle; the only legal transition is `Pending → Revealed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed { at: Instant },
}

/// Timing and entering-state parameters of the reveal transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub duration: Duration,
    pub easing: EasingType,
    /// Vertical offset of the entering state
    pub offset: f64,
    /// Blur radius of the entering state
    pub blur: f64,
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self::from(&RevealConfig::default())
    }
}

impl From<&RevealConfig> for RevealStyle {
    fn from(config: &RevealConfig) -> Self {
        Self {
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing,
            offset: config.offset,
            blur: config.blur,
        }
    }
}

/// Visual properties of a reveal at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealVisual {
    pub opacity: f64,
    pub translate_y: f64,
    pub blur: f64,
}

impl RevealVisual {
    pub fn entering(style: &RevealStyle) -> Self {
        Self {
            opacity: 0.0,
            translate_y: style.offset,
            blur: style.blur,
        }
    }

    pub const REVEALED: RevealVisual = RevealVisual {
        opacity: 1.0,
        translate_y: 0.0,
        blur: 0.0,
    };

    /// True once the transition has fully settled
    pub fn is_settled(&self) -> bool {
        *self == Self::REVEALED
    }
}

/// Reveal state of a single element
#[derive(Debug, Clone, PartialEq)]
pub struct Reveal {
    threshold: f64,
    delay: Duration,
    modifier: Option<String>,
    state: RevealState,
}

impl Reveal {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            delay: Duration::ZERO,
            modifier: None,
            state: RevealState::Pending,
        }
    }

    /// Delay between the trigger and the start of the transition
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Extra style class for the host
    pub fn with_modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        matches!(self.state, RevealState::Revealed { .. })
    }

    /// Feed an intersection sample; returns true only on the transition
    pub fn observe(&mut self, ratio: f64, now: Instant) -> bool {
        match self.state {
            RevealState::Revealed { .. } => false,
            RevealState::Pending if ratio >= self.threshold => {
                self.state = RevealState::Revealed { at: now };
                true
            }
            RevealState::Pending => false,
        }
    }

    /// Visual state at `now`
    pub fn visual(&self, now: Instant, style: &RevealStyle) -> RevealVisual {
        let RevealState::Revealed { at } = self.state else {
            return RevealVisual::entering(style);
        };
        let elapsed = now.saturating_duration_since(at);
        if elapsed < self.delay {
            return RevealVisual::entering(style);
        }
        let t = style.easing.apply(progress(elapsed - self.delay, style.duration));
        RevealVisual {
            opacity: t,
            translate_y: style.offset * (1.0 - t),
            blur: style.blur * (1.0 - t),
        }
    }
}

/// Fraction of an element's area inside the viewport
pub fn intersection_ratio(bounds: Rect, viewport: Viewport) -> f64 {
    let area = bounds.area();
    if area <= 0.0 {
        return 0.0;
    }
    bounds
        .intersection(&viewport.rect())
        .map(|visible| (visible.area() / area).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}

/// Reveals of a page and their observer subscriptions
#[derive(Debug, Default)]
pub struct RevealRegistry {
    reveals: BTreeMap<ElementId, Reveal>,
    observing: BTreeSet<ElementId>,
}

impl RevealRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reveal and start observing its element
    pub fn observe(&mut self, id: ElementId, reveal: Reveal) {
        if !reveal.is_visible() {
            self.observing.insert(id);
        }
        self.reveals.insert(id, reveal);
    }

    pub fn get(&self, id: ElementId) -> Option<&Reveal> {
        self.reveals.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Reveal)> {
        self.reveals.iter().map(|(id, reveal)| (*id, reveal))
    }

    /// Number of elements still observed
    pub fn observing_count(&self) -> usize {
        self.observing.len()
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.observing.contains(&id)
    }

    /// Deliver one sample; returns true if the element revealed
    ///
    /// Samples for elements that are no longer observed are dropped.
    pub fn sample(&mut self, id: ElementId, ratio: f64, now: Instant) -> bool {
        if !self.observing.contains(&id) {
            return false;
        }
        let Some(reveal) = self.reveals.get_mut(&id) else {
            self.observing.remove(&id);
            return false;
        };
        if reveal.observe(ratio, now) {
            self.observing.remove(&id);
            debug!(element = id.0, ratio, "Revealed");
            true
        } else {
            false
        }
    }

    /// Sample every observed element from the surface geometry
    ///
    /// Revealed elements get the `revealed` class. Returns their ids.
    pub fn sample_surface(&mut self, surface: &mut dyn RenderSurface, now: Instant) -> Vec<ElementId> {
        let viewport = surface.viewport();
        let pending: Vec<ElementId> = self.observing.iter().copied().collect();
        let mut revealed = Vec::new();

        for id in pending {
            let Some(bounds) = surface.bounds(id) else {
                continue;
            };
            if self.sample(id, intersection_ratio(bounds, viewport), now) {
                surface.apply(id, StyleUpdate::ClassOn(class::REVEALED));
                revealed.push(id);
            }
        }

        revealed
    }

    /// Drop every observer subscription (page teardown)
    pub fn disconnect_all(&mut self) {
        self.observing.clear();
    }
}
