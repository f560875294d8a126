//! Render surface abstraction
//!
//! The animation engine never draws. It reads geometry from a host-provided
//! `RenderSurface` and writes `StyleUpdate`s back to it, keyed by element id.

use crate::motion::Transform;

/// Host-assigned element identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Axis-aligned rectangle in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Overlapping part of two rectangles, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}

/// Visible viewport size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A single style mutation applied to an element
#[derive(Debug, Clone, PartialEq)]
pub enum StyleUpdate {
    /// Replace the element's transform
    Transform(Transform),
    /// Add a class to the element's class set
    ClassOn(&'static str),
    /// Remove a class from the element's class set
    ClassOff(&'static str),
    /// Replace the element's text content
    Text(String),
}

/// Classes written by the engine
pub mod class {
    /// Cursor is over an interactive element
    pub const HOVER: &str = "hover";
    /// Reveal transition has been triggered
    pub const REVEALED: &str = "revealed";
    /// Intro animation has started
    pub const INTRO: &str = "intro";
}

/// Host-side layout engine
pub trait RenderSurface {
    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Total scrollable width of an element's content
    fn scroll_width(&self, id: ElementId) -> Option<f64>;

    /// Bounding rectangle of an element relative to the viewport
    fn bounds(&self, id: ElementId) -> Option<Rect>;

    /// Apply a style mutation
    fn apply(&mut self, id: ElementId, update: StyleUpdate);
}

/// Named element references the page writes to
///
/// A `None` slot means the element is not attached yet; the steps that need
/// it are skipped for that frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Refs {
    /// Horizontally scrolling panel strip
    pub container: Option<ElementId>,
    /// Custom cursor
    pub cursor: Option<ElementId>,
    /// Element whose position drives the parallax offset
    pub parallax_anchor: Option<ElementId>,
    /// Element that receives the parallax offset
    pub parallax_target: Option<ElementId>,
    /// Progress indicator thumb
    pub progress_thumb: Option<ElementId>,
    /// Hero element marked by the intro trigger
    pub hero: Option<ElementId>,
    /// Copy-to-clipboard button
    pub copy_button: Option<ElementId>,
}
