//! Terminal render surface
//!
//! Stores the style updates the engine writes and answers its geometry
//! queries from the current [`Scene`]. Widgets read the stored styles back
//! when drawing.

use std::collections::{BTreeSet, HashMap};

use panorama_core::motion::{Affine, Transform};
use panorama_core::{ElementId, Rect, RenderSurface, StyleUpdate, Viewport};

use crate::scene::{ids, Scene};

/// Accumulated style of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStyle {
    pub transform: Transform,
    pub classes: BTreeSet<&'static str>,
    pub text: Option<String>,
}

/// A container child after projection to screen cells
///
/// Rows keep their height; `shear` is the horizontal shift per row that the
/// container skew adds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub shear: f64,
}

impl Projected {
    /// Axis-aligned box covering the sheared shape
    pub fn bounds(&self) -> Rect {
        let drift = self.shear * self.height;
        let left = self.x.min(self.x + drift);
        let right = self.x.max(self.x + drift) + self.width;
        Rect::new(left, self.y, right - left, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct TerminalSurface {
    scene: Scene,
    styles: HashMap<ElementId, ElementStyle>,
    vertical_offset: f64,
}

impl TerminalSurface {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            styles: HashMap::new(),
            vertical_offset: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replace the layout; element styles are kept
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
    }

    pub fn style(&self, id: ElementId) -> Option<&ElementStyle> {
        self.styles.get(&id)
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.styles
            .get(&id)
            .is_some_and(|style| style.classes.contains(class))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.styles.get(&id).and_then(|style| style.text.as_deref())
    }

    /// Translation carried by an element's transform
    pub fn translation(&self, id: ElementId) -> Option<(f64, f64)> {
        let style = self.styles.get(&id)?;
        if style.transform.is_identity() {
            return None;
        }
        Some(style.transform.matrix().map_point(0.0, 0.0))
    }

    /// Rows the native vertical scroll has moved the content up by
    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    pub fn set_vertical_offset(&mut self, rows: f64) {
        self.vertical_offset = rows.max(0.0);
    }

    /// Screen matrix for container children
    ///
    /// The container transform is applied about the viewport's middle row so
    /// zoom grows the strip up and down evenly.
    pub fn container_matrix(&self) -> Affine {
        let origin_y = self.scene.viewport.height / 2.0;
        let container = self
            .styles
            .get(&ids::CONTAINER)
            .map(|style| style.transform.matrix())
            .unwrap_or(Affine::IDENTITY);

        Affine::new(1.0, 0.0, 0.0, 1.0, 0.0, origin_y)
            .then_apply(&container)
            .then_apply(&Affine::new(
                1.0,
                0.0,
                0.0,
                1.0,
                0.0,
                -origin_y - self.vertical_offset,
            ))
    }

    /// Project a container-space rectangle to screen cells
    pub fn project(&self, rect: Rect) -> Projected {
        let m = self.container_matrix();
        let (x, y) = m.map_point(rect.x, rect.y);
        let (right, _) = m.map_point(rect.right(), rect.y);
        let (bottom_x, bottom) = m.map_point(rect.x, rect.bottom());
        let height = bottom - y;
        let shear = if height.abs() > f64::EPSILON {
            (bottom_x - x) / height
        } else {
            0.0
        };
        Projected {
            x,
            y,
            width: right - x,
            height,
            shear,
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn viewport(&self) -> Viewport {
        self.scene.viewport
    }

    fn scroll_width(&self, id: ElementId) -> Option<f64> {
        (id == ids::CONTAINER).then_some(self.scene.content_width)
    }

    fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.scene
            .base_rect(id)
            .map(|rect| self.project(rect).bounds())
    }

    fn apply(&mut self, id: ElementId, update: StyleUpdate) {
        let style = self.styles.entry(id).or_default();
        match update {
            StyleUpdate::Transform(transform) => style.transform = transform,
            StyleUpdate::ClassOn(class) => {
                style.classes.insert(class);
            }
            StyleUpdate::ClassOff(class) => {
                style.classes.remove(class);
            }
            StyleUpdate::Text(text) => style.text = Some(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorama_core::content::{Panel, PanelKind, Portfolio};
    use panorama_core::surface::class;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn surface() -> TerminalSurface {
        let portfolio = Portfolio {
            panels: vec![
                Panel::new(PanelKind::Hero, "Hi", "").with_width(40),
                Panel::new(PanelKind::Contact, "Mail", "").with_width(40),
            ],
        };
        TerminalSurface::new(Scene::layout(
            &portfolio,
            Viewport::new(120.0, 30.0),
            100.0,
            12.0,
        ))
    }

    #[test]
    fn test_identity_projection_matches_layout() {
        let surface = surface();
        let rect = surface.scene().panels[0].rect;
        assert_eq!(surface.bounds(ids::panel(0)), Some(rect));
        assert_eq!(surface.scroll_width(ids::CONTAINER), Some(87.0));
        assert_eq!(surface.scroll_width(ids::CURSOR), None);
    }

    #[test]
    fn test_translate_moves_children() {
        let mut surface = surface();
        surface.apply(ids::CONTAINER, StyleUpdate::Transform(Transform::container(30.0, 1.0, 0.0)));
        let bounds = surface.bounds(ids::panel(1)).unwrap();
        assert!(close(bounds.x, 45.0 - 30.0));
        assert!(close(bounds.width, 40.0));
    }

    #[test]
    fn test_zoom_scales_about_middle_row() {
        let mut surface = surface();
        surface.apply(ids::CONTAINER, StyleUpdate::Transform(Transform::container(0.0, 1.5, 0.0)));
        let p = surface.project(Rect::new(2.0, 1.0, 40.0, 28.0));
        assert!(close(p.x, 3.0));
        assert!(close(p.width, 60.0));
        // Middle row 15 stays put: 15 + (1 - 15) * 1.5
        assert!(close(p.y, -6.0));
        assert!(close(p.height, 42.0));
    }

    #[test]
    fn test_skew_shears_rows() {
        let mut surface = surface();
        surface.apply(ids::CONTAINER, StyleUpdate::Transform(Transform::container(0.0, 1.0, 45.0)));
        let p = surface.project(Rect::new(0.0, 0.0, 10.0, 4.0));
        assert!(close(p.shear, 1.0));
        let bounds = p.bounds();
        assert!(close(bounds.width, 14.0));
    }

    #[test]
    fn test_vertical_offset_lifts_children() {
        let mut surface = surface();
        surface.set_vertical_offset(5.0);
        let bounds = surface.bounds(ids::panel(0)).unwrap();
        assert!(close(bounds.y, 1.0 - 5.0));
        surface.set_vertical_offset(-3.0);
        assert_eq!(surface.vertical_offset(), 0.0);
    }

    #[test]
    fn test_style_updates_accumulate() {
        let mut surface = surface();
        surface.apply(ids::CURSOR, StyleUpdate::Transform(Transform::translate(4.0, 7.0)));
        surface.apply(ids::CURSOR, StyleUpdate::ClassOn(class::HOVER));
        assert!(surface.has_class(ids::CURSOR, class::HOVER));
        assert_eq!(surface.translation(ids::CURSOR), Some((4.0, 7.0)));

        surface.apply(ids::CURSOR, StyleUpdate::ClassOff(class::HOVER));
        assert!(!surface.has_class(ids::CURSOR, class::HOVER));

        surface.apply(ids::COPY_BUTTON, StyleUpdate::Text("Copied!".into()));
        assert_eq!(surface.text(ids::COPY_BUTTON), Some("Copied!"));
        assert_eq!(surface.translation(ids::COPY_BUTTON), None);
    }
}
