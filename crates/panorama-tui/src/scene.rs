//! Element layout for the terminal host
//!
//! The scene assigns element ids and base rectangles to everything the
//! animation engine addresses. Panel and button rectangles are in container
//! coordinates; the surface projects them through the container transform.

use panorama_core::content::{Panel, PanelKind, Portfolio};
use panorama_core::motion::LayoutMode;
use panorama_core::{ElementId, Rect, Refs, Viewport};

use crate::text::wrap;

pub mod ids {
    use panorama_core::ElementId;

    pub const CONTAINER: ElementId = ElementId(1);
    pub const CURSOR: ElementId = ElementId(2);
    pub const PROGRESS_THUMB: ElementId = ElementId(3);
    pub const COPY_BUTTON: ElementId = ElementId(4);
    pub const PARALLAX_TARGET: ElementId = ElementId(5);

    const PANEL_BASE: u32 = 100;

    pub fn panel(index: usize) -> ElementId {
        ElementId(PANEL_BASE + index as u32)
    }

    pub fn panel_index(id: ElementId) -> Option<usize> {
        id.0.checked_sub(PANEL_BASE).map(|i| i as usize)
    }
}

/// Outer margin around the strip, in columns
pub const MARGIN: f64 = 2.0;
/// Gap between panels in the horizontal strip
pub const GAP: f64 = 3.0;
/// Rows reserved inside a panel besides its body (borders, kind line, spacing)
const PANEL_CHROME_ROWS: f64 = 5.0;
/// Shortest panel the horizontal strip will lay out
const MIN_PANEL_HEIGHT: f64 = 8.0;

/// Columns available for body text inside a panel of `width`
pub fn text_width(width: f64) -> usize {
    (width - 4.0).max(1.0) as usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelSlot {
    pub id: ElementId,
    pub index: usize,
    pub kind: PanelKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub mode: LayoutMode,
    pub viewport: Viewport,
    pub panels: Vec<PanelSlot>,
    pub copy_button: Option<Rect>,
    pub content_width: f64,
    pub content_height: f64,
}

impl Scene {
    /// Lay out `portfolio` for a viewport
    ///
    /// `button_width` is the widest label the copy button will show.
    pub fn layout(
        portfolio: &Portfolio,
        viewport: Viewport,
        breakpoint: f64,
        button_width: f64,
    ) -> Self {
        let mode = LayoutMode::for_width(viewport.width, breakpoint);
        let panels = match mode {
            LayoutMode::Horizontal => horizontal_slots(&portfolio.panels, viewport),
            LayoutMode::Vertical => vertical_slots(&portfolio.panels, viewport),
        };

        let content_width = match mode {
            LayoutMode::Horizontal => panels
                .last()
                .map(|slot| slot.rect.right() + MARGIN)
                .unwrap_or(viewport.width),
            LayoutMode::Vertical => viewport.width,
        };
        let content_height = panels
            .last()
            .map(|slot| slot.rect.bottom() + 1.0)
            .unwrap_or(viewport.height);

        let copy_button = panels
            .iter()
            .find(|slot| slot.kind.is_interactive())
            .map(|slot| {
                let width = button_width.min(slot.rect.width - 4.0).max(1.0);
                Rect::new(slot.rect.x + 2.0, slot.rect.bottom() - 2.0, width, 1.0)
            });

        Self {
            mode,
            viewport,
            panels,
            copy_button,
            content_width,
            content_height,
        }
    }

    pub fn panel(&self, id: ElementId) -> Option<&PanelSlot> {
        let index = ids::panel_index(id)?;
        self.panels.get(index).filter(|slot| slot.id == id)
    }

    pub fn hero(&self) -> Option<ElementId> {
        self.panels
            .iter()
            .find(|slot| slot.kind == PanelKind::Hero)
            .map(|slot| slot.id)
    }

    /// Panel whose position drives the parallax layer
    pub fn parallax_anchor(&self) -> Option<ElementId> {
        self.panels
            .iter()
            .find(|slot| slot.kind == PanelKind::Project)
            .or_else(|| self.panels.first())
            .map(|slot| slot.id)
    }

    /// Untransformed rectangle of a container child
    pub fn base_rect(&self, id: ElementId) -> Option<Rect> {
        if id == ids::COPY_BUTTON {
            return self.copy_button;
        }
        self.panel(id).map(|slot| slot.rect)
    }

    /// Rows the vertical layout overflows the viewport by
    pub fn vertical_overflow(&self) -> f64 {
        match self.mode {
            LayoutMode::Vertical => (self.content_height - self.viewport.height).max(0.0),
            LayoutMode::Horizontal => 0.0,
        }
    }

    pub fn refs(&self, show_cursor: bool) -> Refs {
        let anchor = self.parallax_anchor();
        Refs {
            container: Some(ids::CONTAINER),
            cursor: show_cursor.then_some(ids::CURSOR),
            parallax_anchor: anchor,
            parallax_target: anchor.map(|_| ids::PARALLAX_TARGET),
            progress_thumb: Some(ids::PROGRESS_THUMB),
            hero: self.hero(),
            copy_button: self.copy_button.map(|_| ids::COPY_BUTTON),
        }
    }
}

fn horizontal_slots(panels: &[Panel], viewport: Viewport) -> Vec<PanelSlot> {
    let height = (viewport.height - 2.0).max(MIN_PANEL_HEIGHT);
    let mut x = MARGIN;

    panels
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let width = panel.width as f64;
            let slot = PanelSlot {
                id: ids::panel(index),
                index,
                kind: panel.kind,
                rect: Rect::new(x, 1.0, width, height),
            };
            x += width + GAP;
            slot
        })
        .collect()
}

fn vertical_slots(panels: &[Panel], viewport: Viewport) -> Vec<PanelSlot> {
    let width = (viewport.width - 2.0 * MARGIN).max(10.0);
    let mut y = 1.0;

    panels
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let height = vertical_height(panel, width);
            let slot = PanelSlot {
                id: ids::panel(index),
                index,
                kind: panel.kind,
                rect: Rect::new(MARGIN, y, width, height),
            };
            y += height + 1.0;
            slot
        })
        .collect()
}

/// Height a panel needs when stacked at `width`
fn vertical_height(panel: &Panel, width: f64) -> f64 {
    let body = wrap(&panel.body, text_width(width)).len() as f64;
    let tags = if panel.tags.is_empty() { 0.0 } else { 1.0 };
    let link = if panel.link.is_some() { 1.0 } else { 0.0 };
    let button = if panel.kind.is_interactive() { 2.0 } else { 0.0 };
    PANEL_CHROME_ROWS + body + tags + link + button
}
