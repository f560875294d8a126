//! Hover affordance for the custom cursor
//!
//! Handlers are attached late (after content settles) and removed on
//! teardown. While attached, entering an interactive element grows and tints
//! the cursor; leaving reverts it.

use std::collections::BTreeSet;

use tracing::debug;

use crate::surface::{class, ElementId, Rect, RenderSurface, StyleUpdate};

/// Cursor appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(ElementId),
}

#[derive(Debug, Default)]
pub struct HoverController {
    targets: BTreeSet<ElementId>,
    attached: bool,
    state: HoverState,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag an element as interactive
    pub fn register(&mut self, id: ElementId) {
        self.targets.insert(id);
    }

    pub fn is_interactive(&self, id: ElementId) -> bool {
        self.targets.contains(&id)
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Wire enter/leave handlers to every interactive element
    pub fn attach(&mut self) {
        if !self.attached {
            debug!(targets = self.targets.len(), "Hover handlers attached");
        }
        self.attached = true;
    }

    /// Remove all handlers and reset the cursor
    pub fn detach(&mut self, surface: &mut dyn RenderSurface, cursor: Option<ElementId>) {
        if let (HoverState::Hovering(_), Some(cursor)) = (self.state, cursor) {
            surface.apply(cursor, StyleUpdate::ClassOff(class::HOVER));
        }
        self.attached = false;
        self.state = HoverState::Idle;
    }

    /// Pointer entered `id`; returns true if a handler fired
    pub fn pointer_enter(
        &mut self,
        id: ElementId,
        surface: &mut dyn RenderSurface,
        cursor: Option<ElementId>,
    ) -> bool {
        if !self.attached || !self.targets.contains(&id) {
            return false;
        }
        if self.state == HoverState::Hovering(id) {
            return true;
        }
        self.state = HoverState::Hovering(id);
        if let Some(cursor) = cursor {
            surface.apply(cursor, StyleUpdate::ClassOn(class::HOVER));
        }
        true
    }

    /// Pointer left `id`; returns true if a handler fired
    pub fn pointer_leave(
        &mut self,
        id: ElementId,
        surface: &mut dyn RenderSurface,
        cursor: Option<ElementId>,
    ) -> bool {
        if !self.attached || !self.targets.contains(&id) {
            return false;
        }
        if self.state == HoverState::Hovering(id) {
            self.state = HoverState::Idle;
            if let Some(cursor) = cursor {
                surface.apply(cursor, StyleUpdate::ClassOff(class::HOVER));
            }
        }
        true
    }

    /// Interactive element under a point, using the surface's bounds
    pub fn hit_test(&self, surface: &dyn RenderSurface, x: f64, y: f64) -> Option<ElementId> {
        self.targets.iter().copied().find(|id| {
            surface
                .bounds(*id)
                .is_some_and(|bounds: Rect| bounds.contains(x, y))
        })
    }

    /// Derive enter/leave from a raw pointer position
    pub fn pointer_at(
        &mut self,
        x: f64,
        y: f64,
        surface: &mut dyn RenderSurface,
        cursor: Option<ElementId>,
    ) {
        if !self.attached {
            return;
        }
        let hit = self.hit_test(surface, x, y);
        match (self.state, hit) {
            (HoverState::Hovering(current), Some(next)) if current == next => {}
            (HoverState::Hovering(current), next) => {
                self.pointer_leave(current, surface, cursor);
                if let Some(next) = next {
                    self.pointer_enter(next, surface, cursor);
                }
            }
            (HoverState::Idle, Some(next)) => {
                self.pointer_enter(next, surface, cursor);
            }
            (HoverState::Idle, None) => {}
        }
    }
}
