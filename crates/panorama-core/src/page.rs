//! Page lifecycle
//!
//! `Page` is the single owner of all animation state. Input handlers write
//! targets through [`Page::dispatch`], the frame loop is driven through
//! [`Page::frame`], and deferred work comes back through [`Page::handle_deferred`].
//! [`Page::unmount`] tears everything down: the pending frame, every
//! listener, every reveal observer and every timer.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::clipboard::{CopyButton, CopyOutcome};
use crate::config::{AppConfig, TimingConfig};
use crate::hover::HoverController;
use crate::motion::input::{handle_pointer_move, handle_wheel};
use crate::motion::layout::{measure, LayoutMode};
use crate::motion::{FrameLoop, FrameReport, MotionState, WheelOutcome};
use crate::reveal::{RevealRegistry, RevealStyle};
use crate::surface::{class, ElementId, Refs, RenderSurface, StyleUpdate};
use crate::timers::{Deferred, DeferredTimers, TimerId};

/// Handle of a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

/// Single pending frame request, re-requested after every tick
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next: u64,
    pending: Option<FrameRequest>,
}

impl FrameScheduler {
    pub fn request(&mut self) -> FrameRequest {
        if let Some(pending) = self.pending {
            return pending;
        }
        self.next += 1;
        let request = FrameRequest(self.next);
        self.pending = Some(request);
        request
    }

    /// Consume the pending request, if any
    pub fn take(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn cancel(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Event listeners a mounted page registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Listener {
    PointerMove,
    Wheel,
    Resize,
}

/// Events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    PointerMove { x: f64, y: f64 },
    Wheel { delta: f64 },
    Resize,
}

impl PageEvent {
    fn listener(&self) -> Listener {
        match self {
            PageEvent::PointerMove { .. } => Listener::PointerMove,
            PageEvent::Wheel { .. } => Listener::Wheel,
            PageEvent::Resize => Listener::Resize,
        }
    }
}

/// How the page handled an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    Wheel(WheelOutcome),
    /// No listener registered for the event
    Unhandled,
}

pub struct Page {
    timing: TimingConfig,
    reveal_style: RevealStyle,
    motion: MotionState,
    frame_loop: FrameLoop,
    frames: FrameScheduler,
    listeners: BTreeSet<Listener>,
    refs: Refs,
    reveals: RevealRegistry,
    hover: HoverController,
    copy: CopyButton,
    timers: DeferredTimers,
    copy_revert: Option<TimerId>,
    intro_at: Option<Instant>,
    mounted: bool,
}

impl Page {
    /// Create an unmounted page and the channel its deferred work arrives on
    pub fn new(config: &AppConfig, refs: Refs) -> (Self, mpsc::UnboundedReceiver<Deferred>) {
        let (timers, deferred_rx) = DeferredTimers::new();
        let page = Self {
            timing: config.timing.clone(),
            reveal_style: RevealStyle::from(&config.reveal),
            motion: MotionState::default(),
            frame_loop: FrameLoop::new(config.motion.clone()),
            frames: FrameScheduler::default(),
            listeners: BTreeSet::new(),
            refs,
            reveals: RevealRegistry::new(),
            hover: HoverController::new(),
            copy: CopyButton::new(&config.clipboard),
            timers,
            copy_revert: None,
            intro_at: None,
            mounted: false,
        };
        (page, deferred_rx)
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.refs
    }

    pub fn reveals(&self) -> &RevealRegistry {
        &self.reveals
    }

    pub fn reveals_mut(&mut self) -> &mut RevealRegistry {
        &mut self.reveals
    }

    pub fn reveal_style(&self) -> &RevealStyle {
        &self.reveal_style
    }

    pub fn hover(&self) -> &HoverController {
        &self.hover
    }

    pub fn hover_mut(&mut self) -> &mut HoverController {
        &mut self.hover
    }

    pub fn copy_button(&self) -> &CopyButton {
        &self.copy
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn mode(&self) -> LayoutMode {
        self.motion.mode
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn frame_pending(&self) -> bool {
        self.frames.is_pending()
    }

    pub fn has_listener(&self, listener: Listener) -> bool {
        self.listeners.contains(&listener)
    }

    /// Instant the intro animation started
    pub fn intro_started(&self) -> Option<Instant> {
        self.intro_at
    }

    /// Number of deferred timers still waiting
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Register listeners, measure, start the frame loop and schedule
    /// deferred initialization
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self, surface: &mut dyn RenderSurface) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        self.listeners
            .extend([Listener::PointerMove, Listener::Wheel, Listener::Resize]);
        self.remeasure(surface);
        if let Some(button) = self.refs.copy_button {
            surface.apply(button, StyleUpdate::Text(self.copy.label().to_string()));
        }
        self.frames.request();

        for delay in self.timing.remeasure_delays_ms.clone() {
            self.timers
                .schedule(Duration::from_millis(delay), Deferred::Remeasure);
        }
        self.timers.schedule(
            Duration::from_millis(self.timing.hover_delay_ms),
            Deferred::AttachHover,
        );
        self.timers.schedule(
            Duration::from_millis(self.timing.intro_delay_ms),
            Deferred::Intro,
        );

        info!(
            mode = ?self.motion.mode,
            max_scroll = self.motion.scroll.max_scroll(),
            reveals = self.reveals.observing_count(),
            "Page mounted"
        );
    }

    /// Cancel the frame, remove listeners, disconnect observers and abort timers
    pub fn unmount(&mut self, surface: &mut dyn RenderSurface) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        self.frames.cancel();
        self.listeners.clear();
        self.hover.detach(surface, self.refs.cursor);
        self.reveals.disconnect_all();
        self.timers.cancel_all();
        self.copy_revert = None;

        info!("Page unmounted");
    }

    /// Route a host event to its listener
    pub fn dispatch(&mut self, event: PageEvent, surface: &mut dyn RenderSurface) -> Dispatch {
        if !self.listeners.contains(&event.listener()) {
            return Dispatch::Unhandled;
        }
        match event {
            PageEvent::PointerMove { x, y } => {
                handle_pointer_move(&mut self.motion.cursor, x, y);
                self.hover.pointer_at(x, y, surface, self.refs.cursor);
                Dispatch::Handled
            }
            PageEvent::Wheel { delta } => {
                Dispatch::Wheel(handle_wheel(&mut self.motion.scroll, self.motion.mode, delta))
            }
            PageEvent::Resize => {
                self.remeasure(surface);
                Dispatch::Handled
            }
        }
    }

    /// Keyboard scrolling; shares the wheel path
    pub fn scroll_by(&mut self, delta: f64) -> WheelOutcome {
        if !self.mounted {
            return WheelOutcome::Passthrough;
        }
        handle_wheel(&mut self.motion.scroll, self.motion.mode, delta)
    }

    pub fn scroll_to_start(&mut self) {
        if self.mounted && self.motion.mode == LayoutMode::Horizontal {
            self.motion.scroll.scroll_to(0.0);
        }
    }

    pub fn scroll_to_end(&mut self) {
        if self.mounted && self.motion.mode == LayoutMode::Horizontal {
            let max = self.motion.scroll.max_scroll();
            self.motion.scroll.scroll_to(max);
        }
    }

    /// Run one tick if a frame is pending, then request the next one
    pub fn frame(&mut self, surface: &mut dyn RenderSurface) -> Option<FrameReport> {
        self.frames.take()?;
        let report = self.frame_loop.tick(&mut self.motion, &self.refs, surface);
        if self.mounted {
            // Content moves under a resting pointer too
            let (x, y) = (self.motion.cursor.raw_x, self.motion.cursor.raw_y);
            self.hover.pointer_at(x, y, surface, self.refs.cursor);
            self.frames.request();
        }
        Some(report)
    }

    /// Sample reveal observers against the surface
    pub fn observe(&mut self, surface: &mut dyn RenderSurface, now: Instant) -> Vec<ElementId> {
        if !self.mounted {
            return Vec::new();
        }
        self.reveals.sample_surface(surface, now)
    }

    /// Handle a deferred timer; ignored after teardown
    pub fn handle_deferred(
        &mut self,
        deferred: Deferred,
        surface: &mut dyn RenderSurface,
        now: Instant,
    ) {
        if !self.mounted {
            debug!(?deferred, "Deferred work dropped after unmount");
            return;
        }
        match deferred {
            Deferred::Remeasure => self.remeasure(surface),
            Deferred::AttachHover => {
                self.hover.attach();
                let (x, y) = (self.motion.cursor.raw_x, self.motion.cursor.raw_y);
                self.hover.pointer_at(x, y, surface, self.refs.cursor);
            }
            Deferred::Intro => {
                self.intro_at = Some(now);
                if let Some(hero) = self.refs.hero {
                    surface.apply(hero, StyleUpdate::ClassOn(class::INTRO));
                }
            }
            Deferred::RevertCopyLabel(id) if self.copy_revert == Some(id) => {
                self.copy_revert = None;
                self.copy.revert(surface, self.refs.copy_button);
            }
            Deferred::RevertCopyLabel(id) => {
                debug!(?id, "Stale copy label revert ignored");
            }
        }
    }

    /// Text to hand to the clipboard, or `None` after teardown
    pub fn copy_request(&self) -> Option<String> {
        self.mounted.then(|| self.copy.text().to_string())
    }

    /// Apply the result of a clipboard write
    pub fn finish_copy(&mut self, outcome: &CopyOutcome, surface: &mut dyn RenderSurface) {
        if !self.mounted {
            return;
        }
        if let Some(delay) = self.copy.complete(outcome, surface, self.refs.copy_button) {
            if let Some(previous) = self.copy_revert.take() {
                self.timers.cancel(previous);
            }
            self.copy_revert = Some(self.timers.schedule_with(delay, Deferred::RevertCopyLabel));
        }
    }

    fn remeasure(&mut self, surface: &mut dyn RenderSurface) {
        let Some(metrics) = measure(surface, self.refs.container) else {
            return;
        };
        let breakpoint = self.frame_loop.config().vertical_breakpoint;
        let mode = LayoutMode::for_width(metrics.viewport.width, breakpoint);
        if mode != self.motion.mode {
            info!(?mode, width = metrics.viewport.width, "Layout mode changed");
        }
        self.motion.layout = metrics;
        self.motion.mode = mode;
        self.motion.scroll.set_max_scroll(metrics.max_scroll());
    }
}
