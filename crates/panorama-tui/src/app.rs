use std::sync::Arc;
use std::time::{Duration, Instant};

use panorama_core::clipboard::CopyOutcome;
use panorama_core::content::{PanelKind, Portfolio};
use panorama_core::motion::lerp::progress;
use panorama_core::motion::{EasingTypeExt, FrameReport, LayoutMode, WheelOutcome};
use panorama_core::page::{Dispatch, PageEvent};
use panorama_core::reveal::{Reveal, RevealVisual};
use panorama_core::timers::Deferred;
use panorama_core::{AppConfig, ElementId, Page, RenderSurface, Viewport};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::input::{Action, PointerInput};
use crate::scene::{ids, Scene};
use crate::scroll::ScrollAnimator;
use crate::surface::TerminalSurface;
use crate::text::display_width;
use crate::theme::Theme;

/// Rows below the content area: progress bar and status bar
pub const CHROME_ROWS: u16 = 2;
/// Rows one wheel notch or arrow press moves the stacked layout
const NATIVE_SCROLL_ROWS: i32 = 3;
/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(4);
/// Reveal modifiers: slide up while fading in, or fade in place
const REVEAL_RISE: &str = "rise";
const REVEAL_FADE: &str = "fade";

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Help overlay
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub at: Instant,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub portfolio: Portfolio,
    /// Animation engine for the page
    pub page: Page,
    /// Where the engine writes its styles
    pub surface: TerminalSurface,
    /// Native scroll for the stacked layout
    pub native_scroll: ScrollAnimator,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<StatusMessage>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Values computed by the last animation frame
    pub last_report: FrameReport,
    /// Instant of the last animation frame
    pub frame_time: Instant,
}

/// Engine viewport for a terminal of `width` x `height` cells
pub fn content_viewport(width: u16, height: u16) -> Viewport {
    Viewport::new(width as f64, height.saturating_sub(CHROME_ROWS) as f64)
}

impl App {
    /// Build the app and the channel its deferred work arrives on
    pub fn new(
        config: Arc<AppConfig>,
        portfolio: Portfolio,
        theme: Theme,
        viewport: Viewport,
    ) -> (Self, mpsc::UnboundedReceiver<Deferred>) {
        let scene = layout(&config, &portfolio, viewport);
        let (mut page, deferred_rx) = Page::new(&config, scene.refs(config.ui.show_cursor));
        register_elements(&mut page, &scene, &portfolio, &config);

        let native_scroll = ScrollAnimator::new(
            Duration::from_millis(config.ui.scroll_duration_ms),
            config.reveal.easing,
        );

        let app = Self {
            config,
            theme,
            portfolio,
            page,
            surface: TerminalSurface::new(scene),
            native_scroll,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            last_report: FrameReport::default(),
            frame_time: Instant::now(),
        };
        (app, deferred_rx)
    }

    /// Start the page lifecycle
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self) {
        self.page.mount(&mut self.surface);
        info!(
            panels = self.portfolio.panels.len(),
            mode = ?self.page.mode(),
            "Portfolio mounted"
        );
    }

    pub fn unmount(&mut self) {
        self.page.unmount(&mut self.surface);
    }

    /// Relayout for a new terminal size and let the engine remeasure
    pub fn resize(&mut self, width: u16, height: u16) {
        let scene = layout(&self.config, &self.portfolio, content_viewport(width, height));
        if scene.mode != self.surface.scene().mode {
            self.native_scroll.reset();
            self.surface.set_vertical_offset(0.0);
        }
        self.surface.set_scene(scene);
        self.page.dispatch(PageEvent::Resize, &mut self.surface);
    }

    /// Run one animation frame
    pub fn tick(&mut self, now: Instant) {
        self.frame_time = now;

        if let Some(report) = self.page.frame(&mut self.surface) {
            self.last_report = report;
        }

        let revealed = self.page.observe(&mut self.surface, now);
        if !revealed.is_empty() {
            debug!(count = revealed.len(), "Panels revealed");
        }

        let rows = self.native_scroll.update(self.native_max(), now);
        self.surface.set_vertical_offset(rows as f64);

        if self
            .status_message
            .as_ref()
            .is_some_and(|msg| now.saturating_duration_since(msg.at) >= STATUS_TTL)
        {
            self.status_message = None;
        }
    }

    pub fn handle_deferred(&mut self, deferred: Deferred) {
        self.page
            .handle_deferred(deferred, &mut self.surface, Instant::now());
    }

    /// Apply pointer input; returns text to copy when the copy button is clicked
    pub fn handle_pointer(&mut self, input: PointerInput) -> Option<String> {
        match input {
            PointerInput::Move { x, y } => {
                self.page
                    .dispatch(PageEvent::PointerMove { x, y }, &mut self.surface);
                None
            }
            PointerInput::Wheel { delta } => {
                let dispatch = self
                    .page
                    .dispatch(PageEvent::Wheel { delta }, &mut self.surface);
                if dispatch == Dispatch::Wheel(WheelOutcome::Passthrough) {
                    self.native_scroll
                        .scroll_by(delta.signum() as i32 * NATIVE_SCROLL_ROWS);
                }
                None
            }
            PointerInput::Click { x, y } => {
                self.page
                    .dispatch(PageEvent::PointerMove { x, y }, &mut self.surface);
                let on_button = self
                    .surface
                    .bounds(ids::COPY_BUTTON)
                    .is_some_and(|bounds| bounds.contains(x, y));
                if on_button {
                    self.page.copy_request()
                } else {
                    None
                }
            }
            PointerInput::None => None,
        }
    }

    /// Perform a key action; returns text to copy for [`Action::Copy`]
    pub fn perform(&mut self, action: Action) -> Option<String> {
        if action != Action::PendingG {
            self.pending_key = None;
        }

        let step = self.config.ui.wheel_step;
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollLeft => self.scroll(-step, -NATIVE_SCROLL_ROWS),
            Action::ScrollRight => self.scroll(step, NATIVE_SCROLL_ROWS),
            Action::PageLeft => self.scroll(-self.page_columns(), -self.page_rows()),
            Action::PageRight => self.scroll(self.page_columns(), self.page_rows()),
            Action::JumpToStart => self.jump(false),
            Action::JumpToEnd => self.jump(true),
            Action::PendingG => self.pending_key = Some('g'),
            Action::Copy => return self.page.copy_request(),
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Normal => Mode::Help,
                    Mode::Help => Mode::Normal,
                }
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
        None
    }

    /// Apply the result of a clipboard write
    pub fn copy_finished(&mut self, outcome: CopyOutcome) {
        self.page.finish_copy(&outcome, &mut self.surface);
        match outcome {
            CopyOutcome::Copied => {
                let text = format!("Copied {} to clipboard", self.page.copy_button().text());
                self.set_status(text, StatusKind::Success);
            }
            CopyOutcome::Failed(e) => {
                self.set_status(format!("Copy failed: {}", e), StatusKind::Error);
            }
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
            at: Instant::now(),
        });
    }

    /// Reveal visual of a panel at the current frame
    ///
    /// `fade` reveals stay in place; `rise` reveals also slide up.
    pub fn panel_visual(&self, id: ElementId) -> RevealVisual {
        let Some(reveal) = self.page.reveals().get(id) else {
            return RevealVisual::REVEALED;
        };
        let mut visual = reveal.visual(self.frame_time, self.page.reveal_style());
        if reveal.modifier() == Some(REVEAL_FADE) {
            visual.translate_y = 0.0;
        }
        visual
    }

    /// Eased progress of the hero intro, 0 before it starts
    pub fn intro_progress(&self) -> f64 {
        let Some(started) = self.page.intro_started() else {
            return 0.0;
        };
        let style = self.page.reveal_style();
        let elapsed = self.frame_time.saturating_duration_since(started);
        style.easing.apply(progress(elapsed, style.duration))
    }

    fn scroll(&mut self, columns: f64, rows: i32) {
        if self.page.scroll_by(columns) == WheelOutcome::Passthrough && self.page.is_mounted() {
            self.native_scroll.scroll_by(rows);
        }
    }

    fn jump(&mut self, to_end: bool) {
        match self.page.mode() {
            LayoutMode::Horizontal if to_end => self.page.scroll_to_end(),
            LayoutMode::Horizontal => self.page.scroll_to_start(),
            LayoutMode::Vertical => {
                let max = self.native_max();
                let target = if to_end { max } else { 0 };
                self.native_scroll.scroll_to(target, max, Instant::now());
            }
        }
    }

    fn page_columns(&self) -> f64 {
        (self.surface.scene().viewport.width * 0.8).max(1.0)
    }

    fn page_rows(&self) -> i32 {
        (self.surface.scene().viewport.height as i32 - 2).max(1)
    }

    fn native_max(&self) -> u16 {
        self.surface.scene().vertical_overflow().round() as u16
    }
}

fn layout(config: &AppConfig, portfolio: &Portfolio, viewport: Viewport) -> Scene {
    let label = display_width(&config.clipboard.label);
    let confirmation = display_width(&config.clipboard.confirmation);
    // "[ label ]"
    let button_width = (label.max(confirmation) + 4) as f64;
    Scene::layout(
        portfolio,
        viewport,
        config.motion.vertical_breakpoint,
        button_width,
    )
}

/// Observe every panel but the hero and flag interactive elements
fn register_elements(page: &mut Page, scene: &Scene, portfolio: &Portfolio, config: &AppConfig) {
    let stagger = Duration::from_millis(config.reveal.stagger_ms);
    let mut order = 0u32;

    for (slot, panel) in scene.panels.iter().zip(&portfolio.panels) {
        if panel.link.is_some() {
            page.hover_mut().register(slot.id);
        }
        if slot.kind == PanelKind::Hero {
            continue;
        }
        let modifier = match slot.kind {
            PanelKind::Project => REVEAL_RISE,
            _ => REVEAL_FADE,
        };
        page.reveals_mut().observe(
            slot.id,
            Reveal::new(config.reveal.threshold)
                .with_delay(stagger * (order % 3))
                .with_modifier(modifier),
        );
        order += 1;
    }

    if scene.copy_button.is_some() {
        page.hover_mut().register(ids::COPY_BUTTON);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panorama_core::content::Panel;
    use panorama_core::surface::class;

    fn portfolio() -> Portfolio {
        Portfolio {
            panels: vec![
                Panel::new(PanelKind::Hero, "Hello", "Intro").with_width(60),
                Panel::new(PanelKind::Project, "One", "Body")
                    .with_width(60)
                    .with_link("https://example.com"),
                Panel::new(PanelKind::Project, "Two", "Body").with_width(60),
                Panel::new(PanelKind::Contact, "Mail", "Write").with_width(60),
            ],
        }
    }

    fn app(width: u16, height: u16) -> (App, mpsc::UnboundedReceiver<Deferred>) {
        App::new(
            Arc::new(AppConfig::default()),
            portfolio(),
            Theme::default(),
            content_viewport(width, height),
        )
    }

    #[test]
    fn test_content_viewport_reserves_chrome() {
        assert_eq!(content_viewport(120, 40), Viewport::new(120.0, 38.0));
        assert_eq!(content_viewport(120, 1), Viewport::new(120.0, 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_registers_reveals_and_hover_targets() {
        let (app, _rx) = app(120, 40);
        assert_eq!(app.page.reveals().observing_count(), 3);
        assert!(!app.page.reveals().is_observing(ids::panel(0)));
        assert!(app.page.hover().is_interactive(ids::panel(1)));
        assert!(!app.page.hover().is_interactive(ids::panel(2)));
        assert!(app.page.hover().is_interactive(ids::COPY_BUTTON));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_scroll_moves_target() {
        let (mut app, _rx) = app(120, 40);
        app.mount();
        app.perform(Action::ScrollRight);
        assert_eq!(app.page.motion().scroll.target_x(), 8.0);

        app.perform(Action::JumpToEnd);
        let max = app.page.motion().scroll.max_scroll();
        assert!(max > 0.0);
        assert_eq!(app.page.motion().scroll.target_x(), max);

        app.perform(Action::PendingG);
        assert_eq!(app.pending_key, Some('g'));
        app.perform(Action::JumpToStart);
        assert_eq!(app.pending_key, None);
        assert_eq!(app.page.motion().scroll.target_x(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_writes_container_transform() {
        let (mut app, _rx) = app(120, 40);
        app.mount();
        app.perform(Action::PageRight);
        app.tick(Instant::now());

        assert!(app.last_report.scroll_x.is_some_and(|x| x > 0.0));
        let style = app.surface.style(ids::CONTAINER).unwrap();
        assert!(!style.transform.is_identity());
    }

    #[tokio::test(start_paused = true)]
    async fn test_vertical_wheel_scrolls_natively() {
        let (mut app, _rx) = app(60, 20);
        app.mount();
        assert_eq!(app.page.mode(), LayoutMode::Vertical);

        app.handle_pointer(PointerInput::Wheel { delta: 8.0 });
        assert_eq!(app.page.motion().scroll.target_x(), 0.0);
        assert!(app.native_scroll.needs_update());

        let later = Instant::now() + Duration::from_secs(1);
        app.tick(later);
        app.tick(later + Duration::from_secs(1));
        assert_eq!(app.native_scroll.current(), 3);
        assert_eq!(app.surface.vertical_offset(), 3.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resize_to_narrow_switches_mode() {
        let (mut app, _rx) = app(120, 40);
        app.mount();
        app.perform(Action::PageRight);

        app.resize(60, 40);
        assert_eq!(app.page.mode(), LayoutMode::Vertical);
        assert_eq!(app.page.motion().scroll.max_scroll(), 0.0);
        assert_eq!(app.page.motion().scroll.target_x(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_on_copy_button_requests_copy() {
        let (mut app, _rx) = app(120, 40);
        app.mount();
        // Let the zoom settle so the layout is unscaled
        app.perform(Action::JumpToEnd);
        for _ in 0..400 {
            app.tick(Instant::now());
        }

        let button = app.surface.bounds(ids::COPY_BUTTON).unwrap();
        let text = app.handle_pointer(PointerInput::Click {
            x: button.x + 1.0,
            y: button.y,
        });
        assert_eq!(text.as_deref(), Some("hello@panorama.dev"));

        let miss = app.handle_pointer(PointerInput::Click { x: 0.0, y: 0.0 });
        assert_eq!(miss, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_result_updates_status() {
        let (mut app, _rx) = app(120, 40);
        app.mount();

        app.copy_finished(CopyOutcome::Copied);
        assert_eq!(app.page.copy_button().label(), "Copied!");
        assert_eq!(app.surface.text(ids::COPY_BUTTON), Some("Copied!"));
        assert_eq!(
            app.status_message.as_ref().map(|m| m.kind),
            Some(StatusKind::Success)
        );

        app.copy_finished(CopyOutcome::Failed("no terminal".into()));
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("no terminal"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_hover_and_intro() {
        let (mut app, mut rx) = app(120, 40);
        app.mount();
        assert_eq!(app.intro_progress(), 0.0);

        for _ in 0..4 {
            let deferred = rx.recv().await.unwrap();
            app.handle_deferred(deferred);
        }
        assert!(app.page.hover().is_attached());
        assert!(app.surface.has_class(ids::panel(0), class::INTRO));

        app.tick(Instant::now() + Duration::from_secs(5));
        assert_eq!(app.intro_progress(), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_modifier_shapes_entering_visual() {
        let (app, _rx) = app(120, 40);

        let project = app.panel_visual(ids::panel(2));
        assert_eq!(project.opacity, 0.0);
        assert_eq!(project.translate_y, 2.0);

        let contact = app.panel_visual(ids::panel(3));
        assert_eq!(contact.opacity, 0.0);
        assert_eq!(contact.translate_y, 0.0);

        assert_eq!(app.panel_visual(ids::panel(0)), RevealVisual::REVEALED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_toggle() {
        let (mut app, _rx) = app(120, 40);
        app.perform(Action::ToggleHelp);
        assert_eq!(app.mode, Mode::Help);
        app.perform(Action::ExitMode);
        assert_eq!(app.mode, Mode::Normal);
        app.perform(Action::Quit);
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_engine() {
        let (mut app, _rx) = app(120, 40);
        app.mount();
        app.unmount();
        assert_eq!(app.perform(Action::Copy), None);
        app.handle_pointer(PointerInput::Wheel { delta: 8.0 });
        assert_eq!(app.page.motion().scroll.target_x(), 0.0);
        assert!(!app.native_scroll.needs_update());
    }
}
