use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file path (the terminal is in raw mode, so logs never go to stdout)
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Optional TOML file with portfolio panels
    #[serde(default)]
    pub content_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: default_log_file(),
            content_file: None,
        }
    }
}

/// Tuning for the per-frame animation loop
///
/// Distances are in host units (terminal cells for the TUI host).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Per-frame easing factor for horizontal scroll; smaller feels heavier
    #[serde(default = "default_scroll_factor")]
    pub scroll_factor: f64,
    /// Scroll velocity to skew (degrees) gain; 0 disables skew
    #[serde(default = "default_skew_gain")]
    pub skew_gain: f64,
    /// Per-frame easing factor for skew
    #[serde(default = "default_skew_factor")]
    pub skew_factor: f64,
    /// Per-frame easing factor for the custom cursor
    #[serde(default = "default_cursor_factor")]
    pub cursor_factor: f64,
    /// Offset subtracted from the cursor position to center the cursor element
    #[serde(default)]
    pub cursor_offset: f64,
    /// Zoom at scroll position 0
    #[serde(default = "default_zoom_start")]
    pub zoom_start: f64,
    /// Zoom once the scroll distance reaches `zoom_distance_ratio * viewport`
    #[serde(default = "default_zoom_end")]
    pub zoom_end: f64,
    /// Fraction of the viewport width over which the zoom settles
    #[serde(default = "default_zoom_distance_ratio")]
    pub zoom_distance_ratio: f64,
    /// Parallax offset multiplier
    #[serde(default = "default_parallax_damping")]
    pub parallax_damping: f64,
    /// Below this viewport width the page switches to vertical mode
    #[serde(default = "default_vertical_breakpoint")]
    pub vertical_breakpoint: f64,
    /// Length of the progress track
    #[serde(default = "default_progress_track_length")]
    pub progress_track_length: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            scroll_factor: default_scroll_factor(),
            skew_gain: default_skew_gain(),
            skew_factor: default_skew_factor(),
            cursor_factor: default_cursor_factor(),
            cursor_offset: 0.0,
            zoom_start: default_zoom_start(),
            zoom_end: default_zoom_end(),
            zoom_distance_ratio: default_zoom_distance_ratio(),
            parallax_damping: default_parallax_damping(),
            vertical_breakpoint: default_vertical_breakpoint(),
            progress_track_length: default_progress_track_length(),
        }
    }
}

/// Easing curve for time-based transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the transition
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Intersection ratio at which a panel reveals (0.0-1.0)
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Transition duration in milliseconds
    #[serde(default = "default_reveal_duration")]
    pub duration_ms: u64,
    /// Extra delay added per panel index
    #[serde(default = "default_reveal_stagger")]
    pub stagger_ms: u64,
    /// Vertical offset of the entering state
    #[serde(default = "default_reveal_offset")]
    pub offset: f64,
    /// Blur radius of the entering state
    #[serde(default = "default_reveal_blur")]
    pub blur: f64,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            duration_ms: default_reveal_duration(),
            stagger_ms: default_reveal_stagger(),
            offset: default_reveal_offset(),
            blur: default_reveal_blur(),
            easing: EasingType::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Frames per second of the animation loop
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Delay before hover handlers are attached
    #[serde(default = "default_hover_delay")]
    pub hover_delay_ms: u64,
    /// Delay before the intro animation starts
    #[serde(default = "default_intro_delay")]
    pub intro_delay_ms: u64,
    /// Deferred layout re-measurements after mount
    #[serde(default = "default_remeasure_delays")]
    pub remeasure_delays_ms: Vec<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            hover_delay_ms: default_hover_delay(),
            intro_delay_ms: default_intro_delay(),
            remeasure_delays_ms: default_remeasure_delays(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Literal written to the clipboard by the copy button
    #[serde(default = "default_clipboard_text")]
    pub text: String,
    /// Resting label of the copy button
    #[serde(default = "default_clipboard_label")]
    pub label: String,
    /// Label shown after a successful copy
    #[serde(default = "default_clipboard_confirmation")]
    pub confirmation: String,
    /// How long the confirmation label stays up
    #[serde(default = "default_clipboard_confirm_ms")]
    pub confirm_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            text: default_clipboard_text(),
            label: default_clipboard_label(),
            confirmation: default_clipboard_confirmation(),
            confirm_ms: default_clipboard_confirm_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Scroll distance of one wheel notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
    /// Duration of the native vertical scroll animation; 0 jumps instantly
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: u64,
    /// Draw the custom cursor
    #[serde(default = "default_true")]
    pub show_cursor: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            wheel_step: default_wheel_step(),
            scroll_duration_ms: default_scroll_duration(),
            show_cursor: default_true(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accepts either `theme = "nord"` or `[ui.theme] name = "nord"`
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub background: Option<String>,
    /// Panel background
    pub panel: Option<String>,
    /// Panel borders
    pub border: Option<String>,
    /// Primary text
    pub text: Option<String>,
    /// Secondary text
    pub muted: Option<String>,
    /// Accent (headlines, tags)
    pub accent: Option<String>,
    /// Custom cursor
    pub cursor: Option<String>,
    /// Custom cursor while hovering an interactive element
    pub cursor_hover: Option<String>,
    /// Progress track
    pub progress_track: Option<String>,
    /// Progress thumb
    pub progress_thumb: Option<String>,
    /// Error messages
    pub error: Option<String>,
    /// Success messages
    pub success: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-f>" (Ctrl+f), "<S-Tab>", "G" (Shift+g), "gg"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_scroll_left")]
    pub scroll_left: String,
    #[serde(default = "default_key_scroll_right")]
    pub scroll_right: String,
    #[serde(default = "default_key_page_left")]
    pub page_left: String,
    #[serde(default = "default_key_page_right")]
    pub page_right: String,
    #[serde(default = "default_key_jump_to_start")]
    pub jump_to_start: String,
    #[serde(default = "default_key_jump_to_end")]
    pub jump_to_end: String,
    /// Trigger the copy button
    #[serde(default = "default_key_copy")]
    pub copy: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            scroll_left: default_key_scroll_left(),
            scroll_right: default_key_scroll_right(),
            page_left: default_key_page_left(),
            page_right: default_key_page_right(),
            jump_to_start: default_key_jump_to_start(),
            jump_to_end: default_key_jump_to_end(),
            copy: default_key_copy(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_scroll_left() -> String { "h".to_string() }
fn default_key_scroll_right() -> String { "l".to_string() }
fn default_key_page_left() -> String { "<C-b>".to_string() }
fn default_key_page_right() -> String { "<C-f>".to_string() }
fn default_key_jump_to_start() -> String { "gg".to_string() }
fn default_key_jump_to_end() -> String { "G".to_string() }
fn default_key_copy() -> String { "c".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("panorama")
        .join("panorama.log")
}

fn default_true() -> bool {
    true
}

fn default_scroll_factor() -> f64 {
    0.06
}

fn default_skew_gain() -> f64 {
    0.08
}

fn default_skew_factor() -> f64 {
    0.1
}

fn default_cursor_factor() -> f64 {
    0.15
}

fn default_zoom_start() -> f64 {
    1.5
}

fn default_zoom_end() -> f64 {
    1.0
}

fn default_zoom_distance_ratio() -> f64 {
    0.25
}

fn default_parallax_damping() -> f64 {
    0.2
}

fn default_vertical_breakpoint() -> f64 {
    100.0 // columns
}

fn default_progress_track_length() -> f64 {
    28.0
}

fn default_reveal_threshold() -> f64 {
    0.6
}

fn default_reveal_duration() -> u64 {
    1000
}

fn default_reveal_stagger() -> u64 {
    120
}

fn default_reveal_offset() -> f64 {
    2.0
}

fn default_reveal_blur() -> f64 {
    1.0
}

fn default_frame_rate() -> u32 {
    60
}

fn default_hover_delay() -> u64 {
    400
}

fn default_intro_delay() -> u64 {
    200
}

fn default_remeasure_delays() -> Vec<u64> {
    vec![100, 500]
}

fn default_clipboard_text() -> String {
    "hello@panorama.dev".to_string()
}

fn default_clipboard_label() -> String {
    "Copy email".to_string()
}

fn default_clipboard_confirmation() -> String {
    "Copied!".to_string()
}

fn default_clipboard_confirm_ms() -> u64 {
    2000
}

fn default_wheel_step() -> f64 {
    8.0
}

fn default_scroll_duration() -> u64 {
    150
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Clamp an easing factor into [0, 1], warning about out-of-range values
fn clamp_unit(name: &str, value: &mut f64) {
    let current = *value;
    if !(0.0..=1.0).contains(&current) {
        let clamped = if current.is_nan() { 0.0 } else { current.clamp(0.0, 1.0) };
        warn!("{} = {} is outside [0, 1], using {}", name, current, clamped);
        *value = clamped;
    }
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        Ok(config.validate())
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Serialize configuration to pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/panorama/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("panorama")
            .join("config.toml")
    }

    /// Get the log file path (with tilde expansion)
    pub fn log_file(&self) -> PathBuf {
        expand_tilde(&self.general.log_file)
    }

    /// Get the content file path (with tilde expansion)
    pub fn content_file(&self) -> Option<PathBuf> {
        self.general.content_file.as_deref().map(expand_tilde)
    }

    /// Clamp out-of-range values into their legal ranges
    pub fn validate(mut self) -> Self {
        clamp_unit("motion.scroll_factor", &mut self.motion.scroll_factor);
        clamp_unit("motion.skew_factor", &mut self.motion.skew_factor);
        clamp_unit("motion.cursor_factor", &mut self.motion.cursor_factor);
        clamp_unit("reveal.threshold", &mut self.reveal.threshold);

        if self.motion.zoom_distance_ratio <= 0.0 {
            warn!(
                "motion.zoom_distance_ratio = {} must be positive, using default",
                self.motion.zoom_distance_ratio
            );
            self.motion.zoom_distance_ratio = default_zoom_distance_ratio();
        }
        if self.timing.frame_rate == 0 {
            warn!("timing.frame_rate = 0, using default");
            self.timing.frame_rate = default_frame_rate();
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.motion.scroll_factor, 0.06);
        assert_eq!(config.motion.cursor_factor, 0.15);
        assert_eq!(config.reveal.threshold, 0.6);
        assert_eq!(config.reveal.duration_ms, 1000);
        assert_eq!(config.clipboard.confirm_ms, 2000);
        assert_eq!(config.timing.remeasure_delays_ms, vec![100, 500]);
        assert_eq!(config.keymap.jump_to_start, "gg");
    }

    #[test]
    fn test_theme_as_string() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");
        assert!(config.ui.theme.colors.accent.is_none());
    }

    #[test]
    fn test_theme_as_table() {
        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"dracula\"\n[ui.theme.colors]\naccent = \"#ff0000\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_easing_names() {
        let config = AppConfig::from_toml("[reveal]\neasing = \"ease_out\"\n").unwrap();
        assert_eq!(config.reveal.easing, EasingType::EaseOut);
    }

    #[test]
    fn test_validate_clamps_factors() {
        let config = AppConfig::from_toml(
            "[motion]\nscroll_factor = 1.5\ncursor_factor = -0.2\n[reveal]\nthreshold = 2.0\n",
        )
        .unwrap()
        .validate();
        assert_eq!(config.motion.scroll_factor, 1.0);
        assert_eq!(config.motion.cursor_factor, 0.0);
        assert_eq!(config.reveal.threshold, 1.0);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[motion\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.clipboard.text, config.clipboard.text);
        assert_eq!(parsed.ui.theme.name, config.ui.theme.name);
    }
}
