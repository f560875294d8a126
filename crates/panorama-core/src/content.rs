//! Portfolio content
//!
//! Panels are shown left to right in the horizontal strip. Content comes from
//! a TOML file with a `[[panels]]` array, or from the built-in set.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Panel width used when the content file leaves it out, in columns
pub const DEFAULT_PANEL_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Hero,
    #[default]
    Project,
    About,
    Contact,
}

impl PanelKind {
    /// Contact panels carry the copy button
    pub fn is_interactive(&self) -> bool {
        matches!(self, PanelKind::Contact)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    #[serde(default)]
    pub kind: PanelKind,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default = "default_width")]
    pub width: u16,
}

fn default_width() -> u16 {
    DEFAULT_PANEL_WIDTH
}

impl Panel {
    pub fn new(kind: PanelKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind,
            body: body.into(),
            tags: Vec::new(),
            link: None,
            width: DEFAULT_PANEL_WIDTH,
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub panels: Vec<Panel>,
}

impl Portfolio {
    /// Content shown when no content file is configured
    pub fn builtin() -> Self {
        Self {
            panels: vec![
                Panel::new(
                    PanelKind::Hero,
                    "Panorama",
                    "Selected work, one panel at a time. Scroll sideways.",
                )
                .with_width(56),
                Panel::new(
                    PanelKind::Project,
                    "Tidewater",
                    "Streaming tide-gauge ingest with sub-second alerting.",
                )
                .with_tags(&["rust", "tokio", "timeseries"])
                .with_link("https://example.com/tidewater"),
                Panel::new(
                    PanelKind::Project,
                    "Lanternfish",
                    "A tiny static site generator that ships zero JavaScript.",
                )
                .with_tags(&["cli", "markdown"])
                .with_link("https://example.com/lanternfish"),
                Panel::new(
                    PanelKind::Project,
                    "Kestrel Maps",
                    "Offline vector tiles rendered on low-power devices.",
                )
                .with_tags(&["graphics", "embedded"]),
                Panel::new(
                    PanelKind::About,
                    "About",
                    "Engineer working on tools, interfaces and the space between them.",
                )
                .with_width(40),
                Panel::new(
                    PanelKind::Contact,
                    "Contact",
                    "Open to collaborations. Press the button or `c` to copy the address.",
                )
                .with_width(44),
            ],
        }
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        let portfolio: Portfolio =
            toml::from_str(s).map_err(|e| Error::Content(e.to_string()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let portfolio = Self::from_toml(&content)
            .map_err(|e| Error::Content(format!("{}: {}", path.display(), e)))?;
        info!(
            path = %path.display(),
            panels = portfolio.panels.len(),
            "Loaded portfolio content"
        );
        Ok(portfolio)
    }

    fn validate(&self) -> Result<()> {
        if self.panels.is_empty() {
            return Err(Error::Content("no panels defined".to_string()));
        }
        if let Some(panel) = self.panels.iter().find(|p| p.width == 0) {
            return Err(Error::Content(format!(
                "panel '{}' has zero width",
                panel.title
            )));
        }
        Ok(())
    }

    /// Total strip width in columns, including the gaps between panels
    pub fn strip_width(&self, gap: u16) -> u32 {
        let panels: u32 = self.panels.iter().map(|p| p.width as u32).sum();
        let gaps = self.panels.len().saturating_sub(1) as u32 * gap as u32;
        panels + gaps
    }

    pub fn hero(&self) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == PanelKind::Hero)
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_hero_and_contact() {
        let portfolio = Portfolio::builtin();
        assert!(portfolio.hero().is_some());
        assert!(portfolio.panels.iter().any(|p| p.kind.is_interactive()));
        assert!(portfolio.validate().is_ok());
    }

    #[test]
    fn test_from_toml_defaults() {
        let toml_str = r#"
            [[panels]]
            title = "Intro"
            kind = "hero"

            [[panels]]
            title = "Thing"
            body = "Built a thing"
            tags = ["rust"]
            width = 30
        "#;
        let portfolio = Portfolio::from_toml(toml_str).unwrap();
        assert_eq!(portfolio.panels.len(), 2);
        assert_eq!(portfolio.panels[0].kind, PanelKind::Hero);
        assert_eq!(portfolio.panels[0].width, DEFAULT_PANEL_WIDTH);
        assert_eq!(portfolio.panels[1].kind, PanelKind::Project);
        assert_eq!(portfolio.panels[1].width, 30);
        assert_eq!(portfolio.panels[1].link, None);
    }

    #[test]
    fn test_from_toml_rejects_empty() {
        let err = Portfolio::from_toml("panels = []").unwrap_err();
        assert!(matches!(err, Error::Content(_)));
    }

    #[test]
    fn test_from_toml_rejects_zero_width() {
        let toml_str = r#"
            [[panels]]
            title = "Flat"
            width = 0
        "#;
        assert!(Portfolio::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_from_toml_rejects_unknown_kind() {
        let toml_str = r#"
            [[panels]]
            title = "Odd"
            kind = "carousel"
        "#;
        assert!(Portfolio::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_strip_width() {
        let portfolio = Portfolio {
            panels: vec![
                Panel::new(PanelKind::Hero, "a", "").with_width(10),
                Panel::new(PanelKind::Project, "b", "").with_width(20),
                Panel::new(PanelKind::Contact, "c", "").with_width(30),
            ],
        };
        assert_eq!(portfolio.strip_width(2), 64);
    }
}
