//! Copy-to-clipboard button
//!
//! Writing is asynchronous and happens off the page; the page only owns the
//! button label. A successful write swaps the label for a confirmation that
//! a tracked timer later reverts. Failures are logged and reported to the
//! host instead of being dropped.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::ClipboardConfig;
use crate::surface::{ElementId, RenderSurface, StyleUpdate};

/// System clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> crate::Result<()>;
}

/// Result of a copy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed(String),
}

/// Write through a clipboard and turn the result into an outcome
pub async fn copy_text(clipboard: &dyn Clipboard, text: &str) -> CopyOutcome {
    match clipboard.write_text(text).await {
        Ok(()) => {
            info!(len = text.len(), "Copied to clipboard");
            CopyOutcome::Copied
        }
        Err(e) => {
            warn!("Clipboard write failed: {}", e);
            CopyOutcome::Failed(e.to_string())
        }
    }
}

/// Label state of the copy button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyLabel {
    #[default]
    Idle,
    Confirming,
}

#[derive(Debug, Clone)]
pub struct CopyButton {
    text: String,
    label: String,
    confirmation: String,
    confirm_for: Duration,
    state: CopyLabel,
}

impl CopyButton {
    pub fn new(config: &ClipboardConfig) -> Self {
        Self {
            text: config.text.clone(),
            label: config.label.clone(),
            confirmation: config.confirmation.clone(),
            confirm_for: Duration::from_millis(config.confirm_ms),
            state: CopyLabel::Idle,
        }
    }

    /// Literal written to the clipboard
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> CopyLabel {
        self.state
    }

    /// Currently visible label
    pub fn label(&self) -> &str {
        match self.state {
            CopyLabel::Idle => &self.label,
            CopyLabel::Confirming => &self.confirmation,
        }
    }

    /// Apply a copy outcome
    ///
    /// Returns how long to wait before [`CopyButton::revert`] on success.
    pub fn complete(
        &mut self,
        outcome: &CopyOutcome,
        surface: &mut dyn RenderSurface,
        element: Option<ElementId>,
    ) -> Option<Duration> {
        match outcome {
            CopyOutcome::Copied => {
                self.state = CopyLabel::Confirming;
                if let Some(id) = element {
                    surface.apply(id, StyleUpdate::Text(self.confirmation.clone()));
                }
                Some(self.confirm_for)
            }
            CopyOutcome::Failed(_) => None,
        }
    }

    /// Restore the resting label
    pub fn revert(&mut self, surface: &mut dyn RenderSurface, element: Option<ElementId>) {
        if self.state == CopyLabel::Idle {
            return;
        }
        self.state = CopyLabel::Idle;
        if let Some(id) = element {
            surface.apply(id, StyleUpdate::Text(self.label.clone()));
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Clipboard double that records writes or fails on demand
    #[derive(Default)]
    pub struct FakeClipboard {
        pub fail: bool,
        pub written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> crate::Result<()> {
            if self.fail {
                return Err(crate::Error::Clipboard("permission denied".to_string()));
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}
