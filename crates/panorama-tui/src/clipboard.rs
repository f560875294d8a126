//! OSC 52 clipboard
//!
//! Asks the terminal emulator to set the system clipboard by writing
//! `ESC ] 52 ; c ; <base64> BEL`. Works over SSH and inside tmux with
//! `set-clipboard on`.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use panorama_core::clipboard::Clipboard;
use panorama_core::Error;
use tracing::debug;

/// Largest payload most terminals accept in a single OSC 52 sequence
pub const MAX_ENCODED_LEN: usize = 100_000;

pub struct Osc52Clipboard<W: Write + Send> {
    writer: Mutex<W>,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Escape sequence that sets the clipboard to `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[async_trait]
impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    async fn write_text(&self, text: &str) -> panorama_core::Result<()> {
        let sequence = osc52_sequence(text);
        if sequence.len() > MAX_ENCODED_LEN {
            return Err(Error::Clipboard(format!(
                "{} bytes is too large for OSC 52",
                text.len()
            )));
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::Clipboard("clipboard writer poisoned".to_string()))?;
        writer
            .write_all(sequence.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| Error::Clipboard(e.to_string()))?;

        debug!(len = text.len(), "OSC 52 sequence written");
        Ok(())
    }
}
