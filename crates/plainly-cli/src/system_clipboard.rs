//! System clipboard backed by arboard

use arboard::Clipboard;
use plainly_core::{ClipboardAccess, Error, Result};

/// Opens the platform clipboard on first use
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut Clipboard> {
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| Error::Permission(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| Error::Permission("clipboard unavailable".to_string()))
    }
}

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Result<String> {
        self.handle()?
            .get_text()
            .map_err(|e| Error::Permission(e.to_string()))
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.handle()?
            .set_text(text)
            .map_err(|e| Error::Permission(e.to_string()))
    }
}
