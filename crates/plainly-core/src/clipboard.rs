//! Clipboard capability

use crate::Result;

/// Hint shown when the clipboard cannot be read
pub const PASTE_DENIED_HINT: &str = "Please allow clipboard access or press Ctrl+V";

/// Hint shown when the clipboard cannot be written
pub const COPY_DENIED_HINT: &str = "Could not copy to clipboard";

pub const PASTED_MESSAGE: &str = "Text pasted from clipboard";
pub const COPIED_MESSAGE: &str = "Text copied to clipboard!";

/// Read and write plain text on the system clipboard.
///
/// Both operations may fail independently, e.g. when the platform denies
/// access. Failures are reported as [`crate::Error::Permission`].
pub trait ClipboardAccess {
    fn read_text(&mut self) -> Result<String>;

    fn write_text(&mut self, text: &str) -> Result<()>;
}
