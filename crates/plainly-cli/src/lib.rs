//! Terminal interface for Plainly

mod commands;
mod session;
mod system_clipboard;
mod ui;


pub use commands::{Command, parse_command};
pub use session::{Flow, Session};
pub use system_clipboard::SystemClipboard;
pub use ui::{format_result, print_error, print_progress, print_result, print_toast};

// Re-export core types
pub use plainly_core::{Error, Result};
