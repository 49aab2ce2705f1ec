//! Parsing of interactive commands

use plainly_core::{ComplexityLevel, ResultView};

/// One line of interactive input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the current input to the simplifier
    Submit,
    Paste,
    Copy,
    Clear,
    Example,
    /// Show the current input and its counter
    Show,
    Level(ComplexityLevel),
    Levels,
    /// Switch result view; `None` toggles
    View(Option<ResultView>),
    Offline,
    Online,
    Help,
    Exit,
    /// Plain text to append to the input
    Text(String),
    Unknown(String),
}

/// Interpret one line typed at the prompt
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();

    match trimmed.to_lowercase().as_str() {
        "help" | "?" => return Command::Help,
        "exit" | "quit" => return Command::Exit,
        _ => {}
    }

    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Text(line.trim_end().to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    match (name.as_str(), arg) {
        ("go" | "submit" | "s", _) => Command::Submit,
        ("paste" | "p", _) => Command::Paste,
        ("copy" | "c", _) => Command::Copy,
        ("clear", _) => Command::Clear,
        ("example", _) => Command::Example,
        ("show", _) => Command::Show,
        ("level", None) => Command::Levels,
        ("level", Some(level)) => match ComplexityLevel::from_str(level) {
            Some(level) => Command::Level(level),
            None => Command::Unknown(format!("unknown level '{}'", level)),
        },
        ("view", None) | ("toggle", _) => Command::View(None),
        ("view", Some(view)) => match ResultView::from_str(view) {
            Some(view) => Command::View(Some(view)),
            None => Command::Unknown(format!("unknown view '{}'", view)),
        },
        ("offline", _) => Command::Offline,
        ("online", _) => Command::Online,
        ("help", _) => Command::Help,
        ("exit" | "quit" | "q", _) => Command::Exit,
        (other, _) => Command::Unknown(format!("unknown command ':{}'", other)),
    }
}
