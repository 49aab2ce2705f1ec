//! UI utilities for the CLI

use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use plainly_core::{
    ComplexityLevel, MAX_RECOMMENDED_CHARS, RenderedResult, Result, WorkflowSnapshot,
};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

/// Delay between characters when typing out the example passage
pub const TYPEWRITER_DELAY: Duration = Duration::from_millis(15);

/// Display startup banner
pub fn display_banner(backend: &str) {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(60, terminal_width.saturating_sub(4)).max(40);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.green());

    let lines = [
        "Plainly - dense text into plain English".to_string(),
        String::new(),
        "Type or paste a passage, pick a level, then :go".to_string(),
        format!("Backend: {}", backend),
    ];
    for line in lines {
        let padding = (banner_width - 4).saturating_sub(line.chars().count());
        println!("{}", format!("│ {}{} │", line, " ".repeat(padding)).green());
    }

    println!("{}", bottom_border.green());
    println!();
    println!("{}", "💡 Tip: type 'help' to list commands".dimmed());
    println!();
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Add a line to the passage", "<text>".green());
    println!("  {} - Simplify the passage", ":go".green());
    println!("  {} - Paste from / copy to the clipboard", ":paste / :copy".green());
    println!("  {} - Fill in a sample passage", ":example".green());
    println!("  {} - Show or clear the passage", ":show / :clear".green());
    println!("  {} - Pick the reading level", ":level [standard|child]".green());
    println!("  {} - Switch between simplified and original", ":view [simplified|original]".green());
    println!("  {} - Simulate losing or regaining the network", ":offline / :online".green());
    println!("  {} - Exit the application", "exit/quit".green());
}

/// List the selectable reading levels, marking the current one
pub fn print_levels(current: ComplexityLevel) {
    for level in ComplexityLevel::all() {
        let marker = if level == current { "●" } else { "○" };
        println!("  {} {:<9} {}", marker, level.as_str(), level.display_name().dimmed());
    }
}

/// Label of the submit affordance for the given snapshot
pub fn submit_label(snapshot: &WorkflowSnapshot) -> &'static str {
    if !snapshot.online {
        "Waiting for internet..."
    } else if snapshot.loading {
        "Simplifying..."
    } else {
        "Simplify Text →"
    }
}

/// One-line summary of the input and the submit affordance
pub fn format_status(snapshot: &WorkflowSnapshot) -> String {
    let affordance = if snapshot.can_submit {
        format!("[{}]", submit_label(snapshot))
    } else {
        format!("({})", submit_label(snapshot))
    };
    format!("{} · {} · {}", snapshot.counter_label, snapshot.level, affordance)
}

pub fn print_status(snapshot: &WorkflowSnapshot) {
    if !snapshot.online {
        println!("{}", "📡 You are offline. Submissions resume when the connection returns.".on_red());
    }
    let status = format_status(snapshot);
    if snapshot.over_limit {
        println!("{} {}", status.red(), format!("(over {} recommended)", MAX_RECOMMENDED_CHARS).red());
    } else {
        println!("{}", status.dimmed());
    }
    if snapshot.input_error {
        println!("{}", "⚠️  Please enter more than 10 characters.".yellow());
    }
}

/// Plain-text rendering of a result card
pub fn format_result(rendered: &RenderedResult) -> String {
    let mut out = String::new();
    out.push_str(&rendered.title);
    out.push('\n');
    out.push_str(&"─".repeat(rendered.title.chars().count()));
    out.push_str("\n\n");
    out.push_str(&rendered.body);
    out.push_str("\n\nKey points:\n");
    for point in &rendered.key_points {
        out.push_str("  ✔ ");
        out.push_str(point);
        out.push('\n');
    }
    out
}

pub fn print_result(rendered: &RenderedResult) {
    println!();
    println!("{}", format_result(rendered).green());
}

pub fn print_progress(message: &str) {
    println!("{} {}", "⏳".yellow(), message.dimmed());
}

pub fn print_toast(message: &str) {
    println!("{} {}", "🔔".cyan(), message.cyan());
}

pub fn print_error(message: &str) {
    println!("{} {}", "❌".red(), message.red());
}

/// Echo `text` one character at a time
pub async fn typewriter(text: &str, delay: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    for ch in text.chars() {
        write!(stdout, "{}", ch)?;
        stdout.flush()?;
        tokio::time::sleep(delay).await;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Read one line, with ↑/↓ history navigation when attached to a terminal
pub async fn handle_input_with_history(history: &mut Vec<String>) -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(":quit".to_string());
        }
        let input = input.trim_end_matches(['\r', '\n']).to_string();
        if !input.trim().is_empty() {
            history.push(input.clone());
        }
        return Ok(input);
    }

    enable_raw_mode()?;
    let result = read_raw_line(history);
    disable_raw_mode()?;
    println!();

    let input = result?;
    if !input.trim().is_empty() {
        history.push(input.clone());
    }
    Ok(input)
}

fn redraw(input: &str) -> Result<()> {
    print!("\r\x1b[2K{} {}", "plainly>".green().bold(), input);
    io::stdout().flush()?;
    Ok(())
}

fn read_raw_line(history: &[String]) -> Result<String> {
    let mut input = String::new();
    let mut history_index: Option<usize> = None;

    redraw(&input)?;

    loop {
        if let Event::Key(key_event) = event::read()? {
            match key_event.code {
                KeyCode::Enter => return Ok(input),
                KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(":quit".to_string());
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    redraw(&input)?;
                }
                KeyCode::Backspace => {
                    input.pop();
                    redraw(&input)?;
                }
                KeyCode::Up if !history.is_empty() => {
                    let new_index = match history_index {
                        None => history.len() - 1,
                        Some(idx) => idx.saturating_sub(1),
                    };
                    history_index = Some(new_index);
                    input = history[new_index].clone();
                    redraw(&input)?;
                }
                KeyCode::Down => {
                    if let Some(idx) = history_index {
                        if idx + 1 < history.len() {
                            history_index = Some(idx + 1);
                            input = history[idx + 1].clone();
                        } else {
                            history_index = None;
                            input.clear();
                        }
                        redraw(&input)?;
                    }
                }
                KeyCode::Esc => return Ok(String::new()),
                _ => {}
            }
        }
    }
}
