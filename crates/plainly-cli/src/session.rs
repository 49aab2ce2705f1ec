//! Interactive session: reads commands and drives the workflow

use plainly_core::{
    ClipboardAccess, ConnectivityMonitor, EXAMPLE_PASSAGE, Error, Result, WorkflowRunner,
};
use std::time::Duration;

use crate::commands::{Command, parse_command};
use crate::ui;

/// Whether the loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    runner: WorkflowRunner,
    connectivity: ConnectivityMonitor,
    clipboard: Box<dyn ClipboardAccess>,
    typing_delay: Duration,
    last_toast: u64,
}

impl Session {
    pub fn new(
        runner: WorkflowRunner,
        connectivity: ConnectivityMonitor,
        clipboard: Box<dyn ClipboardAccess>,
    ) -> Self {
        Self {
            runner,
            connectivity,
            clipboard,
            typing_delay: ui::TYPEWRITER_DELAY,
            last_toast: 0,
        }
    }

    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn runner(&self) -> &WorkflowRunner {
        &self.runner
    }

    /// Run until the user exits
    pub async fn run(&mut self) -> Result<()> {
        ui::display_banner(self.runner.simplifier_name());
        let forwarder = self.connectivity.attach(self.runner.clone());

        let mut history = Vec::new();
        loop {
            let line = ui::handle_input_with_history(&mut history).await?;
            if line.trim().is_empty() {
                continue;
            }

            let flow = self.handle(parse_command(&line)).await;
            self.flush_toast();
            if flow == Flow::Exit {
                break;
            }
        }

        forwarder.abort();
        Ok(())
    }

    /// Apply one command. Errors are reported to the user and never end the session.
    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Exit => {
                println!("👋 Goodbye!");
                return Flow::Exit;
            }
            Command::Help => ui::print_help(),
            Command::Levels => ui::print_levels(self.runner.snapshot().level),
            Command::Level(level) => {
                self.runner.select_level(level);
                println!("Level set to {}", level.display_name());
            }
            Command::Text(line) => {
                let mut text = self.runner.input_text();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&line);
                self.runner.on_input_changed(text);
                ui::print_status(&self.runner.snapshot());
            }
            Command::Show => {
                let text = self.runner.input_text();
                if !text.is_empty() {
                    println!("{}", text);
                }
                ui::print_status(&self.runner.snapshot());
            }
            Command::Clear => {
                self.runner.clear();
                ui::print_status(&self.runner.snapshot());
            }
            Command::Example => {
                self.runner.clear();
                if let Err(e) = ui::typewriter(EXAMPLE_PASSAGE, self.typing_delay).await {
                    tracing::debug!(error = %e, "typewriter output failed");
                }
                self.runner.on_input_changed(EXAMPLE_PASSAGE);
                ui::print_status(&self.runner.snapshot());
            }
            Command::Paste => {
                if self.runner.paste_from(self.clipboard.as_mut()).is_ok() {
                    ui::print_status(&self.runner.snapshot());
                }
            }
            Command::Copy => {
                if let Err(Error::Other(msg)) = self.runner.copy_to(self.clipboard.as_mut()) {
                    ui::print_error(&msg);
                }
            }
            Command::View(view) => {
                match view {
                    Some(view) => self.runner.set_view(view),
                    None => {
                        self.runner.toggle_view();
                    }
                }
                match self.runner.snapshot().rendered() {
                    Some(rendered) => ui::print_result(&rendered),
                    None => ui::print_error("No result to show yet"),
                }
            }
            Command::Offline => self.connectivity.set_offline(),
            Command::Online => self.connectivity.set_online(),
            Command::Submit => self.submit().await,
            Command::Unknown(msg) => ui::print_error(&msg),
        }
        Flow::Continue
    }

    async fn submit(&mut self) {
        match self.runner.submit().await {
            Ok(_) => {
                let snapshot = self.runner.snapshot();
                match snapshot.rendered() {
                    Some(rendered) => ui::print_result(&rendered),
                    None => tracing::debug!("result superseded before it could be shown"),
                }
            }
            Err(e @ (Error::Validation { .. } | Error::Offline)) => ui::print_error(&e.to_string()),
            Err(e) => tracing::debug!(error = %e, "submission failed"),
        }
    }

    /// Print the current toast once
    fn flush_toast(&mut self) {
        if let Some(toast) = self.runner.notifier().current() {
            if toast.id != self.last_toast {
                self.last_toast = toast.id;
                ui::print_toast(&toast.message);
            }
        }
    }
}
