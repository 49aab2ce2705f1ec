//! Core workflow, traits and types for Plainly
//!
//! This crate owns the input-to-result lifecycle of a simplification request:
//! validation, the pending/succeeded/failed state machine, progress messages,
//! toast notifications and result rendering. Backends plug in through the
//! [`Simplifier`] trait; clipboard access through [`ClipboardAccess`].

pub mod clipboard;
pub mod connectivity;
pub mod error;
pub mod notification;
pub mod progress;
pub mod render;
pub mod runner;
pub mod simplifier;
pub mod stub;
pub mod types;
pub mod workflow;

pub use clipboard::ClipboardAccess;
pub use connectivity::ConnectivityMonitor;
pub use error::{CollaboratorError, Error, Result};
pub use notification::{Notifier, Toast};
pub use progress::{ProgressConfig, ProgressListener, ProgressTicker, PROGRESS_MESSAGES};
pub use render::{DisplayedResult, RenderedResult, ResultView, html_to_text, render};
pub use runner::WorkflowRunner;
pub use simplifier::Simplifier;
pub use stub::StubSimplifier;
pub use types::*;
pub use workflow::{Settlement, SimplificationWorkflow, WorkflowSnapshot, WorkflowState};
