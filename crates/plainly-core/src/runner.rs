//! Async driver around [`SimplificationWorkflow`]

use std::sync::atomic::AtomicU64;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::clipboard::{
    COPIED_MESSAGE, COPY_DENIED_HINT, ClipboardAccess, PASTE_DENIED_HINT, PASTED_MESSAGE,
};
use crate::notification::Notifier;
use crate::progress::{ProgressConfig, ProgressListener, ProgressTicker, SilentProgress};
use crate::render::{ResultView, html_to_text};
use crate::simplifier::Simplifier;
use crate::types::{
    ComplexityLevel, Connectivity, RequestToken, SimplificationRequest, SimplificationResult,
};
use crate::workflow::{Settlement, SimplificationWorkflow, WorkflowSnapshot};
use crate::{CollaboratorError, Error, Result};

/// Shown when the simplification service fails a request
pub const FAILURE_MESSAGE: &str = "Could not connect to the simplifier.";

/// Cloneable handle that runs requests against a [`Simplifier`].
///
/// The workflow lock is only ever held for one synchronous transition, never
/// across an `.await`, so other handles can keep editing input or reporting
/// connectivity while a request is pending.
#[derive(Clone)]
pub struct WorkflowRunner {
    workflow: Arc<Mutex<SimplificationWorkflow>>,
    simplifier: Arc<dyn Simplifier>,
    notifier: Notifier,
    progress: ProgressConfig,
    listener: Arc<dyn ProgressListener>,
    progress_generation: Arc<AtomicU64>,
}

impl WorkflowRunner {
    pub fn new(simplifier: Arc<dyn Simplifier>) -> Self {
        Self {
            workflow: Arc::new(Mutex::new(SimplificationWorkflow::new())),
            simplifier,
            notifier: Notifier::new(),
            progress: ProgressConfig::default(),
            listener: Arc::new(SilentProgress),
            progress_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_progress(mut self, config: ProgressConfig) -> Self {
        self.progress = config;
        self
    }

    pub fn with_progress_listener(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn simplifier_name(&self) -> &str {
        self.simplifier.name()
    }

    fn lock(&self) -> MutexGuard<'_, SimplificationWorkflow> {
        self.workflow.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        self.lock().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.lock().subscribe()
    }

    pub fn input_text(&self) -> String {
        self.lock().input().text().to_string()
    }

    pub fn on_input_changed(&self, text: impl Into<String>) {
        self.lock().on_input_changed(text);
    }

    pub fn select_level(&self, level: ComplexityLevel) {
        self.lock().select_level(level);
    }

    pub fn set_connectivity(&self, connectivity: Connectivity) {
        self.lock().set_connectivity(connectivity);
    }

    pub fn set_view(&self, view: ResultView) {
        self.lock().set_view(view);
    }

    pub fn toggle_view(&self) -> ResultView {
        self.lock().toggle_view()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Submit the current input at the selected level
    pub async fn submit(&self) -> Result<SimplificationResult> {
        let request = self.lock().begin_submit()?;
        self.run(request).await
    }

    /// Submit `text` at `level`, replacing the current input
    pub async fn submit_with(
        &self,
        text: impl Into<String>,
        level: ComplexityLevel,
    ) -> Result<SimplificationResult> {
        let request = self.lock().begin_submit_with(text, level)?;
        self.run(request).await
    }

    async fn run(&self, request: SimplificationRequest) -> Result<SimplificationResult> {
        tracing::info!(
            token = request.token.0,
            level = %request.level,
            chars = request.text.chars().count(),
            simplifier = self.simplifier.name(),
            "submitting request"
        );

        let mut pending = PendingRequest {
            workflow: self.workflow.clone(),
            token: Some(request.token),
        };

        let ticker = ProgressTicker::start(
            &self.progress,
            self.listener.clone(),
            self.progress_generation.clone(),
        );

        let outcome = self
            .simplifier
            .simplify(&request.text, request.level)
            .await
            .map_err(into_collaborator_error);

        ticker.stop().await;

        pending.token = None;
        let settlement = self.lock().settle(request.token, outcome.as_ref());
        match settlement {
            Settlement::Succeeded => {
                tracing::info!(token = request.token.0, "request succeeded");
            }
            Settlement::Failed => {
                self.notifier.show(FAILURE_MESSAGE);
            }
            Settlement::Stale => {}
        }

        outcome
    }

    /// Replace the input with the clipboard contents
    pub fn paste_from(&self, clipboard: &mut dyn ClipboardAccess) -> Result<()> {
        match clipboard.read_text() {
            Ok(text) => {
                self.on_input_changed(text);
                self.notifier.show(PASTED_MESSAGE);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard read failed");
                self.notifier.show(PASTE_DENIED_HINT);
                Err(as_permission_error(err))
            }
        }
    }

    /// Copy the plain text of the displayed simplification
    pub fn copy_to(&self, clipboard: &mut dyn ClipboardAccess) -> Result<()> {
        let text = self
            .lock()
            .displayed()
            .map(|displayed| html_to_text(&displayed.result.simplified));

        let Some(text) = text else {
            return Err(Error::Other("Nothing to copy yet".to_string()));
        };

        match clipboard.write_text(&text) {
            Ok(()) => {
                self.notifier.show(COPIED_MESSAGE);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                self.notifier.show(COPY_DENIED_HINT);
                Err(as_permission_error(err))
            }
        }
    }
}

/// Settles a request as failed if its future is dropped before it completes,
/// so the workflow never stays `Pending` after a cancelled submit.
struct PendingRequest {
    workflow: Arc<Mutex<SimplificationWorkflow>>,
    token: Option<RequestToken>,
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            tracing::debug!(token = token.0, "request cancelled before settling");
            let cancelled = Error::Collaborator(CollaboratorError::Other(
                "request cancelled".to_string(),
            ));
            self.workflow
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .settle(token, Err(&cancelled));
        }
    }
}

fn into_collaborator_error(err: Error) -> Error {
    match err {
        Error::Collaborator(_) => err,
        other => Error::Collaborator(CollaboratorError::Other(other.to_string())),
    }
}

fn as_permission_error(err: Error) -> Error {
    match err {
        Error::Permission(_) => err,
        other => Error::Permission(other.to_string()),
    }
}
