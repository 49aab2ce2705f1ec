//! The simplification workflow state machine
//!
//! [`SimplificationWorkflow`] is the single owner of the request lifecycle:
//!
//! ```text
//! Idle/Invalid --edit--> Idle/Invalid
//! ready        --submit--> Pending
//! Pending      --resolve--> Succeeded
//! Pending      --reject--> Failed
//! Succeeded    --submit--> Pending
//! ```
//!
//! It is synchronous and does no I/O. Every mutation publishes a fresh
//! [`WorkflowSnapshot`] to subscribers; the async side lives in
//! [`crate::runner::WorkflowRunner`].

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::render::{self, DisplayedResult, RenderedResult, ResultView};
use crate::types::{
    ComplexityLevel, Connectivity, InputDocument, MIN_INPUT_CHARS, RequestToken,
    SimplificationRequest, SimplificationResult,
};
use crate::{Error, Result};

/// Where the workflow currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    #[default]
    Idle,
    /// Input too short to submit
    Invalid,
    Pending,
    Succeeded,
    Failed,
}

/// What happened to a settled request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Succeeded,
    Failed,
    /// A newer request was submitted; the outcome was ignored
    Stale,
}

/// Read-only view of the workflow for front-ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub state: WorkflowState,
    pub level: ComplexityLevel,
    pub input_len: usize,
    pub counter_label: String,
    pub over_limit: bool,
    pub online: bool,
    pub can_submit: bool,
    pub input_error: bool,
    pub loading: bool,
    pub results_visible: bool,
    pub view: ResultView,
    pub displayed: Option<DisplayedResult>,
}

impl WorkflowSnapshot {
    /// The result as it should appear on screen, if results are visible
    pub fn rendered(&self) -> Option<RenderedResult> {
        if !self.results_visible {
            return None;
        }
        self.displayed
            .as_ref()
            .map(|displayed| render::render(displayed, self.view))
    }
}

pub struct SimplificationWorkflow {
    state: WorkflowState,
    input: InputDocument,
    level: ComplexityLevel,
    connectivity: Connectivity,
    input_error: bool,
    results_visible: bool,
    view: ResultView,
    last_token: RequestToken,
    in_flight: Option<SimplificationRequest>,
    displayed: Option<DisplayedResult>,
    sender: watch::Sender<WorkflowSnapshot>,
}

impl SimplificationWorkflow {
    pub fn new() -> Self {
        let mut workflow = Self {
            state: WorkflowState::Invalid,
            input: InputDocument::default(),
            level: ComplexityLevel::default(),
            connectivity: Connectivity::Online,
            input_error: false,
            results_visible: false,
            view: ResultView::default(),
            last_token: RequestToken::default(),
            in_flight: None,
            displayed: None,
            sender: watch::channel(Self::empty_snapshot()).0,
        };
        workflow.publish();
        workflow
    }

    fn empty_snapshot() -> WorkflowSnapshot {
        let input = InputDocument::default();
        WorkflowSnapshot {
            state: WorkflowState::Invalid,
            level: ComplexityLevel::default(),
            input_len: 0,
            counter_label: input.counter_label(),
            over_limit: false,
            online: true,
            can_submit: false,
            input_error: false,
            loading: false,
            results_visible: false,
            view: ResultView::default(),
            displayed: None,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn input(&self) -> &InputDocument {
        &self.input
    }

    pub fn level(&self) -> ComplexityLevel {
        self.level
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn displayed(&self) -> Option<&DisplayedResult> {
        self.displayed.as_ref()
    }

    /// Whether the submit affordance should be enabled
    pub fn can_submit(&self) -> bool {
        self.connectivity.is_online()
            && self.input.is_submittable()
            && self.state != WorkflowState::Pending
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            state: self.state,
            level: self.level,
            input_len: self.input.len(),
            counter_label: self.input.counter_label(),
            over_limit: self.input.is_over_limit(),
            online: self.connectivity.is_online(),
            can_submit: self.can_submit(),
            input_error: self.input_error,
            loading: self.state == WorkflowState::Pending,
            results_visible: self.results_visible,
            view: self.view,
            displayed: self.displayed.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<WorkflowSnapshot> {
        self.sender.subscribe()
    }

    fn publish(&mut self) {
        self.sender.send_replace(self.snapshot());
    }

    /// Replace the input text and recompute enablement
    pub fn on_input_changed(&mut self, text: impl Into<String>) {
        self.input.set_text(text);

        if self.state != WorkflowState::Pending {
            if !self.input.is_submittable() {
                self.state = WorkflowState::Invalid;
            } else if self.state == WorkflowState::Invalid {
                self.state = WorkflowState::Idle;
            }
        }

        self.publish();
    }

    pub fn select_level(&mut self, level: ComplexityLevel) {
        if self.level != level {
            tracing::debug!(%level, "level selected");
            self.level = level;
            self.publish();
        }
    }

    /// Record an online/offline notification. In-flight requests are left alone.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        if self.connectivity != connectivity {
            tracing::debug!(?connectivity, state = ?self.state, "connectivity updated");
            self.connectivity = connectivity;
            self.publish();
        }
    }

    pub fn set_view(&mut self, view: ResultView) {
        if self.view != view {
            self.view = view;
            self.publish();
        }
    }

    pub fn toggle_view(&mut self) -> ResultView {
        self.view = self.view.toggled();
        self.publish();
        self.view
    }

    /// Empty the input and hide results
    pub fn clear(&mut self) {
        self.input.set_text(String::new());
        self.input_error = false;
        self.results_visible = false;
        if self.state != WorkflowState::Pending {
            self.state = WorkflowState::Invalid;
        }
        self.publish();
    }

    /// Start a request from the current input and level
    pub fn begin_submit(&mut self) -> Result<SimplificationRequest> {
        if !self.connectivity.is_online() {
            tracing::warn!("submit rejected: offline");
            return Err(Error::Offline);
        }

        if !self.input.is_submittable() {
            tracing::debug!(length = self.input.len(), "submit rejected: input too short");
            self.input_error = true;
            self.publish();
            return Err(Error::Validation {
                length: self.input.len(),
                minimum: MIN_INPUT_CHARS,
            });
        }

        self.last_token = self.last_token.next();
        let request = SimplificationRequest {
            token: self.last_token,
            text: self.input.text().to_string(),
            level: self.level,
        };

        if let Some(previous) = &self.in_flight {
            tracing::debug!(superseded = previous.token.0, "newer request supersedes pending one");
        }

        self.input_error = false;
        self.results_visible = false;
        self.state = WorkflowState::Pending;
        self.in_flight = Some(request.clone());
        self.publish();

        Ok(request)
    }

    /// Load `text` and `level` into the workflow, then submit them
    pub fn begin_submit_with(
        &mut self,
        text: impl Into<String>,
        level: ComplexityLevel,
    ) -> Result<SimplificationRequest> {
        self.level = level;
        self.on_input_changed(text);
        self.begin_submit()
    }

    /// Apply the outcome of request `token`. Outcomes of superseded requests are dropped.
    pub fn settle(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<&SimplificationResult, &Error>,
    ) -> Settlement {
        let request = match self.in_flight.take() {
            Some(request) if request.token == token => request,
            other => {
                self.in_flight = other;
                tracing::warn!(token = token.0, latest = self.last_token.0, "discarding stale response");
                return Settlement::Stale;
            }
        };

        let settlement = match outcome {
            Ok(result) => {
                self.displayed = Some(DisplayedResult {
                    original: request.text,
                    result: result.clone(),
                });
                self.input_error = false;
                self.results_visible = true;
                self.view = ResultView::Simplified;
                self.state = WorkflowState::Succeeded;
                Settlement::Succeeded
            }
            Err(err) => {
                tracing::warn!(token = token.0, error = %err, "request failed");
                self.state = WorkflowState::Failed;
                Settlement::Failed
            }
        };

        if !self.input.is_submittable() && settlement == Settlement::Failed {
            self.state = WorkflowState::Invalid;
        }

        self.publish();
        settlement
    }
}

impl Default for SimplificationWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CollaboratorError;

    const VALID: &str = "This sentence is definitely long enough.";

    fn result(points: &[&str]) -> SimplificationResult {
        SimplificationResult {
            simplified: "<p>X</p>".to_string(),
            key_points: points.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn failure() -> Error {
        Error::Collaborator(CollaboratorError::Network("connection refused".to_string()))
    }

    #[test]
    fn test_short_input_disables_submit() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.on_input_changed("hello");

        assert_eq!(workflow.state(), WorkflowState::Invalid);
        assert!(!workflow.snapshot().can_submit);
    }

    #[test]
    fn test_exactly_ten_chars_is_invalid() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.on_input_changed("0123456789");
        assert_eq!(workflow.state(), WorkflowState::Invalid);

        workflow.on_input_changed("0123456789a");
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(workflow.can_submit());
    }

    #[test]
    fn test_submit_short_input_raises_error_flag() {
        let mut workflow = SimplificationWorkflow::new();
        let err = workflow.begin_submit_with("short", ComplexityLevel::Standard).unwrap_err();

        assert!(matches!(err, Error::Validation { length: 5, minimum: 10 }));
        assert!(workflow.snapshot().input_error);
        assert_eq!(workflow.state(), WorkflowState::Invalid);
    }

    #[test]
    fn test_over_limit_is_flagged_not_blocked() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.on_input_changed("a".repeat(3500));

        let snapshot = workflow.snapshot();
        assert!(snapshot.over_limit);
        assert!(snapshot.can_submit);
        assert!(workflow.begin_submit().is_ok());
    }

    #[test]
    fn test_submit_captures_text_and_level() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.select_level(ComplexityLevel::Child);
        workflow.on_input_changed(VALID);

        let request = workflow.begin_submit().unwrap();
        assert_eq!(request.text, VALID);
        assert_eq!(request.level, ComplexityLevel::Child);
        assert_eq!(request.token, RequestToken(1));

        // edits after submission do not change the request
        workflow.on_input_changed("something else entirely");
        workflow.select_level(ComplexityLevel::Standard);
        let settlement = workflow.settle(request.token, Ok(&result(&["a"])));

        assert_eq!(settlement, Settlement::Succeeded);
        assert_eq!(workflow.displayed().unwrap().original, VALID);
    }

    #[test]
    fn test_pending_hides_results_and_disables_submit() {
        let mut workflow = SimplificationWorkflow::new();
        let first = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        workflow.settle(first.token, Ok(&result(&["a"])));
        assert!(workflow.snapshot().results_visible);

        workflow.begin_submit().unwrap();
        let snapshot = workflow.snapshot();
        assert_eq!(snapshot.state, WorkflowState::Pending);
        assert!(snapshot.loading);
        assert!(!snapshot.results_visible);
        assert!(!snapshot.can_submit);
        assert!(snapshot.rendered().is_none());
        // previous result is kept until the new one arrives
        assert!(snapshot.displayed.is_some());
    }

    #[test]
    fn test_success_resets_error_flag() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.on_input_changed("tiny");
        let _ = workflow.begin_submit();
        assert!(workflow.snapshot().input_error);

        let request = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        let settlement = workflow.settle(request.token, Ok(&result(&["a", "b"])));

        assert_eq!(settlement, Settlement::Succeeded);
        let snapshot = workflow.snapshot();
        assert!(!snapshot.input_error);
        assert_eq!(snapshot.state, WorkflowState::Succeeded);
        assert_eq!(
            snapshot.rendered().unwrap().key_points,
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_failure_keeps_previous_result() {
        let mut workflow = SimplificationWorkflow::new();
        let first = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        workflow.settle(first.token, Ok(&result(&["kept"])));
        let before = workflow.displayed().cloned();

        let second = workflow.begin_submit().unwrap();
        let settlement = workflow.settle(second.token, Err(&failure()));

        assert_eq!(settlement, Settlement::Failed);
        let snapshot = workflow.snapshot();
        assert_eq!(snapshot.state, WorkflowState::Failed);
        assert!(snapshot.can_submit);
        assert!(!snapshot.results_visible);
        assert_eq!(snapshot.displayed, before);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut workflow = SimplificationWorkflow::new();
        let first = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        let second = workflow.begin_submit_with(VALID, ComplexityLevel::Child).unwrap();
        assert!(second.token > first.token);

        assert_eq!(
            workflow.settle(first.token, Ok(&result(&["old"]))),
            Settlement::Stale
        );
        assert_eq!(workflow.state(), WorkflowState::Pending);
        assert!(workflow.displayed().is_none());

        assert_eq!(
            workflow.settle(second.token, Ok(&result(&["new"]))),
            Settlement::Succeeded
        );
        assert_eq!(workflow.displayed().unwrap().result.key_points, vec!["new".to_string()]);

        // a late duplicate settlement is ignored too
        assert_eq!(
            workflow.settle(second.token, Err(&failure())),
            Settlement::Stale
        );
        assert_eq!(workflow.state(), WorkflowState::Succeeded);
    }

    #[test]
    fn test_offline_blocks_submission() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.on_input_changed(VALID);
        workflow.set_connectivity(Connectivity::Offline);

        assert!(!workflow.can_submit());
        assert!(matches!(workflow.begin_submit(), Err(Error::Offline)));
        assert_eq!(workflow.state(), WorkflowState::Idle);

        workflow.set_connectivity(Connectivity::Online);
        assert!(workflow.can_submit());
    }

    #[test]
    fn test_offline_short_input_reports_offline() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.set_connectivity(Connectivity::Offline);
        workflow.on_input_changed("tiny");
        assert!(matches!(workflow.begin_submit(), Err(Error::Offline)));
    }

    #[test]
    fn test_back_online_rechecks_length() {
        let mut workflow = SimplificationWorkflow::new();
        workflow.set_connectivity(Connectivity::Offline);
        workflow.on_input_changed("tiny");
        workflow.set_connectivity(Connectivity::Online);
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_offline_does_not_touch_pending() {
        let mut workflow = SimplificationWorkflow::new();
        let request = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        workflow.set_connectivity(Connectivity::Offline);
        assert_eq!(workflow.state(), WorkflowState::Pending);

        assert_eq!(
            workflow.settle(request.token, Ok(&result(&["a"]))),
            Settlement::Succeeded
        );
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_toggle_view_and_reset_on_success() {
        let mut workflow = SimplificationWorkflow::new();
        let request = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        workflow.settle(request.token, Ok(&result(&["a"])));

        assert_eq!(workflow.toggle_view(), ResultView::Original);
        let rendered = workflow.snapshot().rendered().unwrap();
        assert_eq!(rendered.body, VALID);

        let request = workflow.begin_submit().unwrap();
        workflow.settle(request.token, Ok(&result(&["b"])));
        assert_eq!(workflow.snapshot().view, ResultView::Simplified);
    }

    #[test]
    fn test_clear_hides_everything() {
        let mut workflow = SimplificationWorkflow::new();
        let request = workflow.begin_submit_with(VALID, ComplexityLevel::Standard).unwrap();
        workflow.settle(request.token, Ok(&result(&["a"])));

        workflow.clear();
        let snapshot = workflow.snapshot();
        assert_eq!(snapshot.input_len, 0);
        assert!(!snapshot.results_visible);
        assert!(!snapshot.input_error);
        assert_eq!(snapshot.state, WorkflowState::Invalid);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut workflow = SimplificationWorkflow::new();
        let mut rx = workflow.subscribe();

        workflow.on_input_changed(VALID);
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.input_len, VALID.chars().count());
        assert_eq!(snapshot.counter_label, format!("{} / 3000 chars", VALID.chars().count()));
    }
}
