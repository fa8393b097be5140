//! The fetch → analyze run lifecycle.
//!
//! [`WorkflowState`] is a plain value changed only through
//! [`WorkflowState::apply`]. [`Orchestrator`] drives the backend calls, feeds
//! their outcomes into the reducer, publishes every new state on a `watch`
//! channel, and pushes the user-facing toasts.
//!
//! `submit` takes `&mut self`, so a second run cannot start while one is in
//! flight.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::AnalysisBackend;
use crate::error::{ClientError, ValidationError};
use crate::models::AnalysisReport;
use crate::storage::UrlStore;
use crate::toast::{ToastKind, ToastQueue};

pub const CLONING_MESSAGE: &str = "Cloning repository...";
pub const ANALYZING_MESSAGE: &str = "Analyzing dependencies...";
pub const SUCCESS_MESSAGE: &str = "Analysis complete!";
const FALLBACK_ERROR: &str = "Something failed";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    FetchingRepo,
    Analyzing,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn is_loading(self) -> bool {
        matches!(self, Phase::FetchingRepo | Phase::Analyzing)
    }
}

/// Outcome of a step in a run.
#[derive(Debug, Clone)]
pub enum Event {
    Submitted { url: String },
    Fetched,
    FetchFailed,
    Analyzed(AnalysisReport),
    AnalyzeFailed,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub phase: Phase,
    /// Only meaningful while [`Phase::is_loading`].
    pub loading_message: String,
    /// Present only in [`Phase::Succeeded`].
    pub report: Option<AnalysisReport>,
    pub last_submitted_url: String,
    /// Inline validation message for the URL input.
    pub url_error: Option<ValidationError>,
}

impl WorkflowState {
    pub fn new(last_submitted_url: String) -> Self {
        Self {
            last_submitted_url,
            ..Self::default()
        }
    }

    /// Apply one transition. Events that make no sense in the current phase
    /// are ignored and `false` is returned.
    pub fn apply(&mut self, event: Event) -> bool {
        match (self.phase, event) {
            (Phase::Idle | Phase::Succeeded | Phase::Failed, Event::Submitted { url }) => {
                self.phase = Phase::FetchingRepo;
                self.last_submitted_url = url;
                self.report = None;
                self.url_error = None;
                self.loading_message = CLONING_MESSAGE.to_string();
            }
            (Phase::FetchingRepo, Event::Fetched) => {
                self.phase = Phase::Analyzing;
                self.loading_message = ANALYZING_MESSAGE.to_string();
            }
            (Phase::FetchingRepo, Event::FetchFailed) | (Phase::Analyzing, Event::AnalyzeFailed) => {
                self.phase = Phase::Failed;
                self.report = None;
                self.loading_message.clear();
            }
            (Phase::Analyzing, Event::Analyzed(report)) => {
                self.phase = Phase::Succeeded;
                self.report = Some(report);
                self.loading_message.clear();
            }
            (phase, event) => {
                warn!(?phase, ?event, "ignoring out-of-order workflow event");
                return false;
            }
        }
        true
    }
}

/// Submission pre-condition, checked before any state change.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !url.contains("github.com") {
        return Err(ValidationError::NotGithub);
    }
    Ok(())
}

pub struct Orchestrator {
    backend: Arc<dyn AnalysisBackend>,
    store: UrlStore,
    toasts: ToastQueue,
    state: watch::Sender<WorkflowState>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn AnalysisBackend>, store: UrlStore, toasts: ToastQueue) -> Self {
        let (state, _) = watch::channel(WorkflowState::new(store.load()));
        Self {
            backend,
            store,
            toasts,
            state,
        }
    }

    /// Receiver that sees every state published from now on.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Drop the inline validation message (the input was cleared).
    pub fn clear_input(&mut self) {
        self.state.send_modify(|s| s.url_error = None);
    }

    /// Run fetch then analyze for `url` and return the phase the run ended in.
    ///
    /// A rejected URL leaves the phase untouched, records the inline error
    /// and issues no backend call. Backend failures end the run in
    /// [`Phase::Failed`] with an error toast; they are not returned.
    pub async fn submit(&mut self, url: &str) -> Result<Phase, ValidationError> {
        if let Err(e) = validate_url(url) {
            self.state.send_modify(|s| s.url_error = Some(e.clone()));
            return Err(e);
        }

        info!(%url, "starting analysis run");
        self.store.save(url);
        self.dispatch(Event::Submitted { url: url.to_string() });

        let local_path = match self.backend.fetch_repository(url).await {
            Ok(path) => path,
            Err(e) => return Ok(self.fail(Event::FetchFailed, e)),
        };
        self.dispatch(Event::Fetched);

        match self.backend.analyze_repository(&local_path).await {
            Ok(report) => {
                info!(
                    total = report.total_packages,
                    outdated = report.outdated_count,
                    score = report.health_score,
                    "analysis complete"
                );
                self.dispatch(Event::Analyzed(report));
                self.toasts.push(SUCCESS_MESSAGE, ToastKind::Success);
                Ok(Phase::Succeeded)
            }
            Err(e) => Ok(self.fail(Event::AnalyzeFailed, e)),
        }
    }

    fn fail(&mut self, event: Event, err: ClientError) -> Phase {
        warn!(error = %err, "analysis run failed");
        self.dispatch(event);
        let msg = match err.message().trim() {
            "" => FALLBACK_ERROR,
            msg => msg,
        };
        self.toasts.push(msg, ToastKind::Error);
        Phase::Failed
    }

    fn dispatch(&mut self, event: Event) {
        self.state.send_modify(|s| {
            s.apply(event);
        });
    }
}
