use std::sync::Arc;

use shared::{error::ErrorKind, protocol::SimulationRequest};
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::{
    backend::SimulationBackend,
    events::ConsoleEvent,
    observability::{FailureContext, FailureSink},
    state::{SharedViewState, SimulatePhase},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text; nothing was sent.
    Ignored,
    /// Another simulation was still pending; nothing was sent.
    Suppressed,
    Completed {
        reactions: usize,
    },
    Failed(ErrorKind),
}

/// Drives the simulate request through `Idle -> Pending -> Succeeded | Failed`.
///
/// A submit while a request is already pending is suppressed rather than
/// superseding the in-flight one.
#[derive(Clone)]
pub struct RequestLifecycleManager {
    backend: Arc<dyn SimulationBackend>,
    state: SharedViewState,
    events: broadcast::Sender<ConsoleEvent>,
    sink: Arc<dyn FailureSink>,
}

impl RequestLifecycleManager {
    pub fn new(
        backend: Arc<dyn SimulationBackend>,
        state: SharedViewState,
        events: broadcast::Sender<ConsoleEvent>,
        sink: Arc<dyn FailureSink>,
    ) -> Self {
        Self {
            backend,
            state,
            events,
            sink,
        }
    }

    pub fn edit_event_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.update(|view| view.event_text = text);
    }

    pub async fn submit_draft(&self) -> SubmitOutcome {
        let text = self.state.read(|view| view.event_text.clone());
        self.submit(&text).await
    }

    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let request = match SimulationRequest::new(text) {
            Ok(request) => request,
            Err(err) => {
                debug!(kind = err.kind().as_str(), "submission ignored: {err}");
                return SubmitOutcome::Ignored;
            }
        };

        let entered = self.state.update(|view| {
            if view.loading() {
                return false;
            }
            view.phase = SimulatePhase::Pending;
            view.results = None;
            true
        });
        if !entered {
            info!("simulation already pending; submission suppressed");
            return SubmitOutcome::Suppressed;
        }

        info!(text_len = request.text.len(), "simulation requested");
        let _ = self.events.send(ConsoleEvent::SimulationStarted {
            text: request.text.clone(),
        });

        match self.backend.simulate(&request).await {
            Ok(result) => {
                let reactions = result.results.len();
                let completed = ConsoleEvent::SimulationCompleted {
                    simulation_id: result.simulation_id,
                    event_text: result.event_text.clone(),
                    reactions,
                };
                self.state.update(|view| {
                    view.results = Some(result);
                    view.phase = SimulatePhase::Succeeded;
                });
                info!(reactions, "simulation completed");
                let _ = self.events.send(completed);
                SubmitOutcome::Completed { reactions }
            }
            Err(err) => {
                let kind = err.kind();
                self.sink.report(FailureContext::Simulate, &err);
                self.state.update(|view| {
                    view.results = None;
                    view.phase = SimulatePhase::Failed;
                });
                let _ = self.events.send(ConsoleEvent::SimulationFailed { kind });
                SubmitOutcome::Failed(kind)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lifecycle_tests.rs"]
mod tests;
