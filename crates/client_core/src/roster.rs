use std::sync::Arc;

use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    backend::SimulationBackend,
    events::{ConsoleEvent, RosterCollection},
    observability::{FailureContext, FailureSink},
    state::SharedViewState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced { count: usize },
    /// The fetch failed and the previous collection was left in place.
    Retained,
}

/// Loads the read-only history and leader collections.
#[derive(Clone)]
pub struct RosterLoader {
    backend: Arc<dyn SimulationBackend>,
    state: SharedViewState,
    events: broadcast::Sender<ConsoleEvent>,
    sink: Arc<dyn FailureSink>,
}

impl RosterLoader {
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

    pub async fn load_history(&self) -> RefreshOutcome {
        match self.backend.history().await {
            Ok(entries) => {
                let count = entries.len();
                self.state.update(|view| view.history = entries);
                debug!(entries = count, "history refreshed");
                let _ = self
                    .events
                    .send(ConsoleEvent::HistoryRefreshed { entries: count });
                RefreshOutcome::Replaced { count }
            }
            Err(err) => {
                self.sink.report(FailureContext::LoadHistory, &err);
                let _ = self.events.send(ConsoleEvent::RosterRefreshFailed {
                    collection: RosterCollection::History,
                    kind: err.kind(),
                });
                RefreshOutcome::Retained
            }
        }
    }

    pub async fn load_leaders(&self) -> RefreshOutcome {
        match self.backend.leaders().await {
            Ok(leaders) => {
                let count = leaders.len();
                self.state.update(|view| view.leaders = leaders);
                debug!(leaders = count, "leaders refreshed");
                let _ = self
                    .events
                    .send(ConsoleEvent::LeadersRefreshed { leaders: count });
                RefreshOutcome::Replaced { count }
            }
            Err(err) => {
                self.sink.report(FailureContext::LoadLeaders, &err);
                let _ = self.events.send(ConsoleEvent::RosterRefreshFailed {
                    collection: RosterCollection::Leaders,
                    kind: err.kind(),
                });
                RefreshOutcome::Retained
            }
        }
    }

    /// Runs both initial fetches concurrently; neither waits on the other's
    /// outcome.
    pub async fn mount(&self) -> (RefreshOutcome, RefreshOutcome) {
        let outcomes = tokio::join!(self.load_history(), self.load_leaders());
        info!(history = ?outcomes.0, leaders = ?outcomes.1, "roster mounted");
        outcomes
    }

    /// Re-fetches history after every completed simulation. The task holds a
    /// sender of its own, so it runs until the handle is aborted.
    pub fn spawn_history_refresh(
        &self,
        mut events: broadcast::Receiver<ConsoleEvent>,
    ) -> JoinHandle<()> {
        let loader = self.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(ConsoleEvent::SimulationCompleted { .. }) => {
                        loader.load_history().await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "history refresh subscriber lagged; refreshing");
                        loader.load_history().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/roster_tests.rs"]
mod tests;
