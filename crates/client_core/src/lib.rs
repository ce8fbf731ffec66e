//! Session controller for the Polaris crisis-simulation console.
//!
//! A [`ConsoleSession`] owns one [`SharedViewState`] and the four controllers
//! that are allowed to mutate it: navigation, the simulate request lifecycle,
//! the roster loader, and (read-only) the presenter functions.

use std::sync::Arc;

use tokio::{sync::broadcast, task::JoinHandle};

pub mod backend;
pub mod config;
pub mod events;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod presenter;
pub mod roster;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::{HttpSimulationBackend, SimulationBackend};
pub use events::{ConsoleEvent, RosterCollection};
pub use lifecycle::{RequestLifecycleManager, SubmitOutcome};
pub use navigation::NavigationController;
pub use observability::{FailureContext, FailureSink, TracingFailureSink};
pub use roster::{RefreshOutcome, RosterLoader};
pub use state::{SharedViewState, SimulatePhase, Tab, ViewState};

const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct ConsoleSession {
    state: SharedViewState,
    navigation: NavigationController,
    lifecycle: RequestLifecycleManager,
    roster: RosterLoader,
    events: broadcast::Sender<ConsoleEvent>,
    history_refresh: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl ConsoleSession {
    pub fn new(backend: Arc<dyn SimulationBackend>) -> Self {
        Self::new_with_sink(backend, Arc::new(TracingFailureSink))
    }

    pub fn new_with_sink(backend: Arc<dyn SimulationBackend>, sink: Arc<dyn FailureSink>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = SharedViewState::default();
        Self {
            navigation: NavigationController::new(state.clone(), events.clone()),
            lifecycle: RequestLifecycleManager::new(
                backend.clone(),
                state.clone(),
                events.clone(),
                sink.clone(),
            ),
            roster: RosterLoader::new(backend, state.clone(), events.clone(), sink),
            state,
            events,
            history_refresh: std::sync::Mutex::new(None),
        }
    }

    /// Subscribes history to simulation completions (once per session) and
    /// runs the initial roster fetches. Must be called inside a tokio runtime.
    pub async fn mount(&self) -> (RefreshOutcome, RefreshOutcome) {
        {
            let mut guard = self
                .history_refresh
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if guard.is_none() {
                *guard = Some(self.roster.spawn_history_refresh(self.events.subscribe()));
            }
        }
        self.roster.mount().await
    }

    pub fn state(&self) -> &SharedViewState {
        &self.state
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn lifecycle(&self) -> &RequestLifecycleManager {
        &self.lifecycle
    }

    pub fn roster(&self) -> &RosterLoader {
        &self.roster
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ConsoleEvent> {
        self.events.subscribe()
    }
}

impl Drop for ConsoleSession {
    fn drop(&mut self) {
        let handle = self
            .history_refresh
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
