//! In-memory doubles shared by the controller tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use shared::{
    domain::{HistoryEntry, LeaderProfile, LeaderReaction, SimulationResult},
    error::ConsoleError,
    protocol::SimulationRequest,
};
use tokio::sync::oneshot;

use crate::{
    backend::SimulationBackend,
    observability::{FailureContext, FailureSink},
};

pub(crate) fn reaction(leader: &str, escalation_score: f64) -> LeaderReaction {
    LeaderReaction {
        leader: leader.to_string(),
        reaction: format!("{leader} reacts"),
        rationale: format!("{leader} rationale"),
        escalation_score,
        similar_events: Vec::new(),
    }
}

pub(crate) fn simulation(event_text: &str, results: Vec<LeaderReaction>) -> SimulationResult {
    SimulationResult {
        simulation_id: None,
        event_text: event_text.to_string(),
        created_at: None,
        results,
    }
}

pub(crate) fn history_entry(event_text: &str, avg_escalation: f64) -> HistoryEntry {
    HistoryEntry {
        simulation_id: None,
        event_text: event_text.to_string(),
        avg_escalation,
        created_at: "2024-05-01T10:00:00".to_string(),
    }
}

pub(crate) fn leader(name: &str, aggression: f64) -> LeaderProfile {
    LeaderProfile {
        id: None,
        name: name.to_string(),
        aggression,
        diplomacy: 5.0,
        risk_tolerance: 5.0,
        domestic_pressure: 5.0,
        escalation_threshold: None,
    }
}

fn no_script(endpoint: &str) -> ConsoleError {
    ConsoleError::Network(format!("no scripted response for {endpoint}"))
}

struct PendingGate {
    entered: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Test side of a gated simulate call. `entered` resolves once the call is
/// parked inside the backend; sending on `release` lets it finish.
pub(crate) struct SimulateGate {
    pub(crate) release: oneshot::Sender<()>,
    pub(crate) entered: oneshot::Receiver<()>,
}

/// Backend double answering from per-endpoint queues.
///
/// Unscripted calls fail with a network error. When a gate is installed the
/// next simulate call signals `entered` and then parks until `release` fires.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    simulate: Mutex<VecDeque<Result<SimulationResult, ConsoleError>>>,
    history: Mutex<VecDeque<Result<Vec<HistoryEntry>, ConsoleError>>>,
    leaders: Mutex<VecDeque<Result<Vec<LeaderProfile>, ConsoleError>>>,
    simulate_gate: Mutex<Option<PendingGate>>,
    pub(crate) requests: Mutex<Vec<SimulationRequest>>,
    pub(crate) simulate_calls: AtomicUsize,
    pub(crate) history_calls: AtomicUsize,
    pub(crate) leaders_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub(crate) fn push_simulate(&self, outcome: Result<SimulationResult, ConsoleError>) {
        self.simulate.lock().expect("lock").push_back(outcome);
    }

    pub(crate) fn push_history(&self, outcome: Result<Vec<HistoryEntry>, ConsoleError>) {
        self.history.lock().expect("lock").push_back(outcome);
    }

    pub(crate) fn push_leaders(&self, outcome: Result<Vec<LeaderProfile>, ConsoleError>) {
        self.leaders.lock().expect("lock").push_back(outcome);
    }

    pub(crate) fn gate_next_simulate(&self) -> SimulateGate {
        let (release, release_rx) = oneshot::channel();
        let (entered_tx, entered) = oneshot::channel();
        *self.simulate_gate.lock().expect("lock") = Some(PendingGate {
            entered: entered_tx,
            release: release_rx,
        });
        SimulateGate { release, entered }
    }

    pub(crate) fn simulate_count(&self) -> usize {
        self.simulate_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn history_count(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn leaders_count(&self) -> usize {
        self.leaders_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SimulationBackend for ScriptedBackend {
    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, ConsoleError> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("lock").push(request.clone());
        let gate = self.simulate_gate.lock().expect("lock").take();
        if let Some(gate) = gate {
            let _ = gate.entered.send(());
            let _ = gate.release.await;
        }
        let next = self.simulate.lock().expect("lock").pop_front();
        next.unwrap_or_else(|| Err(no_script("simulate")))
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ConsoleError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.history.lock().expect("lock").pop_front();
        next.unwrap_or_else(|| Err(no_script("history")))
    }

    async fn leaders(&self) -> Result<Vec<LeaderProfile>, ConsoleError> {
        self.leaders_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.leaders.lock().expect("lock").pop_front();
        next.unwrap_or_else(|| Err(no_script("leaders")))
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    pub(crate) reports: Mutex<Vec<(FailureContext, ConsoleError)>>,
}

impl RecordingSink {
    pub(crate) fn contexts(&self) -> Vec<FailureContext> {
        self.reports
            .lock()
            .expect("lock")
            .iter()
            .map(|(context, _)| *context)
            .collect()
    }
}

impl FailureSink for RecordingSink {
    fn report(&self, context: FailureContext, error: &ConsoleError) {
        self.reports
            .lock()
            .expect("lock")
            .push((context, error.clone()));
    }
}
