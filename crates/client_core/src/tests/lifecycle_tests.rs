use std::{sync::Arc, time::Duration};

use super::*;
use crate::{
    state::ViewState,
    test_support::{reaction, simulation, RecordingSink, ScriptedBackend},
};
use shared::error::ConsoleError;

struct Harness {
    backend: Arc<ScriptedBackend>,
    sink: Arc<RecordingSink>,
    state: SharedViewState,
    events: broadcast::Receiver<ConsoleEvent>,
    manager: RequestLifecycleManager,
}

fn harness() -> Harness {
    let backend = Arc::new(ScriptedBackend::default());
    let sink = Arc::new(RecordingSink::default());
    let state = SharedViewState::default();
    let (events_tx, events) = broadcast::channel(64);
    let manager =
        RequestLifecycleManager::new(backend.clone(), state.clone(), events_tx, sink.clone());
    Harness {
        backend,
        sink,
        state,
        events,
        manager,
    }
}

#[tokio::test]
async fn blank_submissions_are_ignored_without_touching_state() {
    let h = harness();
    let previous = simulation("earlier", vec![reaction("A", 5.0)]);
    h.state.update(|view| {
        view.results = Some(previous.clone());
        view.phase = SimulatePhase::Succeeded;
    });

    assert_eq!(h.manager.submit("").await, SubmitOutcome::Ignored);
    assert_eq!(h.manager.submit("   ").await, SubmitOutcome::Ignored);

    let view = h.state.snapshot();
    assert!(!view.loading());
    assert_eq!(view.results, Some(previous));
    assert_eq!(h.backend.simulate_count(), 0);
    assert!(h.sink.contexts().is_empty());
}

#[tokio::test]
async fn success_stores_result_and_announces_completion() {
    let mut h = harness();
    h.backend
        .push_simulate(Ok(simulation("Strait closed", vec![reaction("A", 8.2)])));

    let outcome = h.manager.submit("Strait closed").await;

    assert_eq!(outcome, SubmitOutcome::Completed { reactions: 1 });
    let view = h.state.snapshot();
    assert_eq!(view.phase, SimulatePhase::Succeeded);
    assert!(!view.loading());
    assert_eq!(
        view.results.map(|result| result.event_text),
        Some("Strait closed".to_string())
    );
    assert_eq!(
        h.backend.requests.lock().expect("lock")[0].text,
        "Strait closed"
    );

    assert_eq!(
        h.events.recv().await.expect("event"),
        ConsoleEvent::SimulationStarted {
            text: "Strait closed".to_string()
        }
    );
    assert_eq!(
        h.events.recv().await.expect("event"),
        ConsoleEvent::SimulationCompleted {
            simulation_id: None,
            event_text: "Strait closed".to_string(),
            reactions: 1,
        }
    );
}

#[tokio::test]
async fn pending_submit_clears_previous_results_before_response() {
    let h = harness();
    h.backend
        .push_simulate(Ok(simulation("first", vec![reaction("A", 2.0)])));
    h.manager.submit("first").await;
    assert!(h.state.snapshot().results.is_some());

    h.backend
        .push_simulate(Ok(simulation("second", vec![reaction("B", 9.0)])));
    let gate = h.backend.gate_next_simulate();
    let manager = h.manager.clone();
    let task = tokio::spawn(async move { manager.submit("second").await });

    gate.entered.await.expect("entered");
    let pending = h.state.snapshot();
    assert!(pending.loading());
    assert_eq!(pending.phase, SimulatePhase::Pending);
    assert!(pending.results.is_none());

    gate.release.send(()).expect("release");
    let outcome = task.await.expect("join");
    assert_eq!(outcome, SubmitOutcome::Completed { reactions: 1 });
    assert_eq!(
        h.state.snapshot().results.map(|result| result.event_text),
        Some("second".to_string())
    );
}

#[tokio::test]
async fn submit_while_pending_is_suppressed() {
    let h = harness();
    h.backend
        .push_simulate(Ok(simulation("first", vec![reaction("A", 2.0)])));
    let gate = h.backend.gate_next_simulate();
    let manager = h.manager.clone();
    let task = tokio::spawn(async move { manager.submit("first").await });
    gate.entered.await.expect("entered");

    assert_eq!(
        h.manager.submit("second").await,
        SubmitOutcome::Suppressed
    );
    assert_eq!(h.backend.simulate_count(), 1);
    assert!(h.state.snapshot().loading());

    gate.release.send(()).expect("release");
    task.await.expect("join");
    assert_eq!(
        h.state.snapshot().results.map(|result| result.event_text),
        Some("first".to_string())
    );
}

#[tokio::test]
async fn failure_stops_loading_and_reports_to_sink() {
    let mut h = harness();
    h.backend.push_simulate(Err(ConsoleError::Server {
        status: 502,
        message: "bad gateway".to_string(),
    }));

    let outcome = h.manager.submit("Border skirmish").await;

    assert_eq!(outcome, SubmitOutcome::Failed(ErrorKind::Server));
    let view = h.state.snapshot();
    assert_eq!(view.phase, SimulatePhase::Failed);
    assert!(!view.loading());
    assert!(view.results.is_none());
    assert_eq!(h.sink.contexts(), vec![FailureContext::Simulate]);

    let _started = h.events.recv().await.expect("started");
    assert_eq!(
        h.events.recv().await.expect("event"),
        ConsoleEvent::SimulationFailed {
            kind: ErrorKind::Server
        }
    );
}

#[tokio::test]
async fn failed_run_can_be_retried() {
    let h = harness();
    h.backend
        .push_simulate(Err(ConsoleError::Network("connection reset".to_string())));
    h.backend
        .push_simulate(Ok(simulation("retry", vec![reaction("A", 4.0)])));

    assert_eq!(
        h.manager.submit("retry").await,
        SubmitOutcome::Failed(ErrorKind::Network)
    );
    assert_eq!(
        h.manager.submit("retry").await,
        SubmitOutcome::Completed { reactions: 1 }
    );
    assert_eq!(h.state.snapshot().phase, SimulatePhase::Succeeded);
}

#[tokio::test]
async fn submit_draft_uses_edited_event_text() {
    let h = harness();
    h.backend
        .push_simulate(Ok(simulation("Drafted event", Vec::new())));

    h.manager.edit_event_text("Drafted event");
    let outcome = h.manager.submit_draft().await;

    assert_eq!(outcome, SubmitOutcome::Completed { reactions: 0 });
    let view = h.state.snapshot();
    assert_eq!(view.event_text, "Drafted event");
    assert_eq!(
        h.backend.requests.lock().expect("lock")[0].text,
        "Drafted event"
    );
}

#[tokio::test]
async fn navigation_stays_available_while_pending() {
    let h = harness();
    h.backend.push_simulate(Ok(simulation("slow", Vec::new())));
    let gate = h.backend.gate_next_simulate();
    let manager = h.manager.clone();
    let task = tokio::spawn(async move { manager.submit("slow").await });
    gate.entered.await.expect("entered");

    let (events_tx, _) = broadcast::channel(4);
    let navigation = crate::navigation::NavigationController::new(h.state.clone(), events_tx);
    navigation.select(crate::state::Tab::Leaders);
    assert!(h.state.snapshot().loading());
    assert_eq!(navigation.active(), crate::state::Tab::Leaders);

    gate.release.send(()).expect("release");
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("timely")
        .expect("join");
    assert_eq!(
        h.state.snapshot(),
        ViewState {
            active_tab: crate::state::Tab::Leaders,
            phase: SimulatePhase::Succeeded,
            results: Some(simulation("slow", Vec::new())),
            ..ViewState::default()
        }
    );
}

#[tokio::test]
async fn completed_submit_leaves_no_entry_signal_for_the_next_gate() {
    let h = harness();
    h.backend
        .push_simulate(Ok(simulation("first", vec![reaction("A", 2.0)])));
    h.manager.submit("first").await;

    let mut gate = h.backend.gate_next_simulate();
    let early = tokio::time::timeout(Duration::from_millis(100), &mut gate.entered).await;
    assert!(early.is_err(), "entered fired with no simulate in flight");
    assert!(!h.state.snapshot().loading());
}
