//! UI/backend events and status-line text for the desktop console.

use client_core::ConsoleEvent;

pub enum UiEvent {
    Info(String),
    Console(ConsoleEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
}

/// Worker-level failure. Request failures never become a `UiError`; they stay
/// in the log.
#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Status line for a session event. Failed requests yield `None`: the console
/// keeps showing the last good data without an error banner.
pub fn status_for_console_event(event: &ConsoleEvent) -> Option<String> {
    match event {
        ConsoleEvent::SimulationStarted { .. } => Some("Running simulation...".to_string()),
        ConsoleEvent::SimulationCompleted { reactions, .. } => {
            Some(format!("Simulation complete: {reactions} leader reactions"))
        }
        ConsoleEvent::HistoryRefreshed { entries } => {
            Some(format!("History loaded ({entries} runs)"))
        }
        ConsoleEvent::LeadersRefreshed { leaders } => {
            Some(format!("Leaders loaded ({leaders} profiles)"))
        }
        ConsoleEvent::TabChanged(_)
        | ConsoleEvent::SimulationFailed { .. }
        | ConsoleEvent::RosterRefreshFailed { .. } => None,
    }
}
