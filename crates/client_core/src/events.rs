//! Session event bus payloads.

use shared::{domain::SimulationId, error::ErrorKind};

use crate::state::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterCollection {
    History,
    Leaders,
}

impl RosterCollection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Leaders => "leaders",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    TabChanged(Tab),
    SimulationStarted {
        text: String,
    },
    SimulationCompleted {
        simulation_id: Option<SimulationId>,
        event_text: String,
        reactions: usize,
    },
    SimulationFailed {
        kind: ErrorKind,
    },
    HistoryRefreshed {
        entries: usize,
    },
    LeadersRefreshed {
        leaders: usize,
    },
    RosterRefreshFailed {
        collection: RosterCollection,
        kind: ErrorKind,
    },
}
