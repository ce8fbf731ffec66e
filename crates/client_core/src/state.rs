//! Session view state and the shared container the controllers mutate.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, PoisonError, RwLock},
};

use shared::domain::{HistoryEntry, LeaderProfile, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Simulate,
    History,
    Leaders,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Simulate, Tab::History, Tab::Leaders];

    pub fn label(self) -> &'static str {
        match self {
            Self::Simulate => "Simulate",
            Self::History => "History",
            Self::Leaders => "Leaders",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simulate => "simulate",
            Self::History => "history",
            Self::Leaders => "leaders",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTab(pub String);

impl fmt::Display for UnknownTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tab '{}'", self.0)
    }
}

impl std::error::Error for UnknownTab {}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulate" => Ok(Self::Simulate),
            "history" => Ok(Self::History),
            "leaders" => Ok(Self::Leaders),
            other => Err(UnknownTab(other.to_string())),
        }
    }
}

/// Where the simulate request lifecycle currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulatePhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub active_tab: Tab,
    pub event_text: String,
    pub phase: SimulatePhase,
    pub results: Option<SimulationResult>,
    pub history: Vec<HistoryEntry>,
    pub leaders: Vec<LeaderProfile>,
}

impl ViewState {
    /// True exactly while a simulate request is in flight.
    pub fn loading(&self) -> bool {
        self.phase == SimulatePhase::Pending
    }
}

/// Cloneable handle to one session's [`ViewState`].
///
/// Every write happens inside a single critical section and no lock is held
/// across an `.await`, so readers never see a half-applied transition.
#[derive(Debug, Clone, Default)]
pub struct SharedViewState {
    inner: Arc<RwLock<ViewState>>,
}

impl SharedViewState {
    pub fn new(state: ViewState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.read(ViewState::clone)
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
