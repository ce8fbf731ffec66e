use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    events::ConsoleEvent,
    state::{SharedViewState, Tab},
};

/// Switches the visible view. Nothing else in the session state is touched.
#[derive(Clone)]
pub struct NavigationController {
    state: SharedViewState,
    events: broadcast::Sender<ConsoleEvent>,
}

impl NavigationController {
    pub fn new(state: SharedViewState, events: broadcast::Sender<ConsoleEvent>) -> Self {
        Self { state, events }
    }

    pub fn select(&self, tab: Tab) {
        self.state.update(|view| view.active_tab = tab);
        debug!(tab = tab.as_str(), "tab selected");
        let _ = self.events.send(ConsoleEvent::TabChanged(tab));
    }

    pub fn active(&self) -> Tab {
        self.state.read(|view| view.active_tab)
    }
}
