use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

pub const SIMULATE_PATH: &str = "/simulate";
pub const HISTORY_PATH: &str = "/history";
pub const LEADERS_PATH: &str = "/leaders";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub text: String,
}

impl SimulationRequest {
    /// Rejects blank text with [`ConsoleError::Validation`], so an empty
    /// submission never reaches the wire. The text is sent as typed, not
    /// trimmed.
    pub fn new(text: impl Into<String>) -> Result<Self, ConsoleError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ConsoleError::Validation("event text is blank".to_string()));
        }
        Ok(Self { text })
    }
}
