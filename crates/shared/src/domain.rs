use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);
    };
}

id_newtype!(SimulationId);
id_newtype!(LeaderId);

/// One leader's response to a simulated event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderReaction {
    pub leader: String,
    pub reaction: String,
    pub rationale: String,
    /// Nominally 0-10. Not range checked on the client.
    pub escalation_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub similar_events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_id: Option<SimulationId>,
    pub event_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub results: Vec<LeaderReaction>,
}

/// Summary row of a past simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_id: Option<SimulationId>,
    pub event_text: String,
    pub avg_escalation: f64,
    pub created_at: String,
}

/// Leader archetype with trait scores on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LeaderId>,
    pub name: String,
    pub aggression: f64,
    pub diplomacy: f64,
    pub risk_tolerance: f64,
    pub domestic_pressure: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_threshold: Option<f64>,
}
