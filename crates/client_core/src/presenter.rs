//! Pure view-model builders for the three tabs.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use shared::domain::{HistoryEntry, LeaderProfile, LeaderReaction, SimulationResult};

pub const HIGH_SEVERITY_THRESHOLD: f64 = 7.0;
pub const MEDIUM_SEVERITY_THRESHOLD: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    Low,
    Medium,
    High,
}

impl SeverityBand {
    /// Lower bounds are inclusive. NaN lands in `Low`.
    pub fn for_score(score: f64) -> Self {
        if score >= HIGH_SEVERITY_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_SEVERITY_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Low => [0x27, 0xae, 0x60],
            Self::Medium => [0xf3, 0x9c, 0x12],
            Self::High => [0xe7, 0x4c, 0x3c],
        }
    }

    pub fn color_hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentedReaction<'a> {
    pub reaction: &'a LeaderReaction,
    pub band: SeverityBand,
    pub score_label: String,
}

/// Orders reactions by escalation score, highest first. Ties keep the order
/// the backend returned them in.
pub fn present(result: &SimulationResult) -> Vec<PresentedReaction<'_>> {
    let mut ordered: Vec<&LeaderReaction> = result.results.iter().collect();
    ordered.sort_by(|a, b| b.escalation_score.total_cmp(&a.escalation_score));
    ordered
        .into_iter()
        .map(|reaction| PresentedReaction {
            reaction,
            band: SeverityBand::for_score(reaction.escalation_score),
            score_label: format_score(reaction.escalation_score),
        })
        .collect()
}

/// One fractional digit, halves rounded away from zero.
pub fn format_score(score: f64) -> String {
    let rounded = (score * 10.0).round() / 10.0;
    // folds -0.0 into 0.0
    format!("{:.1}", rounded + 0.0)
}

/// Width of a trait bar as a percentage. Values outside 0-10 pass through.
pub fn trait_width_percent(value: f64) -> f64 {
    value * 10.0
}

/// Status line shown while a simulation is pending.
pub fn loading_message(leader_count: usize) -> String {
    if leader_count == 0 {
        "Analyzing with leader agents...".to_string()
    } else {
        format!("Analyzing with {leader_count} leader agents...")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub event_text: String,
    pub avg_escalation_label: String,
    pub date_label: String,
}

pub fn history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
    entries
        .iter()
        .map(|entry| HistoryRow {
            event_text: entry.event_text.clone(),
            avg_escalation_label: entry.avg_escalation.to_string(),
            date_label: format_created_date(&entry.created_at),
        })
        .collect()
}

/// Calendar date of a backend timestamp. Zoned timestamps are shown in local
/// time; naive ones as-is; anything unparseable is returned verbatim.
pub fn format_created_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return zoned
            .with_timezone(&Local)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitBar {
    pub label: &'static str,
    pub value: f64,
    pub width_percent: f64,
}

impl TraitBar {
    fn new(label: &'static str, value: f64) -> Self {
        Self {
            label,
            value,
            width_percent: trait_width_percent(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderCard {
    pub name: String,
    pub traits: [TraitBar; 4],
    pub escalation_threshold: Option<f64>,
}

pub fn leader_cards(leaders: &[LeaderProfile]) -> Vec<LeaderCard> {
    leaders
        .iter()
        .map(|leader| LeaderCard {
            name: leader.name.clone(),
            traits: [
                TraitBar::new("Aggression", leader.aggression),
                TraitBar::new("Diplomacy", leader.diplomacy),
                TraitBar::new("Risk Tolerance", leader.risk_tolerance),
                TraitBar::new("Domestic Pressure", leader.domestic_pressure),
            ],
            escalation_threshold: leader.escalation_threshold,
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
