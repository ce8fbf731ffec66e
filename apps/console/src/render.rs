//! Plain-text rendering of the console views.

use std::fmt::Write as _;

use client_core::{
    presenter::{history_rows, leader_cards, loading_message, present, TraitBar},
    Tab, ViewState,
};
use shared::domain::{HistoryEntry, LeaderProfile, SimulationResult};

const BAR_CELLS: f64 = 20.0;

pub fn render_view(view: &ViewState) -> String {
    let mut out = render_tab_bar(view.active_tab);
    out.push('\n');
    match view.active_tab {
        Tab::Simulate => out.push_str(&render_simulate(view)),
        Tab::History => out.push_str(&render_history(&view.history)),
        Tab::Leaders => out.push_str(&render_leaders(&view.leaders)),
    }
    out
}

pub fn render_tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_simulate(view: &ViewState) -> String {
    let mut out = String::new();
    if !view.event_text.trim().is_empty() {
        let _ = writeln!(out, "Draft: {}", view.event_text);
    }
    if view.loading() {
        let _ = writeln!(out, "Running Simulation...");
        let _ = writeln!(out, "{}", loading_message(view.leaders.len()));
    }
    if let Some(result) = &view.results {
        out.push_str(&render_results(result));
    }
    if out.is_empty() {
        out.push_str("Describe a geopolitical event (e.g. 'China announces naval exercises near Taiwan').\n");
    }
    out
}

pub fn render_results(result: &SimulationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Simulation Results");
    let _ = writeln!(out, "Event: {}", result.event_text);
    for item in present(result) {
        let _ = writeln!(
            out,
            "\n{:<24} {:>5}  [{}]",
            item.reaction.leader,
            item.score_label,
            item.band.label().to_ascii_uppercase()
        );
        let _ = writeln!(out, "  {}", item.reaction.reaction);
        let _ = writeln!(out, "  {}", item.reaction.rationale);
        for similar in &item.reaction.similar_events {
            let _ = writeln!(out, "  ~ {similar}");
        }
    }
    out
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    let mut out = String::from("Past Simulations\n");
    if entries.is_empty() {
        out.push_str("No simulations yet.\n");
        return out;
    }
    for row in history_rows(entries) {
        let _ = writeln!(out, "\n{}", row.event_text);
        let _ = writeln!(
            out,
            "  Avg Escalation: {}    {}",
            row.avg_escalation_label, row.date_label
        );
    }
    out
}

pub fn render_leaders(leaders: &[LeaderProfile]) -> String {
    let mut out = String::from("Leader Archetypes\n");
    for card in leader_cards(leaders) {
        let _ = writeln!(out, "\n{}", card.name);
        for bar in &card.traits {
            let _ = writeln!(out, "  {:<18} {} {}", bar.label, trait_bar(bar), bar.value);
        }
        if let Some(threshold) = card.escalation_threshold {
            let _ = writeln!(out, "  Escalation threshold: {threshold}");
        }
    }
    out
}

/// `#` cells proportional to the bar width; five percent per cell.
/// Negative widths draw an empty bar.
pub fn bar_cells(width_percent: f64) -> usize {
    let cells = (width_percent / 100.0 * BAR_CELLS).round();
    if cells.is_nan() || cells <= 0.0 {
        0
    } else {
        cells as usize
    }
}

fn trait_bar(bar: &TraitBar) -> String {
    let filled = bar_cells(bar.width_percent);
    let empty = (BAR_CELLS as usize).saturating_sub(filled);
    format!("|{}{}|", "#".repeat(filled), " ".repeat(empty))
}
