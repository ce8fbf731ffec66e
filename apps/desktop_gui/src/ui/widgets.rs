use client_core::presenter::{LeaderCard, PresentedReaction, SeverityBand, TraitBar};
use eframe::egui;
use shared::domain::HistoryEntry;

pub fn band_color(band: SeverityBand) -> egui::Color32 {
    let [r, g, b] = band.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Fill fraction handed to the progress bar widget. Only the drawing is
/// bounded; the label next to the bar shows the raw trait value.
pub fn bar_fill_fraction(width_percent: f64) -> f32 {
    if width_percent.is_nan() {
        return 0.0;
    }
    (width_percent / 100.0).clamp(0.0, 1.0) as f32
}

pub fn score_badge(ui: &mut egui::Ui, item: &PresentedReaction<'_>) {
    egui::Frame::new()
        .fill(band_color(item.band))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(&item.score_label)
                    .color(egui::Color32::WHITE)
                    .strong(),
            );
        });
}

pub fn reaction_card(ui: &mut egui::Ui, item: &PresentedReaction<'_>) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.heading(&item.reaction.leader);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    score_badge(ui, item);
                });
            });
            ui.label(&item.reaction.reaction);
            ui.label(
                egui::RichText::new(&item.reaction.rationale)
                    .italics()
                    .color(ui.visuals().weak_text_color()),
            );
            if !item.reaction.similar_events.is_empty() {
                ui.add_space(4.0);
                ui.small("Similar past events:");
                for similar in &item.reaction.similar_events {
                    ui.small(format!("• {similar}"));
                }
            }
        });
}

pub fn history_item(ui: &mut egui::Ui, event_text: &str, avg_label: &str, date_label: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(event_text);
            ui.horizontal(|ui| {
                ui.small(format!("Avg Escalation: {avg_label}"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(date_label);
                });
            });
        });
}

pub fn trait_bar(ui: &mut egui::Ui, bar: &TraitBar) {
    ui.horizontal(|ui| {
        ui.add_sized([140.0, 18.0], egui::Label::new(bar.label));
        ui.add(
            egui::ProgressBar::new(bar_fill_fraction(bar.width_percent))
                .desired_width(180.0)
                .text(format!("{}", bar.value)),
        );
    });
}

pub fn leader_profile(ui: &mut egui::Ui, card: &LeaderCard) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.heading(&card.name);
            for bar in &card.traits {
                trait_bar(ui, bar);
            }
            if let Some(threshold) = card.escalation_threshold {
                ui.small(format!("Escalation threshold: {threshold}"));
            }
        });
}

pub fn history_count_label(entries: &[HistoryEntry]) -> String {
    match entries.len() {
        1 => "1 run".to_string(),
        n => format!("{n} runs"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_use_fixed_palette() {
        assert_eq!(
            band_color(SeverityBand::High),
            egui::Color32::from_rgb(0xe7, 0x4c, 0x3c)
        );
        assert_eq!(
            band_color(SeverityBand::Low),
            egui::Color32::from_rgb(0x27, 0xae, 0x60)
        );
    }

    #[test]
    fn fill_fraction_is_bounded_for_drawing_only() {
        assert_eq!(bar_fill_fraction(70.0), 0.7);
        assert_eq!(bar_fill_fraction(120.0), 1.0);
        assert_eq!(bar_fill_fraction(-10.0), 0.0);
        assert_eq!(bar_fill_fraction(f64::NAN), 0.0);
    }

    #[test]
    fn history_count_is_pluralized() {
        assert_eq!(history_count_label(&[]), "0 runs");
    }
}
