use std::{sync::Arc, time::Duration};

use client_core::{
    presenter::{history_rows, leader_cards, loading_message, present},
    ConsoleSession, Tab, ViewState,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{status_for_console_event, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets;

const EVENT_PLACEHOLDER: &str =
    "Describe a geopolitical event... (e.g., 'China announces naval exercises near Taiwan')";

pub struct ConsoleApp {
    session: Arc<ConsoleSession>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    draft: String,
    status: String,
}

impl ConsoleApp {
    pub fn new(
        session: Arc<ConsoleSession>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let draft = session.state().read(|view| view.event_text.clone());
        let mut app = Self {
            session,
            cmd_tx,
            ui_rx,
            draft,
            status: "Starting".to_string(),
        };
        app.dispatch(BackendCommand::Mount);
        app
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Console(event) => {
                    if let Some(status) = status_for_console_event(&event) {
                        self.status = status;
                    }
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = err.message().to_string();
                }
            }
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn submit(&mut self) {
        let text = self.draft.clone();
        self.dispatch(BackendCommand::Submit { text });
    }

    fn show_header(&mut self, ctx: &egui::Context, active: Tab) {
        egui::TopBottomPanel::top("console_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("Polaris");
            ui.label("Multi-Agent Crisis Response Simulation");
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    if ui.selectable_label(tab == active, tab.label()).clicked() {
                        self.session.navigation().select(tab);
                    }
                }
            });
            ui.add_space(4.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("console_status").show(ctx, |ui| {
            ui.small(&self.status);
        });
    }

    fn show_simulate_tab(&mut self, ui: &mut egui::Ui, view: &ViewState) {
        let edit = ui.add(
            egui::TextEdit::multiline(&mut self.draft)
                .id_salt("event_text")
                .hint_text(EVENT_PLACEHOLDER)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        if edit.changed() {
            self.session.lifecycle().edit_event_text(self.draft.clone());
        }

        let button_label = if view.loading() {
            "Running Simulation..."
        } else {
            "Run Simulation"
        };
        if ui
            .add_enabled(!view.loading(), egui::Button::new(button_label))
            .clicked()
        {
            self.submit();
        }

        if view.loading() {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(loading_message(view.leaders.len()));
            });
        }

        let Some(result) = &view.results else {
            return;
        };
        ui.add_space(12.0);
        ui.heading("Simulation Results");
        ui.label(format!("Event: {}", result.event_text));
        ui.add_space(6.0);
        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for item in present(result) {
                    widgets::reaction_card(ui, &item);
                    ui.add_space(6.0);
                }
            });
    }

    fn show_history_tab(&mut self, ui: &mut egui::Ui, view: &ViewState) {
        let mut refresh = false;
        ui.horizontal(|ui| {
            ui.heading("Past Simulations");
            ui.small(widgets::history_count_label(&view.history));
            refresh = ui.small_button("Refresh").clicked();
        });
        if refresh {
            self.dispatch(BackendCommand::RefreshHistory);
        }
        if view.history.is_empty() {
            ui.label("No simulations yet.");
            return;
        }
        egui::ScrollArea::vertical()
            .id_salt("history_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for row in history_rows(&view.history) {
                    widgets::history_item(
                        ui,
                        &row.event_text,
                        &row.avg_escalation_label,
                        &row.date_label,
                    );
                    ui.add_space(4.0);
                }
            });
    }

    fn show_leaders_tab(&mut self, ui: &mut egui::Ui, view: &ViewState) {
        let mut refresh = false;
        ui.horizontal(|ui| {
            ui.heading("Leader Archetypes");
            refresh = ui.small_button("Refresh").clicked();
        });
        if refresh {
            self.dispatch(BackendCommand::RefreshLeaders);
        }
        egui::ScrollArea::vertical()
            .id_salt("leaders_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for card in leader_cards(&view.leaders) {
                        widgets::leader_profile(ui, &card);
                    }
                });
            });
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let view = self.session.state().snapshot();
        self.show_header(ctx, view.active_tab);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match view.active_tab {
            Tab::Simulate => self.show_simulate_tab(ui, &view),
            Tab::History => self.show_history_tab(ui, &view),
            Tab::Leaders => self.show_leaders_tab(ui, &view),
        });

        let repaint_after = if view.loading() { 16 } else { 100 };
        ctx.request_repaint_after(Duration::from_millis(repaint_after));
    }
}
