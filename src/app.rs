use eframe::egui;
use log::{info, warn};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::controller::{ExportController, PanelIntent};
use crate::error::ExportError;
use crate::export::{start_export, ExportEvent, ExportHandle, ExportSimulator, RandomOutcomes, SimulatorConfig};
use crate::localizations::Localizations;
use crate::models::{AssetInfo, ExportOptions};
use crate::theme::PANEL_BG;
use crate::ui;

/// How the host configures each simulated export attempt.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub simulator: SimulatorConfig,
    pub failure_rate: f64,
    /// Seed for reproducible runs. Attempt `n` uses `seed + n`.
    pub seed: Option<u64>,
}

pub struct ExportPanelApp {
    controller: ExportController,
    asset: AssetInfo,
    localizer: Localizations,
    settings: ExportSettings,
    attempts: u64,
    event_sender: Sender<ExportEvent>,
    event_receiver: Receiver<ExportEvent>,
    worker: Option<ExportHandle>,
}

impl ExportPanelApp {
    pub fn new(
        controller: ExportController,
        asset: AssetInfo,
        localizer: Localizations,
        settings: ExportSettings,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            controller,
            asset,
            localizer,
            settings,
            attempts: 0,
            event_sender: tx,
            event_receiver: rx,
            worker: None,
        }
    }

    fn apply_intent(&mut self, intent: PanelIntent, ctx: &egui::Context) {
        if intent == PanelIntent::CancelRequested {
            if let Some(worker) = &self.worker {
                info!("Cancelling export");
                worker.cancel();
            }
            return;
        }

        if let Some(options) = self.controller.handle_intent(intent) {
            self.spawn_worker(options);
            ctx.request_repaint();
        }
    }

    fn spawn_worker(&mut self, options: ExportOptions) {
        if let Some(previous) = self.worker.take() {
            previous.join();
        }

        let outcomes = match self.settings.seed {
            Some(seed) => RandomOutcomes::seeded(seed.wrapping_add(self.attempts), self.settings.failure_rate),
            None => RandomOutcomes::from_entropy(self.settings.failure_rate),
        };
        self.attempts += 1;

        let simulator = ExportSimulator::new(self.settings.simulator.clone(), outcomes);
        self.worker = Some(start_export(simulator, options, self.event_sender.clone()));
    }

    fn process_export_events(&mut self, ctx: &egui::Context) {
        let mut finished = false;
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ExportEvent::Progress { progress, platform } => {
                    self.controller.record_progress(progress, platform);
                }
                ExportEvent::Finished(outcome) => {
                    self.controller.finish(outcome);
                    finished = true;
                }
            }
            ctx.request_repaint();
        }

        if finished {
            if let Some(worker) = self.worker.take() {
                worker.join();
            }
        } else if self.worker.as_ref().is_some_and(|w| w.is_finished()) {
            // Finished without reporting. Drain once more in case the last
            // event raced the check, then treat silence as a failure.
            while let Ok(event) = self.event_receiver.try_recv() {
                if let ExportEvent::Finished(outcome) = event {
                    self.controller.finish(outcome);
                    finished = true;
                }
            }
            if !finished {
                warn!("Export worker exited without a result");
                self.controller
                    .finish(Err(ExportError::Unexpected("Unknown error occurred".to_string())));
            }
            if let Some(worker) = self.worker.take() {
                worker.join();
            }
        }

        if self.worker.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }

    pub fn update_ui(&mut self, ctx: &egui::Context) {
        self.process_export_events(ctx);

        let mut intents = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(PANEL_BG))
            .show(ctx, |ui| {
                ui::render_header(ui, &self.localizer);
                ui.add_space(12.0);

                ui::render_asset_info(ui, &self.asset);
                ui.add_space(12.0);

                egui::ScrollArea::vertical()
                    .max_height((ui.available_height() - 180.0).max(0.0))
                    .show(ui, |ui| {
                        intents.extend(ui::render_platform_selector(ui, &self.controller, &self.localizer));
                    });
                ui.add_space(8.0);

                ui::render_progress(ui, &self.controller, &self.localizer);
                ui.add_space(8.0);

                ui::render_note_box(ui, &self.controller, &self.localizer);
                ui.add_space(12.0);

                intents.extend(ui::render_action_buttons(ui, &self.controller, &self.localizer));
            });

        for intent in intents {
            self.apply_intent(intent, ctx);
        }
    }
}

impl eframe::App for ExportPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_ui(ctx);
    }
}
