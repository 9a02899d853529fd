use log::{debug, info, warn};

use crate::error::ExportError;
use crate::export::{CancelToken, ExportSimulator, OutcomeSource};
use crate::localizations::Localizations;
use crate::models::{ExportOptions, ExportPhase, ExportResult, PlatformId};
use crate::platforms;
use crate::state::ExportState;

pub type CompleteCallback = Box<dyn FnMut(&[String])>;
pub type ErrorCallback = Box<dyn FnMut(&str)>;

/// What the user asked for, as reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIntent {
    /// Mouse click on a platform row. `on_checkbox` is true when the click
    /// landed on the checkbox or the logo rather than the row body.
    PlatformClicked { platform: PlatformId, on_checkbox: bool },
    /// Space/Enter on a focused row.
    PlatformActivated(PlatformId),
    ExportRequested,
    RetryRequested,
    CancelRequested,
}

/// Owns the panel state and applies user intents and export results to it.
#[derive(Default)]
pub struct ExportController {
    state: ExportState,
    on_complete: Option<CompleteCallback>,
    on_error: Option<ErrorCallback>,
}

impl ExportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_export_complete(mut self, callback: impl FnMut(&[String]) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn on_export_error(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    /// Applies an intent. Returns the options to export with when the
    /// intent started a new attempt.
    pub fn handle_intent(&mut self, intent: PanelIntent) -> Option<ExportOptions> {
        match intent {
            PanelIntent::PlatformClicked { platform, on_checkbox } => {
                if self.rows_enabled() {
                    if self.state.is_selected(platform) && !on_checkbox {
                        self.state.toggle_expand(platform);
                    } else {
                        self.state.toggle_platform(platform);
                    }
                }
                None
            }
            PanelIntent::PlatformActivated(platform) => {
                if self.rows_enabled() {
                    self.state.toggle_platform(platform);
                }
                None
            }
            PanelIntent::ExportRequested => self.request_export(),
            PanelIntent::RetryRequested => self.retry(),
            // The running worker owns cancellation; its result comes back
            // through `finish`.
            PanelIntent::CancelRequested => None,
        }
    }

    /// Moves `idle` to `loading` when something is selected. Requests in any
    /// other phase, or with nothing selected, are ignored.
    pub fn request_export(&mut self) -> Option<ExportOptions> {
        if self.state.phase() != ExportPhase::Idle || self.state.selected_count() == 0 {
            debug!(
                "Ignoring export request in phase {:?} with {} selected",
                self.state.phase(),
                self.state.selected_count()
            );
            return None;
        }

        let options = ExportOptions::new(self.state.selected_platforms().iter().copied().collect());
        self.state.set_phase(ExportPhase::Loading);
        self.state.set_progress(0.0, None);
        info!("Export started for {:?}", options.platforms);
        Some(options)
    }

    pub fn retry(&mut self) -> Option<ExportOptions> {
        if self.state.phase() != ExportPhase::Error {
            return None;
        }
        info!("Retrying export");
        self.state.reset();
        self.request_export()
    }

    pub fn record_progress(&mut self, progress: f32, platform: PlatformId) {
        if self.state.phase() == ExportPhase::Loading {
            self.state.set_progress(progress, Some(platform));
        }
    }

    /// Applies the outcome of an attempt and notifies the host.
    pub fn finish(&mut self, outcome: Result<Vec<ExportResult>, ExportError>) {
        if self.state.phase() != ExportPhase::Loading {
            warn!("Dropping export result received in phase {:?}", self.state.phase());
            return;
        }

        match outcome {
            Ok(results) if results.iter().all(|r| r.success) => {
                let urls: Vec<String> = results.into_iter().filter_map(|r| r.file_url).collect();
                info!("Export complete: {} file(s)", urls.len());
                self.state.set_phase(ExportPhase::Success);
                if let Some(callback) = self.on_complete.as_mut() {
                    callback(&urls);
                }
            }
            Ok(results) => {
                let message = results
                    .iter()
                    .filter(|r| !r.success)
                    .filter_map(|r| r.error.as_deref())
                    .collect::<Vec<_>>()
                    .join(", ");
                let message = if message.is_empty() {
                    "Export failed".to_string()
                } else {
                    message
                };
                self.fail(message);
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, message: String) {
        warn!("Export failed: {}", message);
        self.state.set_error(message.clone());
        if let Some(callback) = self.on_error.as_mut() {
            callback(&message);
        }
    }

    /// Runs one attempt inline on the calling thread.
    pub fn export_blocking<O: OutcomeSource>(
        &mut self,
        simulator: &mut ExportSimulator<O>,
        cancel: &CancelToken,
    ) -> bool {
        match self.request_export() {
            Some(options) => {
                self.run(options, simulator, cancel);
                true
            }
            None => false,
        }
    }

    pub fn retry_blocking<O: OutcomeSource>(
        &mut self,
        simulator: &mut ExportSimulator<O>,
        cancel: &CancelToken,
    ) -> bool {
        match self.retry() {
            Some(options) => {
                self.run(options, simulator, cancel);
                true
            }
            None => false,
        }
    }

    fn run<O: OutcomeSource>(
        &mut self,
        options: ExportOptions,
        simulator: &mut ExportSimulator<O>,
        cancel: &CancelToken,
    ) {
        let state = &mut self.state;
        let mut report = |progress: f32, platform: PlatformId| {
            state.set_progress(progress, Some(platform));
        };
        let outcome = simulator.export_asset(&options, cancel, Some(&mut report));
        self.finish(outcome);
    }

    fn rows_enabled(&self) -> bool {
        self.state.phase() != ExportPhase::Loading
    }

    pub fn action_enabled(&self) -> bool {
        self.state.selected_count() > 0
            && !matches!(self.state.phase(), ExportPhase::Loading | ExportPhase::Success)
    }

    pub fn action_label(&self, loc: &Localizations) -> String {
        match self.state.phase() {
            ExportPhase::Loading => loc.text("button-exporting", "Exporting…"),
            ExportPhase::Success => loc.text("button-complete", "Export complete"),
            ExportPhase::Error => loc.text("button-retry", "Export failed — Try again"),
            ExportPhase::Idle => match self.state.selected_count() {
                0 => loc.text("button-download", "Download"),
                1 => loc.text("button-download-one", "Download (1 platform)"),
                n => loc
                    .lookup_single_language("button-download-many", Some(&[("count", n.to_string())]))
                    .unwrap_or_else(|| format!("Download ({} platforms)", n)),
            },
        }
    }

    /// The intent the action button produces when clicked.
    pub fn action_intent(&self) -> PanelIntent {
        if self.state.phase() == ExportPhase::Error {
            PanelIntent::RetryRequested
        } else {
            PanelIntent::ExportRequested
        }
    }

    /// Badge next to the list header, hidden with nothing selected.
    pub fn selection_badge(&self, loc: &Localizations) -> Option<String> {
        match self.state.selected_count() {
            0 => None,
            n => loc.lookup_single_language("selected-count", Some(&[("count", n.to_string())])),
        }
    }

    pub fn note_lines(&self, loc: &Localizations) -> [String; 2] {
        let packaging = if self.state.selected_count() > 1 {
            loc.text("note-zip", "Files will be packaged in a zip folder.")
        } else {
            loc.text("note-single", "Exported as a single file.")
        };
        [
            packaging,
            loc.text(
                "note-credentials",
                "Content Credentials will be applied to all exports. Contact your admin to learn more about automated signing.",
            ),
        ]
    }

    /// Caption and rounded percentage for the progress bar.
    pub fn progress_caption(&self, loc: &Localizations) -> (String, String) {
        let name = match self.state.current_platform() {
            Some(id) => platforms::platform(id).name.to_string(),
            None => loc.text("progress-platform-fallback", "platform"),
        };
        let caption = loc
            .lookup_single_language("progress-exporting", Some(&[("name", name.clone())]))
            .unwrap_or_else(|| format!("Exporting for {}…", name));
        (caption, format!("{}%", self.state.progress().round() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ScriptedOutcomes, SimulatorConfig};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn en() -> Localizations {
        Localizations::with_language("en-US")
    }

    fn click(controller: &mut ExportController, platform: PlatformId) {
        controller.handle_intent(PanelIntent::PlatformClicked {
            platform,
            on_checkbox: false,
        });
    }

    #[test]
    fn row_click_selects_then_expands() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        assert!(c.state().is_selected(PlatformId::Roku));
        assert!(!c.state().is_expanded(PlatformId::Roku));

        click(&mut c, PlatformId::Roku);
        assert!(c.state().is_expanded(PlatformId::Roku));

        c.handle_intent(PanelIntent::PlatformClicked {
            platform: PlatformId::Roku,
            on_checkbox: true,
        });
        assert!(!c.state().is_selected(PlatformId::Roku));
        assert!(!c.state().is_expanded(PlatformId::Roku));
    }

    #[test]
    fn keyboard_activation_toggles_selection() {
        let mut c = ExportController::new();
        c.handle_intent(PanelIntent::PlatformActivated(PlatformId::Hulu));
        assert!(c.state().is_selected(PlatformId::Hulu));
        c.handle_intent(PanelIntent::PlatformActivated(PlatformId::Hulu));
        assert!(!c.state().is_selected(PlatformId::Hulu));
    }

    #[test]
    fn button_labels_follow_selection() {
        let loc = en();
        let mut c = ExportController::new();
        assert_eq!(c.action_label(&loc), "Download");
        assert!(!c.action_enabled());

        click(&mut c, PlatformId::Roku);
        assert_eq!(c.action_label(&loc), "Download (1 platform)");
        assert!(c.action_enabled());

        click(&mut c, PlatformId::Hulu);
        assert_eq!(c.action_label(&loc), "Download (2 platforms)");
        assert_eq!(c.selection_badge(&loc).as_deref(), Some("(2 selected)"));
    }

    #[test]
    fn export_with_nothing_selected_is_a_no_op() {
        let mut c = ExportController::new();
        assert_eq!(c.handle_intent(PanelIntent::ExportRequested), None);
        assert_eq!(c.state().phase(), ExportPhase::Idle);
        assert_eq!(c.selection_badge(&en()), None);
    }

    #[test]
    fn export_request_while_loading_is_ignored() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        let options = c.request_export().unwrap();
        assert_eq!(options.platforms, vec![PlatformId::Roku]);
        assert!(options.include_content_credentials);
        assert_eq!(c.state().phase(), ExportPhase::Loading);
        assert_eq!(c.request_export(), None);
        assert!(!c.action_enabled());
        assert_eq!(c.action_label(&en()), "Exporting…");
    }

    #[test]
    fn rows_are_locked_while_loading() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        c.request_export();
        click(&mut c, PlatformId::Hulu);
        c.handle_intent(PanelIntent::PlatformActivated(PlatformId::Roku));
        assert_eq!(c.state().selected_count(), 1);
        assert!(c.state().is_selected(PlatformId::Roku));
    }

    #[test]
    fn options_follow_display_order() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::RokuChannel);
        click(&mut c, PlatformId::Roku);
        click(&mut c, PlatformId::Peacock);
        let options = c.request_export().unwrap();
        assert_eq!(
            options.platforms,
            vec![PlatformId::Roku, PlatformId::Peacock, PlatformId::RokuChannel]
        );
    }

    #[test]
    fn failures_are_joined_with_commas() {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = errors.clone();
        let mut c = ExportController::new().on_export_error(move |e| sink.borrow_mut().push(e.to_string()));
        click(&mut c, PlatformId::Roku);
        click(&mut c, PlatformId::Hulu);
        c.request_export();
        c.finish(Ok(vec![
            ExportResult::failed(PlatformId::Roku, "Export failed for Roku".into()),
            ExportResult::failed(PlatformId::Hulu, "Export failed for Hulu".into()),
        ]));

        assert_eq!(c.state().phase(), ExportPhase::Error);
        assert_eq!(
            c.state().error_message(),
            Some("Export failed for Roku, Export failed for Hulu")
        );
        assert_eq!(errors.borrow().len(), 1);
        assert_eq!(c.action_intent(), PanelIntent::RetryRequested);
        assert_eq!(c.action_label(&en()), "Export failed — Try again");
    }

    #[test]
    fn failure_without_reasons_gets_generic_message() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        c.request_export();
        c.finish(Ok(vec![ExportResult {
            success: false,
            platform: PlatformId::Roku,
            file_url: None,
            error: None,
        }]));
        assert_eq!(c.state().error_message(), Some("Export failed"));
    }

    #[test]
    fn unexpected_error_routes_to_error_phase() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        c.request_export();
        c.finish(Err(ExportError::Unexpected("disk on fire".into())));
        assert_eq!(c.state().phase(), ExportPhase::Error);
        assert_eq!(c.state().error_message(), Some("disk on fire"));
    }

    #[test]
    fn late_results_are_dropped() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        c.finish(Err(ExportError::Cancelled));
        assert_eq!(c.state().phase(), ExportPhase::Idle);
    }

    #[test]
    fn retry_only_from_error() {
        let mut c = ExportController::new();
        click(&mut c, PlatformId::Roku);
        assert_eq!(c.retry(), None);

        let mut sim = ExportSimulator::new(SimulatorConfig::instant(), ScriptedOutcomes::all_succeed());
        assert!(c.export_blocking(&mut sim, &CancelToken::new()));
        assert_eq!(c.state().phase(), ExportPhase::Success);
        assert_eq!(c.retry(), None);
        assert!(!c.export_blocking(&mut sim, &CancelToken::new()));
        assert!(!c.action_enabled());
    }

    #[test]
    fn note_switches_to_zip_for_multiple_platforms() {
        let loc = en();
        let mut c = ExportController::new();
        assert_eq!(c.note_lines(&loc)[0], "Exported as a single file.");
        click(&mut c, PlatformId::Roku);
        click(&mut c, PlatformId::Hulu);
        assert_eq!(c.note_lines(&loc)[0], "Files will be packaged in a zip folder.");
        assert_eq!(
            c.note_lines(&loc)[1],
            "Content Credentials will be applied to all exports. Contact your admin to learn more about automated signing."
        );
    }

    #[test]
    fn progress_caption_names_current_platform() {
        let loc = en();
        let mut c = ExportController::new();
        click(&mut c, PlatformId::AppleTv);
        c.request_export();
        assert_eq!(
            c.progress_caption(&loc),
            ("Exporting for platform…".to_string(), "0%".to_string())
        );
        c.record_progress(41.6, PlatformId::AppleTv);
        assert_eq!(
            c.progress_caption(&loc),
            ("Exporting for Apple TV+…".to_string(), "42%".to_string())
        );
    }
}
