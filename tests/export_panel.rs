use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use ctv_export_panel::export::{start_export, ExportEvent};
use ctv_export_panel::localizations::Localizations;
use ctv_export_panel::{
    CancelToken, ExportController, ExportError, ExportOptions, ExportPhase, ExportSimulator,
    PanelIntent, PlatformId, ScriptedOutcomes, SimulatorConfig,
};

type Log<T> = Rc<RefCell<Vec<T>>>;

fn recording_controller() -> (ExportController, Log<Vec<String>>, Log<String>) {
    let completed: Log<Vec<String>> = Rc::default();
    let errors: Log<String> = Rc::default();
    let (c, e) = (completed.clone(), errors.clone());
    let controller = ExportController::new()
        .on_export_complete(move |urls| c.borrow_mut().push(urls.to_vec()))
        .on_export_error(move |msg| e.borrow_mut().push(msg.to_string()));
    (controller, completed, errors)
}

fn select(controller: &mut ExportController, platforms: &[PlatformId]) {
    for &platform in platforms {
        controller.handle_intent(PanelIntent::PlatformClicked {
            platform,
            on_checkbox: true,
        });
    }
}

#[test]
fn single_platform_success_reports_one_url() {
    let (mut controller, completed, errors) = recording_controller();
    select(&mut controller, &[PlatformId::Roku]);

    let mut sim = ExportSimulator::new(SimulatorConfig::instant(), ScriptedOutcomes::all_succeed());
    assert!(controller.export_blocking(&mut sim, &CancelToken::new()));

    assert_eq!(controller.state().phase(), ExportPhase::Success);
    assert_eq!(controller.state().progress(), 100.0);
    assert_eq!(controller.state().current_platform(), Some(PlatformId::Roku));
    assert!(errors.borrow().is_empty());

    let completed = completed.borrow();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].len(), 1);
    assert!(completed[0][0].contains("roku_export_"));
}

#[test]
fn second_platform_failure_lands_in_error() {
    let (mut controller, completed, errors) = recording_controller();
    select(&mut controller, &[PlatformId::Roku, PlatformId::Hulu]);

    let mut sim = ExportSimulator::new(
        SimulatorConfig::instant(),
        ScriptedOutcomes::failing(&[PlatformId::Hulu]),
    );
    controller.export_blocking(&mut sim, &CancelToken::new());

    assert_eq!(controller.state().phase(), ExportPhase::Error);
    assert!(controller
        .state()
        .error_message()
        .unwrap()
        .contains("Export failed for Hulu"));
    assert!(completed.borrow().is_empty());
    assert_eq!(errors.borrow().as_slice(), ["Export failed for Hulu"]);
}

#[test]
fn retry_reuses_the_selection_active_at_error_time() {
    let (mut controller, completed, _) = recording_controller();
    select(&mut controller, &[PlatformId::Amazon, PlatformId::Samsung]);
    controller.handle_intent(PanelIntent::PlatformClicked {
        platform: PlatformId::Samsung,
        on_checkbox: false,
    });

    let mut failing = ExportSimulator::new(
        SimulatorConfig::instant(),
        ScriptedOutcomes::failing(&[PlatformId::Amazon]),
    );
    controller.export_blocking(&mut failing, &CancelToken::new());
    assert_eq!(controller.state().phase(), ExportPhase::Error);

    // Selection survives the error and can still change before retrying.
    select(&mut controller, &[PlatformId::Peacock]);
    assert!(controller.state().is_expanded(PlatformId::Samsung));

    let options = controller.handle_intent(PanelIntent::RetryRequested).unwrap();
    assert_eq!(
        options.platforms,
        vec![PlatformId::Amazon, PlatformId::Peacock, PlatformId::Samsung]
    );
    assert_eq!(controller.state().phase(), ExportPhase::Loading);
    assert_eq!(controller.state().error_message(), None);

    controller.finish(Ok(options
        .platforms
        .iter()
        .map(|&p| ctv_export_panel::ExportResult::succeeded(p, format!("file://{p}")))
        .collect()));
    assert_eq!(controller.state().phase(), ExportPhase::Success);
    assert_eq!(completed.borrow()[0].len(), 3);
}

#[test]
fn retry_blocking_runs_a_fresh_attempt() {
    let (mut controller, completed, errors) = recording_controller();
    select(&mut controller, &[PlatformId::AppleTv]);

    let mut failing = ExportSimulator::new(
        SimulatorConfig::instant(),
        ScriptedOutcomes::failing(&[PlatformId::AppleTv]),
    );
    controller.export_blocking(&mut failing, &CancelToken::new());

    let mut ok = ExportSimulator::new(SimulatorConfig::instant(), ScriptedOutcomes::all_succeed());
    assert!(controller.retry_blocking(&mut ok, &CancelToken::new()));

    assert_eq!(controller.state().phase(), ExportPhase::Success);
    assert_eq!(errors.borrow().len(), 1);
    assert_eq!(completed.borrow().len(), 1);
}

#[test]
fn button_label_scenarios() {
    let loc = Localizations::with_language("en-US");
    let mut controller = ExportController::new();
    assert_eq!(controller.action_label(&loc), "Download");
    assert!(!controller.action_enabled());

    select(&mut controller, &[PlatformId::Roku]);
    assert_eq!(controller.action_label(&loc), "Download (1 platform)");

    select(&mut controller, &[PlatformId::Hulu]);
    assert_eq!(controller.action_label(&loc), "Download (2 platforms)");
}

#[test]
fn export_with_no_selection_stays_idle() {
    let mut controller = ExportController::new();
    let mut sim = ExportSimulator::new(SimulatorConfig::instant(), ScriptedOutcomes::all_succeed());
    assert!(!controller.export_blocking(&mut sim, &CancelToken::new()));
    assert_eq!(controller.state().phase(), ExportPhase::Idle);
}

#[test]
fn cancelled_worker_is_a_retryable_error() {
    let (mut controller, _, errors) = recording_controller();
    select(&mut controller, &[PlatformId::Roku]);
    let options = controller.request_export().unwrap();

    let (tx, rx) = mpsc::channel();
    let sim = ExportSimulator::new(SimulatorConfig::default(), ScriptedOutcomes::all_succeed());
    let handle = start_export(sim, options, tx);
    handle.cancel();
    handle.join();

    for event in rx.try_iter() {
        match event {
            ExportEvent::Progress { progress, platform } => controller.record_progress(progress, platform),
            ExportEvent::Finished(outcome) => {
                assert_eq!(outcome, Err(ExportError::Cancelled));
                controller.finish(outcome);
            }
        }
    }

    assert_eq!(controller.state().phase(), ExportPhase::Error);
    assert_eq!(controller.state().error_message(), Some("Export cancelled"));
    assert_eq!(errors.borrow().as_slice(), ["Export cancelled"]);
    assert_eq!(controller.action_intent(), PanelIntent::RetryRequested);
}

#[test]
fn worker_progress_funnels_into_state() {
    let mut controller = ExportController::new();
    select(&mut controller, &[PlatformId::Hulu, PlatformId::RokuChannel]);
    let options: ExportOptions = controller.request_export().unwrap();

    let (tx, rx) = mpsc::channel();
    let sim = ExportSimulator::new(SimulatorConfig::instant(), ScriptedOutcomes::all_succeed());
    start_export(sim, options, tx).join();

    let mut seen = Vec::new();
    for event in rx.try_iter() {
        match event {
            ExportEvent::Progress { progress, platform } => {
                controller.record_progress(progress, platform);
                seen.push(controller.state().progress());
            }
            ExportEvent::Finished(outcome) => controller.finish(outcome),
        }
    }

    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(seen.last(), Some(&100.0));
    assert_eq!(controller.state().current_platform(), Some(PlatformId::RokuChannel));
    assert_eq!(controller.state().phase(), ExportPhase::Success);
}
