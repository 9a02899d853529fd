use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ExportError;
use crate::models::{ExportOptions, ExportResult, PlatformId};
use crate::platforms;

pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

const MIN_STEP: f32 = 5.0;
const MAX_STEP: f32 = 25.0;

// Process-wide so URLs stay distinct across simulators within one millisecond.
static EXPORT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Decides how the simulated export of each platform turns out.
pub trait OutcomeSource {
    /// Percentage points of per-platform work done by one tick.
    fn progress_step(&mut self) -> f32;

    fn platform_succeeds(&mut self, platform: PlatformId) -> bool;
}

/// Uniform random steps in 5..25 and an independent failure draw per platform.
pub struct RandomOutcomes {
    rng: ChaCha8Rng,
    failure_rate: f64,
}

impl RandomOutcomes {
    pub fn from_entropy(failure_rate: f64) -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy(), failure_rate)
    }

    pub fn seeded(seed: u64, failure_rate: f64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), failure_rate)
    }

    fn with_rng(rng: ChaCha8Rng, failure_rate: f64) -> Self {
        Self {
            rng,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for RandomOutcomes {
    fn default() -> Self {
        Self::from_entropy(DEFAULT_FAILURE_RATE)
    }
}

impl OutcomeSource for RandomOutcomes {
    fn progress_step(&mut self) -> f32 {
        self.rng.gen_range(MIN_STEP..MAX_STEP)
    }

    fn platform_succeeds(&mut self, _platform: PlatformId) -> bool {
        !self.rng.gen_bool(self.failure_rate)
    }
}

/// Deterministic outcomes: a fixed step and an explicit list of platforms
/// that fail.
#[derive(Debug, Clone)]
pub struct ScriptedOutcomes {
    step: f32,
    failing: Vec<PlatformId>,
}

impl ScriptedOutcomes {
    pub fn all_succeed() -> Self {
        Self {
            step: 25.0,
            failing: Vec::new(),
        }
    }

    pub fn failing(platforms: &[PlatformId]) -> Self {
        Self {
            failing: platforms.to_vec(),
            ..Self::all_succeed()
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.clamp(MIN_STEP, MAX_STEP);
        self
    }
}

impl OutcomeSource for ScriptedOutcomes {
    fn progress_step(&mut self) -> f32 {
        self.step
    }

    fn platform_succeeds(&mut self, platform: PlatformId) -> bool {
        !self.failing.contains(&platform)
    }
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub tick_delay: Duration,
    pub finalize_delay: Duration,
    /// Ceiling for progress reported before the final completion tick.
    pub progress_cap: f32,
    pub base_url: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_delay: Duration::from_millis(100),
            finalize_delay: Duration::from_millis(500),
            progress_cap: 97.0,
            base_url: "https://export.adobe.com/ctv".to_string(),
        }
    }
}

impl SimulatorConfig {
    /// No delays at all. Used for headless runs and tests.
    pub fn instant() -> Self {
        Self {
            tick_delay: Duration::ZERO,
            finalize_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Shared flag checked at every suspension point of a running export.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub type ProgressFn<'a> = &'a mut dyn FnMut(f32, PlatformId);

pub struct ExportSimulator<O> {
    config: SimulatorConfig,
    outcomes: O,
}

impl<O: OutcomeSource> ExportSimulator<O> {
    pub fn new(config: SimulatorConfig, outcomes: O) -> Self {
        Self { config, outcomes }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Exports each platform in turn, reporting progress along the way.
    ///
    /// Per-platform failures are reported in the returned results. Only an
    /// empty request or cancellation make the whole call fail.
    pub fn export_asset(
        &mut self,
        options: &ExportOptions,
        cancel: &CancelToken,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> Result<Vec<ExportResult>, ExportError> {
        let last = *options.platforms.last().ok_or(ExportError::NoPlatforms)?;
        let total = options.platforms.len() as f32;
        let share = 100.0 / total;
        let mut results = Vec::with_capacity(options.platforms.len());

        info!(
            "Exporting to {} platform(s), content credentials: {}",
            options.platforms.len(),
            options.include_content_credentials
        );

        for (i, &platform) in options.platforms.iter().enumerate() {
            if let Some(report) = on_progress.as_mut() {
                let base = i as f32 * share;
                let mut done = 0.0_f32;
                while done < 100.0 {
                    let value = base + done / 100.0 * share;
                    report(value.min(self.config.progress_cap), platform);
                    self.pause(self.config.tick_delay, cancel)?;
                    done += self.next_step();
                }
            }

            self.pause(self.config.finalize_delay, cancel)?;

            let result = if self.outcomes.platform_succeeds(platform) {
                let url = self.file_url(platform);
                debug!("{} exported to {}", platform, url);
                ExportResult::succeeded(platform, url)
            } else {
                let name = platforms::platform(platform).name;
                warn!("Simulated export failure for {}", platform);
                ExportResult::failed(platform, format!("Export failed for {}", name))
            };
            results.push(result);
        }

        if let Some(report) = on_progress.as_mut() {
            report(100.0, last);
        }

        Ok(results)
    }

    fn pause(&self, delay: Duration, cancel: &CancelToken) -> Result<(), ExportError> {
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        if cancel.is_cancelled() {
            return Err(ExportError::Cancelled);
        }
        Ok(())
    }

    /// Step reported by the outcome source, forced into 5..=25 so the tick
    /// loop always terminates.
    fn next_step(&mut self) -> f32 {
        let step = self.outcomes.progress_step();
        if step.is_nan() {
            MIN_STEP
        } else {
            step.clamp(MIN_STEP, MAX_STEP)
        }
    }

    fn file_url(&self, platform: PlatformId) -> String {
        format!(
            "{}/{}_export_{}_{}.mp4",
            self.config.base_url.trim_end_matches('/'),
            platform,
            chrono::Utc::now().timestamp_millis(),
            EXPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed)
        )
    }
}

/// Messages from the export worker to the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    Progress { progress: f32, platform: PlatformId },
    Finished(Result<Vec<ExportResult>, ExportError>),
}

pub struct ExportHandle {
    cancel: CancelToken,
    worker: thread::JoinHandle<()>,
}

impl ExportHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn join(self) {
        if self.worker.join().is_err() {
            warn!("Export worker panicked after reporting");
        }
    }
}

/// Runs one export attempt on a worker thread.
///
/// Exactly one `ExportEvent::Finished` is sent, even if the simulator panics.
pub fn start_export<O>(
    mut simulator: ExportSimulator<O>,
    options: ExportOptions,
    tx: Sender<ExportEvent>,
) -> ExportHandle
where
    O: OutcomeSource + Send + 'static,
{
    let cancel = CancelToken::new();
    let token = cancel.clone();

    let worker = thread::spawn(move || {
        let progress_tx = tx.clone();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut report = |progress: f32, platform: PlatformId| {
                let _ = progress_tx.send(ExportEvent::Progress { progress, platform });
            };
            simulator.export_asset(&options, &token, Some(&mut report))
        }))
        .unwrap_or_else(|payload| Err(ExportError::Unexpected(panic_message(payload.as_ref()))));

        let _ = tx.send(ExportEvent::Finished(outcome));
    });

    ExportHandle { cancel, worker }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown error occurred".to_string()
    }
}
