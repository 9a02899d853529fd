use std::time::Duration;

use anyhow::{anyhow, bail};
use clap::Parser;
use eframe::egui;
use log::{error, info};

use ctv_export_panel::app::{ExportPanelApp, ExportSettings};
use ctv_export_panel::export::DEFAULT_FAILURE_RATE;
use ctv_export_panel::localizations::Localizations;
use ctv_export_panel::{AssetInfo, ExportController, SimulatorConfig};

#[derive(Debug, Parser)]
#[command(name = "ctv-export-panel", about = "Export a video asset to CTV platforms")]
struct Args {
    /// Asset duration shown in the info bar
    #[arg(long, default_value = "0:30")]
    duration: String,

    #[arg(long, default_value = "16:9")]
    aspect_ratio: String,

    #[arg(long, default_value = "29.97 fps")]
    framerate: String,

    /// Estimated asset size in bytes
    #[arg(long)]
    estimated_size: Option<u64>,

    /// UI language (en-US, es-ES). Defaults to $LANG
    #[arg(long)]
    language: Option<String>,

    /// Seed for reproducible simulated outcomes
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a single platform export fails
    #[arg(long, default_value_t = DEFAULT_FAILURE_RATE)]
    failure_rate: f64,

    /// Delay between progress ticks, in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Delay after each platform's ticks, in milliseconds
    #[arg(long, default_value_t = 500)]
    finalize_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !(0.0..=1.0).contains(&args.failure_rate) {
        bail!("--failure-rate must be between 0 and 1, got {}", args.failure_rate);
    }

    let localizer = match &args.language {
        Some(lang) => Localizations::with_language(lang),
        None => Localizations::new(),
    };
    info!("Using UI language {}", localizer.current_language());

    let asset = AssetInfo {
        duration: args.duration,
        aspect_ratio: args.aspect_ratio,
        framerate: args.framerate,
        estimated_size: args.estimated_size,
    };

    let settings = ExportSettings {
        simulator: SimulatorConfig {
            tick_delay: Duration::from_millis(args.tick_ms),
            finalize_delay: Duration::from_millis(args.finalize_ms),
            ..SimulatorConfig::default()
        },
        failure_rate: args.failure_rate,
        seed: args.seed,
    };

    let controller = ExportController::new()
        .on_export_complete(|urls| info!("Export complete: {:?}", urls))
        .on_export_error(|message| error!("Export error: {}", message));

    let app = ExportPanelApp::new(controller, asset, localizer, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_min_inner_size([360.0, 560.0])
            .with_title("CTV Export"),
        ..Default::default()
    };

    eframe::run_native(
        "CTV Export",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow!("failed to run the export panel: {e}"))
}
