//! Multi-platform CTV export panel: a platform catalog, the selection and
//! export state model, a simulated export pipeline, and an egui front end.

pub mod app;
pub mod controller;
pub mod error;
pub mod export;
pub mod localizations;
pub mod models;
pub mod platforms;
pub mod state;
pub mod theme;
pub mod ui;

pub use controller::{ExportController, PanelIntent};
pub use error::{CatalogError, ExportError};
pub use export::{CancelToken, ExportSimulator, OutcomeSource, RandomOutcomes, ScriptedOutcomes, SimulatorConfig};
pub use models::{AssetInfo, ExportOptions, ExportPhase, ExportResult, PlatformId};
pub use state::ExportState;
