use std::collections::BTreeSet;

use crate::models::{ExportPhase, PlatformId};

/// Mutable session state of one panel.
///
/// Fields are private so `expanded ⊆ selected` can only be touched through
/// the mutation methods below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportState {
    selected: BTreeSet<PlatformId>,
    expanded: BTreeSet<PlatformId>,
    phase: ExportPhase,
    progress: f32,
    current_platform: Option<PlatformId>,
    error_message: Option<String>,
}

impl ExportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_platforms(&self) -> &BTreeSet<PlatformId> {
        &self.selected
    }

    pub fn expanded_platforms(&self) -> &BTreeSet<PlatformId> {
        &self.expanded
    }

    pub fn is_selected(&self, id: PlatformId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_expanded(&self, id: PlatformId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn current_platform(&self) -> Option<PlatformId> {
        self.current_platform
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Deselecting always collapses; selecting never expands.
    pub fn toggle_platform(&mut self, id: PlatformId) {
        if self.selected.remove(&id) {
            self.expanded.remove(&id);
        } else {
            self.selected.insert(id);
        }
    }

    pub fn toggle_expand(&mut self, id: PlatformId) {
        if !self.selected.contains(&id) {
            return;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn set_phase(&mut self, phase: ExportPhase) {
        self.phase = phase;
    }

    pub fn set_progress(&mut self, progress: f32, current_platform: Option<PlatformId>) {
        self.progress = progress.clamp(0.0, 100.0);
        self.current_platform = current_platform;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.phase = ExportPhase::Error;
        self.error_message = Some(message.into());
    }

    /// Clears the transient export fields. Selection and expansion survive.
    pub fn reset(&mut self) {
        self.phase = ExportPhase::Idle;
        self.progress = 0.0;
        self.current_platform = None;
        self.error_message = None;
    }
}
