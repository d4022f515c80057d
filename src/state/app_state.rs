//! Application state definitions

use super::focus::PageFocus;
use super::loading_state::LoadingAnimation;
use super::prompt::Prompt;
use crate::host::UiPhase;
use crate::survey::ValidationReport;

/// Front-end state around the survey host
#[derive(Debug, Default)]
pub struct AppState {
    /// Focused question and choice
    pub focus: PageFocus,
    /// Open prompt, if any
    pub prompt: Prompt,
    /// Errors from the last refused page advance
    pub validation: ValidationReport,
    /// Error dialog message
    pub error_message: Option<String>,
    /// Status bar message
    pub status_message: Option<String>,
    /// Loading indicator animation
    pub loading: LoadingAnimation,
    /// Phase seen on the previous tick
    pub last_phase: UiPhase,
}

impl AppState {
    /// Show an error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Forget per-page state after the page changes
    pub fn reset_page(&mut self) {
        self.focus.reset();
        self.validation = ValidationReport::default();
        self.prompt = Prompt::None;
    }

    /// Track phase changes; restarts the animation when loading begins.
    /// Returns true if the phase changed.
    pub fn observe_phase(&mut self, phase: UiPhase) -> bool {
        if phase == self.last_phase {
            return false;
        }
        if phase.is_loading() {
            self.loading.restart();
        }
        self.last_phase = phase;
        true
    }
}
