//! # GUI State Management
//!
//! Everything the desktop front-end needs between frames: the workbench of
//! simulators, the visible page, the display mode and the last rejected action.

use std::time::Duration;
use tracing::warn;

use crate::preferences::Theme;
use crate::systems::{Action, Section, Workbench};

#[derive(Debug, Clone)]
pub struct GuiState {
    pub bench: Workbench,
    pub section: Section,
    theme: Theme,
    /// Set when the theme changed and has not yet been written to storage.
    theme_changed: bool,
    pub last_error: Option<String>,
}

impl GuiState {
    pub fn new(bench: Workbench, theme: Theme) -> Self {
        Self {
            bench,
            section: Section::default(),
            theme,
            theme_changed: false,
            last_error: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.theme_changed = true;
    }

    /// Returns whether the theme needs saving, clearing the flag.
    pub fn take_theme_changed(&mut self) -> bool {
        std::mem::take(&mut self.theme_changed)
    }

    pub fn dispatch(&mut self, action: Action) {
        match self.bench.dispatch(action) {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!(error = %e, ?action, "action rejected");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.bench.tick(dt);
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

impl Default for GuiState {
    fn default() -> Self {
        Self::new(Workbench::new(), Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::InputLine;
    use crate::types::Bit;

    #[test]
    fn test_theme_change_flag() {
        let mut state = GuiState::default();
        assert!(!state.take_theme_changed());
        state.toggle_theme();
        assert_eq!(state.theme(), Theme::Light);
        assert!(state.take_theme_changed());
        assert!(!state.take_theme_changed());
    }

    #[test]
    fn test_rejected_action_is_reported() {
        let mut state = GuiState::default();
        state.dispatch(Action::Select(InputLine::Staged(5), Bit::One));
        assert!(state.last_error.is_some());
        state.dispatch(Action::Count);
        assert!(state.last_error.is_none());
        assert_eq!(state.bench.counter().value(), 1);
    }
}
