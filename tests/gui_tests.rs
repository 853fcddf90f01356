//! # GUI Component Tests
//!
//! Renders the egui panels headlessly with `Context::run` and checks that
//! state changes made between frames show up and survive rendering.

#![cfg(test)]

use eframe::egui;
use flipflop_lab::component::{FlipFlop, FlipFlopKind};
use flipflop_lab::gui::components::GuiComponents;
use flipflop_lab::gui::state::GuiState;
use eframe::Storage;
use flipflop_lab::gui::{GuiApp, StorageReader, StorageWriter};
use flipflop_lab::preferences::{load_theme, save_theme, Theme};
use std::collections::HashMap;
use flipflop_lab::systems::{Action, InputLine, Section, Workbench};
use flipflop_lab::types::Bit;
use std::time::Duration;

/// Test utilities for GUI testing
mod gui_test_utils {
    use super::*;

    /// eframe storage kept in a map, as the native shell keeps its RON file.
    #[derive(Default)]
    pub struct MapStorage(pub HashMap<String, String>);

    impl eframe::Storage for MapStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.0.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    pub fn create_test_context() -> egui::Context {
        let ctx = egui::Context::default();
        ctx.set_pixels_per_point(1.0);
        ctx
    }

    pub fn render_once(ctx: &egui::Context, state: &mut GuiState) {
        let components = GuiComponents::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            components.render_all(ctx, state);
        });
    }
}

use gui_test_utils::*;

#[test]
fn test_all_pages_render() {
    let ctx = create_test_context();
    let mut state = GuiState::default();
    for section in Section::ALL {
        state.section = section;
        render_once(&ctx, &mut state);
        assert_eq!(state.section, section);
    }
}

#[test]
fn test_rendering_keeps_simulator_state() {
    let ctx = create_test_context();
    let mut state = GuiState::default();
    state.section = Section::Jk;
    state.dispatch(Action::Select(InputLine::J, Bit::One));
    state.dispatch(Action::ClockJk);
    render_once(&ctx, &mut state);

    assert_eq!(state.bench.jk().state().q, Bit::One);
    assert!(state.bench.highlighter(FlipFlopKind::Jk).is_flashing(2));
}

#[test]
fn test_invalid_sr_state_renders() {
    let ctx = create_test_context();
    let mut state = GuiState::default();
    state.section = Section::Sr;
    state.dispatch(Action::Select(InputLine::S, Bit::One));
    state.dispatch(Action::Select(InputLine::R, Bit::One));
    render_once(&ctx, &mut state);
    assert!(state.last_error.is_none());
    assert!(state.bench.sr().is_error());
}

#[test]
fn test_app_frames_apply_theme_and_time() {
    let ctx = create_test_context();
    let mut app = GuiApp::with_state(GuiState::new(Workbench::new(), Theme::Light));
    for _ in 0..3 {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            app.render_frame(ctx, Duration::from_millis(400));
        });
    }
    assert!(!ctx.style().visuals.dark_mode);
    assert_eq!(app.state().section, Section::Overview);
}

#[test]
fn test_theme_preference_round_trip() {
    let mut state = GuiState::default();
    state.toggle_theme();
    assert!(state.take_theme_changed());

    let mut storage = MapStorage::default();
    save_theme(&mut StorageWriter(&mut storage), state.theme()).unwrap();
    assert_eq!(storage.0.get("theme").map(String::as_str), Some("light"));
    assert_eq!(load_theme(&StorageReader(&storage)), Theme::Light);
}

#[test]
fn test_unknown_stored_theme_falls_back_to_dark() {
    let mut storage = MapStorage::default();
    assert_eq!(load_theme(&StorageReader(&storage)), Theme::Dark);

    storage.set_string("theme", "sepia".to_string());
    assert_eq!(load_theme(&StorageReader(&storage)), Theme::Dark);
}
