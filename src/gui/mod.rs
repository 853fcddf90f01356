//! # GUI Module
//!
//! Desktop front-end for the trainer, built on `eframe`/`egui`.
//!
//! The workbench is advanced once per frame by the frame delta, so every
//! animation runs on the UI thread. The dark/light choice is persisted in
//! eframe's own storage under the `theme` key.

pub mod components;
pub mod state;

use eframe::egui;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::LabConfig;
use crate::error::{LabError, Result};
use crate::preferences::{load_theme, save_theme, PreferenceSink, PreferenceSource, Theme};
use crate::systems::Workbench;

const APP_NAME: &str = "Flip-Flop Lab";

/// Repaint interval while any animation or highlight is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);

/// Read access to eframe's key/value storage.
pub struct StorageReader<'a>(pub &'a dyn eframe::Storage);

impl PreferenceSource for StorageReader<'_> {
    fn read(&self, key: &str) -> Option<String> {
        self.0.get_string(key)
    }
}

/// Write access to eframe's key/value storage.
pub struct StorageWriter<'a>(pub &'a mut dyn eframe::Storage);

impl PreferenceSink for StorageWriter<'_> {
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.set_string(key, value.to_string());
        Ok(())
    }
}

pub fn visuals_for(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    }
}

/// Main GUI application structure
pub struct GuiApp {
    gui_state: state::GuiState,
    components: components::GuiComponents,
}

impl GuiApp {
    /// Creates the app, restoring the saved theme when storage is available.
    pub fn new(cc: &eframe::CreationContext<'_>, bench: Workbench) -> Self {
        let theme = cc
            .storage
            .map(|storage| load_theme(&StorageReader(storage)))
            .unwrap_or_default();
        info!(theme = theme.as_str(), "starting desktop front-end");
        cc.egui_ctx.set_visuals(visuals_for(theme));
        Self::with_state(state::GuiState::new(bench, theme))
    }

    pub fn with_state(gui_state: state::GuiState) -> Self {
        Self {
            gui_state,
            components: components::GuiComponents::new(),
        }
    }

    pub fn state(&self) -> &state::GuiState {
        &self.gui_state
    }

    /// One frame without the eframe shell: advance, style, draw.
    pub fn render_frame(&mut self, ctx: &egui::Context, dt: Duration) {
        self.gui_state.tick(dt);
        ctx.set_visuals(visuals_for(self.gui_state.theme()));
        self.components.render_all(ctx, &mut self.gui_state);
    }

    fn persist_theme(&mut self, storage: &mut dyn eframe::Storage) {
        if let Err(e) = save_theme(&mut StorageWriter(storage), self.gui_state.theme()) {
            warn!(error = %e, "could not save theme");
        }
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| Duration::from_secs_f32(i.unstable_dt.clamp(0.0, 1.0)));
        self.render_frame(ctx, dt);

        if self.gui_state.take_theme_changed() {
            if let Some(storage) = frame.storage_mut() {
                self.persist_theme(storage);
                storage.flush();
            }
        }

        if self.gui_state.bench.is_animating() {
            ctx.request_repaint_after(ANIMATION_FRAME);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.persist_theme(storage);
    }
}

/// Launches the desktop trainer and blocks until the window closes.
pub fn run_gui(config: &LabConfig) -> Result<()> {
    let bench = Workbench::from_config(config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Box::new(GuiApp::new(cc, bench))),
    )
    .map_err(|e| LabError::Frontend(e.to_string()))
}
