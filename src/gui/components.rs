//! # GUI Components Module
//!
//! The panels that make up the desktop trainer. Each panel draws one page of
//! the trainer from [`GuiState`] and turns clicks into workbench actions.
//!
//! ## Component Architecture
//!
//! - **`GuiComponents`**: container that lays the panels out
//! - **`NavigationBar`**: page buttons and the dark/light toggle
//! - **`OverviewPanel`**: the list of flip-flop types, each opening its page
//! - **`FlipFlopPanel`**: selectors, clock, LEDs, status and truth table
//! - **`MasterSlavePanel`** / **`TimingPanel`**: the two scripted animations
//! - **`ApplicationsPanel`**: counter, shift register and parallel register
//! - **`StatusBar`**: the last rejected action, if any
//!
//! Panels hold no simulation state. Everything they show is read from the
//! workbench each frame, and every click is a single [`Action`].

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Vec2};

use super::state::GuiState;
use crate::component::FlipFlopKind;
use crate::components::clock::StageView;
use crate::display::{leds, FlipFlopView, Led, Severity};
use crate::systems::sections::overview_entries;
use crate::systems::{Action, InputLine, Section};
use crate::types::Bit;

const LED_RADIUS: f32 = 14.0;
const LED_ON: Color32 = Color32::from_rgb(0x4c, 0xd9, 0x64);
const ERROR_COLOR: Color32 = Color32::from_rgb(0xff, 0x5c, 0x5c);

/// Draws one indicator with its `0`/`1` label and a caption underneath.
pub fn led_indicator(ui: &mut egui::Ui, led: Led, caption: &str) {
    ui.vertical(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(LED_RADIUS * 2.0 + 4.0), Sense::hover());
        let painter = ui.painter();
        let off = ui.visuals().widgets.inactive.bg_fill;
        let fill = if led.lit { LED_ON } else { off };
        painter.circle_filled(rect.center(), LED_RADIUS, fill);
        painter.circle_stroke(
            rect.center(),
            LED_RADIUS,
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.fg_stroke.color),
        );
        let text_color = if led.lit {
            Color32::BLACK
        } else {
            ui.visuals().text_color()
        };
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            led.label,
            FontId::monospace(14.0),
            text_color,
        );
        ui.label(caption);
    });
}

/// A two-option selector for one input line. Returns the clicked bit, even when it
/// is already selected, so a repeat selection still flashes its row.
pub fn bit_selector(ui: &mut egui::Ui, label: &str, current: Bit) -> Option<Bit> {
    let mut chosen = None;
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}:", label)).strong());
        for bit in [Bit::Zero, Bit::One] {
            if ui.selectable_label(current == bit, bit.to_string()).clicked() {
                chosen = Some(bit);
            }
        }
    });
    chosen
}

fn selector_for(ui: &mut egui::Ui, state: &mut GuiState, line: InputLine) {
    let Ok(current) = state.bench.selection(line) else {
        return;
    };
    if let Some(bit) = bit_selector(ui, &line.label(), current) {
        state.dispatch(Action::Select(line, bit));
    }
}

/// Container for all GUI components
pub struct GuiComponents {
    navigation: NavigationBar,
    overview: OverviewPanel,
    flip_flop: FlipFlopPanel,
    master_slave: MasterSlavePanel,
    timing: TimingPanel,
    applications: ApplicationsPanel,
    status_bar: StatusBar,
}

impl GuiComponents {
    pub fn new() -> Self {
        Self {
            navigation: NavigationBar,
            overview: OverviewPanel,
            flip_flop: FlipFlopPanel,
            master_slave: MasterSlavePanel,
            timing: TimingPanel,
            applications: ApplicationsPanel,
            status_bar: StatusBar,
        }
    }

    /// Renders the whole window for one frame.
    ///
    /// # Layout Structure
    /// ```text
    /// ┌──────────────────────────────────────────────────────┐
    /// │ Flip-Flop Lab  [Overview] [SR] [JK] ... [☀]          │
    /// ├──────────────────────────────────────────────────────┤
    /// │ active page                                          │
    /// ├──────────────────────────────────────────────────────┤
    /// │ status / last error                                  │
    /// └──────────────────────────────────────────────────────┘
    /// ```
    pub fn render_all(&self, ctx: &egui::Context, state: &mut GuiState) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            self.navigation.render(ui, state);
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.status_bar.render(ui, state);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_section(ui, state);
            });
        });
    }

    pub fn render_section(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        match state.section {
            Section::Overview => self.overview.render(ui, state),
            Section::Sr => self.flip_flop.render(ui, state, FlipFlopKind::Sr),
            Section::Jk => self.flip_flop.render(ui, state, FlipFlopKind::Jk),
            Section::D => self.flip_flop.render(ui, state, FlipFlopKind::D),
            Section::T => self.flip_flop.render(ui, state, FlipFlopKind::T),
            Section::MasterSlave => self.master_slave.render(ui, state),
            Section::Timing => self.timing.render(ui, state),
            Section::Applications => self.applications.render(ui, state),
        }
    }
}

impl Default for GuiComponents {
    fn default() -> Self {
        Self::new()
    }
}

/// Page buttons and the display mode toggle.
pub struct NavigationBar;

impl NavigationBar {
    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        ui.horizontal(|ui| {
            ui.heading("Flip-Flop Lab");
            ui.separator();
            for section in Section::ALL {
                if ui
                    .selectable_label(state.section == section, section.title())
                    .clicked()
                {
                    state.section = section;
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(state.theme().toggle_icon())
                    .on_hover_text("Switch dark / light mode")
                    .clicked()
                {
                    state.toggle_theme();
                }
            });
        });
    }
}

/// Entry page. Clicking a type opens its simulator.
pub struct OverviewPanel;

impl OverviewPanel {
    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        ui.heading("Flip-Flop Basics");
        ui.label(
            "A flip-flop is a bistable element: it stores one bit and changes it \
             only according to its input rules. Pick a type to try it.",
        );
        ui.add_space(8.0);
        for (kind, summary) in overview_entries() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    if ui.button(kind.name()).clicked() {
                        state.section = kind.into();
                    }
                    ui.label(summary);
                });
            });
        }
    }
}

/// Simulator page for one flip-flop type.
///
/// ```text
/// ┌──────────────────────────────┬──────────────────────────┐
/// │ S: [0] [1]                   │ S  R  Q  ~Q  State       │
/// │ R: [0] [1]                   │ 0  0  Q  ~Q  Hold        │
/// │ [Clock Pulse]  (edge types)  │ 0  1  0  1   Reset  ◀ lit │
/// │ (●) Q   (○) ~Q               │ ...                      │
/// │ Reset (Q = 0)                │                          │
/// └──────────────────────────────┴──────────────────────────┘
/// ```
pub struct FlipFlopPanel;

impl FlipFlopPanel {
    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState, kind: FlipFlopKind) {
        ui.heading(kind.name());
        ui.separator();
        ui.columns(2, |columns| {
            self.render_simulator(&mut columns[0], state, kind);
            self.render_truth_table(&mut columns[1], state, kind);
        });
    }

    fn render_simulator(&self, ui: &mut egui::Ui, state: &mut GuiState, kind: FlipFlopKind) {
        for line in InputLine::for_kind(kind) {
            selector_for(ui, state, *line);
        }
        if let Some(action) = Action::clock(kind) {
            if ui.button("⏱ Clock Pulse").clicked() {
                state.dispatch(action);
            }
        }
        ui.add_space(8.0);

        let view = FlipFlopView::of(state.bench.flip_flop(kind));
        ui.horizontal(|ui| {
            led_indicator(ui, view.q, "Q");
            if let Some(not_q) = view.not_q {
                ui.add_space(12.0);
                led_indicator(ui, not_q, "~Q");
            }
        });
        let status = RichText::new(&view.status).size(16.0);
        match view.severity {
            Severity::Normal => ui.label(status),
            Severity::Error => ui.label(status.color(ERROR_COLOR).strong()),
        };
    }

    fn render_truth_table(&self, ui: &mut egui::Ui, state: &mut GuiState, kind: FlipFlopKind) {
        ui.label(RichText::new("Truth Table").strong());
        let highlight = ui.visuals().selection.bg_fill;
        let highlighter = state.bench.highlighter(kind);
        let table = highlighter.table();
        let mut hovered = None;

        egui::Grid::new(("truth_table", kind))
            .striped(true)
            .num_columns(table.headers.len())
            .show(ui, |ui| {
                for header in table.headers {
                    ui.label(RichText::new(*header).strong());
                }
                ui.end_row();
                for (index, row) in table.rows.iter().enumerate() {
                    let lit = highlighter.is_highlighted(index);
                    for cell in row.cells {
                        let mut text = RichText::new(*cell).monospace();
                        if lit {
                            text = text.background_color(highlight);
                        }
                        if ui.label(text).hovered() {
                            hovered = Some(index);
                        }
                    }
                    ui.end_row();
                }
            });

        state.bench.highlighter_mut(kind).hover(hovered);
    }
}

fn stage_box(ui: &mut egui::Ui, name: &str, stage: &StageView) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(name).strong());
            let text = RichText::new(stage.label);
            if stage.active {
                ui.label(text.color(LED_ON).strong());
            } else {
                ui.label(text);
            }
        });
    });
}

/// Two-stage walkthrough: master latches while CLK is low, slave on high.
pub struct MasterSlavePanel;

impl MasterSlavePanel {
    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        ui.heading("Master-Slave Flip-Flop");
        ui.label(
            "Two latches in series, clocked in opposite phases, make the pair edge triggered.",
        );
        ui.separator();

        let demo = state.bench.master_slave();
        let phase = demo.phase().clone();
        let busy = demo.is_busy();
        let label = demo.control_label();

        ui.horizontal(|ui| {
            led_indicator(ui, phase.clock.into(), "CLK");
            ui.add_space(12.0);
            stage_box(ui, "Master", &phase.master);
            ui.label("→");
            stage_box(ui, "Slave", &phase.slave);
        });
        ui.add_space(8.0);
        if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
            state.dispatch(Action::PlayMasterSlave);
        }
    }
}

/// Metastability trace drawn in a 200 x 80 box.
pub struct TimingPanel;

impl TimingPanel {
    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        ui.heading("Timing & Metastability");
        ui.label(
            "If data changes too close to the clock edge the latch can hang between \
             0 and 1 before settling.",
        );
        ui.separator();

        let demo = state.bench.metastability();
        let trace = demo.trace().clone();
        let busy = demo.is_busy();

        let scale = 2.0;
        let (rect, _) =
            ui.allocate_exact_size(Vec2::new(200.0 * scale, 80.0 * scale), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_stroke(
            rect,
            4.0,
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
        let points: Vec<Pos2> = trace
            .points
            .iter()
            .map(|(x, y)| rect.min + Vec2::new(x * scale, y * scale))
            .collect();
        let [r, g, b] = trace.color.rgb();
        painter.add(egui::Shape::line(points, Stroke::new(2.5, Color32::from_rgb(r, g, b))));

        ui.add_space(8.0);
        if ui
            .add_enabled(!busy, egui::Button::new("Show Metastability"))
            .clicked()
        {
            state.dispatch(Action::PlayMetastability);
        }
    }
}

/// Composite circuits built from the cells above.
pub struct ApplicationsPanel;

impl ApplicationsPanel {
    fn led_row(ui: &mut egui::Ui, bits: &[Bit], captions: &[&str]) {
        ui.horizontal(|ui| {
            for (led, caption) in leds(bits).into_iter().zip(captions) {
                led_indicator(ui, led, caption);
            }
        });
    }

    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        ui.heading("Applications");
        ui.separator();

        ui.group(|ui| {
            ui.label(RichText::new("3-bit Counter").strong());
            let counter = state.bench.counter();
            let bits = counter.bits();
            let text = format!("Value: {} ({})", counter.display(), counter.value());
            Self::led_row(ui, &bits, &["Q2", "Q1", "Q0"]);
            ui.label(text);
            ui.horizontal(|ui| {
                if ui.button("Count").clicked() {
                    state.dispatch(Action::Count);
                }
                if ui.button("Reset").clicked() {
                    state.dispatch(Action::ResetCounter);
                }
            });
        });

        ui.group(|ui| {
            ui.label(RichText::new("4-bit Shift Register").strong());
            selector_for(ui, state, InputLine::ShiftIn);
            let bits = state.bench.shift_register().bits();
            Self::led_row(ui, &bits, &["Q3", "Q2", "Q1", "Q0"]);
            ui.horizontal(|ui| {
                if ui.button("Shift").clicked() {
                    state.dispatch(Action::Shift);
                }
                if ui.button("Clear").clicked() {
                    state.dispatch(Action::ClearShift);
                }
            });
        });

        ui.group(|ui| {
            ui.label(RichText::new("4-bit Parallel Register").strong());
            ui.horizontal(|ui| {
                for index in 0..4 {
                    ui.vertical(|ui| selector_for(ui, state, InputLine::Staged(index)));
                }
            });
            let outputs = state.bench.parallel_register().outputs();
            Self::led_row(ui, &outputs, &["Q3", "Q2", "Q1", "Q0"]);
            if ui.button("Load").clicked() {
                state.dispatch(Action::Load);
            }
        });
    }
}

/// Shows the last rejected action.
pub struct StatusBar;

impl StatusBar {
    pub fn render(&self, ui: &mut egui::Ui, state: &mut GuiState) {
        ui.horizontal(|ui| {
            ui.label(format!("Page: {}", state.section.title()));
            ui.separator();
            ui.label(format!("Mode: {}", state.theme().as_str()));
            if let Some(error) = state.last_error.clone() {
                ui.separator();
                ui.colored_label(ERROR_COLOR, format!("Error: {}", error));
                if ui.small_button("✖").clicked() {
                    state.clear_error();
                }
            }
        });
    }
}
