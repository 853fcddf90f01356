//! # Console Interface Module
//!
//! Terminal front-end for the trainer, drawn with ratatui over crossterm.
//!
//! ## Keys
//! - `Tab`/`→` and `Shift+Tab`/`←` switch pages, `q`/`Esc` quits
//! - `h` shows help, `m` switches between dark and light mode
//! - Page keys (SR: `s` `r`; JK: `j` `k` `c`; D: `d` `c`; T: `t` `c`;
//!   demos: `p`; applications: `n` `x` `i` `s` `e` `1`-`4` `l`) toggle an
//!   input selector or press a control
//!
//! The theme is read from the preference file at startup and written back
//! whenever it is toggled.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas},
        Block, Borders, Paragraph, Tabs, Wrap,
    },
    Frame, Terminal,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::component::FlipFlopKind;
use crate::components::clock::StageView;
use crate::config::LabConfig;
use crate::display::{leds, FlipFlopView, Led, Severity};
use crate::error::{LabError, Result};
use crate::preferences::{load_theme, save_theme, JsonFileStore, Theme};
use crate::systems::sections::overview_entries;
use crate::systems::{Action, InputLine, Section, Workbench};
use crate::types::Bit;

/// Console configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub refresh_rate_ms: u64,
    pub show_truth_tables: bool,
    pub show_help_bar: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 100,
            show_truth_tables: true,
            show_help_bar: true,
        }
    }
}

/// What a key press asks the console to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Act(Action),
    Navigate(Section),
    ToggleTheme,
    ToggleHelp,
    Quit,
}

fn toggle(bench: &Workbench, line: InputLine) -> Option<ConsoleCommand> {
    let current = bench.selection(line).ok()?;
    Some(ConsoleCommand::Act(Action::Select(line, !current)))
}

/// Key that toggles a flip-flop selector.
fn selector_key(line: InputLine) -> Option<char> {
    match line {
        InputLine::S => Some('s'),
        InputLine::R => Some('r'),
        InputLine::J => Some('j'),
        InputLine::K => Some('k'),
        InputLine::D => Some('d'),
        InputLine::T => Some('t'),
        InputLine::ShiftIn | InputLine::Staged(_) => None,
    }
}

/// Leaves the alternate screen and raw mode. Every step is attempted and the
/// first failure is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}

/// Runs a restore step exactly once: on `release`, or on drop if the caller
/// bailed out early.
struct RestoreGuard<F: FnMut() -> io::Result<()>> {
    restore: Option<F>,
}

impl<F: FnMut() -> io::Result<()>> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn release(mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(mut restore) => restore(),
            None => Ok(()),
        }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            if let Err(e) = restore() {
                warn!(error = %e, "could not restore terminal");
            }
        }
    }
}

/// Maps a key on the given page to a command. Unbound keys yield `None`.
pub fn command_for_key(
    section: Section,
    key: KeyCode,
    bench: &Workbench,
) -> Option<ConsoleCommand> {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            return Some(ConsoleCommand::Quit)
        }
        KeyCode::Char('h') | KeyCode::Char('?') => return Some(ConsoleCommand::ToggleHelp),
        KeyCode::Char('m') => return Some(ConsoleCommand::ToggleTheme),
        KeyCode::Tab | KeyCode::Right => return Some(ConsoleCommand::Navigate(section.next())),
        KeyCode::BackTab | KeyCode::Left => {
            return Some(ConsoleCommand::Navigate(section.previous()))
        }
        _ => {}
    }

    let KeyCode::Char(c) = key else {
        return None;
    };
    let act = |action| Some(ConsoleCommand::Act(action));

    if let Some(kind) = section.flip_flop() {
        if let Some(line) = InputLine::for_kind(kind)
            .iter()
            .find(|line| selector_key(**line) == Some(c))
        {
            return toggle(bench, *line);
        }
        return match c {
            'c' | ' ' => Action::clock(kind).and_then(act),
            _ => None,
        };
    }

    match (section, c) {
        (Section::Overview, '1'..='4') => {
            let index = c as usize - '1' as usize;
            Some(ConsoleCommand::Navigate(FlipFlopKind::ALL[index].into()))
        }
        (Section::MasterSlave, 'p' | ' ') => act(Action::PlayMasterSlave),
        (Section::Timing, 'p' | ' ') => act(Action::PlayMetastability),
        (Section::Applications, 'n') => act(Action::Count),
        (Section::Applications, 'x') => act(Action::ResetCounter),
        (Section::Applications, 'i') => toggle(bench, InputLine::ShiftIn),
        (Section::Applications, 's') => act(Action::Shift),
        (Section::Applications, 'e') => act(Action::ClearShift),
        (Section::Applications, '1'..='4') => {
            toggle(bench, InputLine::Staged(c as usize - '1' as usize))
        }
        (Section::Applications, 'l') => act(Action::Load),
        _ => None,
    }
}

/// Colours for one display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub background: Color,
    pub accent: Color,
    pub led_on: Color,
    pub led_off: Color,
    pub highlight: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                background: Color::Black,
                accent: Color::Cyan,
                led_on: Color::LightGreen,
                led_off: Color::DarkGray,
                highlight: Color::Yellow,
                error: Color::LightRed,
            },
            Theme::Light => Self {
                text: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                led_on: Color::Green,
                led_off: Color::Gray,
                highlight: Color::Magenta,
                error: Color::Red,
            },
        }
    }
}

fn led_span(led: Led, palette: &Palette) -> Span<'static> {
    let style = if led.lit {
        Style::default()
            .fg(palette.led_on)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.led_off)
    };
    let glyph = if led.lit { '●' } else { '○' };
    Span::styled(format!("{} {}", glyph, led.label), style)
}

fn selector_line(label: &str, value: Bit, key: char, palette: &Palette) -> Line<'static> {
    let option = |bit: Bit| {
        let text = format!("[{}]", bit);
        if bit == value {
            Span::styled(
                text,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::REVERSED),
            )
        } else {
            Span::styled(text, Style::default().fg(palette.text))
        }
    };
    Line::from(vec![
        Span::raw(format!("{:<6}", label)),
        option(Bit::Zero),
        Span::raw(" "),
        option(Bit::One),
        Span::styled(format!("   ({})", key), Style::default().fg(palette.led_off)),
    ])
}

fn led_row(label: &str, row: &[Led], palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(format!("{:<6}", label))];
    for led in row {
        spans.push(led_span(*led, palette));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

/// Reference table rows with the lit rows emphasised.
pub fn truth_table_lines(
    bench: &Workbench,
    kind: FlipFlopKind,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let highlighter = bench.highlighter(kind);
    let table = highlighter.table();
    let cell = |text: &str| format!("{:<9}", text);

    let mut lines = vec![Line::from(Span::styled(
        table.headers.iter().map(|h| cell(h)).collect::<String>(),
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    for (index, row) in table.rows.iter().enumerate() {
        let text: String = row.cells.iter().map(|c| cell(c)).collect();
        let style = if highlighter.is_highlighted(index) {
            Style::default().fg(palette.background).bg(palette.highlight)
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines
}

/// Inputs, indicators and status line of one flip-flop page.
pub fn flip_flop_lines(
    bench: &Workbench,
    kind: FlipFlopKind,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for line in InputLine::for_kind(kind) {
        let value = bench.selection(*line).unwrap_or_default();
        let key = selector_key(*line).unwrap_or(' ');
        lines.push(selector_line(&line.label(), value, key, palette));
    }
    if Action::clock(kind).is_some() {
        lines.push(Line::from(Span::styled(
            "[ Clock Pulse ]   (c / space)".to_string(),
            Style::default().fg(palette.accent),
        )));
    }
    lines.push(Line::from(""));

    let view = FlipFlopView::of(bench.flip_flop(kind));
    lines.push(led_row("Q", &[view.q], palette));
    if let Some(not_q) = view.not_q {
        lines.push(led_row("~Q", &[not_q], palette));
    }
    lines.push(Line::from(""));
    let status_style = match view.severity {
        Severity::Normal => Style::default().fg(palette.text),
        Severity::Error => Style::default()
            .fg(palette.error)
            .add_modifier(Modifier::BOLD),
    };
    lines.push(Line::from(Span::styled(view.status, status_style)));
    lines
}

fn stage_line(name: &str, stage: &StageView, palette: &Palette) -> Line<'static> {
    let style = if stage.active {
        Style::default()
            .fg(palette.led_on)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };
    Line::from(vec![
        Span::raw(format!("{:<8}", name)),
        Span::styled(stage.label.to_string(), style),
    ])
}

pub fn master_slave_lines(bench: &Workbench, palette: &Palette) -> Vec<Line<'static>> {
    let demo = bench.master_slave();
    let phase = demo.phase();
    vec![
        led_row("CLK", &[phase.clock.into()], palette),
        Line::from(""),
        stage_line("Master", &phase.master, palette),
        stage_line("Slave", &phase.slave, palette),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {} ]   (p)", demo.control_label()),
            if demo.is_busy() {
                Style::default().fg(palette.led_off)
            } else {
                Style::default().fg(palette.accent)
            },
        )),
    ]
}

pub fn application_lines(bench: &Workbench, palette: &Palette) -> Vec<Line<'static>> {
    let counter = bench.counter();
    let shift = bench.shift_register();
    let parallel = bench.parallel_register();

    let mut lines = vec![
        Line::from(Span::styled(
            "3-bit Counter",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        led_row("Q2..Q0", &leds(&counter.bits()), palette),
        Line::from(format!(
            "Value: {} ({})   [n] count  [x] reset",
            counter.display(),
            counter.value()
        )),
        Line::from(""),
        Line::from(Span::styled(
            "4-bit Shift Register",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        selector_line("Input", shift.input(), 'i', palette),
        led_row("Q3..Q0", &leds(&shift.bits()), palette),
        Line::from("[s] shift  [e] clear"),
        Line::from(""),
        Line::from(Span::styled(
            "4-bit Parallel Register",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for (index, bit) in parallel.staged().iter().enumerate() {
        let key = char::from(b'1' + index as u8);
        lines.push(selector_line(
            &InputLine::Staged(index).label(),
            *bit,
            key,
            palette,
        ));
    }
    lines.push(led_row("Q3..Q0", &leds(&parallel.outputs()), palette));
    lines.push(Line::from("[l] load"));
    lines
}

/// Console UI application state
pub struct ConsoleApp {
    bench: Workbench,
    config: ConsoleConfig,
    section: Section,
    theme: Theme,
    preferences: Option<JsonFileStore>,
    running: bool,
    show_help: bool,
}

impl ConsoleApp {
    pub fn new(bench: Workbench, config: ConsoleConfig, theme: Theme) -> Self {
        Self {
            bench,
            config,
            section: Section::default(),
            theme,
            preferences: None,
            running: false,
            show_help: false,
        }
    }

    /// Loads the theme from `store` and writes back to it on every toggle.
    pub fn with_preferences(mut self, store: JsonFileStore) -> Self {
        self.theme = load_theme(&store);
        self.preferences = Some(store);
        self
    }

    pub fn bench(&self) -> &Workbench {
        &self.bench
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if self.show_help && key != KeyCode::Char('q') && key != KeyCode::Esc {
            // Any key leaves the help screen.
            self.show_help = false;
            return;
        }
        if let Some(command) = command_for_key(self.section, key, &self.bench) {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Act(action) => {
                if let Err(e) = self.bench.dispatch(action) {
                    warn!(error = %e, "action rejected");
                }
            }
            ConsoleCommand::Navigate(section) => self.section = section,
            ConsoleCommand::ToggleTheme => self.toggle_theme(),
            ConsoleCommand::ToggleHelp => self.show_help = !self.show_help,
            ConsoleCommand::Quit => self.running = false,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Some(store) = self.preferences.as_mut() {
            if let Err(e) = save_theme(store, self.theme) {
                warn!(error = %e, "could not save theme preference");
            }
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        self.bench.tick(dt);
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let guard = RestoreGuard::new(restore_terminal);
        execute!(io::stdout(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        let outcome = self.event_loop(&mut terminal);
        let restored = guard.release();
        outcome.and(restored.map_err(LabError::from))
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.running = true;
        let refresh = Duration::from_millis(self.config.refresh_rate_ms.max(1));
        let mut last_tick = Instant::now();
        let mut last_draw: Option<Instant> = None;

        while self.running {
            if event::poll(Duration::from_millis(10))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                        // Redraw right away so selections feel immediate.
                        last_draw = None;
                    }
                }
            }

            let now = Instant::now();
            self.tick(now.duration_since(last_tick));
            last_tick = now;

            if last_draw.map_or(true, |at| now.duration_since(at) >= refresh) {
                terminal.draw(|f| self.draw_ui(f))?;
                last_draw = Some(now);
            }
        }
        info!("console closed");
        Ok(())
    }

    pub fn draw_ui(&self, f: &mut Frame) {
        let palette = Palette::for_theme(self.theme);
        let size = f.size();
        f.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            size,
        );

        if self.show_help {
            self.draw_help_screen(f, &palette);
            return;
        }

        let help_height = if self.config.show_help_bar { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(help_height),
            ])
            .split(size);

        let titles: Vec<Line> = Section::ALL
            .iter()
            .map(|section| Line::from(section.title()))
            .collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Flip-Flop Lab  {} (m)", self.theme.toggle_icon())),
            )
            .select(self.section.index())
            .style(Style::default().fg(palette.text))
            .highlight_style(
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[0]);

        self.draw_section(f, chunks[1], &palette);

        if self.config.show_help_bar {
            let help = Paragraph::new(Line::from(vec![
                Span::styled("Tab/←→", Style::default().fg(palette.accent)),
                Span::raw(" pages  "),
                Span::styled("h", Style::default().fg(palette.accent)),
                Span::raw(" help  "),
                Span::styled("m", Style::default().fg(palette.accent)),
                Span::raw(" theme  "),
                Span::styled("q", Style::default().fg(palette.accent)),
                Span::raw(" quit"),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(help, chunks[2]);
        }
    }

    fn draw_section(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let title = self.section.title();
        match self.section {
            Section::Overview => {
                let mut lines = vec![
                    Line::from("A flip-flop stores one bit. Pick a type to try it:"),
                    Line::from(""),
                ];
                for (i, (kind, summary)) in overview_entries().iter().enumerate() {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{}  ", i + 1), Style::default().fg(palette.accent)),
                        Span::styled(
                            format!("{:<14}", kind.name()),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(*summary),
                    ]));
                }
                let widget = Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .wrap(Wrap { trim: true });
                f.render_widget(widget, area);
            }
            Section::Sr | Section::Jk | Section::D | Section::T => {
                let Some(kind) = self.section.flip_flop() else {
                    return;
                };
                let columns = if self.config.show_truth_tables {
                    [Constraint::Percentage(50), Constraint::Percentage(50)]
                } else {
                    [Constraint::Percentage(100), Constraint::Percentage(0)]
                };
                let panes = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(columns)
                    .split(area);

                let sim = Paragraph::new(flip_flop_lines(&self.bench, kind, palette))
                    .block(Block::default().borders(Borders::ALL).title(kind.name()));
                f.render_widget(sim, panes[0]);

                if self.config.show_truth_tables {
                    let table = Paragraph::new(truth_table_lines(&self.bench, kind, palette))
                        .block(Block::default().borders(Borders::ALL).title("Truth Table"));
                    f.render_widget(table, panes[1]);
                }
            }
            Section::MasterSlave => {
                let widget = Paragraph::new(master_slave_lines(&self.bench, palette))
                    .block(Block::default().borders(Borders::ALL).title(title));
                f.render_widget(widget, area);
            }
            Section::Timing => self.draw_trace(f, area, palette),
            Section::Applications => {
                let widget = Paragraph::new(application_lines(&self.bench, palette))
                    .block(Block::default().borders(Borders::ALL).title(title));
                f.render_widget(widget, area);
            }
        }
    }

    fn draw_trace(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let demo = self.bench.metastability();
        let trace = demo.trace().clone();
        let [r, g, b] = trace.color.rgb();
        let color = Color::Rgb(r, g, b);
        let label = if demo.is_busy() {
            "Metastability - oscillating"
        } else {
            "Metastability - settled   [p] play"
        };

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(label))
            .background_color(palette.background)
            .x_bounds([0.0, 200.0])
            .y_bounds([0.0, 80.0])
            .paint(move |ctx| {
                for pair in trace.points.windows(2) {
                    let (x1, y1) = pair[0];
                    let (x2, y2) = pair[1];
                    // Diagram y grows downward, canvas y grows upward.
                    ctx.draw(&canvas::Line {
                        x1: f64::from(x1),
                        y1: 80.0 - f64::from(y1),
                        x2: f64::from(x2),
                        y2: 80.0 - f64::from(y2),
                        color,
                    });
                }
            });
        f.render_widget(canvas, area);
    }

    fn draw_help_screen(&self, f: &mut Frame, palette: &Palette) {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(palette.accent));
        let lines = vec![
            Line::from(Span::styled(
                "Flip-Flop Lab Help",
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![key("  Tab / →"), Span::raw("  next page")]),
            Line::from(vec![key("  Shift+Tab / ←"), Span::raw("  previous page")]),
            Line::from(vec![key("  m"), Span::raw("  switch dark / light mode")]),
            Line::from(vec![key("  q, Esc"), Span::raw("  quit")]),
            Line::from(""),
            Line::from(vec![key("  SR"), Span::raw("  s, r toggle inputs")]),
            Line::from(vec![
                key("  JK"),
                Span::raw("  j, k toggle inputs; c or space clocks"),
            ]),
            Line::from(vec![
                key("  D / T"),
                Span::raw("  d or t toggles input; c or space clocks"),
            ]),
            Line::from(vec![key("  Demos"), Span::raw("  p or space plays the animation")]),
            Line::from(vec![
                key("  Applications"),
                Span::raw("  n count, x reset, i input, s shift, e clear, 1-4 stage, l load"),
            ]),
            Line::from(""),
            Line::from("Press any key to return..."),
        ];
        let help = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(help, f.size());
    }
}

/// Public interface for launching the console
pub fn run_console(config: &LabConfig) -> Result<()> {
    let bench = Workbench::from_config(config);
    let mut app = ConsoleApp::new(bench, config.console.clone(), Theme::default());
    match config.resolved_preferences_path() {
        Some(path) => {
            info!(path = %path.display(), "using console preference file");
            app = app.with_preferences(JsonFileStore::open(path));
        }
        None => warn!("no preference location available, theme will not persist"),
    }
    app.run()
        .map_err(|e| LabError::Frontend(format!("console: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_once_on_release() {
        let calls = Cell::new(0);
        let guard = RestoreGuard::new(|| {
            calls.set(calls.get() + 1);
            Ok(())
        });
        assert!(guard.release().is_ok());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_restore_runs_when_setup_bails_out() {
        fn failing_setup(calls: &Cell<u32>) -> Result<()> {
            let _guard = RestoreGuard::new(|| {
                calls.set(calls.get() + 1);
                Ok(())
            });
            Err(io::Error::new(io::ErrorKind::Other, "no terminal").into())
        }

        let calls = Cell::new(0);
        assert!(matches!(failing_setup(&calls), Err(LabError::Io(_))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_release_reports_restore_failure() {
        let guard = RestoreGuard::new(|| {
            Err(io::Error::new(io::ErrorKind::Other, "tty gone"))
        });
        let loop_outcome: Result<()> = Ok(());
        let outcome = loop_outcome.and(guard.release().map_err(LabError::from));
        assert!(matches!(outcome, Err(LabError::Io(_))));
    }

    #[test]
    fn test_toggle_keys_flip_selection() {
        let bench = Workbench::new();
        assert_eq!(
            command_for_key(Section::Sr, KeyCode::Char('s'), &bench),
            Some(ConsoleCommand::Act(Action::Select(InputLine::S, Bit::One)))
        );
        assert_eq!(
            command_for_key(Section::Applications, KeyCode::Char('3'), &bench),
            Some(ConsoleCommand::Act(Action::Select(InputLine::Staged(2), Bit::One)))
        );
    }

    #[test]
    fn test_keys_are_page_specific() {
        let bench = Workbench::new();
        assert_eq!(command_for_key(Section::Sr, KeyCode::Char('c'), &bench), None);
        assert_eq!(
            command_for_key(Section::D, KeyCode::Char(' '), &bench),
            Some(ConsoleCommand::Act(Action::ClockD))
        );
        assert_eq!(
            command_for_key(Section::Overview, KeyCode::Char('2'), &bench),
            Some(ConsoleCommand::Navigate(Section::Jk))
        );
    }

    #[test]
    fn test_global_keys() {
        let bench = Workbench::new();
        assert_eq!(
            command_for_key(Section::T, KeyCode::Tab, &bench),
            Some(ConsoleCommand::Navigate(Section::MasterSlave))
        );
        assert_eq!(
            command_for_key(Section::Overview, KeyCode::Left, &bench),
            Some(ConsoleCommand::Navigate(Section::Applications))
        );
        assert_eq!(
            command_for_key(Section::Timing, KeyCode::Esc, &bench),
            Some(ConsoleCommand::Quit)
        );
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = ConsoleApp::new(Workbench::new(), ConsoleConfig::default(), Theme::Dark);
        app.handle_key(KeyCode::Char('h'));
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.section(), Section::Overview);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.section(), Section::Sr);
    }

    #[test]
    fn test_truth_table_lines_mark_flashed_row() {
        let mut bench = Workbench::new();
        bench
            .dispatch(Action::Select(InputLine::R, Bit::One))
            .unwrap();
        let palette = Palette::for_theme(Theme::Dark);
        let lines = truth_table_lines(&bench, FlipFlopKind::Sr, &palette);
        assert_eq!(lines.len(), 5);
        // Header, then rows 00, 01, ... ; "01" is lit.
        assert_eq!(lines[2].spans[0].style.bg, Some(palette.highlight));
        assert_eq!(lines[1].spans[0].style.bg, None);
    }
}
