//! # Workbench
//!
//! Owns one instance of every simulator and maps discrete user actions onto
//! their transitions. Front-ends hold a `Workbench`, send it [`Action`]s, feed
//! it elapsed time and read state back for drawing.

use std::time::Duration;
use tracing::{debug, trace};

use crate::component::{Clocked, FlipFlop, FlipFlopKind};
use crate::components::clock::{MasterSlaveDemo, MetastabilityDemo};
use crate::components::flip_flops::{DFlipFlop, JkFlipFlop, SrLatch, TFlipFlop};
use crate::components::registers::{Counter, ParallelRegister, ShiftRegister};
use crate::config::LabConfig;
use crate::error::{LabError, Result};
use crate::truth_table::{RowHighlighter, DEFAULT_HIGHLIGHT};
use crate::types::Bit;

/// An input line with a two-valued selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputLine {
    S,
    R,
    J,
    K,
    D,
    T,
    /// Serial input of the shift register.
    ShiftIn,
    /// One of the parallel register's staged data inputs, D3 = 0 .. D0 = 3.
    Staged(usize),
}

impl InputLine {
    /// Selector lines of one flip-flop, in truth-table key order.
    pub fn for_kind(kind: FlipFlopKind) -> &'static [InputLine] {
        match kind {
            FlipFlopKind::Sr => &[InputLine::S, InputLine::R],
            FlipFlopKind::Jk => &[InputLine::J, InputLine::K],
            FlipFlopKind::D => &[InputLine::D],
            FlipFlopKind::T => &[InputLine::T],
        }
    }

    pub fn label(&self) -> String {
        match self {
            InputLine::S => "S".to_string(),
            InputLine::R => "R".to_string(),
            InputLine::J => "J".to_string(),
            InputLine::K => "K".to_string(),
            InputLine::D => "D".to_string(),
            InputLine::T => "T".to_string(),
            InputLine::ShiftIn => "Input".to_string(),
            InputLine::Staged(index) => format!("D{}", 3usize.saturating_sub(*index)),
        }
    }
}

/// Every control a front-end can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(InputLine, Bit),
    ClockJk,
    ClockD,
    ClockT,
    PlayMasterSlave,
    PlayMetastability,
    Count,
    ResetCounter,
    Shift,
    ClearShift,
    Load,
}

impl Action {
    /// The clock control of `kind`; the SR latch is level sensitive and has none.
    pub fn clock(kind: FlipFlopKind) -> Option<Action> {
        match kind {
            FlipFlopKind::Sr => None,
            FlipFlopKind::Jk => Some(Action::ClockJk),
            FlipFlopKind::D => Some(Action::ClockD),
            FlipFlopKind::T => Some(Action::ClockT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workbench {
    sr: SrLatch,
    jk: JkFlipFlop,
    d: DFlipFlop,
    t: TFlipFlop,
    sr_rows: RowHighlighter,
    jk_rows: RowHighlighter,
    d_rows: RowHighlighter,
    t_rows: RowHighlighter,
    master_slave: MasterSlaveDemo,
    metastability: MetastabilityDemo,
    counter: Counter,
    shift_register: ShiftRegister,
    parallel_register: ParallelRegister,
}

impl Workbench {
    pub fn new() -> Self {
        Self::with_parts(
            DEFAULT_HIGHLIGHT,
            MasterSlaveDemo::new(),
            MetastabilityDemo::new(),
        )
    }

    pub fn from_config(config: &LabConfig) -> Self {
        Self::with_parts(
            config.highlight_interval(),
            MasterSlaveDemo::with_durations(config.master_slave_phases()),
            MetastabilityDemo::with_steps(config.metastability_steps, config.metastability_step()),
        )
    }

    fn with_parts(
        highlight: Duration,
        master_slave: MasterSlaveDemo,
        metastability: MetastabilityDemo,
    ) -> Self {
        Self {
            sr: SrLatch::new(),
            jk: JkFlipFlop::new(),
            d: DFlipFlop::new(),
            t: TFlipFlop::new(),
            sr_rows: RowHighlighter::new(FlipFlopKind::Sr, highlight),
            jk_rows: RowHighlighter::new(FlipFlopKind::Jk, highlight),
            d_rows: RowHighlighter::new(FlipFlopKind::D, highlight),
            t_rows: RowHighlighter::new(FlipFlopKind::T, highlight),
            master_slave,
            metastability,
            counter: Counter::new(),
            shift_register: ShiftRegister::new(),
            parallel_register: ParallelRegister::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!(?action, "dispatch");
        match action {
            Action::Select(line, bit) => self.select(line, bit)?,
            Action::ClockJk => {
                self.jk.clock_pulse();
                self.jk_rows.flash(&self.jk.input_key());
            }
            Action::ClockD => {
                self.d.clock_pulse();
                self.d_rows.flash(&self.d.input_key());
            }
            Action::ClockT => {
                self.t.clock_pulse();
                self.t_rows.flash(&self.t.input_key());
            }
            Action::PlayMasterSlave => {
                self.master_slave.play();
            }
            Action::PlayMetastability => {
                self.metastability.play();
            }
            Action::Count => self.counter.increment(),
            Action::ResetCounter => self.counter.reset(),
            Action::Shift => self.shift_register.shift(),
            Action::ClearShift => self.shift_register.clear(),
            Action::Load => self.parallel_register.load(),
        }
        Ok(())
    }

    fn select(&mut self, line: InputLine, bit: Bit) -> Result<()> {
        match line {
            InputLine::S => {
                self.sr.select_s(bit);
                self.sr_rows.flash(&self.sr.input_key());
            }
            InputLine::R => {
                self.sr.select_r(bit);
                self.sr_rows.flash(&self.sr.input_key());
            }
            InputLine::J => self.jk.select_j(bit),
            InputLine::K => self.jk.select_k(bit),
            InputLine::D => self.d.select_d(bit),
            InputLine::T => self.t.select_t(bit),
            InputLine::ShiftIn => self.shift_register.select_input(bit),
            InputLine::Staged(index) => self.parallel_register.stage(index, bit)?,
        }
        Ok(())
    }

    /// The value currently selected on `line`.
    pub fn selection(&self, line: InputLine) -> Result<Bit> {
        Ok(match line {
            InputLine::S => self.sr.s(),
            InputLine::R => self.sr.r(),
            InputLine::J => self.jk.j(),
            InputLine::K => self.jk.k(),
            InputLine::D => self.d.d(),
            InputLine::T => self.t.t(),
            InputLine::ShiftIn => self.shift_register.input(),
            InputLine::Staged(index) => {
                let staged = self.parallel_register.staged();
                *staged.get(index).ok_or(LabError::BitIndex {
                    index,
                    len: staged.len(),
                })?
            }
        })
    }

    /// Advances highlights and animations by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        trace!(?dt, "tick");
        for rows in [
            &mut self.sr_rows,
            &mut self.jk_rows,
            &mut self.d_rows,
            &mut self.t_rows,
        ] {
            rows.tick(dt);
        }
        self.master_slave.tick(dt);
        self.metastability.tick(dt);
    }

    /// Whether anything time-driven is in progress, so the front-end should
    /// keep refreshing.
    pub fn is_animating(&self) -> bool {
        self.master_slave.is_busy()
            || self.metastability.is_busy()
            || [&self.sr_rows, &self.jk_rows, &self.d_rows, &self.t_rows]
                .iter()
                .any(|rows| rows.any_flashing())
    }

    pub fn flip_flop(&self, kind: FlipFlopKind) -> &dyn FlipFlop {
        match kind {
            FlipFlopKind::Sr => &self.sr,
            FlipFlopKind::Jk => &self.jk,
            FlipFlopKind::D => &self.d,
            FlipFlopKind::T => &self.t,
        }
    }

    pub fn highlighter(&self, kind: FlipFlopKind) -> &RowHighlighter {
        match kind {
            FlipFlopKind::Sr => &self.sr_rows,
            FlipFlopKind::Jk => &self.jk_rows,
            FlipFlopKind::D => &self.d_rows,
            FlipFlopKind::T => &self.t_rows,
        }
    }

    pub fn highlighter_mut(&mut self, kind: FlipFlopKind) -> &mut RowHighlighter {
        match kind {
            FlipFlopKind::Sr => &mut self.sr_rows,
            FlipFlopKind::Jk => &mut self.jk_rows,
            FlipFlopKind::D => &mut self.d_rows,
            FlipFlopKind::T => &mut self.t_rows,
        }
    }

    pub fn sr(&self) -> &SrLatch {
        &self.sr
    }

    pub fn jk(&self) -> &JkFlipFlop {
        &self.jk
    }

    pub fn d(&self) -> &DFlipFlop {
        &self.d
    }

    pub fn t(&self) -> &TFlipFlop {
        &self.t
    }

    pub fn master_slave(&self) -> &MasterSlaveDemo {
        &self.master_slave
    }

    pub fn metastability(&self) -> &MetastabilityDemo {
        &self.metastability
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn shift_register(&self) -> &ShiftRegister {
        &self.shift_register
    }

    pub fn parallel_register(&self) -> &ParallelRegister {
        &self.parallel_register
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sr_selection_flashes_row() {
        let mut bench = Workbench::new();
        bench.dispatch(Action::Select(InputLine::S, Bit::One)).unwrap();
        assert_eq!(bench.sr().outputs().q, Bit::One);
        assert!(bench.highlighter(FlipFlopKind::Sr).is_flashing(2));
        assert!(bench.is_animating());

        bench.tick(Duration::from_millis(1000));
        assert!(!bench.highlighter(FlipFlopKind::Sr).is_flashing(2));
        assert!(!bench.is_animating());
    }

    #[test]
    fn test_clocked_rows_flash_on_clock_only() {
        let mut bench = Workbench::new();
        bench.dispatch(Action::Select(InputLine::J, Bit::One)).unwrap();
        assert!(!bench.highlighter(FlipFlopKind::Jk).any_flashing());
        bench.dispatch(Action::ClockJk).unwrap();
        assert!(bench.highlighter(FlipFlopKind::Jk).is_flashing(2));
    }

    #[test]
    fn test_selection_readback() {
        let mut bench = Workbench::new();
        bench.dispatch(Action::Select(InputLine::Staged(1), Bit::One)).unwrap();
        assert_eq!(bench.selection(InputLine::Staged(1)).unwrap(), Bit::One);
        assert_eq!(bench.selection(InputLine::T).unwrap(), Bit::Zero);
        assert!(bench.selection(InputLine::Staged(7)).is_err());
        assert!(bench
            .dispatch(Action::Select(InputLine::Staged(7), Bit::One))
            .is_err());
    }

    #[test]
    fn test_animations_advance_with_tick() {
        let mut bench = Workbench::new();
        bench.dispatch(Action::PlayMasterSlave).unwrap();
        bench.dispatch(Action::PlayMetastability).unwrap();
        assert!(bench.is_animating());
        bench.tick(Duration::from_millis(800));
        assert!(!bench.metastability().is_busy());
        assert!(bench.master_slave().is_busy());
        bench.tick(Duration::from_millis(3200));
        assert!(!bench.is_animating());
    }

    #[test]
    fn test_config_timings_apply() {
        let config = LabConfig {
            highlight_ms: 10,
            metastability_steps: 2,
            ..LabConfig::default()
        };
        let mut bench = Workbench::from_config(&config);
        bench.dispatch(Action::ClockT).unwrap();
        bench.dispatch(Action::PlayMetastability).unwrap();
        bench.tick(Duration::from_millis(200));
        assert!(!bench.is_animating());
    }

    #[test]
    fn test_kind_controls() {
        assert_eq!(InputLine::for_kind(FlipFlopKind::Jk), &[InputLine::J, InputLine::K]);
        assert_eq!(InputLine::for_kind(FlipFlopKind::T), &[InputLine::T]);
        assert_eq!(Action::clock(FlipFlopKind::Sr), None);
        assert_eq!(Action::clock(FlipFlopKind::D), Some(Action::ClockD));

        // Every selector of a flip-flop reads back, and its clock fires.
        let mut bench = Workbench::new();
        for kind in FlipFlopKind::ALL {
            for line in InputLine::for_kind(kind) {
                bench.dispatch(Action::Select(*line, Bit::One)).unwrap();
                assert_eq!(bench.selection(*line).unwrap(), Bit::One);
            }
            if let Some(clock) = Action::clock(kind) {
                bench.dispatch(clock).unwrap();
            }
        }
        assert_eq!(bench.jk().state().q, Bit::One);
        assert_eq!(bench.d().state().q, Bit::One);
        assert_eq!(bench.t().q(), Bit::One);
    }

    #[test]
    fn test_staged_labels() {
        assert_eq!(InputLine::Staged(0).label(), "D3");
        assert_eq!(InputLine::Staged(3).label(), "D0");
        assert_eq!(InputLine::ShiftIn.label(), "Input");
    }
}
