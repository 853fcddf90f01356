use tracing::debug;

use crate::component::{CellState, Clocked, FlipFlop, FlipFlopKind, Outputs};
use crate::types::{input_key, Bit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JkAction {
    Hold,
    Reset,
    Set,
    Toggle,
}

impl JkAction {
    pub fn from_inputs(j: Bit, k: Bit) -> Self {
        match (j, k) {
            (Bit::Zero, Bit::Zero) => JkAction::Hold,
            (Bit::Zero, Bit::One) => JkAction::Reset,
            (Bit::One, Bit::Zero) => JkAction::Set,
            (Bit::One, Bit::One) => JkAction::Toggle,
        }
    }

    /// Status text shown while the action waits for the next clock.
    pub fn preview(&self) -> &'static str {
        match self {
            JkAction::Hold => "Hold - Waiting for clock...",
            JkAction::Reset => "Reset on next clock",
            JkAction::Set => "Set on next clock",
            JkAction::Toggle => "Toggle on next clock",
        }
    }
}

/// JK transition applied on a clock edge.
pub fn jk_next(state: CellState, j: Bit, k: Bit) -> CellState {
    match JkAction::from_inputs(j, k) {
        JkAction::Hold => state,
        JkAction::Reset => CellState::holding(Bit::Zero),
        JkAction::Set => CellState::holding(Bit::One),
        JkAction::Toggle => state.swapped(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JkFlipFlop {
    j: Bit,
    k: Bit,
    state: CellState,
}

impl JkFlipFlop {
    pub fn new() -> Self {
        Self {
            j: Bit::Zero,
            k: Bit::Zero,
            state: CellState::CLEARED,
        }
    }

    pub fn j(&self) -> Bit {
        self.j
    }

    pub fn k(&self) -> Bit {
        self.k
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn pending_action(&self) -> JkAction {
        JkAction::from_inputs(self.j, self.k)
    }

    pub fn select_j(&mut self, j: Bit) {
        self.j = j;
    }

    pub fn select_k(&mut self, k: Bit) {
        self.k = k;
    }
}

impl Default for JkFlipFlop {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipFlop for JkFlipFlop {
    fn kind(&self) -> FlipFlopKind {
        FlipFlopKind::Jk
    }

    fn outputs(&self) -> Outputs {
        self.state.into()
    }

    fn input_key(&self) -> String {
        input_key(&[self.j, self.k])
    }

    // The preview text stays in place after the clock; only the LEDs move.
    fn status(&self) -> &str {
        self.pending_action().preview()
    }
}

impl Clocked for JkFlipFlop {
    fn clock_pulse(&mut self) {
        self.state = jk_next(self.state, self.j, self.k);
        debug!(
            j = %self.j,
            k = %self.k,
            q = %self.state.q,
            "JK clock pulse: {:?}",
            self.pending_action()
        );
    }
}
