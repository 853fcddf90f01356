use tracing::debug;

use crate::component::{CellState, Clocked, FlipFlop, FlipFlopKind, Outputs};
use crate::types::{input_key, Bit};

/// Captures D on the clock edge, whatever the prior state.
pub fn d_next(d: Bit) -> CellState {
    CellState::holding(d)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DFlipFlop {
    d: Bit,
    state: CellState,
    status: String,
}

impl DFlipFlop {
    pub fn new() -> Self {
        Self {
            d: Bit::Zero,
            state: CellState::CLEARED,
            status: Self::waiting_status(Bit::Zero),
        }
    }

    fn waiting_status(d: Bit) -> String {
        format!("D = {} - Waiting for clock edge...", d)
    }

    pub fn d(&self) -> Bit {
        self.d
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn select_d(&mut self, d: Bit) {
        self.d = d;
        self.status = Self::waiting_status(d);
    }
}

impl Default for DFlipFlop {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipFlop for DFlipFlop {
    fn kind(&self) -> FlipFlopKind {
        FlipFlopKind::D
    }

    fn outputs(&self) -> Outputs {
        self.state.into()
    }

    fn input_key(&self) -> String {
        input_key(&[self.d])
    }

    fn status(&self) -> &str {
        &self.status
    }
}

impl Clocked for DFlipFlop {
    fn clock_pulse(&mut self) {
        self.state = d_next(self.d);
        self.status = format!("Captured D = {} on clock edge!", self.d);
        debug!(d = %self.d, "D clock pulse");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_on_clock() {
        let mut ff = DFlipFlop::new();
        assert_eq!(ff.status(), "D = 0 - Waiting for clock edge...");

        ff.select_d(Bit::One);
        assert_eq!(ff.status(), "D = 1 - Waiting for clock edge...");
        assert_eq!(ff.outputs().q, Bit::Zero);

        ff.clock_pulse();
        assert_eq!(ff.state(), CellState::holding(Bit::One));
        assert_eq!(ff.status(), "Captured D = 1 on clock edge!");
    }

    #[test]
    fn test_input_persists_across_clocks() {
        let mut ff = DFlipFlop::new();
        ff.select_d(Bit::One);
        ff.clock_pulse();
        ff.clock_pulse();
        assert_eq!(ff.d(), Bit::One);
        assert_eq!(ff.outputs().q, Bit::One);
    }
}
