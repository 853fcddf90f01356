use tracing::debug;

use crate::component::{Clocked, FlipFlop};
use crate::components::flip_flops::DFlipFlop;
use crate::types::Bit;

pub const SHIFT_REGISTER_BITS: usize = 4;

/// Serial-in, parallel-out register of chained D flip-flops.
///
/// A shift inserts the selected input bit at the most significant stage and
/// drops the least significant one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRegister {
    // Most significant stage first.
    stages: [DFlipFlop; SHIFT_REGISTER_BITS],
    input: Bit,
}

impl ShiftRegister {
    pub fn new() -> Self {
        Self {
            stages: std::array::from_fn(|_| DFlipFlop::new()),
            input: Bit::Zero,
        }
    }

    pub fn input(&self) -> Bit {
        self.input
    }

    pub fn select_input(&mut self, bit: Bit) {
        self.input = bit;
    }

    pub fn shift(&mut self) {
        let before = self.bits();
        // Every stage samples its predecessor before any of them is clocked.
        for (i, stage) in self.stages.iter_mut().enumerate() {
            let d = if i == 0 { self.input } else { before[i - 1] };
            stage.select_d(d);
        }
        for stage in self.stages.iter_mut() {
            stage.clock_pulse();
        }
        debug!(
            input = %self.input,
            bits = %crate::types::input_key(&self.bits()),
            "shift register shifted"
        );
    }

    pub fn clear(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.select_d(Bit::Zero);
            stage.clock_pulse();
        }
        debug!("shift register cleared");
    }

    /// Register contents ordered MSB to LSB.
    pub fn bits(&self) -> [Bit; SHIFT_REGISTER_BITS] {
        std::array::from_fn(|i| self.stages[i].outputs().q)
    }
}

impl Default for ShiftRegister {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_in_sequence() {
        let mut register = ShiftRegister::new();
        for bit in [Bit::One, Bit::Zero, Bit::One, Bit::One] {
            register.select_input(bit);
            register.shift();
        }
        assert_eq!(register.bits(), [Bit::One, Bit::One, Bit::Zero, Bit::One]);
    }

    #[test]
    fn test_oldest_bit_drops_out() {
        let mut register = ShiftRegister::new();
        register.select_input(Bit::One);
        register.shift();
        register.select_input(Bit::Zero);
        for _ in 0..3 {
            register.shift();
        }
        assert_eq!(register.bits(), [Bit::Zero, Bit::Zero, Bit::Zero, Bit::One]);
        register.shift();
        assert_eq!(register.bits(), [Bit::Zero; 4]);
    }

    #[test]
    fn test_clear_keeps_input_selection() {
        let mut register = ShiftRegister::new();
        register.select_input(Bit::One);
        register.shift();
        register.shift();
        register.clear();
        assert_eq!(register.bits(), [Bit::Zero; 4]);
        assert_eq!(register.input(), Bit::One);
    }
}
