use tracing::debug;

use crate::component::{Clocked, FlipFlop};
use crate::components::flip_flops::TFlipFlop;
use crate::types::Bit;

pub const COUNTER_BITS: usize = 3;

/// 3-bit ripple counter built from T flip-flops with T tied high.
///
/// Each stage toggles on the falling edge of the stage below it, which gives a
/// modulo-8 up-count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    // Least significant stage first.
    stages: [TFlipFlop; COUNTER_BITS],
}

impl Counter {
    pub fn new() -> Self {
        let stages = std::array::from_fn(|_| {
            let mut stage = TFlipFlop::new();
            stage.select_t(Bit::One);
            stage
        });
        Self { stages }
    }

    pub fn increment(&mut self) {
        for stage in self.stages.iter_mut() {
            let before = stage.q();
            stage.clock_pulse();
            // Only a 1 -> 0 transition clocks the next stage.
            if !before.is_set() {
                break;
            }
        }
        debug!(value = self.value(), "counter incremented");
    }

    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.clear();
        }
        debug!("counter reset");
    }

    pub fn value(&self) -> u8 {
        self.stages
            .iter()
            .enumerate()
            .map(|(i, stage)| stage.outputs().q.value() << i)
            .sum()
    }

    /// Counter bits ordered MSB to LSB.
    pub fn bits(&self) -> [Bit; COUNTER_BITS] {
        std::array::from_fn(|i| self.stages[COUNTER_BITS - 1 - i].q())
    }

    /// The value as a binary string such as `"101"`.
    pub fn display(&self) -> String {
        crate::types::input_key(&self.bits())
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}
