use tracing::debug;

use crate::component::{Clocked, FlipFlop};
use crate::components::flip_flops::DFlipFlop;
use crate::error::{LabError, Result};
use crate::types::Bit;

pub const PARALLEL_REGISTER_BITS: usize = 4;

/// Parallel-in, parallel-out register: four D flip-flops sharing one load clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelRegister {
    // D3 first, matching the MSB to LSB order of `outputs`.
    cells: [DFlipFlop; PARALLEL_REGISTER_BITS],
}

impl ParallelRegister {
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| DFlipFlop::new()),
        }
    }

    /// Stages one data input. The outputs do not change until `load`.
    pub fn stage(&mut self, index: usize, bit: Bit) -> Result<()> {
        let cell = self.cells.get_mut(index).ok_or(LabError::BitIndex {
            index,
            len: PARALLEL_REGISTER_BITS,
        })?;
        cell.select_d(bit);
        Ok(())
    }

    pub fn staged(&self) -> [Bit; PARALLEL_REGISTER_BITS] {
        std::array::from_fn(|i| self.cells[i].d())
    }

    /// Clocks every cell in the same step.
    pub fn load(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clock_pulse();
        }
        debug!(outputs = %crate::types::input_key(&self.outputs()), "parallel register loaded");
    }

    pub fn outputs(&self) -> [Bit; PARALLEL_REGISTER_BITS] {
        std::array::from_fn(|i| self.cells[i].outputs().q)
    }
}

impl Default for ParallelRegister {
    fn default() -> Self {
        Self::new()
    }
}
