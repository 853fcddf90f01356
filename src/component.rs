use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Bit;

/// The four flip-flop families the trainer simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipFlopKind {
    Sr,
    Jk,
    D,
    T,
}

impl FlipFlopKind {
    pub const ALL: [FlipFlopKind; 4] = [
        FlipFlopKind::Sr,
        FlipFlopKind::Jk,
        FlipFlopKind::D,
        FlipFlopKind::T,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FlipFlopKind::Sr => "SR Latch",
            FlipFlopKind::Jk => "JK Flip-Flop",
            FlipFlopKind::D => "D Flip-Flop",
            FlipFlopKind::T => "T Flip-Flop",
        }
    }
}

impl fmt::Display for FlipFlopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Q and ~Q as held by an SR, JK or D cell.
///
/// The pair is complementary in every reachable state except the SR invalid
/// configuration, which drives both outputs low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellState {
    pub q: Bit,
    pub not_q: Bit,
}

impl CellState {
    /// Power-on state: Q = 0, ~Q = 1.
    pub const CLEARED: CellState = CellState {
        q: Bit::Zero,
        not_q: Bit::One,
    };

    /// A complementary pair holding `q`.
    pub fn holding(q: Bit) -> Self {
        CellState { q, not_q: !q }
    }

    pub fn is_complementary(&self) -> bool {
        self.not_q == !self.q
    }

    /// Swaps the two outputs, which is how the JK toggle is defined.
    pub fn swapped(&self) -> Self {
        CellState {
            q: self.not_q,
            not_q: self.q,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        CellState::CLEARED
    }
}

/// Output indicators exposed by a flip-flop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outputs {
    pub q: Bit,
    pub not_q: Option<Bit>,
}

impl From<CellState> for Outputs {
    fn from(state: CellState) -> Self {
        Outputs {
            q: state.q,
            not_q: Some(state.not_q),
        }
    }
}

/// Common surface of every flip-flop widget.
pub trait FlipFlop {
    fn kind(&self) -> FlipFlopKind;
    fn outputs(&self) -> Outputs;
    /// Currently selected inputs as a truth-table key such as `"10"`.
    fn input_key(&self) -> String;
    /// Human readable description of the current or pending action.
    fn status(&self) -> &str;
    /// Whether the status describes an error condition.
    fn is_error(&self) -> bool {
        false
    }
}

/// Edge-triggered flip-flops that latch their pending inputs on a clock pulse.
pub trait Clocked: FlipFlop {
    fn clock_pulse(&mut self);
}
