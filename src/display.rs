//! Pure mapping from simulator state to indicator state.
//!
//! Front-ends draw these values; none of them hold any simulation state.

use crate::component::{FlipFlop, Outputs};
use crate::types::Bit;

/// A binary indicator: lit or dark, labelled `0` or `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Led {
    pub lit: bool,
    pub label: char,
}

impl From<Bit> for Led {
    fn from(bit: Bit) -> Self {
        Led {
            lit: bit.is_set(),
            label: bit.to_char(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Error,
}

/// Everything a front-end needs to draw one flip-flop panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipFlopView {
    pub q: Led,
    pub not_q: Option<Led>,
    pub status: String,
    pub severity: Severity,
}

impl FlipFlopView {
    pub fn of(flip_flop: &dyn FlipFlop) -> Self {
        let Outputs { q, not_q } = flip_flop.outputs();
        Self {
            q: q.into(),
            not_q: not_q.map(Led::from),
            status: flip_flop.status().to_string(),
            severity: if flip_flop.is_error() {
                Severity::Error
            } else {
                Severity::Normal
            },
        }
    }
}

/// A register's outputs as a row of indicators, in the order given.
pub fn leds(bits: &[Bit]) -> Vec<Led> {
    bits.iter().copied().map(Led::from).collect()
}
