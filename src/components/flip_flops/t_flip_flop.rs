use tracing::debug;

use crate::component::{Clocked, FlipFlop, FlipFlopKind, Outputs};
use crate::types::{input_key, Bit};

/// T transition: toggle when T is high, hold otherwise.
pub fn t_next(q: Bit, t: Bit) -> Bit {
    if t.is_set() {
        !q
    } else {
        q
    }
}

const HOLD_STATUS: &str = "Hold - Waiting for clock...";
const TOGGLE_STATUS: &str = "Toggle on next clock...";

/// Toggle flip-flop. Only Q is modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TFlipFlop {
    t: Bit,
    q: Bit,
    status: String,
}

impl TFlipFlop {
    pub fn new() -> Self {
        Self {
            t: Bit::Zero,
            q: Bit::Zero,
            status: HOLD_STATUS.to_string(),
        }
    }

    pub fn t(&self) -> Bit {
        self.t
    }

    pub fn q(&self) -> Bit {
        self.q
    }

    pub fn select_t(&mut self, t: Bit) {
        self.t = t;
        self.status = if t.is_set() {
            TOGGLE_STATUS.to_string()
        } else {
            HOLD_STATUS.to_string()
        };
    }

    /// Clears Q without touching the selected input.
    pub(crate) fn clear(&mut self) {
        self.q = Bit::Zero;
    }
}

impl Default for TFlipFlop {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipFlop for TFlipFlop {
    fn kind(&self) -> FlipFlopKind {
        FlipFlopKind::T
    }

    fn outputs(&self) -> Outputs {
        Outputs {
            q: self.q,
            not_q: None,
        }
    }

    fn input_key(&self) -> String {
        input_key(&[self.t])
    }

    fn status(&self) -> &str {
        &self.status
    }
}

impl Clocked for TFlipFlop {
    fn clock_pulse(&mut self) {
        self.q = t_next(self.q, self.t);
        self.status = if self.t.is_set() {
            format!("Toggled! Q = {}", self.q)
        } else {
            HOLD_STATUS.to_string()
        };
        debug!(t = %self.t, q = %self.q, "T clock pulse");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_hold() {
        let mut ff = TFlipFlop::new();
        ff.clock_pulse();
        assert_eq!(ff.q(), Bit::Zero);
        assert_eq!(ff.status(), "Hold - Waiting for clock...");

        ff.select_t(Bit::One);
        assert_eq!(ff.status(), "Toggle on next clock...");
        ff.clock_pulse();
        assert_eq!(ff.q(), Bit::One);
        assert_eq!(ff.status(), "Toggled! Q = 1");
        ff.clock_pulse();
        assert_eq!(ff.q(), Bit::Zero);
        assert_eq!(ff.status(), "Toggled! Q = 0");
    }

    #[test]
    fn test_no_complement_output() {
        let ff = TFlipFlop::new();
        assert_eq!(ff.outputs().not_q, None);
    }
}
