use tracing::debug;

use crate::component::{CellState, FlipFlop, FlipFlopKind, Outputs};
use crate::types::{input_key, Bit};

/// What an SR input combination does to the latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SrAction {
    Hold,
    Reset,
    Set,
    Invalid,
}

impl SrAction {
    pub fn from_inputs(s: Bit, r: Bit) -> Self {
        match (s, r) {
            (Bit::Zero, Bit::Zero) => SrAction::Hold,
            (Bit::Zero, Bit::One) => SrAction::Reset,
            (Bit::One, Bit::Zero) => SrAction::Set,
            (Bit::One, Bit::One) => SrAction::Invalid,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SrAction::Hold => "Hold State",
            SrAction::Reset => "Reset (Q = 0)",
            SrAction::Set => "Set (Q = 1)",
            SrAction::Invalid => "INVALID STATE!",
        }
    }
}

/// Level-sensitive SR transition.
///
/// Both inputs asserted forces Q = ~Q = 0 so the error is visible on the
/// indicators.
pub fn sr_next(state: CellState, s: Bit, r: Bit) -> CellState {
    match SrAction::from_inputs(s, r) {
        SrAction::Hold => state,
        SrAction::Reset => CellState::holding(Bit::Zero),
        SrAction::Set => CellState::holding(Bit::One),
        SrAction::Invalid => CellState {
            q: Bit::Zero,
            not_q: Bit::Zero,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrLatch {
    s: Bit,
    r: Bit,
    state: CellState,
    last_action: SrAction,
}

impl SrLatch {
    pub fn new() -> Self {
        Self {
            s: Bit::Zero,
            r: Bit::Zero,
            state: CellState::CLEARED,
            last_action: SrAction::Hold,
        }
    }

    pub fn s(&self) -> Bit {
        self.s
    }

    pub fn r(&self) -> Bit {
        self.r
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn last_action(&self) -> SrAction {
        self.last_action
    }

    /// Selects S and immediately re-evaluates the latch.
    pub fn select_s(&mut self, s: Bit) -> SrAction {
        self.s = s;
        self.apply()
    }

    /// Selects R and immediately re-evaluates the latch.
    pub fn select_r(&mut self, r: Bit) -> SrAction {
        self.r = r;
        self.apply()
    }

    fn apply(&mut self) -> SrAction {
        self.state = sr_next(self.state, self.s, self.r);
        self.last_action = SrAction::from_inputs(self.s, self.r);
        debug!(
            s = %self.s,
            r = %self.r,
            q = %self.state.q,
            not_q = %self.state.not_q,
            "SR latch evaluated: {}",
            self.last_action.description()
        );
        self.last_action
    }
}

impl Default for SrLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipFlop for SrLatch {
    fn kind(&self) -> FlipFlopKind {
        FlipFlopKind::Sr
    }

    fn outputs(&self) -> Outputs {
        self.state.into()
    }

    fn input_key(&self) -> String {
        input_key(&[self.s, self.r])
    }

    fn status(&self) -> &str {
        self.last_action.description()
    }

    fn is_error(&self) -> bool {
        self.last_action == SrAction::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sr_truth_table() {
        let prior = CellState::holding(Bit::One);
        assert_eq!(sr_next(prior, Bit::Zero, Bit::Zero), prior);
        assert_eq!(
            sr_next(prior, Bit::Zero, Bit::One),
            CellState::holding(Bit::Zero)
        );
        assert_eq!(
            sr_next(CellState::CLEARED, Bit::One, Bit::Zero),
            CellState::holding(Bit::One)
        );
        let invalid = sr_next(prior, Bit::One, Bit::One);
        assert_eq!(invalid.q, Bit::Zero);
        assert_eq!(invalid.not_q, Bit::Zero);
    }

    #[test]
    fn test_selection_applies_immediately() {
        let mut latch = SrLatch::new();
        assert_eq!(latch.select_s(Bit::One), SrAction::Set);
        assert_eq!(latch.outputs().q, Bit::One);
        assert_eq!(latch.status(), "Set (Q = 1)");

        assert_eq!(latch.select_s(Bit::Zero), SrAction::Hold);
        assert_eq!(latch.outputs().q, Bit::One);
        assert_eq!(latch.status(), "Hold State");
    }

    #[test]
    fn test_invalid_state_is_flagged() {
        let mut latch = SrLatch::new();
        latch.select_s(Bit::One);
        latch.select_r(Bit::One);
        assert!(latch.is_error());
        assert_eq!(latch.input_key(), "11");
        assert!(!latch.state().is_complementary());

        // Releasing S leaves R asserted, which resets cleanly.
        latch.select_s(Bit::Zero);
        assert!(!latch.is_error());
        assert_eq!(latch.state(), CellState::holding(Bit::Zero));
    }

    #[test]
    fn test_hold_after_invalid_keeps_both_low() {
        let invalid = sr_next(CellState::CLEARED, Bit::One, Bit::One);
        assert_eq!(sr_next(invalid, Bit::Zero, Bit::Zero), invalid);
    }
}
