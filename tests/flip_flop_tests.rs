//! # Flip-Flop Behaviour Tests
//!
//! Walks each cell through the scenarios a learner would click through and
//! checks outputs, status lines and truth-table highlighting together.

use flipflop_lab::component::{CellState, Clocked, FlipFlop, FlipFlopKind};
use flipflop_lab::components::flip_flops::*;
use flipflop_lab::display::{FlipFlopView, Severity};
use flipflop_lab::truth_table::TruthTable;
use flipflop_lab::types::Bit;

mod sr_latch {
    use super::*;

    #[test]
    fn test_set_hold_reset_sequence() {
        let mut latch = SrLatch::new();
        assert_eq!(latch.state(), CellState::CLEARED);

        latch.select_s(Bit::One);
        assert_eq!(latch.state(), CellState::holding(Bit::One));
        assert_eq!(latch.status(), "Set (Q = 1)");

        latch.select_s(Bit::Zero);
        assert_eq!(latch.state(), CellState::holding(Bit::One));
        assert_eq!(latch.status(), "Hold State");

        latch.select_r(Bit::One);
        assert_eq!(latch.state(), CellState::holding(Bit::Zero));
        assert_eq!(latch.status(), "Reset (Q = 0)");
    }

    #[test]
    fn test_invalid_state_shows_error() {
        let mut latch = SrLatch::new();
        latch.select_s(Bit::One);
        latch.select_r(Bit::One);

        let outputs = latch.outputs();
        assert_eq!(outputs.q, Bit::Zero);
        assert_eq!(outputs.not_q, Some(Bit::Zero));
        assert!(latch.is_error());

        let view = FlipFlopView::of(&latch);
        assert_eq!(view.status, "INVALID STATE!");
        assert_eq!(view.severity, Severity::Error);
    }

    #[test]
    fn test_leaving_invalid_state() {
        let mut latch = SrLatch::new();
        latch.select_s(Bit::One);
        latch.select_r(Bit::One);
        latch.select_r(Bit::Zero);
        assert!(!latch.is_error());
        assert_eq!(latch.state(), CellState::holding(Bit::One));
    }
}

mod jk_flip_flop {
    use super::*;

    #[test]
    fn test_selection_previews_without_changing_outputs() {
        let mut ff = JkFlipFlop::new();
        ff.select_j(Bit::One);
        ff.select_k(Bit::One);
        assert_eq!(ff.status(), "Toggle on next clock");
        assert_eq!(ff.state(), CellState::CLEARED);
    }

    #[test]
    fn test_toggle_alternates_on_each_clock() {
        let mut ff = JkFlipFlop::new();
        ff.select_j(Bit::One);
        ff.select_k(Bit::One);

        ff.clock_pulse();
        assert_eq!(ff.state(), CellState::holding(Bit::One));
        ff.clock_pulse();
        assert_eq!(ff.state(), CellState::holding(Bit::Zero));
        ff.clock_pulse();
        assert_eq!(ff.state(), CellState::holding(Bit::One));
    }

    #[test]
    fn test_set_then_reset() {
        let mut ff = JkFlipFlop::new();
        ff.select_j(Bit::One);
        ff.clock_pulse();
        assert_eq!(ff.outputs().q, Bit::One);

        ff.select_j(Bit::Zero);
        ff.select_k(Bit::One);
        assert_eq!(ff.status(), "Reset on next clock");
        ff.clock_pulse();
        assert_eq!(ff.outputs().q, Bit::Zero);
        assert_eq!(ff.outputs().not_q, Some(Bit::One));
    }
}

mod d_flip_flop {
    use super::*;

    #[test]
    fn test_captures_only_on_clock() {
        let mut ff = DFlipFlop::new();
        ff.select_d(Bit::One);
        assert_eq!(ff.outputs().q, Bit::Zero);
        assert_eq!(ff.status(), "D = 1 - Waiting for clock edge...");

        ff.clock_pulse();
        assert_eq!(ff.state(), CellState::holding(Bit::One));
        assert_eq!(ff.status(), "Captured D = 1 on clock edge!");

        ff.select_d(Bit::Zero);
        assert_eq!(ff.outputs().q, Bit::One);
        ff.clock_pulse();
        assert_eq!(ff.state(), CellState::holding(Bit::Zero));
    }
}

mod t_flip_flop {
    use super::*;

    #[test]
    fn test_has_no_complement_output() {
        let ff = TFlipFlop::new();
        assert_eq!(ff.outputs().not_q, None);
        assert!(FlipFlopView::of(&ff).not_q.is_none());
    }

    #[test]
    fn test_hold_and_toggle() {
        let mut ff = TFlipFlop::new();
        ff.clock_pulse();
        assert_eq!(ff.q(), Bit::Zero);
        assert_eq!(ff.status(), "Hold - Waiting for clock...");

        ff.select_t(Bit::One);
        ff.clock_pulse();
        assert_eq!(ff.q(), Bit::One);
        assert_eq!(ff.status(), "Toggled! Q = 1");
    }
}

mod truth_tables {
    use super::*;

    #[test]
    fn test_every_input_combination_has_a_row() {
        let cases: [(FlipFlopKind, &[&str]); 4] = [
            (FlipFlopKind::Sr, &["00", "01", "10", "11"]),
            (FlipFlopKind::Jk, &["00", "01", "10", "11"]),
            (FlipFlopKind::D, &["0", "1"]),
            (FlipFlopKind::T, &["0", "1"]),
        ];
        for (kind, keys) in cases {
            let table = TruthTable::for_kind(kind);
            assert_eq!(table.rows.len(), keys.len(), "{}", kind);
            for (index, key) in keys.iter().enumerate() {
                assert_eq!(table.row_index(key), Some(index), "{} row {}", kind, key);
            }
        }
    }

    #[test]
    fn test_cell_input_keys_match_table_rows() {
        let mut latch = SrLatch::new();
        latch.select_r(Bit::One);
        let table = TruthTable::for_kind(FlipFlopKind::Sr);
        let row = table.row_index(&latch.input_key()).map(|i| &table.rows[i]);
        assert_eq!(row.map(|r| r.cells[4]), Some("Reset"));
    }
}
