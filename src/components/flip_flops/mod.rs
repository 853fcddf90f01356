pub mod d_flip_flop;
pub mod jk_flip_flop;
pub mod sr_latch;
pub mod t_flip_flop;

pub use d_flip_flop::{d_next, DFlipFlop};
pub use jk_flip_flop::{jk_next, JkAction, JkFlipFlop};
pub use sr_latch::{sr_next, SrAction, SrLatch};
pub use t_flip_flop::{t_next, TFlipFlop};
