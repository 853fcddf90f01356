pub mod counter;
pub mod parallel_register;
pub mod shift_register;

pub use counter::{Counter, COUNTER_BITS};
pub use parallel_register::{ParallelRegister, PARALLEL_REGISTER_BITS};
pub use shift_register::{ShiftRegister, SHIFT_REGISTER_BITS};
