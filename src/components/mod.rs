pub mod clock;
pub mod flip_flops;
pub mod registers;
