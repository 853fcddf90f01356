pub mod sections;
pub mod workbench;

pub use sections::Section;
pub use workbench::{Action, InputLine, Workbench};
