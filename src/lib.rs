//! # Flip-Flop Lab
//!
//! An interactive trainer for digital-logic flip-flops.
//!
//! This library provides:
//! - SR, JK, D and T flip-flop cells with their transition rules
//! - Master-slave and metastability walkthroughs driven by timed sequences
//! - Counter, shift register and parallel register built from those cells
//! - Truth tables with transient row highlighting
//! - Desktop (egui) and terminal (ratatui) front-ends over one shared workbench

pub mod component;
pub mod components;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod gui;
pub mod logging;
pub mod preferences;
pub mod systems;
pub mod timeline;
pub mod truth_table;
pub mod types;

// Re-export commonly used items for easier importing
pub use component::{CellState, Clocked, FlipFlop, FlipFlopKind, Outputs};
pub use config::LabConfig;
pub use error::{LabError, Result};
pub use preferences::Theme;
pub use systems::{Action, InputLine, Section, Workbench};
pub use types::Bit;
