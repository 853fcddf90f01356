//! # JSON Configuration
//!
//! Timing constants for the simulators and console display options, loaded
//! from an optional JSON file. Every field has a default, so `{}` is a valid
//! configuration and partial files only override what they name.
//!
//! ```json
//! {
//!   "highlight_ms": 1000,
//!   "master_slave_phases_ms": [1500, 1500, 1000],
//!   "metastability_steps": 8,
//!   "metastability_step_ms": 100,
//!   "console": { "refresh_rate_ms": 100, "show_truth_tables": true, "show_help_bar": true },
//!   "preferences_path": null
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::components::clock::master_slave::DEFAULT_PHASES_MS;
use crate::components::clock::metastability::{DEFAULT_STEPS, DEFAULT_STEP_MS};
use crate::console::ConsoleConfig;
use crate::error::Result;
use crate::preferences::default_preferences_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// How long a truth-table row stays lit after it matches.
    pub highlight_ms: u64,
    pub master_slave_phases_ms: [u64; 3],
    pub metastability_steps: usize,
    pub metastability_step_ms: u64,
    pub console: ConsoleConfig,
    /// Overrides the console preference file location.
    pub preferences_path: Option<PathBuf>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            highlight_ms: 1000,
            master_slave_phases_ms: DEFAULT_PHASES_MS,
            metastability_steps: DEFAULT_STEPS,
            metastability_step_ms: DEFAULT_STEP_MS,
            console: ConsoleConfig::default(),
            preferences_path: None,
        }
    }
}

impl LabConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn highlight_interval(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn master_slave_phases(&self) -> [Duration; 3] {
        self.master_slave_phases_ms.map(Duration::from_millis)
    }

    pub fn metastability_step(&self) -> Duration {
        Duration::from_millis(self.metastability_step_ms)
    }

    /// The configured preference file, else the platform default.
    pub fn resolved_preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path.clone().or_else(default_preferences_path)
    }
}
