//! Logging setup with `tracing` and `tracing-subscriber`.
//!
//! Verbosity maps to: 0 = warn, 1 = info, 2 = debug, 3+ = trace. `RUST_LOG`
//! takes precedence when set. The console front-end draws over the whole
//! terminal, so it should be paired with a log file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::error::{LabError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// When set, logs are appended to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            log_file: None,
        }
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_verbosity(0)
    }
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(true);

    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| LabError::Logging(e.to_string()))
}
