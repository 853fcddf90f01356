use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use flipflop_lab::config::LabConfig;
use flipflop_lab::console::run_console;
use flipflop_lab::gui::run_gui;
use flipflop_lab::logging::{init_logging, LogConfig};
use flipflop_lab::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Frontend {
    Gui,
    Console,
}

/// Interactive flip-flop trainer.
#[derive(Debug, Parser)]
#[command(name = "flipflop-lab", version, about)]
struct Cli {
    /// Which front-end to start
    #[arg(long, value_enum, default_value_t = Frontend::Gui)]
    frontend: Frontend,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_log_file(cli.log_file.clone()))?;

    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            LabConfig::from_json_file(path)?
        }
        None => LabConfig::default(),
    };

    match cli.frontend {
        Frontend::Gui => run_gui(&config),
        Frontend::Console => {
            if cli.log_file.is_none() {
                info!("console front-end without --log-file, log output may overwrite the screen");
            }
            run_console(&config)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "flipflop-lab failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
