//! Honeypot segment generator
//!
//! Cuts a random segment out of each input video and injects a defect into it
//! so downstream QA detectors have something to find.
//!
//! # Usage
//!
//! ```bash
//! honeypot -d 60 -skip_desync movie.mov
//! honeypot --seed 7 --dry-run a.mp4 b.mkv
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use honeypot_cli::cli::{normalize_args, Cli};
use honeypot_cli::utils::{init_logging, LoggingConfig};
use honeypot_cli::{AppContainer, RunSettings};

/// Main entry point for the honeypot CLI
fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if cli.files.is_empty() {
        Cli::command()
            .print_help()
            .context("Failed to print usage")?;
    }

    // Settings are validated before any file is touched.
    let settings = RunSettings::resolve(&cli)?;

    init_logging(&LoggingConfig::new(
        settings.log_level.clone(),
        settings.log_format,
    ));

    if cli.files.is_empty() {
        return Ok(());
    }

    info!("Starting honeypot segment generator");

    let container = AppContainer::new(&settings);
    let mut interactor = container.honeypot_interactor(settings);
    let report = interactor.run(&cli.files)?;

    for output in report.outputs() {
        info!(output = %output.display(), "Created");
    }
    Ok(())
}
