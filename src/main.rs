//! wsi-convert - Convert whole-slide images to pyramidal SVS-style TIFF.
//!
//! This binary parses the command line, configures logging, and runs one
//! conversion to completion. Exit code 0 on success; any fatal error from
//! the pipeline prints a diagnostic and exits non-zero.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wsi_convert::{
    config::{Cli, Command, ImageConfig, SziConfig},
    convert_image, convert_szi,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Szi(config) => run_szi(config),
        Command::Image(config) => run_image(config),
    }
}

// =============================================================================
// Szi Command
// =============================================================================

fn run_szi(config: SziConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Converting SZI archive {} -> {}",
        config.input.display(),
        config.output.display(),
    );

    match convert_szi(&config.input, &config.output) {
        Ok(()) => {
            info!("Conversion completed: {}", config.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Image Command
// =============================================================================

fn run_image(config: ImageConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Converting image {} -> {}",
        config.input.display(),
        config.output.display(),
    );

    match convert_image(&config.input, &config.output) {
        Ok(()) => {
            info!("Conversion completed: {}", config.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "wsi_convert=debug"
    } else {
        "wsi_convert=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
