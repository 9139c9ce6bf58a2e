// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "vintage-booth")]
#[command(about = "Photobooth-style capture sessions from the terminal")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a capture session and export the batch
    Capture {
        /// Filter to composite into each still (see 'vintage-booth filters')
        #[arg(short, long)]
        filter: Option<String>,

        /// Countdown seconds before each photo (0, 3, 5, or 10)
        #[arg(short, long)]
        timer: Option<u32>,

        /// Number of photos to capture (1-4)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Output directory (default: ~/Pictures/vintage-booth)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List available filters
    Filters,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=vintage_booth=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Capture {
            filter,
            timer,
            shots,
            output,
        }) => cli::run_capture(filter, timer, shots, output),
        Some(Commands::Filters) => cli::list_filters(),
        None => cli::run_capture(None, None, None, None),
    }
}
