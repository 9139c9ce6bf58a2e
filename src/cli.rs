// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for headless booth sessions
//!
//! This module provides command-line functionality for:
//! - Running a full capture session against the synthetic frame source
//! - Listing available filters

use std::path::PathBuf;

use vintage_booth::backends::frame_source::default_source;
use vintage_booth::constants::{ShotCount, TimerSetting};
use vintage_booth::{
    CaptureConfig, Config, FilterType, RunEnd, RunProgress, SessionController,
};

/// List all available filters
pub fn list_filters() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available filters:");
    println!();
    for filter in FilterType::ALL {
        println!("  {}", filter.display_name());
    }
    Ok(())
}

/// Run one capture session: enter, capture, export, exit
pub fn run_capture(
    filter: Option<String>,
    timer: Option<u32>,
    shots: Option<u32>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();
    if output.is_some() {
        config.export_dir = output;
    }

    let capture_config = resolve_capture_config(&config, filter, timer, shots)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let mut session = SessionController::new(default_source(), &config);
        session.enter()?;

        let mut progress = session.progress();
        let printer = tokio::spawn(async move {
            let mut last_countdown = None;
            while progress.changed().await.is_ok() {
                match *progress.borrow_and_update() {
                    RunProgress::CountingDown {
                        photo_index,
                        remaining_seconds,
                    } => {
                        if last_countdown != Some((photo_index, remaining_seconds)) {
                            println!("  Photo {}: {}...", photo_index, remaining_seconds);
                            last_countdown = Some((photo_index, remaining_seconds));
                        }
                    }
                    RunProgress::Capturing { photo_index } => {
                        println!("  *click* photo {}", photo_index);
                    }
                    RunProgress::Complete { .. } | RunProgress::Idle => {}
                }
            }
        });

        println!(
            "Capturing {} with filter {} (timer: {})",
            capture_config.shots.display_name(),
            capture_config.filter.display_name(),
            capture_config.timer.display_name(),
        );

        session.trigger_capture(capture_config)?;
        let end = session.await_run().await?;

        match end {
            RunEnd::Completed(captured) => {
                println!("Captured {} photo(s)", captured);
                let paths = session.export().await?;
                for path in paths {
                    println!("Exported: {}", path.display());
                }
            }
            RunEnd::Aborted => {
                println!("Capture aborted");
            }
        }

        session.exit();
        printer.abort();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Resolve CLI overrides against persisted defaults
fn resolve_capture_config(
    config: &Config,
    filter: Option<String>,
    timer: Option<u32>,
    shots: Option<u32>,
) -> Result<CaptureConfig, Box<dyn std::error::Error>> {
    let mut capture_config = CaptureConfig::from_defaults(config);

    if let Some(name) = filter {
        capture_config.filter = FilterType::from_name(&name).ok_or_else(|| {
            let names: Vec<&str> = FilterType::ALL.iter().map(|f| f.display_name()).collect();
            format!("Unknown filter '{}' (expected one of: {})", name, names.join(", "))
        })?;
    }

    if let Some(seconds) = timer {
        capture_config.timer = TimerSetting::from_seconds(seconds)
            .ok_or_else(|| format!("Invalid timer '{}s' (expected 0, 3, 5, or 10)", seconds))?;
    }

    if let Some(count) = shots {
        capture_config.shots = ShotCount::from_count(count)
            .ok_or_else(|| format!("Invalid photo count '{}' (expected 1-4)", count))?;
    }

    Ok(capture_config)
}
