// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the session controller
//!
//! All tests run against the synthetic frame source with the tokio clock
//! paused, so countdown-driven runs complete instantly and deterministically.

use std::path::PathBuf;
use std::time::Duration;

use vintage_booth::backends::frame_source::{SyntheticSource, default_source};
use vintage_booth::errors::{AcquisitionError, BoothError, RunError, SessionError};
use vintage_booth::{
    CaptureConfig, Config, FilterType, RunEnd, RunProgress, SessionController, ShotCount,
    TimerSetting,
};

fn test_config() -> Config {
    Config {
        export_dir: Some(std::env::temp_dir().join(format!(
            "vintage-booth-test-{}-{}",
            std::process::id(),
            rand_suffix()
        ))),
        ..Config::default()
    }
}

/// Cheap unique-enough suffix so parallel tests do not share export dirs
fn rand_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

fn capture_config(timer: TimerSetting, shots: ShotCount) -> CaptureConfig {
    CaptureConfig {
        filter: FilterType::Standard,
        timer,
        shots,
    }
}

async fn entered_session(config: &Config) -> SessionController {
    let mut session = SessionController::new(default_source(), config);
    session.enter().expect("enter should succeed");
    session
}

#[tokio::test(start_paused = true)]
async fn test_full_run_completes_with_requested_count() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    session
        .trigger_capture(capture_config(TimerSetting::Off, ShotCount::Two))
        .expect("trigger should succeed");
    let end = session.await_run().await.expect("run should complete");

    assert_eq!(end, RunEnd::Completed(2));
    assert!(session.mode().is_reviewing());
    assert_eq!(session.mode().batch().map(|b| b.len()), Some(2));
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_timed_run_flashes_once_per_photo() {
    let config = test_config();
    let mut session = entered_session(&config).await;
    let flash = session.flash_events();
    assert_eq!(*flash.borrow(), 0);

    session
        .trigger_capture(capture_config(TimerSetting::Three, ShotCount::Three))
        .expect("trigger should succeed");
    let end = session.await_run().await.expect("run should complete");

    assert_eq!(end, RunEnd::Completed(3));
    assert_eq!(*flash.borrow(), 3);
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_trigger_while_active_is_rejected() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    session
        .trigger_capture(capture_config(TimerSetting::Ten, ShotCount::Four))
        .expect("trigger should succeed");

    let second = session.trigger_capture(capture_config(TimerSetting::Off, ShotCount::One));
    assert!(matches!(
        second,
        Err(BoothError::Run(RunError::AlreadyActive))
    ));

    // The original run is unaffected by the rejected trigger
    assert!(session.is_run_active());
    session.abort_run();
    let end = session.await_run().await.expect("abort is not an error");
    assert_eq!(end, RunEnd::Aborted);
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_abort_discards_partial_batch() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    session
        .trigger_capture(capture_config(TimerSetting::Three, ShotCount::Four))
        .expect("trigger should succeed");

    // Let the run get past the first photo, then abort mid-run
    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(session.abort_run());

    let end = session.await_run().await.expect("abort is not an error");
    assert_eq!(end, RunEnd::Aborted);

    // Partial batches are never surfaced for review
    assert!(session.mode().is_live());
    assert!(session.mode().batch().is_none());
    assert_eq!(*session.progress().borrow(), RunProgress::Idle);
    assert!(matches!(
        session.export().await,
        Err(BoothError::Session(SessionError::NotReviewing))
    ));
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_retake_returns_to_live_and_discards_batch() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    session
        .trigger_capture(capture_config(TimerSetting::Off, ShotCount::Four))
        .expect("trigger should succeed");
    session.await_run().await.expect("run should complete");
    assert!(session.mode().is_reviewing());

    session.retake().expect("retake should succeed");
    assert!(session.mode().is_live());
    assert!(session.mode().batch().is_none());

    // Retake is only valid while reviewing
    assert!(matches!(
        session.retake(),
        Err(BoothError::Session(SessionError::NotReviewing))
    ));
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_export_writes_ordered_png_files() {
    let config = test_config();
    let export_dir = config.export_directory();
    let mut session = entered_session(&config).await;

    session
        .trigger_capture(capture_config(TimerSetting::Off, ShotCount::Three))
        .expect("trigger should succeed");
    session.await_run().await.expect("run should complete");

    let paths = session.export().await.expect("export should succeed");
    assert_eq!(paths.len(), 3);

    for (i, path) in paths.iter().enumerate() {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        assert!(
            name.starts_with("vintage-photo-"),
            "Unexpected export name: {}",
            name
        );
        assert!(
            name.ends_with(&format!("-{}.png", i + 1)),
            "Export order not preserved: {}",
            name
        );
        let data = std::fs::read(path).expect("exported file should exist");
        assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
    }

    // Export does not mutate state; the batch stays reviewable
    assert!(session.mode().is_reviewing());

    session.exit();
    let _ = std::fs::remove_dir_all(export_dir);
}

#[tokio::test(start_paused = true)]
async fn test_acquisition_failure_blocks_entry() {
    let config = test_config();
    let source = Box::new(SyntheticSource::failing(AcquisitionError::PermissionDenied));
    let mut session = SessionController::new(source, &config);

    assert!(matches!(
        session.enter(),
        Err(BoothError::Acquisition(AcquisitionError::PermissionDenied))
    ));

    // Without a stream, capture cannot be triggered
    assert!(matches!(
        session.trigger_capture(capture_config(TimerSetting::Off, ShotCount::One)),
        Err(BoothError::Session(SessionError::NotEntered))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_enter_twice_is_rejected() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    assert!(matches!(
        session.enter(),
        Err(BoothError::Session(SessionError::AlreadyEntered))
    ));
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_exit_is_idempotent() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    session.exit();
    // A second exit on a stopped session is a no-op
    session.exit();
    assert!(session.mode().is_live());

    // Exiting mid-run aborts the run and releases the stream
    let mut session = entered_session(&config).await;
    session
        .trigger_capture(capture_config(TimerSetting::Ten, ShotCount::One))
        .expect("trigger should succeed");
    session.exit();
    assert!(!session.is_run_active());
}

#[tokio::test(start_paused = true)]
async fn test_await_without_run_is_an_error() {
    let config = test_config();
    let mut session = entered_session(&config).await;

    assert!(matches!(
        session.await_run().await,
        Err(BoothError::Session(SessionError::NoActiveRun))
    ));
    session.exit();
}

#[tokio::test(start_paused = true)]
async fn test_output_dir_override_is_used() {
    let mut config = test_config();
    let custom: PathBuf = std::env::temp_dir().join(format!(
        "vintage-booth-custom-{}-{}",
        std::process::id(),
        rand_suffix()
    ));
    config.export_dir = Some(custom.clone());

    let mut session = entered_session(&config).await;
    session
        .trigger_capture(capture_config(TimerSetting::Off, ShotCount::One))
        .expect("trigger should succeed");
    session.await_run().await.expect("run should complete");

    let paths = session.export().await.expect("export should succeed");
    assert!(paths[0].starts_with(&custom));

    session.exit();
    let _ = std::fs::remove_dir_all(custom);
}
