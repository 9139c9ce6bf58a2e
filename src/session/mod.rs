// SPDX-License-Identifier: GPL-3.0-only

//! Capture session control
//!
//! The session controller owns the overall mode (live preview vs. reviewing
//! a captured batch), the frame stream lifecycle, and the capture run. It
//! never mutates sequencing state directly: a run is a spawned task driving
//! the sequencer, observed through watch channels and stopped through a
//! one-shot abort signal.

pub mod sequencer;
pub mod state;

pub use sequencer::{RunPhase, Sequencer};
pub use state::{CaptureConfig, RunProgress, SessionMode};

use std::path::PathBuf;
use tokio::sync::{oneshot, watch};
use tracing::{info, warn};

use crate::backends::frame_source::{FrameSource, StreamHandle, StreamRequest};
use crate::config::Config;
use crate::errors::{BoothError, BoothResult, RunError, SessionError};
use crate::export;
use sequencer::{RunOutcome, drive_run};

/// How an awaited capture run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// The run completed; the session is now reviewing this many stills
    Completed(usize),
    /// The run was aborted; nothing was kept
    Aborted,
}

/// Active run bookkeeping
enum ActiveRun {
    None,
    Running {
        abort: Option<oneshot::Sender<()>>,
        outcome: oneshot::Receiver<RunOutcome>,
    },
}

/// Owns the capture session: mode, frame stream, and the active run
pub struct SessionController {
    source: Box<dyn FrameSource>,
    stream: Option<StreamHandle>,
    mode: SessionMode,
    run: ActiveRun,
    mirror: bool,
    export_dir: PathBuf,
    progress_tx: watch::Sender<RunProgress>,
    flash_tx: watch::Sender<u64>,
}

impl SessionController {
    /// Create a controller over the given frame source
    pub fn new(source: Box<dyn FrameSource>, config: &Config) -> Self {
        let (progress_tx, _) = watch::channel(RunProgress::Idle);
        let (flash_tx, _) = watch::channel(0u64);
        Self {
            source,
            stream: None,
            mode: SessionMode::Live,
            run: ActiveRun::None,
            mirror: config.mirror_preview,
            export_dir: config.export_directory(),
            progress_tx,
            flash_tx,
        }
    }

    /// Current session mode
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Whether a capture run is in progress
    pub fn is_run_active(&self) -> bool {
        matches!(self.run, ActiveRun::Running { .. })
    }

    /// Subscribe to run progress for display
    pub fn progress(&self) -> watch::Receiver<RunProgress> {
        self.progress_tx.subscribe()
    }

    /// Subscribe to the flash counter
    ///
    /// Bumped once per captured still. Cosmetic; safe to ignore.
    pub fn flash_events(&self) -> watch::Receiver<u64> {
        self.flash_tx.subscribe()
    }

    /// Enter the capture screen: start the frame stream
    ///
    /// May be called once per session. An acquisition failure is
    /// non-retriable here; the user fixes the condition externally and
    /// re-enters.
    pub fn enter(&mut self) -> BoothResult<()> {
        if self.stream.is_some() {
            return Err(SessionError::AlreadyEntered.into());
        }

        let handle = self.source.start(&StreamRequest::default())?;
        info!(backend = self.source.name(), "Frame stream started");
        self.stream = Some(handle);
        self.mode = SessionMode::Live;
        Ok(())
    }

    /// Start a capture run with the given configuration
    ///
    /// Selector values are snapshotted in `config`; changing them afterwards
    /// does not affect the run. Rejected while another run is active.
    pub fn trigger_capture(&mut self, config: CaptureConfig) -> BoothResult<()> {
        if self.is_run_active() {
            return Err(RunError::AlreadyActive.into());
        }
        let Some(stream) = self.stream.clone() else {
            return Err(SessionError::NotEntered.into());
        };

        let (abort_tx, abort_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let progress = self.progress_tx.clone();
        let flash = self.flash_tx.clone();
        let mirror = self.mirror;

        tokio::spawn(async move {
            let outcome = drive_run(config, stream, mirror, progress, flash, abort_rx).await;
            let _ = done_tx.send(outcome);
        });

        self.run = ActiveRun::Running {
            abort: Some(abort_tx),
            outcome: done_rx,
        };
        Ok(())
    }

    /// Wait for the active run to end and apply the mode transition
    ///
    /// On completion the session moves to `Reviewing` with the batch; an
    /// aborted run leaves it in `Live`. A failed run also stays `Live` so
    /// the user can re-trigger, and the error is returned.
    pub async fn await_run(&mut self) -> BoothResult<RunEnd> {
        let ActiveRun::Running { outcome, .. } = &mut self.run else {
            return Err(SessionError::NoActiveRun.into());
        };

        let outcome = outcome
            .await
            .map_err(|_| BoothError::Other("Capture run task dropped".into()));
        self.run = ActiveRun::None;

        match outcome? {
            RunOutcome::Completed(batch) => {
                let captured = batch.len();
                self.on_run_complete(batch);
                Ok(RunEnd::Completed(captured))
            }
            RunOutcome::Aborted => {
                self.progress_tx.send_replace(RunProgress::Idle);
                Ok(RunEnd::Aborted)
            }
            RunOutcome::Failed(error) => {
                warn!(%error, "Capture run failed");
                self.progress_tx.send_replace(RunProgress::Idle);
                Err(error)
            }
        }
    }

    /// Signal the active run to abort
    ///
    /// Returns whether a run was signalled. The abort takes effect at the
    /// run's next suspension point; `await_run` reports `Aborted`.
    pub fn abort_run(&mut self) -> bool {
        let ActiveRun::Running { abort, .. } = &mut self.run else {
            return false;
        };
        match abort.take() {
            Some(sender) => {
                info!("Aborting capture run");
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }

    fn on_run_complete(&mut self, batch: Vec<crate::pipelines::photo::EncodedStill>) {
        info!(captured = batch.len(), "Reviewing captured batch");
        self.mode = SessionMode::Reviewing { batch };
    }

    /// Discard the reviewed batch and return to live preview
    pub fn retake(&mut self) -> BoothResult<()> {
        if !self.mode.is_reviewing() {
            return Err(SessionError::NotReviewing.into());
        }
        self.mode.to_live();
        self.progress_tx.send_replace(RunProgress::Idle);
        info!("Batch discarded, back to live preview");
        Ok(())
    }

    /// Export the reviewed batch, one file per still in capture order
    ///
    /// Does not mutate session state; the batch stays reviewable.
    pub async fn export(&self) -> BoothResult<Vec<PathBuf>> {
        let Some(batch) = self.mode.batch() else {
            return Err(SessionError::NotReviewing.into());
        };
        export::export_batch(batch, &self.export_dir).await
    }

    /// Leave the capture screen
    ///
    /// Aborts any active run, stops the frame stream (idempotent), and
    /// discards session state. Safe to call more than once.
    pub fn exit(&mut self) {
        self.abort_run();
        self.run = ActiveRun::None;
        if let Some(stream) = self.stream.take() {
            stream.stop();
        }
        self.mode = SessionMode::Live;
        self.progress_tx.send_replace(RunProgress::Idle);
        info!("Session exited");
    }
}
