// SPDX-License-Identifier: GPL-3.0-only

//! Capture sequencer
//!
//! The state machine that coordinates countdown timing, repeated frame
//! acquisition, and batch assembly:
//!
//! ```text
//! Idle ─begin─▶ CountingDown ─tick(0)─▶ Capturing ─record─▶ Complete
//!                    ▲                      │
//!                    └──────── next photo ──┘
//! ```
//!
//! `Sequencer` itself is pure: it owns the phase and the accumulated results
//! and advances only through the methods below, so every invariant is
//! testable without timers. [`drive_run`] supplies the one-second ticks, the
//! capture calls, and the abort path on top of it.

use tokio::sync::{oneshot, watch};
use tracing::{info, warn};

use crate::backends::frame_source::StreamHandle;
use crate::constants::COUNTDOWN_TICK;
use crate::errors::{BoothError, CaptureError, RunError};
use crate::pipelines::photo::{self, EncodedStill};
use crate::session::state::{CaptureConfig, RunProgress};

/// Phase of the capture sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    /// No run active
    #[default]
    Idle,
    /// Counting down before `photo_index`
    CountingDown {
        remaining_seconds: u32,
        photo_index: u32,
    },
    /// Acquiring photo `photo_index`
    Capturing { photo_index: u32 },
    /// All requested stills acquired; batch ready to hand over
    Complete,
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAdvance {
    /// Countdown continues with this many seconds left
    Counting { remaining_seconds: u32 },
    /// The tick reached zero; the phase is now `Capturing`
    ///
    /// Reaching zero and entering capture happen in the same tick, so no
    /// consumer observes a zero countdown persisting across a tick boundary.
    BeginCapture { photo_index: u32 },
    /// Tick received outside `CountingDown`; state unchanged
    Ignored,
}

/// Result of recording a captured still
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAdvance {
    /// Countdown restarts for the next photo
    NextCountdown { photo_index: u32 },
    /// Next capture follows immediately (no timer configured)
    NextCapture { photo_index: u32 },
    /// All requested stills acquired
    RunComplete,
    /// Capture recorded outside `Capturing`; state unchanged
    Ignored,
}

/// The capture sequencer state machine
#[derive(Default)]
pub struct Sequencer {
    phase: RunPhase,
    config: Option<CaptureConfig>,
    results: Vec<EncodedStill>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Check if no run is active
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, RunPhase::Idle)
    }

    /// Number of stills captured so far in the active run
    pub fn captured_count(&self) -> usize {
        self.results.len()
    }

    /// Start a run with the given configuration
    ///
    /// With a timer configured the run enters `CountingDown` for photo 1;
    /// otherwise it skips directly to `Capturing`.
    pub fn begin(&mut self, config: CaptureConfig) -> Result<(), RunError> {
        if !self.is_idle() {
            warn!(phase = ?self.phase, "Rejected capture trigger: run already active");
            return Err(RunError::AlreadyActive);
        }

        let timer_seconds = config.timer.seconds();
        self.phase = if timer_seconds > 0 {
            RunPhase::CountingDown {
                remaining_seconds: timer_seconds,
                photo_index: 1,
            }
        } else {
            RunPhase::Capturing { photo_index: 1 }
        };
        self.config = Some(config);
        self.results.clear();
        Ok(())
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickAdvance {
        let RunPhase::CountingDown {
            remaining_seconds,
            photo_index,
        } = self.phase
        else {
            warn!(phase = ?self.phase, "Countdown tick outside CountingDown");
            return TickAdvance::Ignored;
        };

        let remaining = remaining_seconds - 1;
        if remaining == 0 {
            self.phase = RunPhase::Capturing { photo_index };
            TickAdvance::BeginCapture { photo_index }
        } else {
            self.phase = RunPhase::CountingDown {
                remaining_seconds: remaining,
                photo_index,
            };
            TickAdvance::Counting {
                remaining_seconds: remaining,
            }
        }
    }

    /// Append a captured still and advance to the next photo or completion
    pub fn record_capture(&mut self, still: EncodedStill) -> CaptureAdvance {
        let RunPhase::Capturing { photo_index } = self.phase else {
            warn!(phase = ?self.phase, "Capture recorded outside Capturing");
            return CaptureAdvance::Ignored;
        };
        let Some(config) = self.config else {
            return CaptureAdvance::Ignored;
        };

        self.results.push(still);

        let next_index = photo_index + 1;
        if next_index > config.shots.count() {
            self.phase = RunPhase::Complete;
            return CaptureAdvance::RunComplete;
        }

        let timer_seconds = config.timer.seconds();
        if timer_seconds > 0 {
            self.phase = RunPhase::CountingDown {
                remaining_seconds: timer_seconds,
                photo_index: next_index,
            };
            CaptureAdvance::NextCountdown {
                photo_index: next_index,
            }
        } else {
            self.phase = RunPhase::Capturing {
                photo_index: next_index,
            };
            CaptureAdvance::NextCapture {
                photo_index: next_index,
            }
        }
    }

    /// Abort the run, discarding any partial results
    pub fn abort(&mut self) {
        if !self.is_idle() {
            info!(captured = self.results.len(), "Capture run aborted");
        }
        self.phase = RunPhase::Idle;
        self.config = None;
        self.results.clear();
    }

    /// Hand over the finished batch and reset to idle
    ///
    /// Returns `None` unless the run is `Complete`.
    pub fn take_batch(&mut self) -> Option<Vec<EncodedStill>> {
        if !matches!(self.phase, RunPhase::Complete) {
            return None;
        }
        self.phase = RunPhase::Idle;
        self.config = None;
        Some(std::mem::take(&mut self.results))
    }
}

/// How a driven run ended
#[derive(Debug)]
pub(crate) enum RunOutcome {
    /// All requested stills captured, in order
    Completed(Vec<EncodedStill>),
    /// Aborted by the session controller; partial results discarded
    Aborted,
    /// A capture failed; partial results discarded
    Failed(BoothError),
}

/// Drive one capture run to completion
///
/// Supplies the cancellable one-second ticks and the capture invocations on
/// top of the pure state machine. The abort channel is raced against every
/// suspension point, so no stray tick fires after an abort. Captures never
/// overlap: the next step is not issued until the previous still has been
/// recorded.
pub(crate) async fn drive_run(
    config: CaptureConfig,
    stream: StreamHandle,
    mirror: bool,
    progress: watch::Sender<RunProgress>,
    flash: watch::Sender<u64>,
    mut abort: oneshot::Receiver<()>,
) -> RunOutcome {
    let mut sequencer = Sequencer::new();
    if let Err(e) = sequencer.begin(config) {
        return RunOutcome::Failed(e.into());
    }

    info!(
        filter = config.filter.display_name(),
        timer_seconds = config.timer.seconds(),
        shots = config.shots.count(),
        "Capture run started"
    );

    loop {
        match sequencer.phase() {
            RunPhase::CountingDown {
                remaining_seconds,
                photo_index,
            } => {
                progress.send_replace(RunProgress::CountingDown {
                    photo_index,
                    remaining_seconds,
                });
                tokio::select! {
                    _ = &mut abort => {
                        sequencer.abort();
                        return RunOutcome::Aborted;
                    }
                    _ = tokio::time::sleep(COUNTDOWN_TICK) => {
                        sequencer.tick();
                    }
                }
            }
            RunPhase::Capturing { photo_index } => {
                progress.send_replace(RunProgress::Capturing { photo_index });

                let Some(frame) = stream.latest_frame() else {
                    sequencer.abort();
                    return RunOutcome::Failed(CaptureError::Unavailable.into());
                };

                let still = tokio::select! {
                    _ = &mut abort => {
                        sequencer.abort();
                        return RunOutcome::Aborted;
                    }
                    result = photo::capture_still(frame, config.filter, mirror) => {
                        match result {
                            Ok(still) => still,
                            Err(e) => {
                                sequencer.abort();
                                return RunOutcome::Failed(e.into());
                            }
                        }
                    }
                };

                flash.send_modify(|count| *count += 1);
                sequencer.record_capture(still);
            }
            RunPhase::Complete => {
                let batch = sequencer.take_batch().unwrap_or_default();
                progress.send_replace(RunProgress::Complete {
                    captured: batch.len() as u32,
                });
                info!(captured = batch.len(), "Capture run complete");
                return RunOutcome::Completed(batch);
            }
            RunPhase::Idle => {
                // begin() succeeded above, so the machine cannot be idle here
                return RunOutcome::Aborted;
            }
        }
    }
}
