// SPDX-License-Identifier: GPL-3.0-only

//! Session state types

use crate::config::Config;
use crate::constants::{ShotCount, TimerSetting};
use crate::pipelines::photo::{EncodedStill, FilterType};

/// Immutable configuration for one capture run
///
/// Snapshotted from the selectors at the moment capture is triggered; later
/// selector changes do not affect a run in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Filter composited into each still
    pub filter: FilterType,
    /// Countdown applied before every photo in the run
    pub timer: TimerSetting,
    /// Number of stills to acquire
    pub shots: ShotCount,
}

impl CaptureConfig {
    /// Build a run configuration from persisted defaults
    pub fn from_defaults(config: &Config) -> Self {
        Self {
            filter: config.default_filter,
            timer: config.default_timer,
            shots: config.default_shots,
        }
    }
}

/// Observable progress of the active capture run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunProgress {
    /// No run active
    #[default]
    Idle,
    /// Counting down before `photo_index`
    CountingDown {
        /// 1-based index of the photo being counted down to
        photo_index: u32,
        /// Seconds left before the capture fires
        remaining_seconds: u32,
    },
    /// Acquiring photo `photo_index`
    Capturing {
        /// 1-based index of the photo being acquired
        photo_index: u32,
    },
    /// The run finished with `captured` stills
    Complete {
        captured: u32,
    },
}

/// Overall session mode
///
/// `Reviewing` holds the finalized batch from the last completed run;
/// transitioning back to `Live` discards it.
#[derive(Debug, Default)]
pub enum SessionMode {
    /// Live preview, ready to capture
    #[default]
    Live,
    /// Reviewing a captured batch
    Reviewing {
        /// Ordered stills from the completed run
        batch: Vec<EncodedStill>,
    },
}

impl SessionMode {
    /// Check if the session is in live preview
    pub fn is_live(&self) -> bool {
        matches!(self, SessionMode::Live)
    }

    /// Check if the session is reviewing a batch
    pub fn is_reviewing(&self) -> bool {
        matches!(self, SessionMode::Reviewing { .. })
    }

    /// The reviewed batch, if any
    pub fn batch(&self) -> Option<&[EncodedStill]> {
        match self {
            SessionMode::Live => None,
            SessionMode::Reviewing { batch } => Some(batch),
        }
    }

    /// Return to live preview, discarding any reviewed batch
    pub fn to_live(&mut self) -> Self {
        std::mem::replace(self, SessionMode::Live)
    }
}
