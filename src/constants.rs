// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants and selector values

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of stills in a single capture run
pub const MAX_SHOTS_PER_RUN: u32 = 4;

/// Preferred stream width requested from the frame source
pub const PREFERRED_STREAM_WIDTH: u32 = 1280;

/// Preferred stream height requested from the frame source
pub const PREFERRED_STREAM_HEIGHT: u32 = 720;

/// Interval between countdown ticks
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Filename prefix for exported stills
pub const EXPORT_FILE_PREFIX: &str = "vintage-photo";

/// Countdown timer selector
///
/// The countdown runs before every photo in a run, not only the first, so a
/// multi-photo batch gives the user a consistent per-shot cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerSetting {
    /// No countdown
    #[default]
    Off,
    /// 3 second countdown
    Three,
    /// 5 second countdown
    Five,
    /// 10 second countdown
    Ten,
}

impl TimerSetting {
    /// All selector variants for UI iteration
    pub const ALL: [TimerSetting; 4] = [
        TimerSetting::Off,
        TimerSetting::Three,
        TimerSetting::Five,
        TimerSetting::Ten,
    ];

    /// Countdown duration in seconds (0 = no countdown)
    pub fn seconds(&self) -> u32 {
        match self {
            TimerSetting::Off => 0,
            TimerSetting::Three => 3,
            TimerSetting::Five => 5,
            TimerSetting::Ten => 10,
        }
    }

    /// Get display name for the selector
    pub fn display_name(&self) -> &'static str {
        match self {
            TimerSetting::Off => "Off",
            TimerSetting::Three => "3s",
            TimerSetting::Five => "5s",
            TimerSetting::Ten => "10s",
        }
    }

    /// Cycle to the next setting: Off -> 3s -> 5s -> 10s -> Off
    pub fn next(self) -> Self {
        match self {
            TimerSetting::Off => TimerSetting::Three,
            TimerSetting::Three => TimerSetting::Five,
            TimerSetting::Five => TimerSetting::Ten,
            TimerSetting::Ten => TimerSetting::Off,
        }
    }

    /// Parse a seconds value back into a selector
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        TimerSetting::ALL.into_iter().find(|t| t.seconds() == seconds)
    }
}

/// Photo count selector
///
/// A closed set so an out-of-range count is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShotCount {
    /// Single photo
    #[default]
    One,
    /// Two photos
    Two,
    /// Three photos
    Three,
    /// Four photos
    Four,
}

impl ShotCount {
    /// All selector variants for UI iteration
    pub const ALL: [ShotCount; 4] = [
        ShotCount::One,
        ShotCount::Two,
        ShotCount::Three,
        ShotCount::Four,
    ];

    /// Number of stills this selection captures
    pub fn count(&self) -> u32 {
        match self {
            ShotCount::One => 1,
            ShotCount::Two => 2,
            ShotCount::Three => 3,
            ShotCount::Four => 4,
        }
    }

    /// Get display name for the selector
    pub fn display_name(&self) -> &'static str {
        match self {
            ShotCount::One => "1 photo",
            ShotCount::Two => "2 photos",
            ShotCount::Three => "3 photos",
            ShotCount::Four => "4 photos",
        }
    }

    /// Parse a count back into a selector
    pub fn from_count(count: u32) -> Option<Self> {
        ShotCount::ALL.into_iter().find(|s| s.count() == count)
    }
}
