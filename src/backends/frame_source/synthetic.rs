// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic frame source
//!
//! Produces a moving test pattern at ~30 fps on a tokio task. Used by the
//! headless CLI and the test suite in place of a hardware camera; failure
//! constructors exercise the acquisition error paths.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{LiveFrame, StreamHandle, StreamRequest};
use super::FrameSource;
use crate::errors::AcquisitionError;

/// Interval between published frames (~30 fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Test-pattern frame source
pub struct SyntheticSource {
    failure: Option<AcquisitionError>,
}

impl SyntheticSource {
    /// Source that starts successfully and streams a test pattern
    pub fn new() -> Self {
        Self { failure: None }
    }

    /// Source whose start fails with the given acquisition error
    pub fn failing(error: AcquisitionError) -> Self {
        Self {
            failure: Some(error),
        }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn start(&self, request: &StreamRequest) -> Result<StreamHandle, AcquisitionError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let width = request.ideal_width;
        let height = request.ideal_height;
        let handle = StreamHandle::new();

        // Publish the first frame before returning so the stream is readable
        // as soon as start resolves.
        handle.publish(render_test_pattern(width, height, 0));

        let producer = handle.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(FRAME_INTERVAL);
            let mut sequence = 1u64;
            while producer.is_running() {
                interval.tick().await;
                producer.publish(render_test_pattern(width, height, sequence));
                sequence += 1;
            }
            debug!(frames = sequence, "Synthetic frame producer stopped");
        });

        info!(width, height, facing = ?request.facing, "Synthetic frame source started");
        Ok(handle)
    }
}

/// Render one RGBA test-pattern frame
///
/// A two-axis gradient with a vertical bar that sweeps with the sequence
/// number, so consecutive frames are distinguishable in tests.
fn render_test_pattern(width: u32, height: u32, sequence: u64) -> LiveFrame {
    let mut data = vec![0u8; (width * height * 4) as usize];
    let bar_x = (sequence * 8 % width.max(1) as u64) as u32;

    for y in 0..height {
        for x in 0..width {
            let i = ((y * width + x) * 4) as usize;
            let near_bar = x.abs_diff(bar_x) < 8;
            data[i] = (x * 255 / width.max(1)) as u8;
            data[i + 1] = (y * 255 / height.max(1)) as u8;
            data[i + 2] = if near_bar { 255 } else { 64 };
            data[i + 3] = 255;
        }
    }

    LiveFrame {
        data: Arc::from(data.into_boxed_slice()),
        width,
        height,
        sequence,
    }
}
