// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for frame source backends

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::constants::{PREFERRED_STREAM_HEIGHT, PREFERRED_STREAM_WIDTH};

/// A single frame of the live stream
///
/// Pixel data is RGBA and shared behind an `Arc`; the producer publishes a
/// fresh allocation per frame, so a held `LiveFrame` is a stable snapshot of
/// the stream at its capture instant.
#[derive(Clone)]
pub struct LiveFrame {
    /// RGBA pixel data, `width * height * 4` bytes
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
    /// Monotonic frame counter within one stream
    pub sequence: u64,
}

impl std::fmt::Debug for LiveFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LiveFrame(#{} {}x{}, {} bytes)",
            self.sequence,
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Camera orientation hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Front-facing / selfie camera
    #[default]
    Front,
    /// Rear-facing camera
    Rear,
}

/// Stream parameters requested from a frame source
///
/// The resolution is an ideal, not a constraint; backends may deliver the
/// closest mode they support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing: Facing,
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self {
            ideal_width: PREFERRED_STREAM_WIDTH,
            ideal_height: PREFERRED_STREAM_HEIGHT,
            facing: Facing::Front,
        }
    }
}

/// Shared state between a stream handle and its frame producer
struct StreamShared {
    latest: Mutex<Option<LiveFrame>>,
    running: AtomicBool,
}

/// Handle to a started frame stream
///
/// Cheap to clone; all clones observe the same latest-frame slot. `stop` is
/// idempotent and may be called on a handle whose producer already exited.
#[derive(Clone)]
pub struct StreamHandle {
    shared: Arc<StreamShared>,
}

impl StreamHandle {
    /// Create a handle with an empty frame slot, in the running state
    pub fn new() -> Self {
        Self {
            shared: Arc::new(StreamShared {
                latest: Mutex::new(None),
                running: AtomicBool::new(true),
            }),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<LiveFrame>> {
        match self.shared.latest.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Most recently published frame, if the stream is still running
    pub fn latest_frame(&self) -> Option<LiveFrame> {
        self.slot().clone()
    }

    /// Whether the producer should keep publishing
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Stop the stream and release the held frame
    ///
    /// Safe to call repeatedly or on a never-started producer.
    pub fn stop(&self) {
        let was_running = self.shared.running.swap(false, Ordering::AcqRel);
        self.slot().take();
        if was_running {
            debug!("Frame stream stopped");
        } else {
            debug!("Frame stream stop on already-stopped handle");
        }
    }

    /// Publish a new frame into the shared slot
    ///
    /// Frames published after `stop` are dropped.
    pub(crate) fn publish(&self, frame: LiveFrame) {
        if !self.is_running() {
            return;
        }
        *self.slot() = Some(frame);
    }
}

impl Default for StreamHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(sequence: u64) -> LiveFrame {
        LiveFrame {
            data: Arc::from(vec![0u8; 16].into_boxed_slice()),
            width: 2,
            height: 2,
            sequence,
        }
    }

    #[test]
    fn test_publish_and_read_latest() {
        let handle = StreamHandle::new();
        assert!(handle.latest_frame().is_none());
        handle.publish(frame(1));
        handle.publish(frame(2));
        assert_eq!(handle.latest_frame().map(|f| f.sequence), Some(2));
    }

    #[test]
    fn test_stop_is_idempotent_and_releases_frame() {
        let handle = StreamHandle::new();
        handle.publish(frame(1));
        handle.stop();
        assert!(!handle.is_running());
        assert!(handle.latest_frame().is_none());
        // Second stop must not error or change the released state
        handle.stop();
        assert!(!handle.is_running());
        assert!(handle.latest_frame().is_none());
    }

    #[test]
    fn test_publish_after_stop_is_dropped() {
        let handle = StreamHandle::new();
        handle.stop();
        handle.publish(frame(1));
        assert!(handle.latest_frame().is_none());
    }
}
