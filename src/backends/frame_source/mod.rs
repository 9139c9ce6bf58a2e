// SPDX-License-Identifier: GPL-3.0-only

//! Frame source abstraction
//!
//! A frame source wraps acquisition of the live visual stream behind a small
//! trait so the session controller does not care where frames come from.
//!
//! ```text
//! ┌────────────────────┐
//! │ SessionController  │
//! └─────────┬──────────┘
//!           │ start / stop
//!           ▼
//! ┌────────────────────┐
//! │  FrameSource trait │
//! └─────────┬──────────┘
//!           │
//!           ▼
//!     ┌───────────┐
//!     │ Synthetic │  ← test pattern (a hardware backend slots in here)
//!     └───────────┘
//! ```

pub mod synthetic;
pub mod types;

pub use synthetic::SyntheticSource;
pub use types::*;

use crate::errors::AcquisitionError;

/// Frame source backend trait
///
/// `start` must be called at most once per session entry; the session
/// controller enforces this. Once `start` returns `Ok`, the handle has at
/// least one frame published and stays readable until `StreamHandle::stop`.
pub trait FrameSource: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Begin producing frames for the given stream parameters
    ///
    /// Permission, missing-device, and busy-device failures all surface as
    /// an [`AcquisitionError`]; none are retried automatically.
    fn start(&self, request: &StreamRequest) -> Result<StreamHandle, AcquisitionError>;
}

/// Get the default frame source backend
pub fn default_source() -> Box<dyn FrameSource> {
    Box::new(SyntheticSource::new())
}
