// SPDX-License-Identifier: GPL-3.0-only

//! Vintage Booth - a photobooth-style capture engine
//!
//! This library implements the capture sequencing core of a photobooth:
//! countdown timing, repeated still acquisition, per-photo progress, and the
//! transition between live preview and batch review.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`session`]: Session controller and the capture sequencer state machine
//! - [`backends`]: Frame source abstraction and the synthetic test source
//! - [`pipelines`]: Still capture (filters and PNG encoding)
//! - [`export`]: Batch export to timestamped files
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```no_run
//! use vintage_booth::backends::frame_source::default_source;
//! use vintage_booth::{CaptureConfig, Config, RunEnd, SessionController};
//!
//! # async fn run() -> vintage_booth::BoothResult<()> {
//! let config = Config::default();
//! let mut session = SessionController::new(default_source(), &config);
//! session.enter()?;
//! session.trigger_capture(CaptureConfig::from_defaults(&config))?;
//! if let RunEnd::Completed(_) = session.await_run().await? {
//!     session.export().await?;
//! }
//! session.exit();
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod export;
pub mod pipelines;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use constants::{ShotCount, TimerSetting};
pub use errors::{BoothError, BoothResult};
pub use pipelines::photo::{EncodedStill, FilterType};
pub use session::{CaptureConfig, RunEnd, RunProgress, SessionController, SessionMode};
