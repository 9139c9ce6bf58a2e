// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstractions
//!
//! The only backend family here is the frame source. It owns the live stream
//! handle for the session's duration; everything else reads frame content
//! through [`frame_source::StreamHandle::latest_frame`].

pub mod frame_source;
