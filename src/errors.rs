// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the booth engine

use std::fmt;

/// Result type alias using BoothError
pub type BoothResult<T> = Result<T, BoothError>;

/// Main error type
#[derive(Debug, Clone)]
pub enum BoothError {
    /// Frame stream could not be started
    Acquisition(AcquisitionError),
    /// Capture run sequencing errors
    Run(RunError),
    /// Still capture errors
    Capture(CaptureError),
    /// Session lifecycle precondition violations
    Session(SessionError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Errors starting the live frame stream
///
/// All variants are non-retriable within the session: the user fixes the
/// condition externally (grants permission, connects a device) and re-enters.
#[derive(Debug, Clone)]
pub enum AcquisitionError {
    /// Access to the video device was denied
    PermissionDenied,
    /// No video device found
    NoDeviceFound,
    /// The device is in use by another consumer
    DeviceBusy,
    /// Backend-specific failure
    Backend(String),
}

/// Capture run sequencing errors
#[derive(Debug, Clone)]
pub enum RunError {
    /// A capture run is already in progress
    AlreadyActive,
}

/// Still capture errors
///
/// Fatal to the attempt: the run aborts, partial results are discarded, and
/// the sequencer returns to idle.
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// The frame stream is not attached or has no frame yet
    Unavailable,
    /// Encoding the still failed
    EncodingFailed(String),
}

/// Session lifecycle precondition violations
#[derive(Debug, Clone)]
pub enum SessionError {
    /// The frame stream was already started for this session
    AlreadyEntered,
    /// The session has not been entered (no frame stream)
    NotEntered,
    /// The operation is only valid while reviewing a captured batch
    NotReviewing,
    /// There is no capture run to wait on
    NoActiveRun,
}

impl fmt::Display for BoothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoothError::Acquisition(e) => write!(f, "Acquisition error: {}", e),
            BoothError::Run(e) => write!(f, "Run error: {}", e),
            BoothError::Capture(e) => write!(f, "Capture error: {}", e),
            BoothError::Session(e) => write!(f, "Session error: {}", e),
            BoothError::Config(msg) => write!(f, "Configuration error: {}", msg),
            BoothError::Storage(msg) => write!(f, "Storage error: {}", msg),
            BoothError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionError::PermissionDenied => write!(f, "Camera access denied"),
            AcquisitionError::NoDeviceFound => write!(f, "No camera devices found"),
            AcquisitionError::DeviceBusy => write!(f, "Camera is busy"),
            AcquisitionError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::AlreadyActive => write!(f, "A capture run is already in progress"),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Unavailable => write!(f, "No frame available for capture"),
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyEntered => write!(f, "Frame stream already started"),
            SessionError::NotEntered => write!(f, "Session not entered"),
            SessionError::NotReviewing => write!(f, "No captured batch to review"),
            SessionError::NoActiveRun => write!(f, "No capture run in progress"),
        }
    }
}

impl std::error::Error for BoothError {}
impl std::error::Error for AcquisitionError {}
impl std::error::Error for RunError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for SessionError {}

// Conversions from sub-errors to BoothError
impl From<AcquisitionError> for BoothError {
    fn from(err: AcquisitionError) -> Self {
        BoothError::Acquisition(err)
    }
}

impl From<RunError> for BoothError {
    fn from(err: RunError) -> Self {
        BoothError::Run(err)
    }
}

impl From<CaptureError> for BoothError {
    fn from(err: CaptureError) -> Self {
        BoothError::Capture(err)
    }
}

impl From<SessionError> for BoothError {
    fn from(err: SessionError) -> Self {
        BoothError::Session(err)
    }
}

// Conversion for I/O errors
impl From<std::io::Error> for BoothError {
    fn from(err: std::io::Error) -> Self {
        BoothError::Storage(err.to_string())
    }
}
