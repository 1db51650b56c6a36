//! Camera device readiness gate.
//!
//! Video capture devices report usability through several overlapping
//! callbacks (metadata loaded, can play, playing) that fire in
//! device-dependent order. [`ReadinessGate`] collapses them into one signal
//! with a bounded wait: the first event flips the gate to ready, and once
//! the deadline passes without one, [`DeviceStatus::TimedOut`] tells the UI
//! to offer the manual override control.

use thiserror::Error;
use web_time::{Duration, Instant};

/// Readiness callbacks forwarded by the host capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyEvent {
    /// Stream metadata (dimensions, formats) became available.
    MetadataLoaded,
    /// The device reported it can start delivering frames.
    CanPlay,
    /// Frames are flowing.
    Playing,
    /// The user pressed the manual override control.
    ManualOverride,
}

/// Where the gate currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Still waiting for a readiness event.
    Pending,
    /// The device is usable.
    Ready,
    /// The deadline passed without an event; offer the manual override.
    TimedOut,
}

/// Single-signal readiness gate with a bounded wait.
///
/// Any event makes the gate ready, even after the deadline — a camera that
/// comes up late is still a camera. The timeout only governs what
/// [`status`](Self::status) reports while no event has arrived.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    deadline: Instant,
    ready: bool,
}

impl ReadinessGate {
    /// Default bounded wait before the UI offers the manual override.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

    /// Start the gate now with the given timeout.
    pub fn new(timeout: Duration) -> Self {
        Self::with_start(timeout, Instant::now())
    }

    /// Start the gate at an explicit instant (injectable for tests).
    pub fn with_start(timeout: Duration, start: Instant) -> Self {
        Self {
            deadline: start + timeout,
            ready: false,
        }
    }

    /// Record a readiness event at `now`.
    pub fn observe(&mut self, event: ReadyEvent, now: Instant) {
        if !self.ready && now > self.deadline && event != ReadyEvent::ManualOverride {
            log::debug!("late readiness event {event:?} after deadline");
        }
        self.ready = true;
    }

    /// Check whether any readiness event has arrived.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Report the gate's status as of `now`.
    pub fn status(&self, now: Instant) -> DeviceStatus {
        if self.ready {
            DeviceStatus::Ready
        } else if now > self.deadline {
            DeviceStatus::TimedOut
        } else {
            DeviceStatus::Pending
        }
    }
}

/// Capture failures reported by the host pipeline. All are surfaced to the
/// user as retryable prompts and never reach the placement core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("camera permission was denied")]
    PermissionDenied,
    #[error("no supported capture device is available")]
    UnsupportedDevice,
    #[error("camera capture requires a secure (https) context")]
    InsecureContext,
}

impl CaptureError {
    /// The prompt shown alongside the retry control.
    pub fn user_prompt(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => {
                "Allow camera access in your browser, then try again."
            }
            CaptureError::UnsupportedDevice => {
                "No camera was found. Connect one and try again."
            }
            CaptureError::InsecureContext => {
                "Open the app over https to use the camera, then try again."
            }
        }
    }
}
