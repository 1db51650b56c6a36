//! Quiltboard Capture Support
//!
//! The camera pipeline is owned by the host UI; this crate supplies the
//! pieces the placement core must never touch: a single "device ready"
//! signal distilled from the browser's overlapping media callbacks, and the
//! retryable error taxonomy surfaced to the user when capture fails.

pub mod readiness;

pub use readiness::{CaptureError, DeviceStatus, ReadinessGate, ReadyEvent};
