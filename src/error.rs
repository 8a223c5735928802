//! Error types for the comfort controller.
//!
//! Every variant is `Copy` so errors can be passed through the poller and
//! state handlers without allocation.  None of them is fatal: the control
//! loop maps each one onto a recovery path.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Why a temperature/humidity read produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer the start pulse.
    NoResponse,
    /// The frame arrived but its checksum did not match.
    ChecksumMismatch,
    /// The driver returned a non-finite value.
    NotANumber,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResponse => write!(f, "sensor did not respond"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::NotANumber => write!(f, "reading is not a number"),
        }
    }
}

impl core::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`SystemConfig::validate`](crate::config::SystemConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation; the message names it.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl core::error::Error for ConfigError {}
