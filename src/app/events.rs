//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to serial, record in a test, etc.

use serde::Serialize;

use crate::comfort::Actuation;
use crate::fsm::Mode;
use crate::identity::{IdentityClass, Uid};
use crate::sensors::SensorSample;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries initial mode).
    Started(Mode),

    /// The FSM transitioned between modes.
    ModeChanged { from: Mode, to: Mode },

    AccessGranted,

    /// Wrong code; `failures` consecutive so far.
    AccessDenied { failures: u8 },

    /// One sensor field was refreshed.
    Sample(SensorSample),

    /// A tag was read and classified.
    IdentityRead { uid: Uid, class: IdentityClass },

    /// The comfort score after a tag read.
    ComfortUpdated { pmv: f32 },

    /// A blocking actuation burst is about to run.
    Actuation(Actuation),

    /// An alarm episode started; `count` since the last login.
    AlarmRaised { count: u8 },

    /// Lockout episode started.
    LockedOut,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryData {
    pub uptime_ms: u64,
    pub mode: Mode,
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub light_level: Option<u16>,
    pub pmv: f32,
    pub failed_attempts: u8,
    pub alarm_count: u8,
}
