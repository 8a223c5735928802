//! System configuration parameters
//!
//! Every tunable constant of the comfort controller lives here: the
//! access code, the two reference tags, sampling cadences, actuation
//! dwells, episode windows and decision thresholds.  Values are fixed at
//! build time; there is no runtime reconfiguration path.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::identity::Uid;

/// Capacity of the keypad input buffer (and upper bound on credential length).
pub const MAX_CODE_LEN: usize = 8;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Access ---
    /// Access code entered on the keypad, terminated with `*`.
    pub credential: heapless::String<MAX_CODE_LEN>,
    /// Consecutive wrong codes before lockout.
    pub max_failed_attempts: u8,
    /// Pause after a rejected code before re-prompting (ms).
    pub denied_feedback_ms: u32,
    /// Pause after an accepted code before monitoring starts (ms).
    pub granted_feedback_ms: u32,

    // --- Identity ---
    /// Tag that biases comfort upward (PMV = `raise_pmv`).
    pub raise_tag: Uid,
    /// Tag that biases comfort downward (PMV = `lower_pmv`).
    pub lower_tag: Uid,
    pub raise_pmv: f32,
    pub lower_pmv: f32,

    // --- Comfort actuation ---
    /// PMV above which the fan runs.
    pub fan_pmv_threshold: f32,
    /// PMV below which the cooling lamps light.
    pub cooling_pmv_threshold: f32,
    /// Fan dwell (ms, blocking).
    pub fan_dwell_ms: u32,
    /// Cooling lamp dwell (ms, blocking).
    pub cooling_dwell_ms: u32,

    // --- Alarm ---
    /// Temperature (Celsius) above which darkness raises an alarm.
    pub alarm_temperature_c: f32,
    /// Raw light level below which the room counts as dark.
    pub alarm_light_level: u16,
    /// Alarm episodes before lockout.
    pub max_alarms: u8,
    /// Total alarm episode length (ms, blocking).
    pub alarm_window_ms: u32,
    pub alarm_on_ms: u32,
    pub alarm_off_ms: u32,

    // --- Lockout ---
    /// Total lockout episode length (ms, blocking).
    pub lockout_window_ms: u32,
    pub lockout_on_ms: u32,
    pub lockout_off_ms: u32,

    // --- Timing ---
    /// Light sampling period (ms).
    pub light_interval_ms: u32,
    /// Temperature sampling period (ms).
    pub temperature_interval_ms: u32,
    /// Humidity sampling period (ms).
    pub humidity_interval_ms: u32,
    /// Display refresh period (ms).
    pub display_interval_ms: u32,
    /// Control loop pacing on the host (ms).
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (ms).
    pub telemetry_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut credential = heapless::String::new();
        // "1234" always fits in MAX_CODE_LEN.
        let _ = credential.push_str("1234");

        Self {
            // Access
            credential,
            max_failed_attempts: 3,
            denied_feedback_ms: 2000,
            granted_feedback_ms: 1000,

            // Identity
            raise_tag: [0xE6, 0xC5, 0xD4, 0x38],
            lower_tag: [0xE1, 0xB8, 0xAA, 0x00],
            raise_pmv: 2.0,
            lower_pmv: -2.0,

            // Comfort actuation
            fan_pmv_threshold: 1.0,
            cooling_pmv_threshold: -1.0,
            fan_dwell_ms: 5000,
            cooling_dwell_ms: 4000,

            // Alarm
            alarm_temperature_c: 26.0,
            alarm_light_level: 100,
            max_alarms: 3,
            alarm_window_ms: 3000,
            alarm_on_ms: 800,
            alarm_off_ms: 200,

            // Lockout
            lockout_window_ms: 7000,
            lockout_on_ms: 500,
            lockout_off_ms: 500,

            // Timing
            light_interval_ms: 1000,
            temperature_interval_ms: 1500,
            humidity_interval_ms: 2000,
            display_interval_ms: 3000,
            control_loop_interval_ms: 20,
            telemetry_interval_ms: 10_000,
        }
    }
}

impl SystemConfig {
    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credential.is_empty() {
            return Err(ConfigError::ValidationFailed("credential is empty"));
        }
        if self.credential.contains('*') {
            return Err(ConfigError::ValidationFailed(
                "credential contains the submit key",
            ));
        }
        if self.max_failed_attempts == 0 || self.max_alarms == 0 {
            return Err(ConfigError::ValidationFailed("attempt limits must be non-zero"));
        }
        if self.raise_tag == self.lower_tag {
            return Err(ConfigError::ValidationFailed("raise and lower tags are identical"));
        }
        if self.fan_pmv_threshold < self.cooling_pmv_threshold {
            return Err(ConfigError::ValidationFailed(
                "fan threshold below cooling threshold",
            ));
        }
        let periods = [
            self.light_interval_ms,
            self.temperature_interval_ms,
            self.humidity_interval_ms,
            self.display_interval_ms,
        ];
        if periods.contains(&0) {
            return Err(ConfigError::ValidationFailed("sampling period is zero"));
        }
        if self.alarm_on_ms.saturating_add(self.alarm_off_ms) == 0 || self.alarm_window_ms == 0 {
            return Err(ConfigError::ValidationFailed("alarm pattern is empty"));
        }
        if self.lockout_on_ms.saturating_add(self.lockout_off_ms) == 0 || self.lockout_window_ms == 0 {
            return Err(ConfigError::ValidationFailed("lockout pattern is empty"));
        }
        if self.alarm_on_ms > self.alarm_window_ms || self.lockout_on_ms > self.lockout_window_ms {
            return Err(ConfigError::ValidationFailed("blink longer than its window"));
        }
        Ok(())
    }
}
