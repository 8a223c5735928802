//! Comfort evaluator.
//!
//! Fuses the latest identity classification and sensor snapshot into two
//! independent outputs:
//!
//! | Output          | Source                              | Effect                   |
//! |-----------------|-------------------------------------|--------------------------|
//! | PMV actuation   | identity class → comfort score      | fan or cooling lamps     |
//! | Alarm condition | temperature > 26 °C and light < 100 | transition to `Alarm`    |
//!
//! The comfort score (PMV) is set only by presented tags and is kept until
//! the next read.  It never looks at temperature or humidity.
//!
//! PMV actuation stays inside `Monitoring`; the alarm condition is the only
//! path into `Alarm`.  Both may fire in the same pass.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::{ActuatorPort, Lamp};
use crate::config::SystemConfig;
use crate::identity::IdentityClass;
use crate::sensors::SensorReading;

/// A blocking actuation burst requested by the comfort score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actuation {
    /// Fan on for `dwell_ms`, then off.
    Fan { dwell_ms: u32 },
    /// Blue and red lamps on for `dwell_ms`, then cleared.
    CoolingLamps { dwell_ms: u32 },
}

/// Result of one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortOutcome {
    /// Comfort score after this pass.
    pub pmv: f32,
    /// `true` when a tag was evaluated this pass.
    pub identity_evaluated: bool,
    pub actuation: Option<Actuation>,
    /// Hot-and-dark anomaly: the caller must enter `Alarm`.
    pub alarm: bool,
}

pub struct ComfortEvaluator {
    pmv: f32,
    raise_pmv: f32,
    lower_pmv: f32,
    fan_threshold: f32,
    cooling_threshold: f32,
    fan_dwell_ms: u32,
    cooling_dwell_ms: u32,
    alarm_temperature_c: f32,
    alarm_light_level: u16,
}

impl ComfortEvaluator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            pmv: 0.0,
            raise_pmv: config.raise_pmv,
            lower_pmv: config.lower_pmv,
            fan_threshold: config.fan_pmv_threshold,
            cooling_threshold: config.cooling_pmv_threshold,
            fan_dwell_ms: config.fan_dwell_ms,
            cooling_dwell_ms: config.cooling_dwell_ms,
            alarm_temperature_c: config.alarm_temperature_c,
            alarm_light_level: config.alarm_light_level,
        }
    }

    /// Current comfort score (0 until the first biasing tag).
    pub fn pmv(&self) -> f32 {
        self.pmv
    }

    /// Evaluate one monitoring pass.
    ///
    /// `identity` is `None` when no tag was read this pass; the score and
    /// any actuation are then left alone.
    pub fn evaluate(
        &mut self,
        identity: Option<IdentityClass>,
        reading: &SensorReading,
    ) -> ComfortOutcome {
        let actuation = identity.and_then(|class| {
            match class {
                IdentityClass::Raise => self.pmv = self.raise_pmv,
                IdentityClass::Lower => self.pmv = self.lower_pmv,
                IdentityClass::Neutral => {}
            }
            self.actuation_for_score()
        });

        ComfortOutcome {
            pmv: self.pmv,
            identity_evaluated: identity.is_some(),
            actuation,
            alarm: self.alarm_condition(reading),
        }
    }

    /// Hot and dark at the same time.  Missing data never confirms it.
    pub fn alarm_condition(&self, reading: &SensorReading) -> bool {
        match (reading.temperature_c, reading.light_level) {
            (Some(t), Some(light)) => t > self.alarm_temperature_c && light < self.alarm_light_level,
            _ => false,
        }
    }

    fn actuation_for_score(&self) -> Option<Actuation> {
        if self.pmv > self.fan_threshold {
            Some(Actuation::Fan {
                dwell_ms: self.fan_dwell_ms,
            })
        } else if self.pmv < self.cooling_threshold {
            Some(Actuation::CoolingLamps {
                dwell_ms: self.cooling_dwell_ms,
            })
        } else {
            None
        }
    }
}

/// Run an actuation burst to completion.  Blocks for the whole dwell.
pub fn run_actuation(actuation: Actuation, hw: &mut (impl ActuatorPort + DelayNs)) {
    match actuation {
        Actuation::Fan { dwell_ms } => {
            info!("Comfort: fan on for {}ms", dwell_ms);
            hw.set_fan(true);
            hw.delay_ms(dwell_ms);
            hw.set_fan(false);
        }
        Actuation::CoolingLamps { dwell_ms } => {
            info!("Comfort: cooling lamps on for {}ms", dwell_ms);
            hw.set_lamp(Lamp::Blue, true);
            hw.set_lamp(Lamp::Red, true);
            hw.delay_ms(dwell_ms);
            hw.set_lamp(Lamp::Blue, false);
            hw.set_lamp(Lamp::Red, false);
        }
    }
}
