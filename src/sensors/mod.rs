//! Sensor poller: multi-rate sampling of the room sensors.
//!
//! Wraps the temperature/humidity and light sources behind the
//! [`TaskScheduler`].  Every pass, each due task overwrites exactly one
//! field of the shared [`SensorReading`]; the display task only reports
//! that a refresh is due.
//!
//! A failed read stores `None` (no data) instead of keeping the previous
//! value, so downstream logic never acts on stale numbers.

use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::{ClimatePort, LightPort};
use crate::config::SystemConfig;
use crate::error::SensorError;
use crate::scheduler::{TaskId, TaskScheduler};

/// Latest value of every room sensor.  `None` = no data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    /// Air temperature (°C).
    pub temperature_c: Option<f32>,
    /// Relative humidity (%).
    pub humidity_pct: Option<f32>,
    /// Raw light level from the analog divider; `None` until first sampled.
    pub light_level: Option<u16>,
}

/// One field refresh, reported for the diagnostic log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorSample {
    Light(u16),
    Temperature(Option<f32>),
    Humidity(Option<f32>),
}

/// What happened during one [`SensorPoller::poll`].
#[derive(Debug, Clone, Default)]
pub struct PollReport {
    pub samples: Vec<SensorSample, 3>,
    pub refresh_display: bool,
}

pub struct SensorPoller {
    scheduler: TaskScheduler,
    reading: SensorReading,
}

impl SensorPoller {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            scheduler: TaskScheduler::from_config(config),
            reading: SensorReading::default(),
        }
    }

    /// Start (or restart) sampling with `now_ms` as the baseline.
    pub fn start(&mut self, now_ms: u64) {
        self.scheduler.start(now_ms);
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Latest snapshot.
    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    /// Run every task due at `now_ms`.  Never waits on a sensor beyond the
    /// driver's own bounded read.
    pub fn poll(&mut self, now_ms: u64, hw: &mut (impl ClimatePort + LightPort)) -> PollReport {
        let mut report = PollReport::default();

        for task in self.scheduler.tick(now_ms).iter() {
            let sample = match task {
                TaskId::Light => {
                    let level = hw.read_light();
                    self.reading.light_level = Some(level);
                    SensorSample::Light(level)
                }
                TaskId::Temperature => {
                    let t = sanitize("temperature", hw.read_temperature());
                    self.reading.temperature_c = t;
                    SensorSample::Temperature(t)
                }
                TaskId::Humidity => {
                    let h = sanitize("humidity", hw.read_humidity());
                    self.reading.humidity_pct = h;
                    SensorSample::Humidity(h)
                }
                TaskId::Display => {
                    report.refresh_display = true;
                    continue;
                }
            };
            debug!("Poller: {:?}", sample);
            // Capacity covers the three sampling tasks.
            let _ = report.samples.push(sample);
        }

        report
    }
}

/// Map a driver result onto the no-data sentinel.
fn sanitize(label: &str, result: Result<f32, SensorError>) -> Option<f32> {
    match result {
        Ok(v) if v.is_finite() => Some(v),
        Ok(_) => {
            warn!("Poller: {} read failed: {}", label, SensorError::NotANumber);
            None
        }
        Err(e) => {
            warn!("Poller: {} read failed: {}", label, e);
            None
        }
    }
}
