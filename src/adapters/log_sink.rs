//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade as labeled, line-oriented diagnostics (`LIGHT | 512`,
//! `UID | E6 C5 D4 38`, ...).  Whatever logger the binary installs
//! decides where the lines end up.

use core::fmt::Write;

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::comfort::Actuation;
use crate::identity::Uid;
use crate::sensors::SensorSample;

/// Adapter that logs every [`AppEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => info!("START | initial_mode={:?}", mode),
            AppEvent::ModeChanged { from, to } => info!("MODE | {:?} -> {:?}", from, to),
            AppEvent::AccessGranted => info!("ACCESS | granted"),
            AppEvent::AccessDenied { failures } => warn!("ACCESS | denied, failures={}", failures),
            AppEvent::Sample(SensorSample::Light(level)) => info!("LIGHT | {}", level),
            AppEvent::Sample(SensorSample::Temperature(t)) => match t {
                Some(t) => info!("TEMP | {:.1}", t),
                None => warn!("TEMP | no data"),
            },
            AppEvent::Sample(SensorSample::Humidity(h)) => match h {
                Some(h) => info!("HUM | {:.0}", h),
                None => warn!("HUM | no data"),
            },
            AppEvent::IdentityRead { uid, class } => {
                info!("UID | {} ({:?})", format_uid(uid), class)
            }
            AppEvent::ComfortUpdated { pmv } => info!("PMV | {:.1}", pmv),
            AppEvent::Actuation(Actuation::Fan { dwell_ms }) => {
                info!("ACT | fan {}ms", dwell_ms)
            }
            AppEvent::Actuation(Actuation::CoolingLamps { dwell_ms }) => {
                info!("ACT | cooling lamps {}ms", dwell_ms)
            }
            AppEvent::AlarmRaised { count } => warn!("ALARM | count={}", count),
            AppEvent::LockedOut => warn!("LOCK | system locked"),
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | t={}ms mode={:?} | T={:?} H={:?} L={:?} | pmv={:.1} | \
                     failures={} alarms={}",
                    t.uptime_ms,
                    t.mode,
                    t.temperature_c,
                    t.humidity_pct,
                    t.light_level,
                    t.pmv,
                    t.failed_attempts,
                    t.alarm_count,
                );
            }
        }
    }
}

/// Space-separated upper-case hex, e.g. `E6 C5 D4 38`.
pub fn format_uid(uid: &Uid) -> heapless::String<12> {
    let mut out = heapless::String::new();
    for (i, byte) in uid.iter().enumerate() {
        let sep = if i == 0 { "" } else { " " };
        // 4 × "XX" + 3 separators fits the capacity.
        let _ = write!(out, "{}{:02X}", sep, byte);
    }
    out
}
