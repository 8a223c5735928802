//! Controller service: the hexagonal core.
//!
//! [`Controller`] owns the FSM and the shared [`ControllerState`].  It
//! exposes a clean, hardware-agnostic API.  All I/O flows through port
//! traits injected at call sites, making the entire service testable
//! with mock adapters.
//!
//! ```text
//!  KeypadPort  ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!  ClimatePort ──▶ │       Controller        │
//!  LightPort   ──▶ │  FSM · Gate · Poller    │ ──▶ ActuatorPort
//!  RfidPort    ──▶ │  Identity · Comfort     │ ──▶ DisplayPort
//!                  └─────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::fsm::context::ControllerState;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, Mode};

use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, Peripherals};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// The controller orchestrates all domain logic for one board type `H`.
pub struct Controller<H> {
    fsm: Fsm<H>,
    ctx: ControllerState,
    last_telemetry_ms: u64,
}

impl<H: Peripherals> Controller<H> {
    /// Construct the controller from configuration.
    ///
    /// Does **not** start the FSM: call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            fsm: Fsm::new(build_state_table(), Mode::Init),
            ctx: ControllerState::new(config),
            last_telemetry_ms: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every output in a known state and enter `Init`.
    pub fn start(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        hw.all_off();
        self.last_telemetry_ms = hw.now_ms();
        self.fsm.start(&mut self.ctx, hw);
        sink.emit(&AppEvent::Started(self.fsm.current_mode()));
        self.flush(sink);
        info!("Controller started in {:?}", self.fsm.current_mode());
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// Run one control-loop pass: one mode handler, then event delivery
    /// and (when due) a telemetry snapshot.
    pub fn tick(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        self.fsm.tick(&mut self.ctx, hw);
        self.flush(sink);

        let now = hw.now_ms();
        let interval = u64::from(self.ctx.config.telemetry_interval_ms);
        if now.saturating_sub(self.last_telemetry_ms) >= interval {
            self.last_telemetry_ms = now;
            sink.emit(&AppEvent::Telemetry(self.build_telemetry(now)));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self, uptime_ms: u64) -> TelemetryData {
        let reading = self.ctx.poller.reading();
        TelemetryData {
            uptime_ms,
            mode: self.fsm.current_mode(),
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
            light_level: reading.light_level,
            pmv: self.ctx.comfort.pmv(),
            failed_attempts: self.ctx.gate.failures(),
            alarm_count: self.ctx.alarm_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.fsm.current_mode()
    }

    /// Consecutive wrong codes since the last success or lockout.
    pub fn failures(&self) -> u8 {
        self.ctx.gate.failures()
    }

    pub fn alarm_count(&self) -> u8 {
        self.ctx.alarm_count
    }

    pub fn pmv(&self) -> f32 {
        self.ctx.comfort.pmv()
    }

    /// Control passes executed since start.
    pub fn tick_count(&self) -> u64 {
        self.ctx.total_ticks
    }

    // ── Internal ──────────────────────────────────────────────

    fn flush(&mut self, sink: &mut impl EventSink) {
        for event in self.ctx.drain_events() {
            sink.emit(&event);
        }
    }
}
