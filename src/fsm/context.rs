//! Shared mutable context threaded through every FSM handler.
//!
//! `ControllerState` is the single struct that mode handlers read from
//! and write to.  It owns the configuration, every domain component
//! (gate, poller, identity reader, comfort evaluator), the alarm counter,
//! timing, and a bounded outbox of events.  Think of it as the
//! "blackboard" in a blackboard architecture.

use heapless::Vec;
use log::warn;

use crate::app::events::AppEvent;
use crate::comfort::ComfortEvaluator;
use crate::config::SystemConfig;
use crate::gate::CredentialGate;
use crate::identity::IdentityReader;
use crate::sensors::SensorPoller;

/// Events one pass can queue before the oldest are dropped.
pub const OUTBOX_CAPACITY: usize = 16;

pub struct ControllerState {
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Configuration --
    pub config: SystemConfig,

    // -- Components --
    pub gate: CredentialGate,
    pub poller: SensorPoller,
    pub identity: IdentityReader,
    pub comfort: ComfortEvaluator,

    /// Alarm episodes since the last login or lockout.
    pub alarm_count: u8,

    outbox: Vec<AppEvent, OUTBOX_CAPACITY>,
}

impl ControllerState {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            total_ticks: 0,
            gate: CredentialGate::new(&config),
            poller: SensorPoller::new(&config),
            identity: IdentityReader::new(&config),
            comfort: ComfortEvaluator::new(&config),
            alarm_count: 0,
            outbox: Vec::new(),
            config,
        }
    }

    /// Queue an event for the sink.  When full, the oldest event is dropped.
    pub fn publish(&mut self, event: AppEvent) {
        if self.outbox.is_full() {
            warn!("Outbox full, dropping {:?}", self.outbox[0]);
            self.outbox.remove(0);
        }
        // Space was made above.
        let _ = self.outbox.push(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = AppEvent> + use<> {
        core::mem::take(&mut self.outbox).into_iter()
    }

    /// Forget both the keypad failure count and the alarm count.
    pub fn reset_counters(&mut self) {
        self.gate.reset();
        self.alarm_count = 0;
    }

    /// Attempts left before lockout.
    pub fn attempts_left(&self) -> u8 {
        self.config
            .max_failed_attempts
            .saturating_sub(self.gate.failures())
    }
}
