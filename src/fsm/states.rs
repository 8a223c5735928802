//! Concrete mode handler functions and table builder.
//!
//! Each mode is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.  The table is generic over the peripheral bundle so
//! the same handlers drive real hardware, the host simulator and tests.
//!
//! ```text
//!          ┌────────[Granted]────────┐
//!          │                         ▼
//!   ──▶  INIT ◀──[Denied]       MONITORING ◀──[count < 3]──┐
//!          │  ▲                      │                      │
//!  [3 wrong]  │               [hot & dark]                  │
//!          │  │                      ▼                      │
//!          │  │                    ALARM ───────────────────┘
//!          ▼  │                      │
//!        LOCKED ◀────[count = 3]─────┘
//! ```
//!
//! `Alarm` and `Locked` run their whole indicator episode inside one
//! `on_update` call; nothing else is polled meanwhile.

use log::{error, info, warn};

use super::context::ControllerState;
use super::{Mode, StateDescriptor};
use crate::app::events::AppEvent;
use crate::app::ports::{Lamp, Peripherals};
use crate::comfort::run_actuation;
use crate::drivers::display;
use crate::drivers::patterns::{BlinkPattern, run_episode};
use crate::gate::GateSignal;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static mode table.  Called once at startup.
pub fn build_state_table<H: Peripherals>() -> [StateDescriptor<H>; Mode::COUNT] {
    [
        // Index 0: Init
        StateDescriptor {
            id: Mode::Init,
            name: "Init",
            on_enter: Some(init_enter::<H>),
            on_exit: None,
            on_update: init_update::<H>,
        },
        // Index 1: Monitoring
        StateDescriptor {
            id: Mode::Monitoring,
            name: "Monitoring",
            on_enter: Some(monitoring_enter::<H>),
            on_exit: Some(monitoring_exit::<H>),
            on_update: monitoring_update::<H>,
        },
        // Index 2: Alarm
        StateDescriptor {
            id: Mode::Alarm,
            name: "Alarm",
            on_enter: Some(alarm_enter::<H>),
            on_exit: Some(episode_exit::<H>),
            on_update: alarm_update::<H>,
        },
        // Index 3: Locked
        StateDescriptor {
            id: Mode::Locked,
            name: "Locked",
            on_enter: Some(locked_enter::<H>),
            on_exit: Some(episode_exit::<H>),
            on_update: locked_update::<H>,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  INIT: waiting for the access code
// ═══════════════════════════════════════════════════════════════════════════

fn init_enter<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) {
    ctx.gate.clear_input();
    display::render_prompt(hw);
    info!("INIT: awaiting access code");
}

fn init_update<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) -> Option<Mode> {
    let key = hw.poll_key()?;

    match ctx.gate.submit_key(key) {
        GateSignal::Masked { position } => {
            display::render_mask(hw, position);
            None
        }
        GateSignal::Ignored => None,
        GateSignal::Granted => {
            // Fresh session: the alarm history belongs to the previous one.
            ctx.reset_counters();
            ctx.publish(AppEvent::AccessGranted);
            display::render_granted(hw);
            hw.delay_ms(ctx.config.granted_feedback_ms);
            Some(Mode::Monitoring)
        }
        GateSignal::Denied { failures } => {
            ctx.publish(AppEvent::AccessDenied { failures });
            display::render_denied(hw, ctx.attempts_left());
            hw.delay_ms(ctx.config.denied_feedback_ms);
            display::render_prompt(hw);
            None
        }
        GateSignal::Locked => {
            ctx.publish(AppEvent::AccessDenied {
                failures: ctx.gate.failures(),
            });
            Some(Mode::Locked)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  MONITORING: sampling, identity and comfort evaluation
// ═══════════════════════════════════════════════════════════════════════════

fn monitoring_enter<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) {
    hw.set_lamp(Lamp::Green, true);
    hw.clear();
    ctx.poller.start(hw.now_ms());
    info!("MONITORING: sampling started");
}

fn monitoring_exit<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) {
    ctx.poller.stop();
    hw.set_lamp(Lamp::Green, false);
}

fn monitoring_update<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) -> Option<Mode> {
    // 1. Sensor tasks due this pass
    let now = hw.now_ms();
    let report = ctx.poller.poll(now, hw);
    for sample in report.samples {
        ctx.publish(AppEvent::Sample(sample));
    }
    if report.refresh_display {
        let reading = *ctx.poller.reading();
        display::render_reading(hw, &reading);
    }

    // 2. At most one identity transaction
    let read = ctx.identity.poll_identity(hw);
    if let Some(r) = read {
        ctx.publish(AppEvent::IdentityRead {
            uid: r.uid,
            class: r.class,
        });
    }

    // 3. Comfort score and anomaly check
    let reading = *ctx.poller.reading();
    let outcome = ctx.comfort.evaluate(read.map(|r| r.class), &reading);
    if outcome.identity_evaluated {
        ctx.publish(AppEvent::ComfortUpdated { pmv: outcome.pmv });
    }
    if let Some(actuation) = outcome.actuation {
        ctx.publish(AppEvent::Actuation(actuation));
        run_actuation(actuation, hw);
    }

    if outcome.alarm {
        warn!(
            "MONITORING: hot and dark (T={:?}, light={:?})",
            reading.temperature_c, reading.light_level
        );
        return Some(Mode::Alarm);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARM: buzzer + red indicator episode
// ═══════════════════════════════════════════════════════════════════════════

fn alarm_enter<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) {
    ctx.alarm_count = ctx.alarm_count.saturating_add(1);
    ctx.publish(AppEvent::AlarmRaised {
        count: ctx.alarm_count,
    });
    display::render_alarm(hw, ctx.alarm_count);
    warn!(
        "ALARM: episode {}/{}",
        ctx.alarm_count, ctx.config.max_alarms
    );
}

fn alarm_update<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) -> Option<Mode> {
    let pattern = BlinkPattern::new(ctx.config.alarm_on_ms, ctx.config.alarm_off_ms);
    run_episode(hw, pattern, ctx.config.alarm_window_ms, |hw, lit| {
        hw.set_buzzer(lit);
        hw.set_lamp(Lamp::Red, lit);
    });

    if ctx.alarm_count >= ctx.config.max_alarms {
        Some(Mode::Locked)
    } else {
        Some(Mode::Monitoring)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOCKED: lockout episode, then back to the prompt
// ═══════════════════════════════════════════════════════════════════════════

fn locked_enter<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) {
    ctx.publish(AppEvent::LockedOut);
    display::render_locked(hw);
    error!(
        "LOCKED: {} failed codes, {} alarms",
        ctx.gate.failures(),
        ctx.alarm_count
    );
}

fn locked_update<H: Peripherals>(ctx: &mut ControllerState, hw: &mut H) -> Option<Mode> {
    let pattern = BlinkPattern::new(ctx.config.lockout_on_ms, ctx.config.lockout_off_ms);
    // Green is held high through both halves; only blue blinks.
    run_episode(hw, pattern, ctx.config.lockout_window_ms, |hw, lit| {
        hw.set_lamp(Lamp::Green, true);
        hw.set_lamp(Lamp::Blue, lit);
    });

    ctx.reset_counters();
    info!("LOCKED: lockout over, counters cleared");
    Some(Mode::Init)
}

/// Leaving a blocking episode: everything dark and silent.
fn episode_exit<H: Peripherals>(_ctx: &mut ControllerState, hw: &mut H) {
    hw.all_off();
}
