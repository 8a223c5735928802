//! ComfortCtl: host simulator entry point.
//!
//! Runs the full controller against a simulated room and a scripted
//! operator, so the whole mode cycle can be followed in the log.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ScriptedKeypad  SimClimate  SimLight  SimRfid  LcdBuffer      │
//! │  GpioActuators<SimPin>       LogEventSink                      │
//! │  VirtualClock | SystemClock  (ClockPort + DelayNs)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  FSM · Gate · Poller · Identity · Comfort              │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Time is virtual by default (episodes finish instantly).  Set
//! `COMFORTCTL_REALTIME=1` to pace the loop on the wall clock.

use anyhow::{Context, Result, anyhow};
use embedded_hal::delay::DelayNs;
use log::info;

use comfortctl::adapters::hardware::{GpioActuators, HardwareAdapter};
use comfortctl::adapters::log_sink::LogEventSink;
use comfortctl::adapters::sim::{LcdBuffer, ScriptedKeypad, SimClimate, SimLight, SimPin, SimRfid};
use comfortctl::adapters::time::{SystemClock, VirtualClock};
use comfortctl::app::ports::ClockPort;
use comfortctl::app::service::Controller;
use comfortctl::config::SystemConfig;
use comfortctl::error::SensorError;
use comfortctl::identity::Uid;
use comfortctl::pins;

// ── Operator script ───────────────────────────────────────────

/// One scripted change to the simulated world.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Type keys on the keypad, one per control pass.
    Keys(&'static str),
    /// Set the room conditions.
    Room {
        temperature_c: f32,
        humidity_pct: f32,
        light: u16,
    },
    /// Hold a tag to the reader.
    Tag(Uid),
    /// The climate sensor stops answering until the next `Room`.
    SensorFault,
}

const UNKNOWN_TAG: Uid = [0xDE, 0xAD, 0xBE, 0xEF];

/// `(at_ms, step)`, sorted by time.
fn scenario(config: &SystemConfig) -> [(u64, Step); 10] {
    [
        (500, Step::Keys("9999*")),
        (4_000, Step::Keys("1234*")),
        (
            8_000,
            Step::Room {
                temperature_c: 24.0,
                humidity_pct: 55.0,
                light: 700,
            },
        ),
        (12_000, Step::Tag(config.raise_tag)),
        (20_000, Step::Tag(config.lower_tag)),
        (28_000, Step::Tag(UNKNOWN_TAG)),
        (31_000, Step::SensorFault),
        (
            34_000,
            Step::Room {
                temperature_c: 27.5,
                humidity_pct: 60.0,
                light: 40,
            },
        ),
        (
            55_000,
            Step::Room {
                temperature_c: 22.0,
                humidity_pct: 45.0,
                light: 600,
            },
        ),
        (56_000, Step::Keys("1234*")),
    ]
}

const SCENARIO_END_MS: u64 = 66_000;

type HostBoard<T> =
    HardwareAdapter<ScriptedKeypad, SimClimate, SimLight, SimRfid, LcdBuffer, GpioActuators<SimPin>, T>;

fn apply<T>(board: &mut HostBoard<T>, step: Step) {
    match step {
        Step::Keys(keys) => board.keypad.push_str(keys),
        Step::Room {
            temperature_c,
            humidity_pct,
            light,
        } => {
            board.climate.set_temperature(temperature_c);
            board.climate.set_humidity(humidity_pct);
            board.light.set_level(light);
        }
        Step::Tag(uid) => board.rfid.present(uid),
        Step::SensorFault => board.climate.fail(SensorError::NoResponse),
    }
}

// ── Run loop ──────────────────────────────────────────────────

fn run<T: ClockPort + DelayNs>(config: SystemConfig, clock: T) -> Result<()> {
    let mut board: HostBoard<T> = HardwareAdapter::new(
        ScriptedKeypad::new(),
        SimClimate::new(22.0, 40.0),
        SimLight::new(600),
        SimRfid::new(),
        LcdBuffer::new(),
        GpioActuators::new(
            SimPin::new(),
            SimPin::new(),
            SimPin::new(),
            SimPin::new(),
            SimPin::new(),
        ),
        clock,
    );
    let mut sink = LogEventSink::new();
    let script = scenario(&config);
    let loop_ms = config.control_loop_interval_ms;

    let mut controller = Controller::new(config);
    controller.start(&mut board, &mut sink);
    info!("System ready. Entering control loop.");

    let mut next_step = 0;
    while board.now_ms() < SCENARIO_END_MS {
        let now = board.now_ms();
        while let Some((at, step)) = script.get(next_step).copied() {
            if at > now {
                break;
            }
            info!("SCRIPT | t={}ms {:?}", now, step);
            apply(&mut board, step);
            next_step += 1;
        }

        controller.tick(&mut board, &mut sink);
        board.delay_ms(loop_ms);
    }

    info!(
        "Scenario finished: mode={:?} passes={} fan_starts={} buzzer_starts={}",
        controller.mode(),
        controller.tick_count(),
        board.actuators.fan_pin().rising_edges(),
        board.actuators.buzzer_pin().rising_edges(),
    );
    info!("LCD | {}", board.display.line(0));
    info!("LCD | {}", board.display.line(1));
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  ComfortCtl v{:<24}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate().context("invalid configuration")?;
    let json = serde_json::to_string(&config).map_err(|e| anyhow!("config encode failed: {e}"))?;
    info!("Config: {}", json);
    info!(
        "Pins: fan={} buzzer={} red={} green={} blue={} lcd={}x{}",
        pins::FAN_GPIO,
        pins::BUZZER_GPIO,
        pins::LED_RED_GPIO,
        pins::LED_GREEN_GPIO,
        pins::LED_BLUE_GPIO,
        pins::LCD_COLS,
        pins::LCD_ROWS,
    );

    if std::env::var_os("COMFORTCTL_REALTIME").is_some() {
        info!("Clock: wall time");
        run(config, SystemClock::new())
    } else {
        info!("Clock: virtual time");
        run(config, VirtualClock::new())
    }
}
