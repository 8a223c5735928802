//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (keypad, sensors, RFID reader, LCD, actuators, clock,
//! event sinks) implement these traits.  The
//! [`Controller`](super::service::Controller) consumes them via generics,
//! so the domain core never touches hardware directly.
//!
//! Every port is infallible except the climate sensor; a missing reading
//! is data (`None`), not a control-flow error.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;

use crate::error::SensorError;
use crate::identity::Uid;

// ───────────────────────────────────────────────────────────────
// Input ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// 4×4 matrix keypad.
pub trait KeypadPort {
    /// Next debounced key press, if any.  Never blocks.
    fn poll_key(&mut self) -> Option<char>;
}

/// Combined temperature / humidity sensor.
pub trait ClimatePort {
    /// Air temperature in °C.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Relative humidity in %.
    fn read_humidity(&mut self) -> Result<f32, SensorError>;
}

/// Analog light divider.
pub trait LightPort {
    /// Raw ADC value; smaller means darker.
    fn read_light(&mut self) -> u16;
}

/// Contactless tag reader.
pub trait RfidPort {
    /// `true` when a tag not yet read has entered the field.
    fn new_card_present(&mut self) -> bool;

    /// Read the UID of the present tag.  `None` on a failed read.
    fn read_uid(&mut self) -> Option<Uid>;

    /// Close the read session with the current tag.
    fn halt(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Character display (16×2 LCD on the reference board).
pub trait DisplayPort {
    fn clear(&mut self);

    /// Move the cursor to `col`, `row` (both 0-based).
    fn set_cursor(&mut self, col: u8, row: u8);

    fn print(&mut self, text: &str);

    /// Print a number with a fixed count of decimals.
    fn print_number(&mut self, value: f32, precision: usize) {
        let mut buf: heapless::String<16> = heapless::String::new();
        if write!(buf, "{:.*}", precision, value).is_err() {
            buf.clear();
            let _ = buf.push_str("?");
        }
        self.print(&buf);
    }
}

/// Indicator lamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lamp {
    Red,
    Green,
    Blue,
}

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    fn set_fan(&mut self, on: bool);

    fn set_buzzer(&mut self, on: bool);

    fn set_lamp(&mut self, lamp: Lamp, on: bool);

    /// Fan, buzzer and every lamp off.
    fn all_off(&mut self) {
        self.set_fan(false);
        self.set_buzzer(false);
        self.set_lamp(Lamp::Red, false);
        self.set_lamp(Lamp::Green, false);
        self.set_lamp(Lamp::Blue, false);
    }
}

/// Monotonic millisecond clock.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

/// Everything the controller drives, as one bound.
///
/// Blocking waits go through [`DelayNs`]; on a virtual clock the delay
/// advances time instead of sleeping.
pub trait Peripherals:
    KeypadPort
    + ClimatePort
    + LightPort
    + RfidPort
    + DisplayPort
    + ActuatorPort
    + ClockPort
    + DelayNs
{
}

impl<T> Peripherals for T where
    T: KeypadPort
        + ClimatePort
        + LightPort
        + RfidPort
        + DisplayPort
        + ActuatorPort
        + ClockPort
        + DelayNs
{
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log,
/// a test recorder, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
