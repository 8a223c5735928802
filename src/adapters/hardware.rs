//! Hardware adapter: bridges individual devices to the domain port traits.
//!
//! [`HardwareAdapter`] composes one device per port into a single value
//! that satisfies [`Peripherals`](crate::app::ports::Peripherals).  Any
//! device can be swapped: real drivers on the board, simulated ones on
//! the host, scripted ones in tests.
//!
//! [`GpioActuators`] drives the five digital outputs (fan relay, buzzer,
//! three lamps) through `embedded-hal` output pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState, StatefulOutputPin};
use log::warn;

use crate::app::ports::{
    ActuatorPort, ClimatePort, ClockPort, DisplayPort, KeypadPort, Lamp, LightPort, RfidPort,
};
use crate::error::SensorError;
use crate::identity::Uid;

use super::sim::{LcdBuffer, ScriptedKeypad, SimClimate, SimLight, SimPin, SimRfid};
use super::time::VirtualClock;

// ───────────────────────────────────────────────────────────────
// GPIO actuators
// ───────────────────────────────────────────────────────────────

/// Fan, buzzer and RGB indicator lamps on plain digital outputs.
pub struct GpioActuators<P> {
    fan: P,
    buzzer: P,
    red: P,
    green: P,
    blue: P,
}

impl<P: OutputPin> GpioActuators<P> {
    pub fn new(fan: P, buzzer: P, red: P, green: P, blue: P) -> Self {
        Self {
            fan,
            buzzer,
            red,
            green,
            blue,
        }
    }

    pub fn fan_pin(&self) -> &P {
        &self.fan
    }

    pub fn buzzer_pin(&self) -> &P {
        &self.buzzer
    }

    fn lamp_pin(&mut self, lamp: Lamp) -> &mut P {
        match lamp {
            Lamp::Red => &mut self.red,
            Lamp::Green => &mut self.green,
            Lamp::Blue => &mut self.blue,
        }
    }
}

impl<P: StatefulOutputPin> GpioActuators<P> {
    pub fn fan_is_on(&mut self) -> bool {
        is_high(&mut self.fan)
    }

    pub fn buzzer_is_on(&mut self) -> bool {
        is_high(&mut self.buzzer)
    }

    pub fn lamp_is_on(&mut self, lamp: Lamp) -> bool {
        is_high(self.lamp_pin(lamp))
    }
}

fn drive(pin: &mut impl OutputPin, label: &str, on: bool) {
    if let Err(e) = pin.set_state(PinState::from(on)) {
        warn!("GPIO: failed to drive {} {}: {:?}", label, on, e);
    }
}

fn is_high(pin: &mut impl StatefulOutputPin) -> bool {
    pin.is_set_high().unwrap_or(false)
}

impl<P: OutputPin> ActuatorPort for GpioActuators<P> {
    fn set_fan(&mut self, on: bool) {
        drive(&mut self.fan, "fan", on);
    }

    fn set_buzzer(&mut self, on: bool) {
        drive(&mut self.buzzer, "buzzer", on);
    }

    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        let label = match lamp {
            Lamp::Red => "red lamp",
            Lamp::Green => "green lamp",
            Lamp::Blue => "blue lamp",
        };
        drive(self.lamp_pin(lamp), label, on);
    }
}

// ───────────────────────────────────────────────────────────────
// Composite adapter
// ───────────────────────────────────────────────────────────────

/// Concrete adapter that combines all devices behind the port traits.
///
/// Fields are public so a harness can reach a single device (e.g. to
/// script the keypad) without a getter per port.
pub struct HardwareAdapter<K, C, L, R, D, A, T> {
    pub keypad: K,
    pub climate: C,
    pub light: L,
    pub rfid: R,
    pub display: D,
    pub actuators: A,
    pub clock: T,
}

impl<K, C, L, R, D, A, T> HardwareAdapter<K, C, L, R, D, A, T> {
    pub fn new(
        keypad: K,
        climate: C,
        light: L,
        rfid: R,
        display: D,
        actuators: A,
        clock: T,
    ) -> Self {
        Self {
            keypad,
            climate,
            light,
            rfid,
            display,
            actuators,
            clock,
        }
    }
}

/// Fully simulated board on virtual time.
pub type SimBoard = HardwareAdapter<
    ScriptedKeypad,
    SimClimate,
    SimLight,
    SimRfid,
    LcdBuffer,
    GpioActuators<SimPin>,
    VirtualClock,
>;

impl SimBoard {
    /// A comfortable room (22 °C, 40 %, bright), no operator input, t = 0.
    pub fn simulated() -> Self {
        HardwareAdapter::new(
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
            VirtualClock::new(),
        )
    }
}

// ── Port delegation ───────────────────────────────────────────

impl<K: KeypadPort, C, L, R, D, A, T> KeypadPort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn poll_key(&mut self) -> Option<char> {
        self.keypad.poll_key()
    }
}

impl<K, C: ClimatePort, L, R, D, A, T> ClimatePort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.climate.read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.climate.read_humidity()
    }
}

impl<K, C, L: LightPort, R, D, A, T> LightPort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn read_light(&mut self) -> u16 {
        self.light.read_light()
    }
}

impl<K, C, L, R: RfidPort, D, A, T> RfidPort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn new_card_present(&mut self) -> bool {
        self.rfid.new_card_present()
    }

    fn read_uid(&mut self) -> Option<Uid> {
        self.rfid.read_uid()
    }

    fn halt(&mut self) {
        self.rfid.halt();
    }
}

impl<K, C, L, R, D: DisplayPort, A, T> DisplayPort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn clear(&mut self) {
        self.display.clear();
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.display.set_cursor(col, row);
    }

    fn print(&mut self, text: &str) {
        self.display.print(text);
    }

    fn print_number(&mut self, value: f32, precision: usize) {
        self.display.print_number(value, precision);
    }
}

impl<K, C, L, R, D, A: ActuatorPort, T> ActuatorPort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn set_fan(&mut self, on: bool) {
        self.actuators.set_fan(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.actuators.set_buzzer(on);
    }

    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        self.actuators.set_lamp(lamp, on);
    }

    fn all_off(&mut self) {
        self.actuators.all_off();
    }
}

impl<K, C, L, R, D, A, T: ClockPort> ClockPort for HardwareAdapter<K, C, L, R, D, A, T> {
    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

impl<K, C, L, R, D, A, T: DelayNs> DelayNs for HardwareAdapter<K, C, L, R, D, A, T> {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}
