//! Screen layouts for the 16×2 character display.
//!
//! ```text
//!   ┌────────────────┐      ┌────────────────┐
//!   │T:23.4C H:45%   │      │Enter code:     │
//!   │L:512           │      │****            │
//!   └────────────────┘      └────────────────┘
//!      monitoring               login prompt
//! ```
//!
//! Layout helpers only; the caller decides when to draw.

use crate::app::ports::DisplayPort;
use crate::gate::MASK_CHAR;
use crate::sensors::SensorReading;

/// Shown for a field with no data.
pub const NO_DATA: &str = "--";

/// Draw the two-line sensor summary.
pub fn render_reading(display: &mut impl DisplayPort, reading: &SensorReading) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("T:");
    print_or_dash(display, reading.temperature_c, 1);
    display.print("C H:");
    print_or_dash(display, reading.humidity_pct, 0);
    display.print("%");

    display.set_cursor(0, 1);
    display.print("L:");
    print_or_dash(display, reading.light_level.map(f32::from), 0);
}

pub fn render_prompt(display: &mut impl DisplayPort) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("Enter code:");
    display.set_cursor(0, 1);
}

/// Echo one mask character for the key stored at `position`.
pub fn render_mask(display: &mut impl DisplayPort, position: u8) {
    let mut buf = [0u8; 4];
    display.set_cursor(position, 1);
    display.print(MASK_CHAR.encode_utf8(&mut buf));
}

pub fn render_granted(display: &mut impl DisplayPort) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("Access granted");
}

pub fn render_denied(display: &mut impl DisplayPort, attempts_left: u8) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("Wrong code");
    display.set_cursor(0, 1);
    display.print("Tries left: ");
    display.print_number(f32::from(attempts_left), 0);
}

pub fn render_alarm(display: &mut impl DisplayPort, count: u8) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("! ALARM !");
    display.set_cursor(0, 1);
    display.print("Count: ");
    display.print_number(f32::from(count), 0);
}

pub fn render_locked(display: &mut impl DisplayPort) {
    display.clear();
    display.set_cursor(0, 0);
    display.print("SYSTEM LOCKED");
}

fn print_or_dash(display: &mut impl DisplayPort, value: Option<f32>, precision: usize) {
    match value {
        Some(v) => display.print_number(v, precision),
        None => display.print(NO_DATA),
    }
}
