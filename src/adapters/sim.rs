//! Simulated devices for host runs and tests.
//!
//! Each type stands in for one physical peripheral and implements the
//! matching port (or `embedded-hal` trait, for [`SimPin`]).  State is set
//! directly by the owner: a scenario script, a test, or the demo binary.

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::app::ports::{ClimatePort, DisplayPort, KeypadPort, LightPort, RfidPort};
use crate::error::SensorError;
use crate::identity::Uid;
use crate::pins::{LCD_COLS, LCD_ROWS};

// ───────────────────────────────────────────────────────────────
// Keypad
// ───────────────────────────────────────────────────────────────

/// Queue of pending key presses, one delivered per poll.
#[derive(Debug, Default)]
pub struct ScriptedKeypad {
    pending: VecDeque<char>,
}

impl ScriptedKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: char) {
        self.pending.push_back(key);
    }

    pub fn push_str(&mut self, keys: &str) {
        self.pending.extend(keys.chars());
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl KeypadPort for ScriptedKeypad {
    fn poll_key(&mut self) -> Option<char> {
        self.pending.pop_front()
    }
}

// ───────────────────────────────────────────────────────────────
// Climate + light
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct SimClimate {
    temperature: Result<f32, SensorError>,
    humidity: Result<f32, SensorError>,
}

impl SimClimate {
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature: Ok(temperature_c),
            humidity: Ok(humidity_pct),
        }
    }

    pub fn set_temperature(&mut self, celsius: f32) {
        self.temperature = Ok(celsius);
    }

    pub fn set_humidity(&mut self, pct: f32) {
        self.humidity = Ok(pct);
    }

    /// Make both reads fail until the next `set_*`.
    pub fn fail(&mut self, error: SensorError) {
        self.temperature = Err(error);
        self.humidity = Err(error);
    }
}

impl ClimatePort for SimClimate {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.temperature
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.humidity
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimLight {
    level: u16,
}

impl SimLight {
    pub fn new(level: u16) -> Self {
        Self { level }
    }

    pub fn set_level(&mut self, level: u16) {
        self.level = level;
    }
}

impl LightPort for SimLight {
    fn read_light(&mut self) -> u16 {
        self.level
    }
}

// ───────────────────────────────────────────────────────────────
// RFID
// ───────────────────────────────────────────────────────────────

/// Tags waiting to be presented, plus the one in the field.
#[derive(Debug, Default)]
pub struct SimRfid {
    queue: VecDeque<Uid>,
    in_field: Option<Uid>,
    halts: u32,
}

impl SimRfid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Present a tag; it is picked up by the next presence check.
    pub fn present(&mut self, uid: Uid) {
        self.queue.push_back(uid);
    }

    /// Sessions closed so far.
    pub fn halts(&self) -> u32 {
        self.halts
    }
}

impl RfidPort for SimRfid {
    fn new_card_present(&mut self) -> bool {
        if self.in_field.is_none() {
            self.in_field = self.queue.pop_front();
        }
        self.in_field.is_some()
    }

    fn read_uid(&mut self) -> Option<Uid> {
        self.in_field
    }

    fn halt(&mut self) {
        self.in_field = None;
        self.halts += 1;
    }
}

// ───────────────────────────────────────────────────────────────
// Display
// ───────────────────────────────────────────────────────────────

const COLS: usize = LCD_COLS as usize;
const ROWS: usize = LCD_ROWS as usize;

/// In-memory character LCD.  Text past the last column is dropped.
#[derive(Debug, Clone)]
pub struct LcdBuffer {
    cells: [[char; COLS]; ROWS],
    col: usize,
    row: usize,
}

impl Default for LcdBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LcdBuffer {
    pub fn new() -> Self {
        Self {
            cells: [[' '; COLS]; ROWS],
            col: 0,
            row: 0,
        }
    }

    /// Row contents without trailing blanks.
    pub fn line(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }
}

impl DisplayPort for LcdBuffer {
    fn clear(&mut self) {
        self.cells = [[' '; COLS]; ROWS];
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = usize::from(col);
        self.row = usize::from(row).min(ROWS - 1);
    }

    fn print(&mut self, text: &str) {
        for ch in text.chars() {
            if self.col < COLS {
                self.cells[self.row][self.col] = ch;
            }
            self.col += 1;
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Digital output
// ───────────────────────────────────────────────────────────────

/// Output pin that remembers its level and counts rising edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimPin {
    high: bool,
    rising_edges: u32,
}

impl SimPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rising_edges(&self) -> u32 {
        self.rising_edges
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for SimPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}
