//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Fan relay (active HIGH).
pub const FAN_GPIO: i32 = 6;
/// Piezo buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Status lamps
// ---------------------------------------------------------------------------

pub const LED_RED_GPIO: i32 = 3;
pub const LED_GREEN_GPIO: i32 = 4;
pub const LED_BLUE_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Character display (16x2 over I2C)
// ---------------------------------------------------------------------------

pub const LCD_COLS: u8 = 16;
pub const LCD_ROWS: u8 = 2;
