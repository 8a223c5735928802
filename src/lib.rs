//! ComfortCtl library.
//!
//! Room comfort controller: keypad-gated access, multi-rate sensor
//! sampling, RFID-biased comfort scoring, and alarm / lockout episodes,
//! all behind hexagonal port traits so the same core runs on a board,
//! in the host simulator and under test.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod comfort;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod gate;
pub mod identity;
pub mod pins;
pub mod scheduler;
pub mod sensors;
