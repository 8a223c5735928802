//! Application core: pure domain logic, zero direct I/O.
//!
//! This module contains the controller service that wires the room
//! comfort FSM to the outside world.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
