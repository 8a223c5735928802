//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the mock board.  All tests run on the host on virtual time,
//! with no real hardware required.

mod access_tests;
mod comfort_tests;
mod safety_cycle_tests;
