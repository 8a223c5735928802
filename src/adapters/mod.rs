//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                         | Connects to               |
//! |-------------|------------------------------------|---------------------------|
//! | `hardware`  | every device port, `DelayNs`       | one device per port       |
//! |             | ActuatorPort (`GpioActuators`)     | `embedded-hal` outputs    |
//! | `log_sink`  | EventSink                          | `log` facade              |
//! | `sim`       | Keypad/Climate/Light/Rfid/Display  | in-memory simulation      |
//! | `time`      | ClockPort, `DelayNs`               | `Instant` / virtual time  |

pub mod hardware;
pub mod log_sink;
pub mod sim;
pub mod time;
