//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements              | Connects to                    |
//! |------------|-------------------------|--------------------------------|
//! | `hardware` | SensorPort, ActuatorPort| embedded-hal pins / PWM        |
//! | `log_sink` | EventSink               | `log` facade                   |
//! | `serial`   | EventSink               | telemetry lines on `io::Write` |
//! | `serial_port` | (host only)          | USB serial link to the board   |
//! | `sim`      | SensorPort, ActuatorPort| in-memory simulated board      |
//! | `time`     | TimePort, DelayNs       | system timer / simulated clock |

pub mod hardware;
pub mod log_sink;
pub mod serial;
#[cfg(feature = "host")]
pub mod serial_port;
pub mod sim;
pub mod time;
