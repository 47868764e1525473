//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (hardware, clock, event sinks) implement these traits.
//! The [`ControllerService`](super::service::ControllerService) consumes
//! them via generics, so the control core never touches hardware directly.
//!
//! None of these ports return errors.  Adapters absorb and log hardware
//! failures; the control policy is total over whatever they report.

use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SensorPort {
    /// Sample switch, rain flag, and rain level.
    fn sample(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Set buzzer loudness (0 = silent, 255 = full).
    fn set_buzzer(&mut self, level: u8);

    /// Command the servo to an absolute angle in degrees.
    fn move_servo(&mut self, angle_deg: u8);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; the domain only ever
/// compares timestamps with wrapping subtraction.
pub trait TimePort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial line, log,
/// test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
