//! The only state that survives from one tick to the next.

use crate::config::SystemConfig;

/// Cross-tick controller memory.  Owned by the service and threaded
/// through the policy and the stepper by `&mut`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    /// Millisecond timestamp of the most recent tick that saw rain.
    pub last_rain_ms: u32,
    /// Servo angle last commanded, in degrees.
    pub servo_position: u8,
    /// Millisecond timestamp of the most recent servo step.
    pub last_step_ms: u32,
}

impl ControllerState {
    /// Power-on state: vent open, both timestamps at zero.
    ///
    /// Because `last_rain_ms` starts at zero the reopen hold is active for
    /// the first `reopen_delay_ms` after boot.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            last_rain_ms: 0,
            servo_position: config.open_position_deg,
            last_step_ms: 0,
        }
    }
}
