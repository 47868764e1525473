//! Decision policy: where the vent should be and how loud to alert.
//!
//! Evaluated fresh every tick from the current snapshot plus one piece of
//! memory, the time rain was last seen:
//!
//! | Condition                                  | Target  |
//! |--------------------------------------------|---------|
//! | manual switch engaged                      | Closed  |
//! | rain detected this tick                    | Closed  |
//! | rain seen within the last `reopen_delay_ms`| Closed  |
//! | otherwise                                  | Open    |
//!
//! The buzzer only sounds while the servo is travelling toward closed; its
//! level tracks how wet the sensing plate is.

use crate::config::SystemConfig;
use crate::sensors::SensorSnapshot;

use super::state::ControllerState;

/// Buzzer level at the dry reference.
pub const ALERT_MIN: u8 = 0;
/// Buzzer level at the wet reference.
pub const ALERT_MAX: u8 = 255;

/// The two resting positions of the vent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VentTarget {
    Open,
    Closed,
}

impl VentTarget {
    /// Servo angle for this target under `config`.
    pub fn angle(self, config: &SystemConfig) -> u8 {
        match self {
            Self::Open => config.open_position_deg,
            Self::Closed => config.close_position_deg,
        }
    }
}

/// Why the vent is being held closed.  When several apply, the first in
/// declaration order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Switch,
    Rain,
    ReopenHold,
}

/// Outcome of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Quiet period since the last rain has elapsed.
    pub allow_open: bool,
    pub target: VentTarget,
    /// `Some` exactly when `target` is `Closed`.
    pub reason: Option<CloseReason>,
    /// Target is closed and the servo is not there yet.
    pub closing: bool,
    pub buzzer_level: u8,
}

/// Evaluate the policy for one tick.
///
/// Updates `state.last_rain_ms` when rain is present; reads but never
/// writes the servo position.
pub fn decide(
    state: &mut ControllerState,
    snapshot: &SensorSnapshot,
    now_ms: u32,
    config: &SystemConfig,
) -> Decision {
    if snapshot.rain_detected {
        state.last_rain_ms = now_ms;
    }

    let allow_open = now_ms.wrapping_sub(state.last_rain_ms) > config.reopen_delay_ms;

    let reason = if snapshot.switch_on {
        Some(CloseReason::Switch)
    } else if snapshot.rain_detected {
        Some(CloseReason::Rain)
    } else if !allow_open {
        Some(CloseReason::ReopenHold)
    } else {
        None
    };
    let target = if reason.is_some() {
        VentTarget::Closed
    } else {
        VentTarget::Open
    };

    let closing =
        target == VentTarget::Closed && state.servo_position != config.close_position_deg;

    let buzzer_level = if closing {
        alert_level(snapshot.rain_analog, config)
    } else {
        0
    };

    Decision {
        allow_open,
        target,
        reason,
        closing,
        buzzer_level,
    }
}

/// Map a raw rain reading onto the buzzer range: the dry reference gives
/// [`ALERT_MIN`], the wet reference [`ALERT_MAX`].  Readings beyond either
/// reference clamp.
pub fn alert_level(rain_analog: u16, config: &SystemConfig) -> u8 {
    let level = map_range(
        i64::from(rain_analog),
        i64::from(config.rain_dry_reference),
        i64::from(config.rain_wet_reference),
        i64::from(ALERT_MIN),
        i64::from(ALERT_MAX),
    );
    level.clamp(i64::from(ALERT_MIN), i64::from(ALERT_MAX)) as u8
}

/// Integer linear interpolation, truncating toward zero.  Unbounded:
/// callers clamp.  `in_min == in_max` returns `out_min`.
pub fn map_range(x: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    let span = in_max - in_min;
    if span == 0 {
        return out_min;
    }
    (x - in_min) * (out_max - out_min) / span + out_min
}
