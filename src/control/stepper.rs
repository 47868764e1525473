//! Non-blocking servo stepper.
//!
//! Moves the commanded servo angle one degree at a time toward the target,
//! at most once per `servo_step_interval_ms`.  Polling faster than the
//! interval is a no-op, so the angular velocity is fixed at one degree per
//! interval no matter how often the control loop runs.

use super::state::ControllerState;

/// What a single poll of the stepper did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Already at the target; nothing to do.
    AtTarget,
    /// Not at the target, but the step interval has not elapsed yet.
    Deferred,
    /// Moved one degree; carries the new angle to command.
    Stepped(u8),
}

/// Poll the stepper once at `now_ms`.
///
/// On [`StepOutcome::Stepped`] the caller must push the new angle to the
/// physical servo.
pub fn step_toward(
    state: &mut ControllerState,
    target_deg: u8,
    now_ms: u32,
    step_interval_ms: u32,
) -> StepOutcome {
    if state.servo_position == target_deg {
        return StepOutcome::AtTarget;
    }
    if now_ms.wrapping_sub(state.last_step_ms) < step_interval_ms {
        return StepOutcome::Deferred;
    }
    state.last_step_ms = now_ms;

    state.servo_position = if target_deg > state.servo_position {
        state.servo_position + 1
    } else {
        state.servo_position - 1
    };
    StepOutcome::Stepped(state.servo_position)
}
