//! Hobby servo driver (SG90-class, 50 Hz pulse-position control).
//!
//! The angle is encoded as a pulse width between [`SERVO_MIN_PULSE_US`]
//! (0°) and [`SERVO_MAX_PULSE_US`] (180°) inside a 20 ms frame.  Any PWM
//! channel that implements [`SetDutyCycle`] and runs at 50 Hz can drive it.
//!
//! The driver is a dumb actuator: it writes whatever angle it is given.
//! Rate limiting lives in [`crate::control::stepper`].
//!
//! [`SERVO_MIN_PULSE_US`]: crate::pins::SERVO_MIN_PULSE_US
//! [`SERVO_MAX_PULSE_US`]: crate::pins::SERVO_MAX_PULSE_US

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::{ActuatorError, Result};
use crate::pins;

pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    /// Command `angle_deg` (clamped to the mechanical travel).
    pub fn write_angle(&mut self, angle_deg: u8) -> Result<()> {
        let angle_deg = angle_deg.min(pins::SERVO_TRAVEL_DEG);
        let duty = duty_for_pulse(pulse_us_for_angle(angle_deg), self.pwm.max_duty_cycle());
        self.pwm.set_duty_cycle(duty).map_err(|e| {
            debug!("servo PWM error: {:?}", e);
            ActuatorError::PwmWriteFailed
        })?;
        self.angle = Some(angle_deg);
        Ok(())
    }

    /// Last angle successfully written, if any.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}

/// Pulse width in microseconds for an angle in `0..=SERVO_TRAVEL_DEG`.
pub fn pulse_us_for_angle(angle_deg: u8) -> u32 {
    let angle = u32::from(angle_deg.min(pins::SERVO_TRAVEL_DEG));
    let span = pins::SERVO_MAX_PULSE_US - pins::SERVO_MIN_PULSE_US;
    pins::SERVO_MIN_PULSE_US + angle * span / u32::from(pins::SERVO_TRAVEL_DEG)
}

/// Duty count for a pulse width, given the channel's full-scale count.
pub fn duty_for_pulse(pulse_us: u32, max_duty: u16) -> u16 {
    (u64::from(max_duty) * u64::from(pulse_us) / u64::from(pins::SERVO_PERIOD_US)) as u16
}
