//! Passive piezo buzzer on a PWM channel.
//!
//! Loudness is the duty cycle: level 0 is silent, 255 is full drive.
//! No smoothing; the level is written as given each tick.

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::{ActuatorError, Result};

pub struct Buzzer<P> {
    pwm: P,
    level: u8,
}

impl<P: SetDutyCycle> Buzzer<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, level: 0 }
    }

    pub fn set_level(&mut self, level: u8) -> Result<()> {
        self.pwm
            .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
            .map_err(|e| {
                debug!("buzzer PWM error: {:?}", e);
                ActuatorError::PwmWriteFailed
            })?;
        self.level = level;
        Ok(())
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_sounding(&self) -> bool {
        self.level > 0
    }
}
