//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  It is generic over the
//! `embedded-hal` pin and PWM traits, so the same code runs against
//! ESP-IDF drivers on target and against mock pins on the host.

use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::servo::ServoDriver;
use crate::sensors::{AnalogSource, SensorHub, SensorSnapshot};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, D, A, SP, BP> {
    sensor_hub: SensorHub<S, D, A>,
    servo: ServoDriver<SP>,
    buzzer: Buzzer<BP>,
}

impl<S, D, A, SP, BP> HardwareAdapter<S, D, A, SP, BP> {
    pub fn new(sensor_hub: SensorHub<S, D, A>, servo: ServoDriver<SP>, buzzer: Buzzer<BP>) -> Self {
        Self {
            sensor_hub,
            servo,
            buzzer,
        }
    }

    pub fn servo(&self) -> &ServoDriver<SP> {
        &self.servo
    }

    pub fn buzzer(&self) -> &Buzzer<BP> {
        &self.buzzer
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S, D, A, SP, BP> SensorPort for HardwareAdapter<S, D, A, SP, BP>
where
    S: InputPin,
    D: InputPin,
    A: AnalogSource,
{
    fn sample(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, D, A, SP, BP> ActuatorPort for HardwareAdapter<S, D, A, SP, BP>
where
    SP: SetDutyCycle,
    BP: SetDutyCycle,
{
    fn set_buzzer(&mut self, level: u8) {
        if let Err(e) = self.buzzer.set_level(level) {
            warn!("buzzer level {}: {}", level, e);
        }
    }

    fn move_servo(&mut self, angle_deg: u8) {
        if let Err(e) = self.servo.write_angle(angle_deg) {
            warn!("servo angle {}: {}", angle_deg, e);
        }
    }
}
