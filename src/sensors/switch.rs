//! Manual close switch.
//!
//! Latching toggle wired to a digital input.  HIGH = engaged, meaning the
//! user wants the vent closed regardless of weather.

use embedded_hal::digital::InputPin;
use log::debug;

use crate::error::{Result, SensorError};

pub struct ManualSwitch<P> {
    pin: P,
}

impl<P: InputPin> ManualSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// `true` while the switch is engaged.
    pub fn read(&mut self) -> Result<bool> {
        let on = self.pin.is_high().map_err(|e| {
            debug!("switch pin error: {:?}", e);
            SensorError::GpioReadFailed
        })?;
        Ok(on)
    }
}
