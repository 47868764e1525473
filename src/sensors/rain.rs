//! MH-RD resistive rain sensor module.
//!
//! The module exposes two outputs:
//!
//! - **DO**: comparator output, active-low.  Pulled LOW once the plate
//!   resistance drops below the on-board potentiometer threshold.
//! - **AO**: the raw divider voltage.  A dry plate reads near full scale;
//!   water on the plate pulls the reading down.

use embedded_hal::digital::InputPin;
use log::debug;

use super::AnalogSource;
use crate::error::{Result, SensorError};

pub struct RainSensor<D, A> {
    digital: D,
    analog: A,
}

impl<D, A> RainSensor<D, A>
where
    D: InputPin,
    A: AnalogSource,
{
    pub fn new(digital: D, analog: A) -> Self {
        Self { digital, analog }
    }

    /// `true` when the comparator output is asserted (LOW).
    pub fn read_detected(&mut self) -> Result<bool> {
        let wet = self.digital.is_low().map_err(|e| {
            debug!("rain DO pin error: {:?}", e);
            SensorError::GpioReadFailed
        })?;
        Ok(wet)
    }

    /// Raw analog level.  Higher = drier.
    pub fn read_level(&mut self) -> Result<u16> {
        let level = self.analog.read_raw().map_err(|e| {
            debug!("rain AO conversion error: {:?}", e);
            SensorError::AdcReadFailed
        })?;
        Ok(level)
    }
}
